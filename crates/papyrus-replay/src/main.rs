use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use papyrus_replay::config::ReplayConfig;
use papyrus_replay::logging::init_logging;
use papyrus_replay::runner::ReplayRunner;

/// Replays scripted Papyrus games against the rules engine.
#[derive(Debug, Parser)]
#[command(
    name = "papyrus-replay",
    author,
    version,
    about = "Deterministic Papyrus move replay harness"
)]
struct Cli {
    /// Path to the YAML script.
    #[arg(short, long, value_name = "FILE", default_value = "scripts/opening.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the seed used to shuffle the tile bag.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the script (nothing is played).
    #[arg(long)]
    validate_only: bool,

    /// Validate and score every move without committing any of them.
    #[arg(long)]
    preview_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(seed) = cli.seed {
        config.game.seed = seed;
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let player_count = config.game.players.len();
    let turn_count = config.turns.len();

    println!(
        "Loaded script '{run_id}' with {player_count} player{} and {turn_count} turn{}",
        if player_count == 1 { "" } else { "s" },
        if turn_count == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = ReplayRunner::new(config, outputs)
        .with_context(|| format!("preparing replay from {}", cli.config.display()))?
        .preview_only(cli.preview_only);

    if cli.validate_only {
        println!(
            "Validation-only mode: {} dictionary words loaded, replay skipped.",
            runner.dictionary_len()
        );
        return Ok(());
    }

    let summary = runner.run().context("replaying turns")?;
    println!(
        "Replay complete for '{run_id}': {} turns ({} committed, {} rejected) → {}",
        summary.turns_replayed,
        summary.committed,
        summary.rejected,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(path) = summary.snapshot_path.as_ref() {
        println!("Final snapshot: {}", path.display());
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    if !summary.mismatches.is_empty() {
        for mismatch in &summary.mismatches {
            eprintln!("MISMATCH: {mismatch}");
        }
        bail!("{} expectation(s) not met", summary.mismatches.len());
    }

    Ok(())
}
