//! JSON telemetry for replay runs.
//!
//! Events from the engine (`papyrus_core::rules`, `papyrus_core::game`) and
//! the runner (`papyrus_replay::runner`) land one per line in
//! `telemetry.jsonl`, next to the run summary.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Directory holding the summary, or the working directory for a bare file
/// name.
pub fn telemetry_dir(outputs: &ResolvedOutputs) -> PathBuf {
    outputs
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `RUST_LOG` wins; otherwise the configured level applies to the papyrus
/// crates only.
fn level_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = logging
            .level()
            .unwrap_or(Level::INFO)
            .as_str()
            .to_ascii_lowercase();
        EnvFilter::new(format!("papyrus_core={level},papyrus_replay={level}"))
    })
}

pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let dir = telemetry_dir(outputs);
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    let telemetry_path = dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    // Only the first run in a process installs the global subscriber.
    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(level_filter(logging))
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(writer)
        .try_init()
        .is_ok();

    tracing::event!(
        target: "papyrus_replay::logging",
        Level::INFO,
        run_id,
        installed,
        "structured logging enabled"
    );

    Ok(Some(LoggingGuard {
        _worker: worker,
        telemetry_path,
    }))
}
