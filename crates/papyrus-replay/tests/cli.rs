use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_script(dir: &Path, board_size: usize, expected_score: u32) -> PathBuf {
    fs::write(dir.join("words.txt"), "# test words\nCAT\nAT\n").expect("word list written");
    let yaml = format!(
        r#"
run_id: "cli"
game:
  board_size: {board_size}
  players:
    - name: "ann"
      rack: "CATXYZQ"
dictionary:
  path: "words.txt"
turns:
  - placements: ["G8:C", "H8:A", "I8:T"]
    expect:
      score: {expected_score}
outputs:
  jsonl: "{out}/{{run_id}}/turns.jsonl"
  summary_md: "{out}/{{run_id}}/summary.md"
"#,
        out = dir.join("out").display(),
    );
    let path = dir.join("script.yaml");
    fs::write(&path, yaml).expect("script written");
    path
}

fn replay() -> Command {
    Command::cargo_bin("papyrus-replay").expect("binary built")
}

#[test]
fn validate_only_skips_the_replay() {
    let dir = tempdir().expect("temp dir");
    let script = write_script(dir.path(), 15, 10);

    replay()
        .arg("--config")
        .arg(&script)
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation-only mode: 2 dictionary words"));

    assert!(!dir.path().join("out").join("cli").join("turns.jsonl").exists());
}

#[test]
fn replay_reports_outputs() {
    let dir = tempdir().expect("temp dir");
    let script = write_script(dir.path(), 15, 10);

    replay()
        .arg("--config")
        .arg(&script)
        .args(["--run-id", "renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replay complete for 'renamed': 1 turns"));

    let summary = dir.path().join("out").join("renamed").join("summary.md");
    let markdown = fs::read_to_string(summary).expect("summary written");
    assert!(markdown.contains("| ann | 10 |"));
}

#[test]
fn invalid_board_size_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let script = write_script(dir.path(), 14, 10);

    replay()
        .arg("--config")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("game.board_size"));
}

#[test]
fn unmet_expectation_fails_the_run() {
    let dir = tempdir().expect("temp dir");
    let script = write_script(dir.path(), 15, 12);

    replay()
        .arg("--config")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected score 12, got 10"))
        .stderr(predicate::str::contains("1 expectation(s) not met"));
}

#[test]
fn preview_only_commits_nothing() {
    let dir = tempdir().expect("temp dir");
    let script = write_script(dir.path(), 15, 10);

    replay()
        .arg("--config")
        .arg(&script)
        .arg("--preview-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 committed"));
}

#[test]
fn structured_logging_records_engine_events() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("words.txt"), "CAT\nAT\n").expect("word list written");
    let out = dir.path().join("out");
    let yaml = format!(
        r#"
run_id: "traced"
game:
  players:
    - name: "ann"
      rack: "CATXYZQ"
dictionary:
  path: "words.txt"
turns:
  - placements: ["G8:C"]
    expect:
      error: "NoCenterIntersection"
  - placements: ["G8:C", "H8:A", "I8:T"]
    expect:
      score: 10
outputs:
  jsonl: "{out}/{{run_id}}/turns.jsonl"
  summary_md: "{out}/{{run_id}}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
"#,
        out = out.display(),
    );
    let script = dir.path().join("script.yaml");
    fs::write(&script, yaml).expect("script written");

    replay()
        .arg("--config")
        .arg(&script)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("Telemetry log:"));

    let telemetry = fs::read_to_string(out.join("traced").join("telemetry.jsonl"))
        .expect("telemetry written");
    let rows: Vec<serde_json::Value> = telemetry
        .lines()
        .map(|line| serde_json::from_str(line).expect("json row"))
        .collect();

    let committed = rows.iter().find(|row| {
        row["target"] == "papyrus_core::game" && row["fields"]["message"] == "move committed"
    });
    let committed = committed.expect("committed move logged");
    assert_eq!(committed["fields"]["score"], 10);
    assert_eq!(committed["fields"]["words"], "CAT");

    assert!(rows.iter().any(|row| {
        row["target"] == "papyrus_core::rules"
            && row["fields"]["message"] == "move rejected"
            && row["fields"]["rule"] == "NoCenterIntersection"
    }));
}
