use std::fs;
use std::path::Path;

use papyrus_core::game::GameSnapshot;
use papyrus_replay::config::ReplayConfig;
use papyrus_replay::runner::{ReplayRunner, RunnerError};
use tempfile::tempdir;

const TURNS: &str = r#"
  - player: "ann"
    placements: ["G8:C", "H8:A", "I8:T"]
    expect:
      score: 10
  - player: "bo"
    placements: ["J10:T"]
    expect:
      error: "NoIntersection"
  - player: "bo"
    placements: ["H9:T", "I9:O"]
    expect:
      score: 8
      words: ["TO", "AT", "TO"]
  - player: "ann"
    placements: ["J8:S"]
    expect:
      score: 6
"#;

fn load_config(output_dir: &Path, turns: &str) -> ReplayConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
game:
  seed: 4242
  players:
    - name: "ann"
      rack: "CATSONE"
    - name: "bo"
      rack: "TOTONEA"
dictionary:
  words: ["CAT", "CATS", "AT", "TO"]
turns:{turns}
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
  snapshot: "{snapshot}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("turns.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
        snapshot = output_dir.join("final.json").display(),
    );

    let mut cfg: ReplayConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn replay_writes_rows_summary_and_snapshot() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), TURNS);
    let outputs = config.resolved_outputs();

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.turns_replayed, 4);
    assert_eq!(summary.committed, 3);
    assert_eq!(summary.rejected, 1);
    assert!(summary.mismatches.is_empty(), "{:?}", summary.mismatches);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["score"], 10);
    assert_eq!(rows[0]["words"][0]["word"], "CAT");
    assert_eq!(rows[1]["accepted"], false);
    assert_eq!(rows[1]["error_kind"], "NoIntersection");
    assert_eq!(rows[2]["total"], 8);
    assert_eq!(rows[3]["total"], 16);

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| ann | 16 |"));
    assert!(markdown.contains("T..d..CATS.d..T"));

    let snapshot_path = summary.snapshot_path.expect("snapshot written");
    let snapshot = GameSnapshot::from_json(&fs::read_to_string(snapshot_path).expect("readable"))
        .expect("snapshot parses");
    assert_eq!(snapshot.players[0].score, 16);
    assert_eq!(snapshot.players[1].score, 8);
    assert_eq!(snapshot.turn, 4);
}

#[test]
fn preview_only_leaves_the_board_empty() {
    let dir = tempdir().expect("temp dir");
    let turns = r#"
  - placements: ["G8:C", "H8:A", "I8:T"]
    expect:
      score: 10
"#;
    let config = load_config(dir.path(), turns);
    let outputs = config.resolved_outputs();

    let runner = ReplayRunner::new(config, outputs)
        .expect("runner created")
        .preview_only(true);
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.committed, 0);
    assert!(summary.mismatches.is_empty());
    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    assert!(jsonl.contains("\"action\":\"preview\""));

    let snapshot_path = summary.snapshot_path.expect("snapshot written");
    let snapshot = GameSnapshot::from_json(&fs::read_to_string(snapshot_path).expect("readable"))
        .expect("snapshot parses");
    assert_eq!(snapshot.board[7], "T..d...*...d..T");
    assert_eq!(snapshot.players[0].score, 0);
}

#[test]
fn wrong_player_stops_the_replay() {
    let dir = tempdir().expect("temp dir");
    let turns = r#"
  - player: "bo"
    placements: ["G8:C", "H8:A", "I8:T"]
"#;
    let config = load_config(dir.path(), turns);
    let outputs = config.resolved_outputs();

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let err = runner.run().expect_err("bo is not first to play");
    assert!(matches!(err, RunnerError::WrongPlayer { turn: 0, .. }));
}

#[test]
fn malformed_placement_fails_before_play() {
    let dir = tempdir().expect("temp dir");
    let turns = r#"
  - placements: ["G8-C"]
"#;
    let config = load_config(dir.path(), turns);
    let outputs = config.resolved_outputs();

    let err = ReplayRunner::new(config, outputs)
        .err()
        .expect("notation error");
    assert!(matches!(err, RunnerError::Notation { turn: 0, .. }));
}

#[test]
fn unmet_expectations_are_collected() {
    let dir = tempdir().expect("temp dir");
    let turns = r#"
  - placements: ["G8:C", "H8:A", "I8:T"]
    expect:
      score: 11
"#;
    let config = load_config(dir.path(), turns);
    let outputs = config.resolved_outputs();

    let summary = ReplayRunner::new(config, outputs)
        .expect("runner created")
        .run()
        .expect("replay completes");
    assert_eq!(summary.mismatches.len(), 1);
    assert!(summary.mismatches[0].contains("expected score 11, got 10"));
}
