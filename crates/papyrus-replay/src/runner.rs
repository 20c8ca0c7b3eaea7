use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use papyrus_core::dictionary::{DictionaryError, WordList};
use papyrus_core::game::{Game, GameSnapshot, MoveOutcome, PlacedTile, Player};
use papyrus_core::model::bag::TileBag;
use papyrus_core::model::board::{Board, BoardError};
use papyrus_core::model::rack::{RACK_CAPACITY, Rack};
use papyrus_core::rules::{ScoredWord, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{Expectation, ReplayConfig, ResolvedOutputs, TurnConfig};
use crate::notation::{NotationError, parse_placement};

/// Replays a scripted game and records every turn.
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
    dictionary: WordList,
    turns: Vec<ScriptedTurn>,
    preview_only: bool,
}

struct ScriptedTurn {
    script: TurnConfig,
    tiles: Vec<PlacedTile>,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct ReplaySummary {
    pub turns_replayed: usize,
    pub committed: usize,
    pub rejected: usize,
    pub mismatches: Vec<String>,
    pub game_over: bool,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TurnRow<'a> {
    run_id: &'a str,
    index: usize,
    turn: u32,
    player: &'a str,
    action: &'static str,
    placements: &'a [String],
    accepted: bool,
    words: &'a [ScoredWord],
    bonus: u32,
    score: u32,
    total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    expectation_met: bool,
}

impl ReplayRunner {
    /// Loads the dictionary and parses every placement so a bad script fails
    /// before anything is played.
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let mut dictionary = match config.dictionary_path() {
            Some(path) => WordList::from_path(path)?,
            None => WordList::new(),
        };
        for word in &config.dictionary.words {
            dictionary.insert(word);
        }

        let turns = config
            .turns
            .iter()
            .enumerate()
            .map(|(index, script)| {
                let tiles = script
                    .placements
                    .iter()
                    .map(|text| parse_placement(text))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| RunnerError::Notation { turn: index, source })?;
                Ok(ScriptedTurn {
                    script: script.clone(),
                    tiles,
                })
            })
            .collect::<Result<Vec<_>, RunnerError>>()?;

        Ok(Self {
            config,
            outputs,
            dictionary,
            turns,
            preview_only: false,
        })
    }

    /// Never commit a move; every play is validated and scored only.
    pub fn preview_only(mut self, enabled: bool) -> Self {
        self.preview_only = enabled;
        self
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn build_game(&self) -> Result<Game, RunnerError> {
        let game = &self.config.game;
        let board = Board::new(game.board_size)?;
        let mut bag = TileBag::shuffled_with_seed(game.seed);
        let players = game
            .players
            .iter()
            .map(|player| {
                let rack = match &player.rack {
                    Some(letters) => Rack::from_letters(letters),
                    None => Rack::with_tiles(bag.draw(RACK_CAPACITY)),
                };
                Player::new(player.name.as_str(), rack)
            })
            .collect();
        Ok(Game::from_parts(board, bag, players, game.seed))
    }

    /// Execute the script, streaming one JSONL row per turn.
    pub fn run(&self) -> Result<ReplaySummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut game = self.build_game()?;
        let mut summary = ReplaySummary {
            turns_replayed: 0,
            committed: 0,
            rejected: 0,
            mismatches: Vec::new(),
            game_over: false,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            snapshot_path: None,
        };

        for (index, turn) in self.turns.iter().enumerate() {
            if game.is_over() {
                event!(
                    target: "papyrus_replay::runner",
                    Level::WARN,
                    index,
                    "game ended before the script did"
                );
                break;
            }

            let acting = game.current_player().name().to_string();
            if let Some(expected) = &turn.script.player {
                if expected != &acting {
                    return Err(RunnerError::WrongPlayer {
                        turn: index,
                        expected: expected.clone(),
                        found: acting,
                    });
                }
            }

            let number = game.turn();
            let seat = game.current_player_index();
            let (action, result) = if turn.script.pass {
                game.pass_turn();
                ("pass", None)
            } else {
                let submit = turn.script.submit && !self.preview_only;
                let action = if submit { "play" } else { "preview" };
                (action, Some(game.play(&turn.tiles, submit, &self.dictionary)))
            };

            let mismatch = turn
                .script
                .expect
                .as_ref()
                .and_then(|expect| check_expectation(expect, result.as_ref()));
            if let Some(message) = &mismatch {
                event!(
                    target: "papyrus_replay::runner",
                    Level::WARN,
                    index,
                    player = %acting,
                    mismatch = %message,
                    "expectation not met"
                );
                summary.mismatches.push(format!("turn {index} ({acting}): {message}"));
            }

            let empty: &[ScoredWord] = &[];
            let mut row = TurnRow {
                run_id: &self.config.run_id,
                index,
                turn: number,
                player: &acting,
                action,
                placements: &turn.script.placements,
                accepted: true,
                words: empty,
                bonus: 0,
                score: 0,
                total: game.players()[seat].score(),
                error_kind: None,
                error: None,
                expectation_met: mismatch.is_none(),
            };
            match &result {
                Some(Ok(outcome)) => {
                    row.words = &outcome.words;
                    row.bonus = outcome.bonus;
                    row.score = outcome.score;
                    if outcome.committed {
                        summary.committed += 1;
                    }
                }
                Some(Err(err)) => {
                    summary.rejected += 1;
                    row.accepted = false;
                    row.error_kind = Some(err.kind());
                    row.error = Some(err.to_string());
                    event!(
                        target: "papyrus_replay::runner",
                        Level::INFO,
                        index,
                        player = %acting,
                        kind = err.kind(),
                        "move rejected"
                    );
                }
                None => {}
            }

            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            summary.turns_replayed += 1;
        }

        writer.flush()?;
        summary.game_over = game.is_over();

        if let Some(path) = &self.outputs.snapshot {
            ensure_parent(path.parent())?;
            fs::write(path, GameSnapshot::to_json(&game)?)?;
            summary.snapshot_path = Some(path.clone());
        }

        write_markdown(&self.outputs.summary_md, &self.config.run_id, &game, &summary)?;
        Ok(summary)
    }
}

fn check_expectation(
    expect: &Expectation,
    result: Option<&Result<MoveOutcome, ValidationError>>,
) -> Option<String> {
    match (result, &expect.error) {
        (Some(Err(err)), Some(kind)) if !err.kind().eq_ignore_ascii_case(kind) => {
            Some(format!("expected {kind}, got {}", err.kind()))
        }
        (Some(Err(_)), Some(_)) => None,
        (Some(Err(err)), None) => Some(format!("unexpected rejection: {err}")),
        (Some(Ok(outcome)), Some(kind)) => {
            Some(format!("expected {kind}, but the move scored {}", outcome.score))
        }
        (None, Some(kind)) => Some(format!("expected {kind}, but the turn was passed")),
        (Some(Ok(outcome)), None) => {
            if let Some(score) = expect.score.filter(|score| *score != outcome.score) {
                return Some(format!("expected score {score}, got {}", outcome.score));
            }
            let words: Vec<&str> = outcome.words.iter().map(|w| w.word.as_str()).collect();
            match &expect.words {
                Some(expected) if !expected.iter().map(String::as_str).eq(words.iter().copied()) => {
                    Some(format!("expected words {expected:?}, got {words:?}"))
                }
                _ => None,
            }
        }
        (None, None) => None,
    }
}

fn write_markdown(
    path: &Path,
    run_id: &str,
    game: &Game,
    summary: &ReplaySummary,
) -> Result<(), RunnerError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# Replay `{run_id}`")?;
    writeln!(out)?;
    writeln!(out, "- Turns replayed: {}", summary.turns_replayed)?;
    writeln!(out, "- Moves committed: {}", summary.committed)?;
    writeln!(out, "- Moves rejected: {}", summary.rejected)?;
    writeln!(out, "- Tiles left in bag: {}", game.bag_len())?;
    writeln!(out, "- Game over: {}", if summary.game_over { "yes" } else { "no" })?;
    writeln!(out)?;

    writeln!(out, "| Player | Score | Final | Rack |")?;
    writeln!(out, "|--------|------:|------:|------|")?;
    for (player, final_score) in game.players().iter().zip(game.final_scores()) {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            player.name(),
            player.score(),
            final_score,
            player.rack().letters()
        )?;
    }
    writeln!(out)?;

    if !summary.mismatches.is_empty() {
        writeln!(out, "## Expectation mismatches")?;
        writeln!(out)?;
        for mismatch in &summary.mismatches {
            writeln!(out, "- {mismatch}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Board")?;
    writeln!(out)?;
    writeln!(out, "```")?;
    for row in game.board().rows() {
        writeln!(out, "{row}")?;
    }
    writeln!(out, "```")?;
    out.flush()?;
    Ok(())
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize turn row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error("cannot build board: {0}")]
    Board(#[from] BoardError),
    #[error("turn {turn}: {source}")]
    Notation {
        turn: usize,
        #[source]
        source: NotationError,
    },
    #[error("turn {turn} scripted for '{expected}' but '{found}' is to play")]
    WrongPlayer {
        turn: usize,
        expected: String,
        found: String,
    },
}
