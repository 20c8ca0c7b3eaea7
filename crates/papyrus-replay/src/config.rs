use papyrus_core::model::board::{MIN_SIZE, STANDARD_SIZE};
use papyrus_core::model::rack::RACK_CAPACITY;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const MAX_PLAYERS: usize = 4;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub run_id: String,
    #[serde(default)]
    pub game: GameConfig,
    pub dictionary: DictionaryConfig,
    pub turns: Vec<TurnConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory of the config file; relative word list paths resolve here.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ReplayConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ReplayConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ConfigValidationError> {
        validate_run_id(&self.run_id)?;
        self.game.validate()?;
        self.dictionary.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        validate_turns(&self.turns, &self.game.players)?;
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            snapshot: self
                .outputs
                .snapshot
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
        }
    }

    /// Word list path with relative paths anchored at the config file.
    pub fn dictionary_path(&self) -> Option<PathBuf> {
        let path = PathBuf::from(self.dictionary.path.as_ref()?);
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path),
        }
    }
}

/// Board and seating block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_board_size")]
    pub board_size: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            seed: 0,
            players: default_players(),
        }
    }
}

impl GameConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.board_size < MIN_SIZE || self.board_size % 2 == 0 {
            return Err(ConfigValidationError::InvalidField {
                field: "game.board_size".to_string(),
                message: format!("board size must be odd and at least {MIN_SIZE}"),
            });
        }

        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(ConfigValidationError::InvalidField {
                field: "game.players".to_string(),
                message: format!("between 1 and {MAX_PLAYERS} players are required"),
            });
        }

        let mut seen = HashSet::new();
        for (index, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(ConfigValidationError::InvalidField {
                    field: format!("game.players[{index}].name"),
                    message: "player name must not be empty".to_string(),
                });
            }
            if !seen.insert(player.name.as_str()) {
                return Err(ConfigValidationError::InvalidField {
                    field: "game.players".to_string(),
                    message: format!("player '{}' defined more than once", player.name),
                });
            }
            if let Some(rack) = &player.rack {
                let valid = rack.chars().all(|c| c.is_ascii_alphabetic() || c == '?');
                if !valid || rack.chars().count() > RACK_CAPACITY {
                    return Err(ConfigValidationError::InvalidField {
                        field: format!("game.players[{index}].rack"),
                        message: format!(
                            "rack holds at most {RACK_CAPACITY} letters or '?' blanks"
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

fn default_board_size() -> usize {
    STANDARD_SIZE
}

fn default_players() -> Vec<PlayerConfig> {
    vec![PlayerConfig {
        name: "Player".to_string(),
        rack: None,
    }]
}

/// A seated player; a fixed rack replaces the initial draw from the bag.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(from = "PlayerEntry")]
pub struct PlayerConfig {
    pub name: String,
    pub rack: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerEntry {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        rack: Option<String>,
    },
}

impl From<PlayerEntry> for PlayerConfig {
    fn from(entry: PlayerEntry) -> Self {
        match entry {
            PlayerEntry::Name(name) => PlayerConfig { name, rack: None },
            PlayerEntry::Full { name, rack } => PlayerConfig { name, rack },
        }
    }
}

/// Inline words, a word list file, or both.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl DictionaryConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        let has_path = self
            .path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty());
        if self.words.is_empty() && !has_path {
            return Err(ConfigValidationError::InvalidField {
                field: "dictionary".to_string(),
                message: "either words or a path must be given".to_string(),
            });
        }
        Ok(())
    }
}

/// One scripted turn.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TurnConfig {
    /// Name of the player expected to act.
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub placements: Vec<String>,
    #[serde(default = "default_submit")]
    pub submit: bool,
    #[serde(default)]
    pub pass: bool,
    #[serde(default)]
    pub expect: Option<Expectation>,
}

fn default_submit() -> bool {
    true
}

/// Asserted result of a turn: a score, or the kind of rejection.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Expectation {
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub words: Option<Vec<String>>,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
    #[serde(default)]
    pub snapshot: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ConfigValidationError> {
        let mut entries = vec![
            ("outputs.jsonl", self.jsonl.as_str()),
            ("outputs.summary_md", self.summary_md.as_str()),
        ];
        if let Some(snapshot) = &self.snapshot {
            entries.push(("outputs.snapshot", snapshot.as_str()));
        }
        for (label, value) in entries {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ConfigValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ConfigValidationError> {
    if run_id.trim().is_empty() {
        return Err(ConfigValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ConfigValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_turns(
    turns: &[TurnConfig],
    players: &[PlayerConfig],
) -> Result<(), ConfigValidationError> {
    if turns.is_empty() {
        return Err(ConfigValidationError::InvalidField {
            field: "turns".to_string(),
            message: "at least one turn must be scripted".to_string(),
        });
    }

    for (index, turn) in turns.iter().enumerate() {
        if let Some(name) = &turn.player {
            if !players.iter().any(|p| &p.name == name) {
                return Err(ConfigValidationError::InvalidField {
                    field: format!("turns[{index}].player"),
                    message: format!("player '{name}' is not seated"),
                });
            }
        }
        if turn.pass && !turn.placements.is_empty() {
            return Err(ConfigValidationError::InvalidField {
                field: format!("turns[{index}]"),
                message: "a pass cannot place tiles".to_string(),
            });
        }
        if let Some(expect) = &turn.expect {
            if expect.score.is_some() && expect.error.is_some() {
                return Err(ConfigValidationError::InvalidField {
                    field: format!("turns[{index}].expect"),
                    message: "expect either a score or an error, not both".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    pub snapshot: Option<PathBuf>,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ConfigValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
