use super::session::Game;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSnapshot {
    pub name: String,
    pub score: u32,
    pub rack: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub turn: u32,
    pub current_player: usize,
    pub bag_remaining: usize,
    pub players: Vec<PlayerSnapshot>,
    /// One string per row: letters for tiles (lowercase for blanks), premium
    /// symbols for empty squares.
    pub board: Vec<String>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        GameSnapshot {
            seed: game.seed(),
            turn: game.turn(),
            current_player: game.current_player_index(),
            bag_remaining: game.bag_len(),
            players: game
                .players()
                .iter()
                .map(|player| PlayerSnapshot {
                    name: player.name().to_string(),
                    score: player.score(),
                    rack: player.rack().letters(),
                })
                .collect(),
            board: game.board().rows(),
        }
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
