use crate::geometry::Boundary;
use crate::model::board::Board;
use crate::model::rack::RACK_CAPACITY;
use crate::rules::validator::ValidatedMove;
use serde::Serialize;

/// Bonus for playing a full rack in one move.
pub const FULL_RACK_BONUS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredWord {
    pub word: String,
    pub score: u32,
    #[serde(skip)]
    pub boundary: Boundary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveScore {
    pub words: Vec<ScoredWord>,
    pub bonus: u32,
    pub total: u32,
}

/// Letter values along the boundary times every word premium on it.
pub fn score_word(board: &Board, boundary: &Boundary) -> u32 {
    let squares = board.squares_in(boundary);
    let letters: u32 = squares.iter().flatten().map(|square| square.letter_value()).sum();
    let multiplier: u32 = squares
        .iter()
        .flatten()
        .map(|square| square.word_multiplier())
        .product();
    letters * multiplier
}

pub fn score_move(board: &Board, validated: &ValidatedMove, tiles_placed: usize) -> MoveScore {
    let words: Vec<ScoredWord> = validated
        .scoring_boundaries()
        .map(|boundary| ScoredWord {
            word: board.word_in(boundary),
            score: score_word(board, boundary),
            boundary: *boundary,
        })
        .collect();
    let bonus = if tiles_placed >= RACK_CAPACITY {
        FULL_RACK_BONUS
    } else {
        0
    };
    let total = words.iter().map(|word| word.score).sum::<u32>() + bonus;
    MoveScore {
        words,
        bonus,
        total,
    }
}
