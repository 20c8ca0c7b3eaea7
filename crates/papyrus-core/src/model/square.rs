use crate::model::board::{Board, BoardError};
use crate::model::modifier::Modifier;
use crate::model::tile::Tile;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Index of a square on its board. Squares compare by this index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SquareId {
    pub row: usize,
    pub col: usize,
}

impl SquareId {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

#[derive(Debug, Clone)]
pub struct Square {
    id: SquareId,
    modifier: Modifier,
    tile: Option<Tile>,
}

impl Square {
    /// Builds every square of a `size` × `size` board with its premium.
    pub fn create_all(size: usize) -> Result<Board, BoardError> {
        Board::new(size)
    }

    pub(crate) fn new(modifier: Modifier, row: usize, col: usize) -> Self {
        Self {
            id: SquareId::new(row, col),
            modifier,
            tile: None,
        }
    }

    pub const fn id(&self) -> SquareId {
        self.id
    }

    pub const fn row(&self) -> usize {
        self.id.row
    }

    pub const fn column(&self) -> usize {
        self.id.col
    }

    pub const fn modifier(&self) -> Modifier {
        self.modifier
    }

    pub const fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    pub const fn is_empty(&self) -> bool {
        self.tile.is_none()
    }

    pub(crate) fn tile_mut(&mut self) -> &mut Option<Tile> {
        &mut self.tile
    }

    /// Tile points scaled by the letter premium. Fixed tiles ignore the premium.
    pub fn letter_value(&self) -> u32 {
        match &self.tile {
            None => 0,
            Some(tile) if tile.is_fixed() => tile.value,
            Some(tile) => tile.value * self.modifier.letter_multiplier(),
        }
    }

    /// Word premium contributed by this square; 1 when empty or fixed.
    pub fn word_multiplier(&self) -> u32 {
        match &self.tile {
            Some(tile) if !tile.is_fixed() => self.modifier.word_multiplier(),
            _ => 1,
        }
    }
}

impl PartialEq for Square {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Square {}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tile {
            Some(tile) => write!(f, "{tile}"),
            None => f.write_str("_"),
        }
    }
}
