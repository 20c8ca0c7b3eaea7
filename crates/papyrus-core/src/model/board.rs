use crate::geometry::{Boundary, Orientation, Position};
use crate::model::modifier::Modifier;
use crate::model::square::{Square, SquareId};
use crate::model::tile::{Placement, Tile};
use thiserror::Error;

pub const STANDARD_SIZE: usize = 15;
pub const MIN_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {0} must be odd and at least {MIN_SIZE}")]
    InvalidSize(usize),
    #[error("square {0} is outside the board")]
    OutOfBounds(SquareId),
    #[error("square {0} is already occupied")]
    Occupied(SquareId),
}

/// Row-major grid of squares. The board is the only owner of its squares.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size < MIN_SIZE || size % 2 == 0 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::with_premiums(size))
    }

    pub fn standard() -> Self {
        Self::with_premiums(STANDARD_SIZE)
    }

    /// Lays out every square for an already checked size.
    fn with_premiums(size: usize) -> Self {
        let squares = (0..size * size)
            .map(|index| {
                let (row, col) = (index / size, index % size);
                Square::new(Modifier::for_cell(row, col, size), row, col)
            })
            .collect();
        Self { size, squares }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn center(&self) -> SquareId {
        SquareId::new(self.size / 2, self.size / 2)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }

    pub fn square_at(&self, row: usize, col: usize) -> Option<&Square> {
        self.index(row, col).map(|index| &self.squares[index])
    }

    pub fn square(&self, id: SquareId) -> Option<&Square> {
        self.square_at(id.row, id.col)
    }

    /// Looks the square up by row and column, whichever way the position is
    /// phrased.
    pub fn square_at_position(&self, position: &Position) -> Option<&Square> {
        if position.is_invalid() {
            return None;
        }
        self.square_at(position.row(), position.col())
    }

    pub fn square_on(&self, orientation: Orientation, iterable: usize, fixed: usize) -> Option<&Square> {
        match orientation {
            Orientation::Horizontal => self.square_at(fixed, iterable),
            Orientation::Vertical => self.square_at(iterable, fixed),
        }
    }

    /// Squares from the start to the end of the boundary inclusive; empty when
    /// the boundary is invalid.
    pub fn squares_in(&self, boundary: &Boundary) -> Vec<Option<&Square>> {
        if !boundary.is_valid() {
            return Vec::new();
        }
        let orientation = boundary.orientation();
        let fixed = boundary.fixed();
        (boundary.start().iterable()..=boundary.end().iterable())
            .map(|iterable| self.square_on(orientation, iterable, fixed))
            .collect()
    }

    pub fn is_empty_at(&self, position: &Position) -> bool {
        self.square_at_position(position)
            .is_some_and(Square::is_empty)
    }

    pub fn is_filled_at(&self, position: &Position) -> bool {
        self.square_at_position(position)
            .is_some_and(|square| !square.is_empty())
    }

    /// True when no tile has been placed anywhere.
    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Square::is_empty)
    }

    pub fn has_fixed_tiles(&self) -> bool {
        self.squares
            .iter()
            .any(|square| square.tile().is_some_and(Tile::is_fixed))
    }

    /// Letters along a boundary; empty squares are skipped.
    pub fn word_in(&self, boundary: &Boundary) -> String {
        self.squares_in(boundary)
            .into_iter()
            .flatten()
            .filter_map(|square| square.tile().map(|tile| tile.letter))
            .collect()
    }

    pub fn place(&mut self, row: usize, col: usize, tile: Tile) -> Result<(), BoardError> {
        let id = SquareId::new(row, col);
        let index = self.index(row, col).ok_or(BoardError::OutOfBounds(id))?;
        let slot = self.squares[index].tile_mut();
        if slot.is_some() {
            return Err(BoardError::Occupied(id));
        }
        *slot = Some(tile.with_placement(Placement::OnBoard));
        Ok(())
    }

    /// Picks a tile placed this turn back up. Fixed tiles stay where they are.
    pub fn pick_up(&mut self, row: usize, col: usize) -> Option<Tile> {
        let index = self.index(row, col)?;
        let slot = self.squares[index].tile_mut();
        if slot.is_some_and(|tile| tile.is_fixed()) {
            return None;
        }
        slot.take().map(|tile| tile.with_placement(Placement::Held))
    }

    /// Marks the tile on a square as committed.
    pub fn fix(&mut self, id: SquareId) -> bool {
        let Some(index) = self.index(id.row, id.col) else {
            return false;
        };
        match self.squares[index].tile_mut() {
            Some(tile) => {
                tile.placement = Placement::Fixed;
                true
            }
            None => false,
        }
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    /// Squares holding tiles placed this turn and not yet committed.
    pub fn placed_this_turn(&self) -> Vec<SquareId> {
        self.squares
            .iter()
            .filter(|square| square.tile().is_some_and(|tile| !tile.is_fixed()))
            .map(Square::id)
            .collect()
    }

    /// One string per row: tile letters where occupied, premium symbols
    /// elsewhere.
    pub fn rows(&self) -> Vec<String> {
        self.squares
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|square| match square.tile() {
                        Some(tile) => tile.to_string(),
                        None => square.modifier().symbol().to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
