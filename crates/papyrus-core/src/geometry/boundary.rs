use crate::geometry::axis::{Direction, Orientation};
use crate::geometry::position::Position;
use core::fmt;

/// Inclusive run of cells on one row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    start: Position,
    end: Position,
}

impl Boundary {
    /// Both endpoints are normalised to the forward direction. Returns `None`
    /// when the endpoints do not share a line or are out of order.
    pub fn new(start: Position, end: Position) -> Option<Self> {
        let boundary = Self {
            start: start.switch_direction(Direction::Forward),
            end: end.switch_direction(Direction::Forward),
        };
        boundary.is_valid().then_some(boundary)
    }

    pub fn single(position: Position) -> Self {
        let position = position.switch_direction(Direction::Forward);
        Self {
            start: position,
            end: position,
        }
    }

    /// Smallest boundary covering every position. All positions must share
    /// orientation and fixed coordinate.
    pub fn spanning(positions: &[Position]) -> Option<Self> {
        let first = positions.first()?;
        if positions
            .iter()
            .any(|p| p.orientation() != first.orientation() || p.fixed() != first.fixed())
        {
            return None;
        }
        let start = positions.iter().min_by_key(|p| p.iterable())?;
        let end = positions.iter().max_by_key(|p| p.iterable())?;
        Self::new(*start, *end)
    }

    pub const fn start(&self) -> Position {
        self.start
    }

    pub const fn end(&self) -> Position {
        self.end
    }

    pub const fn orientation(&self) -> Orientation {
        self.start.orientation()
    }

    pub const fn fixed(&self) -> usize {
        self.start.fixed()
    }

    pub fn is_valid(&self) -> bool {
        !self.start.is_invalid()
            && !self.end.is_invalid()
            && self.start.orientation() == self.end.orientation()
            && self.start.fixed() == self.end.fixed()
            && self.end.iterable() >= self.start.iterable()
    }

    /// Squares covered, ends included. A boundary always covers at least one.
    pub fn len(&self) -> usize {
        self.end.iterable() - self.start.iterable() + 1
    }

    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        let (iterable, fixed) = match self.orientation() {
            Orientation::Horizontal => (col, row),
            Orientation::Vertical => (row, col),
        };
        fixed == self.fixed() && (self.start.iterable()..=self.end.iterable()).contains(&iterable)
    }

    /// Positions from start to end inclusive.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.start.iterable()..=self.end.iterable())
            .filter_map(move |iterable| self.start.with_iterable(iterable))
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})..=({},{})",
            self.start.row(),
            self.start.col(),
            self.end.row(),
            self.end.col()
        )
    }
}
