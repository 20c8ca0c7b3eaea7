use crate::geometry::axis::{Axis, Direction, Orientation};
use core::fmt;
use std::hash::{Hash, Hasher};

/// A cell addressed along a line: `iterable` moves along the axis, `fixed`
/// names the row (horizontal) or column (vertical) the line sits on.
///
/// Positions only exist inside the board they were built for; the
/// constructors return `None` for coordinates outside `[0, size)`.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    axis: Axis,
    iterable: usize,
    fixed: usize,
    size: usize,
}

impl Position {
    pub fn new(axis: Axis, iterable: usize, fixed: usize, size: usize) -> Option<Self> {
        let position = Self {
            axis,
            iterable,
            fixed,
            size,
        };
        if position.is_invalid() {
            None
        } else {
            Some(position)
        }
    }

    pub fn from_row_col(axis: Axis, row: usize, col: usize, size: usize) -> Option<Self> {
        let (iterable, fixed) = if axis.is_horizontal() {
            (col, row)
        } else {
            (row, col)
        };
        Self::new(axis, iterable, fixed, size)
    }

    pub const fn axis(&self) -> Axis {
        self.axis
    }

    pub const fn orientation(&self) -> Orientation {
        self.axis.orientation
    }

    pub const fn direction(&self) -> Direction {
        self.axis.direction
    }

    pub const fn iterable(&self) -> usize {
        self.iterable
    }

    pub const fn fixed(&self) -> usize {
        self.fixed
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn is_horizontal(&self) -> bool {
        self.axis.is_horizontal()
    }

    pub const fn row(&self) -> usize {
        if self.is_horizontal() {
            self.fixed
        } else {
            self.iterable
        }
    }

    pub const fn col(&self) -> usize {
        if self.is_horizontal() {
            self.iterable
        } else {
            self.fixed
        }
    }

    pub const fn is_invalid(&self) -> bool {
        self.out_of_bounds(self.iterable) || self.out_of_bounds(self.fixed)
    }

    const fn out_of_bounds(&self, value: usize) -> bool {
        value >= self.size
    }

    pub const fn at_edge_of_board(&self, value: usize) -> bool {
        value == 0 || value + 1 == self.size
    }

    /// Steps `iterable` once in the axis direction. At the edge of the board
    /// the same position comes back instead of an invalid one.
    pub fn next(&self) -> Position {
        Position {
            iterable: self.adjust(self.iterable, self.axis.direction),
            ..*self
        }
    }

    fn adjust(&self, value: usize, direction: Direction) -> usize {
        match direction {
            Direction::Forward if value + 1 < self.size => value + 1,
            Direction::Backward if value > 0 => value - 1,
            _ => value,
        }
    }

    /// Same iterable and fixed values read on the perpendicular axis.
    pub fn on_other_axis(&self, direction: Direction) -> Position {
        Position {
            axis: self.axis.inverse(direction),
            ..*self
        }
    }

    /// Sets the direction and, for horizontal positions, swaps the roles of
    /// iterable and fixed.
    pub fn change_direction(&self, direction: Direction) -> Position {
        let horizontal = self.is_horizontal();
        Position {
            axis: self.axis.with_direction(direction),
            iterable: if horizontal { self.fixed } else { self.iterable },
            fixed: if horizontal { self.iterable } else { self.fixed },
            size: self.size,
        }
    }

    /// Sets only the direction flag; iterable and fixed are untouched.
    pub fn switch_direction(&self, direction: Direction) -> Position {
        if self.axis.direction == direction {
            return *self;
        }
        Position {
            axis: self.axis.with_direction(direction),
            ..*self
        }
    }

    /// The same cell addressed along the perpendicular line.
    pub fn crossing(&self, direction: Direction) -> Position {
        Position {
            axis: self.axis.inverse(direction),
            iterable: self.fixed,
            fixed: self.iterable,
            size: self.size,
        }
    }

    /// Moves to another cell on the same line.
    pub fn with_iterable(&self, iterable: usize) -> Option<Position> {
        Self::new(self.axis, iterable, self.fixed, self.size)
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.axis == other.axis && self.iterable == other.iterable && self.fixed == other.fixed
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.axis.hash(state);
        self.iterable.hash(state);
        self.fixed.hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.axis, self.iterable, self.fixed)
    }
}
