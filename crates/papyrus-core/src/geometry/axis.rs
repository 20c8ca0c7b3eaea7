use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    pub const fn flipped(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Signed step applied to an iterable coordinate.
    pub const fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Orientation of a line on the board together with the sense it is walked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axis {
    pub orientation: Orientation,
    pub direction: Direction,
}

impl Axis {
    pub const fn new(orientation: Orientation, direction: Direction) -> Self {
        Self {
            orientation,
            direction,
        }
    }

    pub const fn horizontal(direction: Direction) -> Self {
        Self::new(Orientation::Horizontal, direction)
    }

    pub const fn vertical(direction: Direction) -> Self {
        Self::new(Orientation::Vertical, direction)
    }

    /// Rotates the axis by 90 degrees, taking the supplied direction.
    pub const fn inverse(self, direction: Direction) -> Axis {
        Axis::new(self.orientation.flipped(), direction)
    }

    /// Same orientation, opposite direction.
    pub const fn flipped(self) -> Axis {
        Axis::new(self.orientation, self.direction.reversed())
    }

    pub const fn with_direction(self, direction: Direction) -> Axis {
        Axis::new(self.orientation, direction)
    }

    pub const fn is_horizontal(self) -> bool {
        self.orientation.is_horizontal()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match (self.orientation, self.direction) {
            (Orientation::Horizontal, Direction::Forward) => "Horizontal(Forward)",
            (Orientation::Horizontal, Direction::Backward) => "Horizontal(Backward)",
            (Orientation::Vertical, Direction::Forward) => "Vertical(Forward)",
            (Orientation::Vertical, Direction::Backward) => "Vertical(Backward)",
        };
        f.write_str(label)
    }
}
