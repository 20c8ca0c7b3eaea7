use core::fmt;
use serde::{Deserialize, Serialize};

/// Letter shown on a blank tile before a letter is chosen for it.
pub const BLANK: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    InRack,
    Held,
    OnBoard,
    /// Scored and committed in an earlier turn.
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub letter: char,
    pub value: u32,
    pub blank: bool,
    pub placement: Placement,
}

impl Tile {
    pub fn new(letter: char, value: u32) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            value,
            blank: false,
            placement: Placement::InRack,
        }
    }

    pub const fn blank() -> Self {
        Self {
            letter: BLANK,
            value: 0,
            blank: true,
            placement: Placement::InRack,
        }
    }

    /// Tile with the standard English point value for `letter`; `?` yields a
    /// blank.
    pub fn standard(letter: char) -> Option<Self> {
        if letter == BLANK {
            return Some(Self::blank());
        }
        letter_value(letter).map(|value| Self::new(letter, value))
    }

    pub const fn is_fixed(&self) -> bool {
        matches!(self.placement, Placement::Fixed)
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Assigns the played letter of a blank. Lettered tiles are unchanged.
    pub fn with_letter(mut self, letter: char) -> Self {
        if self.blank {
            self.letter = letter.to_ascii_uppercase();
        }
        self
    }

    /// Back to rack state; blanks forget the letter they were given.
    pub fn returned_to_rack(self) -> Self {
        let tile = self.with_placement(Placement::InRack);
        if tile.blank {
            Self::blank()
        } else {
            tile
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.blank && self.letter != BLANK {
            write!(f, "{}", self.letter.to_ascii_lowercase())
        } else {
            write!(f, "{}", self.letter)
        }
    }
}

/// Standard English point values.
pub fn letter_value(letter: char) -> Option<u32> {
    let value = match letter.to_ascii_uppercase() {
        'A' | 'E' | 'I' | 'L' | 'N' | 'O' | 'R' | 'S' | 'T' | 'U' => 1,
        'D' | 'G' => 2,
        'B' | 'C' | 'M' | 'P' => 3,
        'F' | 'H' | 'V' | 'W' | 'Y' => 4,
        'K' => 5,
        'J' | 'X' => 8,
        'Q' | 'Z' => 10,
        _ => return None,
    };
    Some(value)
}
