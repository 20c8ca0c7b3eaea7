use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    Center,
}

impl Modifier {
    pub const fn letter_multiplier(self) -> u32 {
        match self {
            Modifier::DoubleLetter => 2,
            Modifier::TripleLetter => 3,
            _ => 1,
        }
    }

    pub const fn word_multiplier(self) -> u32 {
        match self {
            Modifier::Center | Modifier::DoubleWord => 2,
            Modifier::TripleWord => 3,
            _ => 1,
        }
    }

    /// Premium for a cell, derived from its offset to the center of a board of
    /// odd side `size`. Every rule matches offsets on either side of the
    /// center, so the layout is symmetric under reflection and rotation.
    pub fn for_cell(row: usize, col: usize, size: usize) -> Modifier {
        let middle = (size / 2) as isize;
        let edge = middle;
        let (row, col) = (row as isize, col as isize);

        let plus_minus = |value: isize, offset: isize| {
            offset >= 0 && (value == middle - offset || value == middle + offset)
        };
        let numbers = |offsets: &[isize]| {
            offsets
                .iter()
                .any(|&n| plus_minus(row, n) && plus_minus(col, n))
        };
        let tuples = |pairs: &[(isize, isize)]| {
            pairs.iter().any(|&(x, y)| {
                (plus_minus(row, x) && plus_minus(col, y))
                    || (plus_minus(col, x) && plus_minus(row, y))
            })
        };
        let double_word: Vec<isize> = (3..edge).collect();

        if row == middle && col == middle {
            Modifier::Center
        } else if numbers(&[edge]) || tuples(&[(0, edge)]) {
            Modifier::TripleWord
        } else if numbers(&double_word) {
            Modifier::DoubleWord
        } else if numbers(&[2]) || tuples(&[(2, edge - 1)]) {
            Modifier::TripleLetter
        } else if numbers(&[1]) || tuples(&[(1, edge - 2), (0, edge - 3), (edge, edge - 3)]) {
            Modifier::DoubleLetter
        } else {
            Modifier::None
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Modifier::None => '.',
            Modifier::DoubleLetter => 'd',
            Modifier::TripleLetter => 't',
            Modifier::DoubleWord => 'D',
            Modifier::TripleWord => 'T',
            Modifier::Center => '*',
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Modifier::None => "None",
            Modifier::DoubleLetter => "DoubleLetter",
            Modifier::TripleLetter => "TripleLetter",
            Modifier::DoubleWord => "DoubleWord",
            Modifier::TripleWord => "TripleWord",
            Modifier::Center => "Center",
        };
        f.write_str(label)
    }
}
