//! Placement notation used by replay scripts.
//!
//! Two forms address a square: `H8` (column letter, 1-based row, as printed
//! on a physical board) and `r7c8` (0-based row and column). The tile
//! follows a colon; a trailing `?` marks a blank played as that letter, so
//! `H8:C`, `r7c8:A` and `I8:t?` are all valid.

use papyrus_core::game::PlacedTile;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("'{0}' is missing the ':' between square and letter")]
    MissingSeparator(String),
    #[error("'{0}' does not name a square")]
    BadSquare(String),
    #[error("'{0}' does not name a single letter")]
    BadLetter(String),
}

pub fn parse_placement(text: &str) -> Result<PlacedTile, NotationError> {
    let trimmed = text.trim();
    let (square, tile) = trimmed
        .split_once(':')
        .ok_or_else(|| NotationError::MissingSeparator(trimmed.to_string()))?;
    let (row, col) =
        parse_square(square.trim()).ok_or_else(|| NotationError::BadSquare(square.to_string()))?;

    let tile = tile.trim();
    let (letter, blank) = match tile.strip_suffix('?') {
        Some(rest) => (rest, true),
        None => (tile, false),
    };
    let mut chars = letter.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c,
        _ => return Err(NotationError::BadLetter(tile.to_string())),
    };

    Ok(if blank {
        PlacedTile::blank(row, col, letter)
    } else {
        PlacedTile::new(row, col, letter)
    })
}

fn parse_square(square: &str) -> Option<(usize, usize)> {
    let lower = square.to_ascii_lowercase();
    let indexed: Option<(usize, usize)> = lower
        .strip_prefix('r')
        .and_then(|rest| rest.split_once('c'))
        .and_then(|(row, col)| Some((row.parse().ok()?, col.parse().ok()?)));
    if indexed.is_some() {
        return indexed;
    }

    // Column R on large boards also starts with 'r'.
    let mut chars = lower.chars();
    let column = chars.next().filter(char::is_ascii_lowercase)?;
    let row: usize = chars.as_str().parse().ok()?;
    let col = usize::from(column as u8 - b'a');
    Some((row.checked_sub(1)?, col))
}

#[cfg(test)]
mod tests {
    use super::{NotationError, parse_placement};
    use papyrus_core::game::PlacedTile;

    #[test]
    fn board_coordinates_are_one_based_rows() {
        assert_eq!(parse_placement("H8:C"), Ok(PlacedTile::new(7, 7, 'C')));
        assert_eq!(parse_placement("a1:q"), Ok(PlacedTile::new(0, 0, 'Q')));
        assert_eq!(parse_placement("O15:Z"), Ok(PlacedTile::new(14, 14, 'Z')));
    }

    #[test]
    fn row_col_form_is_zero_based() {
        assert_eq!(parse_placement("r7c8:A"), Ok(PlacedTile::new(7, 8, 'A')));
        assert_eq!(parse_placement(" R0C14 : e "), Ok(PlacedTile::new(0, 14, 'E')));
        // Column R of a large board.
        assert_eq!(parse_placement("R7:A"), Ok(PlacedTile::new(6, 17, 'A')));
    }

    #[test]
    fn trailing_question_mark_plays_a_blank() {
        let tile = parse_placement("I8:t?").unwrap();
        assert!(tile.blank);
        assert_eq!(tile.letter, 'T');
        assert_eq!((tile.row, tile.col), (7, 8));
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(matches!(
            parse_placement("H8C"),
            Err(NotationError::MissingSeparator(_))
        ));
        assert!(matches!(parse_placement("H0:C"), Err(NotationError::BadSquare(_))));
        assert!(matches!(parse_placement("r7c:C"), Err(NotationError::BadSquare(_))));
        assert!(matches!(parse_placement("8H:C"), Err(NotationError::BadSquare(_))));
        assert!(matches!(parse_placement("H8:CA"), Err(NotationError::BadLetter(_))));
        assert!(matches!(parse_placement("H8:?"), Err(NotationError::BadLetter(_))));
        assert!(matches!(parse_placement("H8:3"), Err(NotationError::BadLetter(_))));
    }
}
