use crate::dictionary::Dictionary;
use crate::geometry::{Boundary, Position};
use crate::model::board::Board;
use crate::rules::discovery::{cross_words, discover, gaps};
use crate::rules::error::ValidationError;
use crate::rules::traversal::furthest_reach;
use tracing::{Level, event};

/// A move that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    pub boundary: Boundary,
    pub cross_words: Vec<Boundary>,
    pub words: Vec<String>,
}

impl ValidatedMove {
    /// Boundaries that score: the primary word when it has more than one
    /// letter, then every cross word.
    pub fn scoring_boundaries(&self) -> impl Iterator<Item = &Boundary> {
        std::iter::once(&self.boundary)
            .filter(|boundary| boundary.len() > 1)
            .chain(self.cross_words.iter())
    }
}

/// Validates the tiles placed this turn. `board` already carries those tiles;
/// `rack_remaining` is what the player still holds.
pub fn validate<D: Dictionary + ?Sized>(
    board: &Board,
    placed: &[Position],
    rack_remaining: usize,
    dictionary: &D,
) -> Result<ValidatedMove, ValidationError> {
    let boundary = discover(board, placed)?;
    validate_boundary(board, &boundary, placed, rack_remaining, dictionary)
}

/// Applies the rule chain to an explicit boundary. Nothing on the board is
/// changed.
pub fn validate_boundary<D: Dictionary + ?Sized>(
    board: &Board,
    boundary: &Boundary,
    placed: &[Position],
    rack_remaining: usize,
    dictionary: &D,
) -> Result<ValidatedMove, ValidationError> {
    let result = run_rules(board, boundary, placed, rack_remaining, dictionary);
    if let Err(err) = &result {
        event!(
            target: "papyrus_core::rules",
            Level::DEBUG,
            rule = err.kind(),
            boundary = %boundary,
            placed = placed.len(),
            "move rejected"
        );
    }
    result
}

fn run_rules<D: Dictionary + ?Sized>(
    board: &Board,
    boundary: &Boundary,
    placed: &[Position],
    rack_remaining: usize,
    dictionary: &D,
) -> Result<ValidatedMove, ValidationError> {
    if placed.is_empty() {
        return Err(ValidationError::message("no tiles have been placed"));
    }
    check_arrangement(board, boundary, placed)?;

    let first_move = !board.has_fixed_tiles();
    if first_move {
        let center = board.center();
        if !boundary.contains_cell(center.row, center.col) {
            return Err(ValidationError::NoCenterIntersection);
        }
    }

    let cross = cross_words(board, boundary, placed);
    if !first_move && cross.is_empty() && !touches_fixed_tile(board, boundary) {
        return Err(ValidationError::NoIntersection);
    }

    check_gaps(board, boundary, rack_remaining)?;

    if boundary.len() == 1 && cross.is_empty() {
        return Err(ValidationError::message("a word needs at least two letters"));
    }

    let mut words = Vec::with_capacity(cross.len() + 1);
    let scoring = std::iter::once(boundary)
        .filter(|b| b.len() > 1)
        .chain(cross.iter());
    for word_boundary in scoring {
        let word = board.word_in(word_boundary);
        if !dictionary.is_defined(&word) {
            return Err(ValidationError::UndefinedWord(word));
        }
        words.push(word);
    }

    Ok(ValidatedMove {
        boundary: *boundary,
        cross_words: cross,
        words,
    })
}

/// Every placed tile sits on the boundary and is a tile of this turn.
fn check_arrangement(
    board: &Board,
    boundary: &Boundary,
    placed: &[Position],
) -> Result<(), ValidationError> {
    for position in placed {
        if !boundary.contains_cell(position.row(), position.col()) {
            return Err(ValidationError::InvalidArrangement);
        }
        let fresh = board
            .square_at_position(position)
            .and_then(|square| square.tile())
            .is_some_and(|tile| !tile.is_fixed());
        if !fresh {
            return Err(ValidationError::InvalidArrangement);
        }
    }
    Ok(())
}

fn touches_fixed_tile(board: &Board, boundary: &Boundary) -> bool {
    board
        .squares_in(boundary)
        .into_iter()
        .flatten()
        .any(|square| square.tile().is_some_and(|tile| tile.is_fixed()))
}

/// Empty squares inside the boundary must be covered by the rack, and then
/// actually filled.
fn check_gaps(
    board: &Board,
    boundary: &Boundary,
    rack_remaining: usize,
) -> Result<(), ValidationError> {
    let reach = furthest_reach(board, boundary.start(), rack_remaining);
    if reach.iterable() < boundary.end().iterable() {
        return Err(ValidationError::InsufficientTiles);
    }
    if !gaps(board, boundary).is_empty() {
        return Err(ValidationError::UnfilledSquare);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate, validate_boundary};
    use crate::dictionary::WordList;
    use crate::geometry::{Axis, Boundary, Direction, Position};
    use crate::model::board::Board;
    use crate::model::square::SquareId;
    use crate::model::tile::Tile;
    use crate::rules::error::ValidationError;

    fn cell(row: usize, col: usize) -> Position {
        Position::from_row_col(Axis::horizontal(Direction::Forward), row, col, 15).unwrap()
    }

    fn words() -> WordList {
        WordList::from_words(["CAT", "CATS", "AT", "TA", "ACT", "TO"])
    }

    fn place(board: &mut Board, cells: &[(usize, usize, char)]) -> Vec<Position> {
        cells
            .iter()
            .map(|&(row, col, letter)| {
                board.place(row, col, Tile::standard(letter).unwrap()).unwrap();
                cell(row, col)
            })
            .collect()
    }

    fn commit(board: &mut Board) {
        for id in board.placed_this_turn() {
            board.fix(id);
        }
    }

    fn board_with_cat() -> Board {
        let mut board = Board::standard();
        place(&mut board, &[(7, 6, 'C'), (7, 7, 'A'), (7, 8, 'T')]);
        commit(&mut board);
        board
    }

    #[test]
    fn first_move_through_center_is_accepted() {
        let mut board = Board::standard();
        let placed = place(&mut board, &[(7, 6, 'C'), (7, 7, 'A'), (7, 8, 'T')]);
        let validated = validate(&board, &placed, 4, &words()).unwrap();
        assert_eq!(validated.words, vec!["CAT".to_string()]);
        assert!(validated.cross_words.is_empty());
    }

    #[test]
    fn first_move_must_cover_center() {
        let mut board = Board::standard();
        let placed = place(&mut board, &[(3, 3, 'C'), (3, 4, 'A'), (3, 5, 'T')]);
        assert_eq!(
            validate(&board, &placed, 4, &words()),
            Err(ValidationError::NoCenterIntersection)
        );
    }

    #[test]
    fn off_center_first_move_with_a_gap_reports_center() {
        let mut board = Board::standard();
        let placed = place(&mut board, &[(2, 2, 'C'), (2, 4, 'T')]);
        // Center coverage is checked before gaps.
        assert_eq!(
            validate(&board, &placed, 5, &words()),
            Err(ValidationError::NoCenterIntersection)
        );
    }

    #[test]
    fn detached_tile_has_no_intersection() {
        let mut board = board_with_cat();
        let placed = place(&mut board, &[(9, 10, 'A')]);
        assert_eq!(
            validate(&board, &placed, 6, &words()),
            Err(ValidationError::NoIntersection)
        );
    }

    #[test]
    fn extending_a_word_intersects() {
        let mut board = board_with_cat();
        let placed = place(&mut board, &[(7, 9, 'S')]);
        let validated = validate(&board, &placed, 6, &WordList::from_words(["CATS"])).unwrap();
        assert_eq!(validated.words, vec!["CATS".to_string()]);
    }

    #[test]
    fn unknown_cross_word_is_reported() {
        let mut board = board_with_cat();
        let placed = place(&mut board, &[(8, 6, 'A'), (8, 7, 'T')]);
        let err = validate(&board, &placed, 5, &WordList::from_words(["CA"])).unwrap_err();
        assert_eq!(err, ValidationError::UndefinedWord("AT".to_string()));
        let err = validate(&board, &placed, 5, &WordList::from_words(["AT"])).unwrap_err();
        assert_eq!(err, ValidationError::UndefinedWord("CA".to_string()));
    }

    #[test]
    fn gap_beyond_rack_is_insufficient_tiles() {
        let mut board = Board::standard();
        let placed = place(&mut board, &[(7, 5, 'C'), (7, 9, 'T')]);
        assert_eq!(
            validate(&board, &placed, 1, &words()),
            Err(ValidationError::InsufficientTiles)
        );
        assert_eq!(
            validate(&board, &placed, 5, &words()),
            Err(ValidationError::UnfilledSquare)
        );
    }

    #[test]
    fn single_letter_first_move_is_refused() {
        let mut board = Board::standard();
        let placed = place(&mut board, &[(7, 7, 'A')]);
        assert!(matches!(
            validate(&board, &placed, 6, &words()),
            Err(ValidationError::Message(_))
        ));
    }

    #[test]
    fn placed_tile_outside_explicit_boundary_is_an_arrangement_error() {
        let mut board = Board::standard();
        let placed = place(&mut board, &[(7, 7, 'A'), (7, 8, 'T')]);
        let boundary = Boundary::new(cell(7, 7), cell(7, 7)).unwrap();
        assert_eq!(
            validate_boundary(&board, &boundary, &placed, 5, &words()),
            Err(ValidationError::InvalidArrangement)
        );
    }

    #[test]
    fn fixed_tiles_cannot_be_claimed_as_placed() {
        let board = board_with_cat();
        let boundary = Boundary::new(cell(7, 6), cell(7, 8)).unwrap();
        assert_eq!(
            validate_boundary(&board, &boundary, &[cell(7, 7)], 7, &words()),
            Err(ValidationError::InvalidArrangement)
        );
        assert_eq!(board.center(), SquareId::new(7, 7));
    }
}
