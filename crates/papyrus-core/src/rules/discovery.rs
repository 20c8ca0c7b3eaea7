//! Finds the boundaries of the words formed by a set of newly placed tiles.

use crate::geometry::{Axis, Boundary, Direction, Orientation, Position};
use crate::model::board::Board;
use crate::rules::error::ValidationError;
use crate::rules::traversal::{empty_run, filled_run};
use std::collections::BTreeSet;

/// Grows a boundary over the occupied squares touching either end.
pub fn extend(board: &Board, boundary: &Boundary) -> Boundary {
    let start = boundary.start().switch_direction(Direction::Backward);
    let first = filled_run(board, start).terminal(None).unwrap_or(start);
    let last = filled_run(board, boundary.end())
        .terminal(None)
        .unwrap_or(boundary.end());
    Boundary::new(first, last).unwrap_or(*boundary)
}

/// Occupied run through a single cell along `orientation`.
pub fn run_through(board: &Board, row: usize, col: usize, orientation: Orientation) -> Option<Boundary> {
    let axis = Axis::new(orientation, Direction::Forward);
    let position = Position::from_row_col(axis, row, col, board.size())?;
    Some(extend(board, &Boundary::single(position)))
}

/// Primary boundary of a move. `placed` may be phrased on either axis and in
/// any order; only the cells it names matter.
pub fn discover(board: &Board, placed: &[Position]) -> Result<Boundary, ValidationError> {
    let cells: BTreeSet<(usize, usize)> = placed.iter().map(|p| (p.row(), p.col())).collect();
    let Some(&(row, col)) = cells.first() else {
        return Err(ValidationError::message("no tiles have been placed"));
    };
    if cells.len() != placed.len() {
        return Err(ValidationError::InvalidArrangement);
    }

    let same_row = cells.iter().all(|&(r, _)| r == row);
    let same_col = cells.iter().all(|&(_, c)| c == col);
    let orientation = match (same_row, same_col) {
        (true, true) => single_tile_orientation(board, row, col),
        (true, false) => Orientation::Horizontal,
        (false, true) => Orientation::Vertical,
        (false, false) => return Err(ValidationError::InvalidArrangement),
    };

    let axis = Axis::new(orientation, Direction::Forward);
    let positions: Vec<Position> = cells
        .iter()
        .filter_map(|&(r, c)| Position::from_row_col(axis, r, c, board.size()))
        .collect();
    let boundary = Boundary::spanning(&positions).ok_or(ValidationError::InvalidArrangement)?;
    Ok(extend(board, &boundary))
}

/// A lone tile reads across unless only the column gives it neighbours.
fn single_tile_orientation(board: &Board, row: usize, col: usize) -> Orientation {
    let across = run_through(board, row, col, Orientation::Horizontal);
    let down = run_through(board, row, col, Orientation::Vertical);
    match (across, down) {
        (Some(across), Some(down)) if across.len() == 1 && down.len() > 1 => Orientation::Vertical,
        _ => Orientation::Horizontal,
    }
}

/// Perpendicular words of more than one letter formed through the placed
/// cells, ordered by row then column.
pub fn cross_words(board: &Board, primary: &Boundary, placed: &[Position]) -> Vec<Boundary> {
    let cross = primary.orientation().flipped();
    let cells: BTreeSet<(usize, usize)> = placed.iter().map(|p| (p.row(), p.col())).collect();
    cells
        .into_iter()
        .filter_map(|(row, col)| run_through(board, row, col, cross))
        .filter(|boundary| boundary.len() > 1)
        .collect()
}

/// Runs of empty squares inside a boundary.
pub fn gaps(board: &Board, boundary: &Boundary) -> Vec<Boundary> {
    let mut found = Vec::new();
    let end = boundary.end().iterable();
    let mut iterable = boundary.start().iterable();
    while iterable <= end {
        let Some(position) = boundary.start().with_iterable(iterable) else {
            break;
        };
        match empty_run(board, position).terminal(None) {
            Some(last) => {
                let last = last.iterable().min(end);
                if let Some(gap) = position
                    .with_iterable(last)
                    .and_then(|last| Boundary::new(position, last))
                {
                    found.push(gap);
                }
                iterable = last + 1;
            }
            None => iterable += 1,
        }
    }
    found
}
