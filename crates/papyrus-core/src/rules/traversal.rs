//! Walks along a line of the board.
//!
//! A [`Walk`] yields its start position and then every following position in
//! the axis direction for as long as its predicate accepts the next cell. It
//! stops at the edge of the board, where [`Position::next`] hands back the
//! same position. Walks are lazy and cloning one restarts it from the same
//! state.

use crate::geometry::Position;
use crate::model::board::Board;

#[derive(Debug, Clone)]
pub struct Walk<P> {
    current: Option<Position>,
    started: bool,
    predicate: P,
}

impl<P> Walk<P>
where
    P: FnMut(&Position) -> bool,
{
    fn from_start(start: Option<Position>, predicate: P) -> Self {
        Self {
            current: start.filter(|position| !position.is_invalid()),
            started: false,
            predicate,
        }
    }

    /// Last position of the walk, handing every visited position to
    /// `visitor` on the way. `None` when the start was disqualified.
    pub fn terminal(self, mut visitor: Option<&mut dyn FnMut(Position)>) -> Option<Position> {
        let mut last = None;
        for position in self {
            if let Some(visit) = visitor.as_deref_mut() {
                visit(position);
            }
            last = Some(position);
        }
        last
    }
}

impl<P> Iterator for Walk<P>
where
    P: FnMut(&Position) -> bool,
{
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.current?;
        if !self.started {
            self.started = true;
            return Some(current);
        }
        let next = current.next();
        if next == current || next.is_invalid() || !(self.predicate)(&next) {
            self.current = None;
            return None;
        }
        self.current = Some(next);
        Some(next)
    }
}

/// Advances while `predicate` accepts the next candidate position. The start
/// is not checked against the predicate.
pub fn walk_while<P>(start: Position, predicate: P) -> Walk<P>
where
    P: FnMut(&Position) -> bool,
{
    Walk::from_start(Some(start), predicate)
}

/// Advances over empty squares. Yields nothing when the start square holds a
/// tile.
pub fn empty_run(board: &Board, start: Position) -> Walk<impl FnMut(&Position) -> bool + Clone + '_> {
    let start = board.is_empty_at(&start).then_some(start);
    Walk::from_start(start, move |position: &Position| board.is_empty_at(position))
}

/// Advances over occupied squares. Yields nothing when the start square is
/// empty.
pub fn filled_run(board: &Board, start: Position) -> Walk<impl FnMut(&Position) -> bool + Clone + '_> {
    let start = board.is_filled_at(&start).then_some(start);
    Walk::from_start(start, move |position: &Position| board.is_filled_at(position))
}

/// Farthest position reachable from `start` when each empty square passed
/// costs one of `tiles`.
pub fn furthest_reach(board: &Board, start: Position, tiles: usize) -> Position {
    let mut remaining = tiles as isize;
    walk_while(start, move |position: &Position| {
        if board.is_empty_at(position) {
            remaining -= 1;
        }
        remaining > -1
    })
    .terminal(None)
    .unwrap_or(start)
}
