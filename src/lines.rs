//! Straight-line scans over a board
//!
//! Only four directions are scanned: right, up, up-right and down-right.
//! The reverse directions are covered because every occupied cell is used
//! as a scan origin in turn.

use crate::{
    board::{Board, Position},
    counter::Counter,
};

/// Right, up, diagonal up-right, diagonal down-right
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Counts the consecutive cells holding `counter` from `start` in direction `(dx, dy)`
///
/// The count stops at the first cell that is off the board, empty or
/// holds the other counter.
pub fn run_length(board: &Board, start: Position, counter: Counter, dx: i32, dy: i32) -> usize {
    let mut length = 0;
    let mut pos = start;
    while board.counter_at(pos) == Some(counter) {
        length += 1;
        pos = pos.step((dx, dy), 1);
    }
    length
}

/// Checks that `length` cells from `start` in direction `(dx, dy)` all hold `counter`
pub fn check_line(
    board: &Board,
    start: Position,
    counter: Counter,
    length: usize,
    dx: i32,
    dy: i32,
) -> bool {
    (0..length as i32).all(|i| board.counter_at(start.step((dx, dy), i)) == Some(counter))
}
