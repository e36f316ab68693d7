//! Terminal position detection

use crate::{
    board::{Board, Position},
    counter::Counter,
    lines::{check_line, DIRECTIONS},
};

/// Checks whether `counter` has a line of `win_condition` counters anywhere on the board
pub fn has_won(board: &Board, counter: Counter, win_condition: usize) -> bool {
    board
        .occupied()
        .filter(|&(_, c)| c == counter)
        .any(|(pos, _)| {
            DIRECTIONS
                .iter()
                .any(|&(dx, dy)| check_line(board, pos, counter, win_condition, dx, dy))
        })
}

/// The player with a winning line, if any
///
/// Positions reached through legal play have at most one winner, `O` is
/// reported first for hand-built boards where both have a line.
pub fn winner(board: &Board, win_condition: usize) -> Option<Counter> {
    [Counter::O, Counter::X]
        .iter()
        .copied()
        .find(|&counter| has_won(board, counter, win_condition))
}

/// A column is playable when it is on the board and its top cell is empty
pub fn is_valid_move(board: &Board, column: usize) -> bool {
    column < board.width()
        && !board.has_counter_at(Position::new(column as i32, board.height() as i32 - 1))
}

/// Checks whether no column can be played
pub fn is_board_full(board: &Board) -> bool {
    (0..board.width()).all(|column| !is_valid_move(board, column))
}

/// Iterates over the playable columns from left to right
pub fn valid_moves(board: &Board) -> impl Iterator<Item = usize> + '_ {
    (0..board.width()).filter(move |&column| is_valid_move(board, column))
}
