//! Time-limited minimax search with alpha-beta pruning

use rayon::prelude::*;
use thiserror::Error;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::{
    board::Board,
    evaluator::Evaluator,
    rules::{has_won, is_board_full, is_valid_move},
};

/// Raised when a search runs past its deadline
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("search deadline exceeded")]
pub struct Timeout;

/// Orders the columns of a board from the middle outwards, as the middle
/// columns are often better moves
///
/// `first` is tried before everything else when it is on the board, which
/// lets the best move of a shallower search be searched first.
pub fn move_order(width: usize, first: Option<usize>) -> Vec<usize> {
    let center = (width / 2) as i32;
    let mut order = Vec::with_capacity(width);
    let first = first.filter(|&column| column < width);
    if let Some(column) = first {
        order.push(column);
    }

    // center, center + 1, center - 1, center + 2, center - 2, ...
    for i in 0..2 * width as i32 {
        let offset = if i % 2 == 1 { i / 2 + 1 } else { -(i / 2) };
        let column = center + offset;
        if column < 0 || column >= width as i32 || Some(column as usize) == first {
            continue;
        }
        order.push(column as usize);
    }
    order
}

/// Searches the game tree below a position for the evaluator's player
///
/// # Notes
/// The engine's player is the maximizing side. Every node checks the
/// deadline before doing any work, so a search over the deadline unwinds
/// with [`Timeout`] instead of returning a half-computed score.
pub struct Searcher {
    evaluator: Evaluator,
    win_condition: usize,
    deadline: Instant,
    column_order: Vec<usize>,

    node_count: AtomicUsize,
}

impl Searcher {
    pub fn new(evaluator: Evaluator, win_condition: usize, width: usize, deadline: Instant) -> Self {
        Self {
            evaluator,
            win_condition,
            deadline,
            column_order: move_order(width, None),
            node_count: AtomicUsize::new(0),
        }
    }

    /// The number of positions searched by this `Searcher` so far (for diagnostics only)
    pub fn node_count(&self) -> usize {
        self.node_count.load(Ordering::Relaxed)
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Minimax with alpha-beta pruning
    ///
    /// Returns the score of `board` searched `depth` plies deep, with
    /// `maximizing` set when the evaluator's player is to move.
    pub fn search(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, Timeout> {
        if Instant::now() > self.deadline {
            return Err(Timeout);
        }
        self.node_count.fetch_add(1, Ordering::Relaxed);

        let me = self.evaluator.counter();
        let opponent = me.other();

        if has_won(board, me, self.win_condition) {
            return Ok(self.evaluator.win_score());
        }
        if has_won(board, opponent, self.win_condition) {
            return Ok(-self.evaluator.win_score());
        }
        if depth == 0 || is_board_full(board) {
            return Ok(self.evaluator.heuristic(board));
        }

        let to_move = if maximizing { me } else { opponent };
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };

        for &column in self.column_order.iter() {
            if !is_valid_move(board, column) {
                continue;
            }
            // legality was checked above, a failure here just skips the column
            let next = match board.with_move(column, to_move) {
                Ok(next) => next,
                Err(_) => continue,
            };

            let value = self.search(&next, depth - 1, !maximizing, alpha, beta)?;

            if maximizing {
                best_value = best_value.max(value);
                alpha = alpha.max(value);
            } else {
                best_value = best_value.min(value);
                beta = beta.min(value);
            }

            // the other player will never let the game reach this branch
            if beta <= alpha {
                break;
            }
        }

        Ok(best_value)
    }

    /// Scores playing `column` for the evaluator's player with a search of `depth` plies in total
    ///
    /// Returns `None` if the column can't be played.
    pub fn score_move(&self, board: &Board, column: usize, depth: u32) -> Result<Option<i32>, Timeout> {
        let next = match board.with_move(column, self.evaluator.counter()) {
            Ok(next) => next,
            Err(_) => return Ok(None),
        };
        self.search(&next, depth.saturating_sub(1), false, i32::MIN, i32::MAX)
            .map(Some)
    }

    /// Performs one full-width search of the root position at `depth`
    ///
    /// Returns the best column and its score, or `None` if no column can be
    /// played. Columns are tried in center-out order with `first` leading,
    /// and on equal scores the earlier column wins. With `parallel` set the
    /// root columns are scored on the rayon thread pool and compared here
    /// afterwards, so both modes pick the same column.
    pub fn top_level_search(
        &self,
        board: &Board,
        depth: u32,
        first: Option<usize>,
        parallel: bool,
    ) -> Result<Option<(usize, i32)>, Timeout> {
        let columns: Vec<usize> = move_order(board.width(), first)
            .into_iter()
            .filter(|&column| is_valid_move(board, column))
            .collect();

        let scores: Vec<(usize, Option<i32>)> = if parallel {
            columns
                .par_iter()
                .map(|&column| {
                    self.score_move(board, column, depth)
                        .map(|score| (column, score))
                })
                .collect::<Result<Vec<_>, Timeout>>()?
        } else {
            let mut scores = Vec::with_capacity(columns.len());
            for column in columns {
                scores.push((column, self.score_move(board, column, depth)?));
            }
            scores
        };

        let mut best: Option<(usize, i32)> = None;
        for (column, score) in scores {
            let score = match score {
                Some(score) => score,
                None => continue,
            };
            match best {
                Some((_, best_score)) if score <= best_score => (),
                _ => best = Some((column, score)),
            }
        }
        Ok(best)
    }
}
