//! Static evaluation of a position

use crate::{
    board::{Board, Position},
    config::{CenterWeighting, EngineConfig},
    counter::Counter,
    lines::{run_length, DIRECTIONS},
    rules::has_won,
};

/// Scores positions from the point of view of one player
///
/// # Position Scoring
/// A position won by the player scores `win_score`, one won by the opponent
/// scores `-win_score`. Any other position is scored heuristically:
///
/// `threats(mine) - multiplier * threats(opponent) + center control`
///
/// where a run of exactly three counters is an open three if the cells at
/// both of its ends are empty, or a half-open three (half the bonus) if only
/// one is. A cell that starts open threes in two or more directions adds
/// the double threat bonus. The heuristic total is clamped strictly inside
/// the win scores so a decided game always outranks it.
#[derive(Clone, Debug)]
pub struct Evaluator {
    counter: Counter,
    win_condition: usize,
    win_score: i32,
    open_three_score: i32,
    double_threat_score: i32,
    center_weight: i32,
    center_weighting: CenterWeighting,
    opponent_threat_multiplier: i32,
}

impl Evaluator {
    pub fn new(config: &EngineConfig, counter: Counter) -> Self {
        Self {
            counter,
            win_condition: config.win_condition,
            win_score: config.win_score,
            open_three_score: config.open_three_score,
            double_threat_score: config.double_threat_score,
            center_weight: config.center_weight,
            center_weighting: config.center_weighting,
            opponent_threat_multiplier: config.opponent_threat_multiplier,
        }
    }

    /// The player this evaluator scores for
    pub fn counter(&self) -> Counter {
        self.counter
    }

    pub fn win_score(&self) -> i32 {
        self.win_score
    }

    pub fn evaluate(&self, board: &Board) -> i32 {
        let opponent = self.counter.other();
        if has_won(board, self.counter, self.win_condition) {
            return self.win_score;
        }
        if has_won(board, opponent, self.win_condition) {
            return -self.win_score;
        }
        self.heuristic(board)
    }

    /// Scores a position that is known to be undecided
    pub fn heuristic(&self, board: &Board) -> i32 {
        let opponent = self.counter.other();
        let score = self
            .threat_score(board, self.counter)
            .saturating_sub(
                self.threat_score(board, opponent)
                    .saturating_mul(self.opponent_threat_multiplier),
            )
            .saturating_add(self.center_control(board));

        let bound = self.win_score.saturating_sub(1).max(0);
        score.clamp(-bound, bound)
    }

    /// Sums the open, half-open and double threats of `counter`
    pub fn threat_score(&self, board: &Board, counter: Counter) -> i32 {
        let mut score = 0i32;

        for (pos, _) in board.occupied().filter(|&(_, c)| c == counter) {
            let mut open_threes = 0;

            for &(dx, dy) in DIRECTIONS.iter() {
                if run_length(board, pos, counter, dx, dy) != 3 {
                    continue;
                }
                let before = pos.step((dx, dy), -1);
                let after = pos.step((dx, dy), 3);

                match (is_open(board, before), is_open(board, after)) {
                    (true, true) => {
                        score = score.saturating_add(self.open_three_score);
                        open_threes += 1;
                    }
                    (true, false) | (false, true) => {
                        score = score.saturating_add(self.open_three_score / 2);
                    }
                    (false, false) => (),
                }
            }

            // two open threes through one cell can't both be blocked in one move
            if open_threes >= 2 {
                score = score.saturating_add(self.double_threat_score);
            }
        }

        score
    }

    /// Rewards counters in the center column, positive for ours and negative for the opponent's
    pub fn center_control(&self, board: &Board) -> i32 {
        let center = (board.width() / 2) as i32;
        let weight = match self.center_weighting {
            CenterWeighting::Flat => self.center_weight,
            CenterWeighting::ProgressScaled => {
                let progress = board.num_moves() as f64 / board.config().num_cells() as f64;
                (self.center_weight as f64 * 2.0 * progress.sqrt()).round() as i32
            }
        };

        (0..board.height() as i32)
            .filter_map(|y| board.counter_at(Position::new(center, y)))
            .map(|c| if c == self.counter { weight } else { -weight })
            .sum()
    }
}

fn is_open(board: &Board, pos: Position) -> bool {
    board.is_valid_position(pos) && !board.has_counter_at(pos)
}
