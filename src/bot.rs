//! Move selection under a time limit

use log::{debug, info};

use std::time::{Duration, Instant};

use crate::{
    board::Board,
    config::{ConfigError, EngineConfig},
    counter::Counter,
    evaluator::Evaluator,
    rules::{has_won, is_valid_move, valid_moves},
    search::{move_order, Searcher, Timeout},
};

/// Something that can take a turn in a game
pub trait Player {
    /// The counter this player places
    fn counter(&self) -> Counter;

    fn name(&self) -> &str;

    /// Picks the column to play, which must be on the board and not full
    fn make_move(&mut self, board: &Board) -> usize;
}

/// How a [`Decision`] was reached
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DecisionKind {
    /// The move wins on the spot
    ImmediateWin,
    /// The move stops the opponent winning on their next turn
    Block,
    /// The move came out of the iterative deepening search
    Search,
    /// No search depth finished in time, or no column was playable
    Fallback,
}

/// The chosen move and how the engine got there
#[derive(Clone, Debug)]
pub struct Decision {
    pub column: usize,
    pub kind: DecisionKind,
    /// Score of the move at the deepest completed depth
    pub score: Option<i32>,
    /// Deepest fully completed search depth, 0 if no search ran
    pub depth: u32,
    pub nodes: usize,
    pub elapsed: Duration,
}

/// A Connect-N engine combining tactical checks with a time-limited search
///
/// # Notes
/// Each decision first looks for a move that wins immediately, then for a
/// move that blocks an immediate opponent win. Failing both it deepens a
/// minimax search one ply at a time until the time limit, keeping the best
/// move of the deepest depth that finished. A depth cut short by the time
/// limit is thrown away whole.
#[derive(Clone, Debug)]
pub struct Bot {
    counter: Counter,
    config: EngineConfig,
}

impl Bot {
    /// Creates a new `Bot` with the default configuration
    pub fn new(counter: Counter) -> Self {
        Self {
            counter,
            config: EngineConfig::default(),
        }
    }

    /// Creates a new `Bot` with a given configuration
    pub fn with_config(counter: Counter, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { counter, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Picks the column to play on `board`
    pub fn choose_move(&self, board: &Board) -> usize {
        self.decide(board).column
    }

    /// Looks for a column that wins for us, then for one that wins for the opponent
    pub fn find_immediate_move(&self, board: &Board) -> Option<(usize, DecisionKind)> {
        let checks = [
            (self.counter, DecisionKind::ImmediateWin),
            (self.counter.other(), DecisionKind::Block),
        ];
        for &(counter, kind) in checks.iter() {
            for column in valid_moves(board) {
                if let Ok(next) = board.with_move(column, counter) {
                    if has_won(&next, counter, self.config.win_condition) {
                        return Some((column, kind));
                    }
                }
            }
        }
        None
    }

    /// Picks the column to play on `board`, reporting how it was chosen
    pub fn decide(&self, board: &Board) -> Decision {
        let start = Instant::now();
        let deadline = start + self.config.time_limit;

        if let Some((column, kind)) = self.find_immediate_move(board) {
            info!("Playing column {} ({:?})", column, kind);
            let score = match kind {
                DecisionKind::ImmediateWin => Some(self.config.win_score),
                _ => None,
            };
            return Decision {
                column,
                kind,
                score,
                depth: 0,
                nodes: 0,
                elapsed: start.elapsed(),
            };
        }

        let searcher = Searcher::new(
            Evaluator::new(&self.config, self.counter),
            self.config.win_condition,
            board.width(),
            deadline,
        );

        let (best, depth) = self.iterative_deepening(&searcher, board);
        let decision = match best {
            Some((column, score)) => Decision {
                column,
                kind: DecisionKind::Search,
                score: Some(score),
                depth,
                nodes: searcher.node_count(),
                elapsed: start.elapsed(),
            },
            None => Decision {
                column: self.fallback_move(board),
                kind: DecisionKind::Fallback,
                score: None,
                depth: 0,
                nodes: searcher.node_count(),
                elapsed: start.elapsed(),
            },
        };

        info!(
            "Playing column {} ({:?}, depth {}, score {:?}, {} nodes in {:.3}s)",
            decision.column,
            decision.kind,
            decision.depth,
            decision.score,
            decision.nodes,
            decision.elapsed.as_secs_f64()
        );
        decision
    }

    /// Deepens the search until the deadline or the depth limit
    ///
    /// Returns the best move and score of the deepest completed depth along
    /// with that depth.
    fn iterative_deepening(&self, searcher: &Searcher, board: &Board) -> (Option<(usize, i32)>, u32) {
        let mut best: Option<(usize, i32)> = None;
        let mut completed_depth = 0;

        for depth in 1..=self.config.max_depth {
            let first = best.map(|(column, _)| column);
            match searcher.top_level_search(board, depth, first, self.config.parallel) {
                Ok(Some((column, score))) => {
                    best = Some((column, score));
                    completed_depth = depth;
                    debug!(
                        "Depth {}: best column {}, score {}, {} nodes",
                        depth,
                        column,
                        score,
                        searcher.node_count()
                    );

                    if score >= self.config.win_score {
                        debug!("Forced win found at depth {}", depth);
                        break;
                    }
                    // every empty cell is already inside the search horizon
                    if depth as usize >= board.empty_cells() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(Timeout) => {
                    debug!("Time limit reached, abandoning depth {}", depth);
                    break;
                }
            }
        }

        (best, completed_depth)
    }

    /// The center column, or the first playable column from the center outwards if it's full
    fn fallback_move(&self, board: &Board) -> usize {
        let center = board.width() / 2;
        move_order(board.width(), None)
            .into_iter()
            .find(|&column| is_valid_move(board, column))
            .unwrap_or(center)
    }
}

impl Player for Bot {
    fn counter(&self) -> Counter {
        self.counter
    }

    fn name(&self) -> &str {
        "connectn-bot"
    }

    fn make_move(&mut self, board: &Board) -> usize {
        self.choose_move(board)
    }
}
