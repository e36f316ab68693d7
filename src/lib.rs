//! A time-limited agent for playing Connect-N style board games
//!
//! Counters drop into the columns of a board of any size, and the first
//! player to line up `win_condition` of them in a row, column or diagonal
//! wins. The agent checks for immediate wins and blocks, then runs an
//! iterative deepening minimax search with alpha-beta pruning until its
//! time budget runs out.
//!
//! # Basic Usage
//!
//! ```
//! use connectn_ai::{board::{Board, BoardConfig}, bot::Bot, counter::Counter};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // O has three in a row along the bottom, X to play blocks the left end
//! let board = Board::from_moves(BoardConfig::default(), "41526")?;
//! let bot = Bot::new(Counter::X);
//!
//! assert_eq!(bot.choose_move(&board), 2);
//!# Ok(())
//!# }
//! ```

pub use anyhow;

pub mod counter;

pub mod board;

pub mod lines;

pub mod rules;

pub mod config;

pub mod evaluator;

pub mod search;

pub mod bot;


pub use board::{Board, BoardConfig, InvalidMove, Position};
pub use bot::{Bot, Decision, DecisionKind, Player};
pub use config::{CenterWeighting, ConfigError, EngineConfig};
pub use counter::Counter;
pub use evaluator::Evaluator;
pub use search::{move_order, Searcher, Timeout};
