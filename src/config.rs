//! Engine tuning parameters

use static_assertions::*;
use thiserror::Error;

use std::time::Duration;

pub const DEFAULT_WIN_CONDITION: usize = 4;
pub const DEFAULT_MAX_DEPTH: u32 = 50;
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(9_500);

pub const DEFAULT_WIN_SCORE: i32 = 1_000_000;
pub const DEFAULT_OPEN_THREE_SCORE: i32 = 10_000;
pub const DEFAULT_DOUBLE_THREAT_SCORE: i32 = 50_000;
pub const DEFAULT_CENTER_WEIGHT: i32 = 30;
pub const DEFAULT_OPPONENT_THREAT_MULTIPLIER: i32 = 10;

// a won position must outrank any single heuristic bonus, even after the
// opponent multiplier is applied
const_assert!(DEFAULT_WIN_SCORE > DEFAULT_DOUBLE_THREAT_SCORE * DEFAULT_OPPONENT_THREAT_MULTIPLIER);
const_assert!(DEFAULT_DOUBLE_THREAT_SCORE > DEFAULT_OPEN_THREE_SCORE);
const_assert!(DEFAULT_OPEN_THREE_SCORE > DEFAULT_CENTER_WEIGHT * 2);

/// How the center column term of the evaluation is weighted
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CenterWeighting {
    /// Every center counter is worth `center_weight`
    Flat,
    /// Every center counter is worth `center_weight * 2 * sqrt(filled / total)`,
    /// so the center matters more as the board fills up
    ProgressScaled,
}

/// Reasons an [`EngineConfig`] is rejected
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ConfigError {
    #[error("win condition must be at least 2, got {0}")]
    WinCondition(usize),
    #[error("max depth must be at least 1")]
    MaxDepth,
    #[error("time limit must be non-zero")]
    TimeLimit,
    #[error("win score must be positive, got {0}")]
    WinScore(i32),
    #[error("opponent threat multiplier must be at least 1, got {0}")]
    OpponentThreatMultiplier(i32),
}

/// Tunable parameters of the engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Length of the line needed to win
    pub win_condition: usize,
    /// Deepest iteration of the iterative deepening loop
    pub max_depth: u32,
    /// Wall-clock budget for a single move decision
    pub time_limit: Duration,
    pub win_score: i32,
    pub open_three_score: i32,
    pub double_threat_score: i32,
    pub center_weight: i32,
    pub center_weighting: CenterWeighting,
    /// How much more the opponent's threats count than our own
    pub opponent_threat_multiplier: i32,
    /// Score root columns on the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_condition: DEFAULT_WIN_CONDITION,
            max_depth: DEFAULT_MAX_DEPTH,
            time_limit: DEFAULT_TIME_LIMIT,
            win_score: DEFAULT_WIN_SCORE,
            open_three_score: DEFAULT_OPEN_THREE_SCORE,
            double_threat_score: DEFAULT_DOUBLE_THREAT_SCORE,
            center_weight: DEFAULT_CENTER_WEIGHT,
            center_weighting: CenterWeighting::Flat,
            opponent_threat_multiplier: DEFAULT_OPPONENT_THREAT_MULTIPLIER,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn with_win_condition(mut self, win_condition: usize) -> Self {
        self.win_condition = win_condition;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_center_weighting(mut self, center_weighting: CenterWeighting) -> Self {
        self.center_weighting = center_weighting;
        self
    }

    pub fn with_opponent_threat_multiplier(mut self, multiplier: i32) -> Self {
        self.opponent_threat_multiplier = multiplier;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_condition < 2 {
            return Err(ConfigError::WinCondition(self.win_condition));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::MaxDepth);
        }
        if self.time_limit == Duration::from_secs(0) {
            return Err(ConfigError::TimeLimit);
        }
        if self.win_score <= 0 {
            return Err(ConfigError::WinScore(self.win_score));
        }
        if self.opponent_threat_multiplier < 1 {
            return Err(ConfigError::OpponentThreatMultiplier(
                self.opponent_threat_multiplier,
            ));
        }
        Ok(())
    }
}
