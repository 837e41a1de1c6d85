//! Configuration oracle for exposing arena rules to the engine.

use crate::config::{ArenaConfig, ScoreCurve};

/// Provides access to arena rules for the current execution context.
pub trait ConfigOracle: Send + Sync {
    /// Adventure stage an avatar must have cleared to battle.
    fn required_stage(&self) -> u32;

    /// Challenge budget granted on join and on every daily reset.
    fn max_daily_challenges(&self) -> u32;

    /// Score of a freshly joined entry.
    fn initial_score(&self) -> u32;

    fn score_curve(&self) -> &ScoreCurve;

    /// Whether inactive leaderboard entries are barred from battles.
    fn require_active(&self) -> bool;
}

impl ConfigOracle for ArenaConfig {
    fn required_stage(&self) -> u32 {
        self.required_stage
    }

    fn max_daily_challenges(&self) -> u32 {
        self.max_daily_challenges
    }

    fn initial_score(&self) -> u32 {
        self.initial_score
    }

    fn score_curve(&self) -> &ScoreCurve {
        &self.score_curve
    }

    fn require_active(&self) -> bool {
        self.require_active
    }
}
