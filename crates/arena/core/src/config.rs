use crate::env::BattleResult;

/// Arena rules that stay fixed for an execution context.
///
/// Constructed once per context and exposed to the pipeline through
/// [`ConfigOracle`](crate::env::ConfigOracle); nothing in the core reads
/// configuration from globals.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    /// Adventure stage an avatar must have cleared to battle in the arena.
    pub required_stage: u32,
    /// Daily challenge budget granted on join and on every daily reset.
    pub max_daily_challenges: u32,
    /// Score assigned to a new leaderboard entry.
    pub initial_score: u32,
    pub score_curve: ScoreCurve,
    /// When set, inactive entries can neither attack nor be targeted.
    pub require_active: bool,
    /// Turn cap for the reference duel resolver.
    pub max_turns: u32,
}

impl ArenaConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REQUIRED_STAGE: u32 = 25;
    pub const DEFAULT_MAX_DAILY_CHALLENGES: u32 = 5;
    pub const DEFAULT_INITIAL_SCORE: u32 = 1000;
    pub const DEFAULT_MAX_TURNS: u32 = 200;

    pub fn new() -> Self {
        Self {
            required_stage: Self::DEFAULT_REQUIRED_STAGE,
            max_daily_challenges: Self::DEFAULT_MAX_DAILY_CHALLENGES,
            initial_score: Self::DEFAULT_INITIAL_SCORE,
            score_curve: ScoreCurve::default(),
            require_active: false,
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }

    #[must_use]
    pub fn with_required_stage(mut self, stage: u32) -> Self {
        self.required_stage = stage;
        self
    }

    #[must_use]
    pub fn with_require_active(mut self, require_active: bool) -> Self {
        self.require_active = require_active;
        self
    }

    #[must_use]
    pub fn with_score_curve(mut self, curve: ScoreCurve) -> Self {
        self.score_curve = curve;
        self
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One band of the score curve.
///
/// Applies when `enemy.score - actor.score >= min_gap` and no later band
/// matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreStep {
    pub min_gap: i64,
    pub win_gain: u32,
    pub lose_penalty: u32,
}

impl ScoreStep {
    pub const fn new(min_gap: i64, win_gain: u32, lose_penalty: u32) -> Self {
        Self {
            min_gap,
            win_gain,
            lose_penalty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScoreCurveError {
    #[error("score curve must have at least one step")]
    Empty,

    #[error("score curve steps must be sorted by strictly increasing min_gap (step {index})")]
    Unsorted { index: usize },

    #[error("win gain must be at least 1 (step {index})")]
    ZeroWinGain { index: usize },

    #[error("win gain must not shrink as the enemy's lead grows (step {index})")]
    DecreasingWinGain { index: usize },
}

/// Piecewise score rule keyed by the score gap between enemy and actor.
///
/// Invariants (checked on construction): at least one step, `min_gap`
/// strictly increasing, every `win_gain >= 1`, and `win_gain` non-decreasing.
/// A win therefore always raises the score, by more the further ahead the
/// enemy stands, and a loss never raises it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<ScoreStep>", into = "Vec<ScoreStep>"))]
pub struct ScoreCurve {
    steps: Vec<ScoreStep>,
}

impl ScoreCurve {
    pub fn new(steps: Vec<ScoreStep>) -> Result<Self, ScoreCurveError> {
        if steps.is_empty() {
            return Err(ScoreCurveError::Empty);
        }
        for (index, step) in steps.iter().enumerate() {
            if step.win_gain == 0 {
                return Err(ScoreCurveError::ZeroWinGain { index });
            }
            if index > 0 {
                let previous = &steps[index - 1];
                if step.min_gap <= previous.min_gap {
                    return Err(ScoreCurveError::Unsorted { index });
                }
                if step.win_gain < previous.win_gain {
                    return Err(ScoreCurveError::DecreasingWinGain { index });
                }
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScoreStep] {
        &self.steps
    }

    /// Band for `gap`. Gaps below the first band use the first band.
    pub fn step_for(&self, gap: i64) -> &ScoreStep {
        self.steps
            .iter()
            .rev()
            .find(|step| gap >= step.min_gap)
            .unwrap_or(&self.steps[0])
    }

    /// Signed score change for an actor at `actor_score` who fought an enemy
    /// at `enemy_score` with the given result.
    pub fn score_delta(&self, actor_score: u32, enemy_score: u32, result: BattleResult) -> i64 {
        let gap = i64::from(enemy_score) - i64::from(actor_score);
        let step = self.step_for(gap);
        match result {
            BattleResult::Win => i64::from(step.win_gain),
            BattleResult::Lose => -i64::from(step.lose_penalty),
        }
    }
}

impl Default for ScoreCurve {
    fn default() -> Self {
        Self {
            steps: vec![
                ScoreStep::new(i64::MIN, 1, 15),
                ScoreStep::new(-300, 5, 10),
                ScoreStep::new(-100, 10, 8),
                ScoreStep::new(0, 20, 5),
                ScoreStep::new(100, 30, 3),
                ScoreStep::new(300, 45, 1),
                ScoreStep::new(500, 60, 0),
            ],
        }
    }
}

impl TryFrom<Vec<ScoreStep>> for ScoreCurve {
    type Error = ScoreCurveError;

    fn try_from(steps: Vec<ScoreStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<ScoreCurve> for Vec<ScoreStep> {
    fn from(curve: ScoreCurve) -> Self {
        curve.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curve_satisfies_its_own_invariants() {
        let steps = ScoreCurve::default().steps().to_vec();
        assert_eq!(ScoreCurve::new(steps), Ok(ScoreCurve::default()));
    }

    #[test]
    fn win_gain_grows_with_enemy_lead() {
        let curve = ScoreCurve::default();
        let mut previous = 0;
        for enemy in [200, 800, 950, 1000, 1150, 1350, 1600] {
            let gain = curve.score_delta(1000, enemy, BattleResult::Win);
            assert!(gain >= 1);
            assert!(gain >= previous, "gain shrank at enemy score {enemy}");
            previous = gain;
        }
    }

    #[test]
    fn loss_never_raises_score() {
        let curve = ScoreCurve::default();
        for enemy in [0, 1000, 5000] {
            assert!(curve.score_delta(1000, enemy, BattleResult::Lose) <= 0);
        }
    }

    #[test]
    fn rejects_invalid_curves() {
        assert_eq!(ScoreCurve::new(vec![]), Err(ScoreCurveError::Empty));
        assert_eq!(
            ScoreCurve::new(vec![ScoreStep::new(0, 0, 0)]),
            Err(ScoreCurveError::ZeroWinGain { index: 0 })
        );
        assert_eq!(
            ScoreCurve::new(vec![ScoreStep::new(10, 5, 0), ScoreStep::new(10, 6, 0)]),
            Err(ScoreCurveError::Unsorted { index: 1 })
        );
        assert_eq!(
            ScoreCurve::new(vec![ScoreStep::new(0, 5, 0), ScoreStep::new(10, 4, 0)]),
            Err(ScoreCurveError::DecreasingWinGain { index: 1 })
        );
    }

    #[test]
    fn gaps_below_first_band_use_first_band() {
        let curve = ScoreCurve::new(vec![ScoreStep::new(0, 3, 2)]).unwrap();
        assert_eq!(curve.step_for(-1_000), &ScoreStep::new(0, 3, 2));
    }
}
