//! Daily challenge refill.

use crate::action::{ActionContext, ActionTransition, SystemActionError};
use crate::env::ArenaEnv;
use crate::state::{Address, WorldState};

use super::{arena_copy, open_arena};

/// Refills every entry of a weekly arena to the configured daily budget.
///
/// Scores, counters, and the active flag are left as they are.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetDailyChallenges {
    pub weekly_arena_address: Address,
}

impl ResetDailyChallenges {
    pub fn new(weekly_arena_address: Address) -> Self {
        Self {
            weekly_arena_address,
        }
    }
}

impl ActionTransition for ResetDailyChallenges {
    type Error = SystemActionError;
    type Resolution = u32;
    type Output = ();

    fn validate(
        &self,
        state: &WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        open_arena(state, &self.weekly_arena_address).map(|_| ())
    }

    fn resolve(
        &self,
        _state: &WorldState,
        env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<u32, Self::Error> {
        Ok(env.config()?.max_daily_challenges())
    }

    fn apply(
        &self,
        max: u32,
        state: &mut WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        let mut arena = arena_copy(state, &self.weekly_arena_address)?;
        arena.reset_daily_challenges(max);
        state.set_weekly_arena_state(arena);
        Ok(())
    }
}
