//! Weekly epoch close.

use crate::action::{ActionContext, ActionTransition, SystemActionError};
use crate::env::ArenaEnv;
use crate::state::{Address, WorldState};

use super::{arena_copy, open_arena};

/// Sets the terminal `ended` flag of a weekly arena.
///
/// Afterwards no action can mutate the arena, including this one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndWeeklyArena {
    pub weekly_arena_address: Address,
}

impl EndWeeklyArena {
    pub fn new(weekly_arena_address: Address) -> Self {
        Self {
            weekly_arena_address,
        }
    }
}

impl ActionTransition for EndWeeklyArena {
    type Error = SystemActionError;
    type Resolution = ();
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
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn apply(
        &self,
        _resolution: (),
        state: &mut WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        let mut arena = arena_copy(state, &self.weekly_arena_address)?;
        arena.end();
        state.set_weekly_arena_state(arena);
        Ok(())
    }
}
