//! Per-entry administration: removal and activation.

use crate::action::{ActionContext, ActionTransition, SystemActionError};
use crate::env::ArenaEnv;
use crate::state::{Address, WorldState};

use super::{arena_copy, open_arena};

fn require_entry(
    state: &WorldState,
    weekly_arena_address: &Address,
    avatar_address: &Address,
) -> Result<(), SystemActionError> {
    if open_arena(state, weekly_arena_address)?.contains(avatar_address) {
        Ok(())
    } else {
        Err(SystemActionError::EntryNotFound(*avatar_address))
    }
}

/// Deletes an avatar's entry from a weekly arena.
///
/// Used by epoch rollover. A removed avatar fails the ranking check of any
/// later battle, as actor or as enemy, until it joins again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveEntry {
    pub weekly_arena_address: Address,
    pub avatar_address: Address,
}

impl RemoveEntry {
    pub fn new(weekly_arena_address: Address, avatar_address: Address) -> Self {
        Self {
            weekly_arena_address,
            avatar_address,
        }
    }
}

impl ActionTransition for RemoveEntry {
    type Error = SystemActionError;
    type Resolution = ();
    type Output = ();

    fn validate(
        &self,
        state: &WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        require_entry(state, &self.weekly_arena_address, &self.avatar_address)
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
        arena
            .remove(&self.avatar_address)
            .ok_or(SystemActionError::EntryNotFound(self.avatar_address))?;
        state.set_weekly_arena_state(arena);
        Ok(())
    }
}

/// Flips an entry's participation flag on.
///
/// Independent of challenge throttling; the daily budget is not touched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivateEntry {
    pub weekly_arena_address: Address,
    pub avatar_address: Address,
}

impl ActivateEntry {
    pub fn new(weekly_arena_address: Address, avatar_address: Address) -> Self {
        Self {
            weekly_arena_address,
            avatar_address,
        }
    }
}

impl ActionTransition for ActivateEntry {
    type Error = SystemActionError;
    type Resolution = ();
    type Output = ();

    fn validate(
        &self,
        state: &WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        require_entry(state, &self.weekly_arena_address, &self.avatar_address)
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
        if !arena.activate(&self.avatar_address) {
            return Err(SystemActionError::EntryNotFound(self.avatar_address));
        }
        state.set_weekly_arena_state(arena);
        Ok(())
    }
}
