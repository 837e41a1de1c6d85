//! Administrative actions that maintain weekly arena invariants.
//!
//! System actions are executed by [`Address::SYSTEM`] and cover the epoch
//! lifecycle around ranking battles:
//!
//! - daily refill of every entry's challenge budget
//! - closing the weekly epoch
//! - removing or activating individual entries
//!
//! They implement [`ActionTransition`](crate::action::ActionTransition) and run
//! through the same pipeline as player actions. None of them touch an arena
//! that has already ended.

mod end;
mod entry;
mod reset;

pub use end::EndWeeklyArena;
pub use entry::{ActivateEntry, RemoveEntry};
pub use reset::ResetDailyChallenges;

use crate::action::SystemActionError;
use crate::state::{Address, WeeklyArenaState, WorldState};

/// System action variants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemAction {
    ResetDailyChallenges(ResetDailyChallenges),
    EndWeeklyArena(EndWeeklyArena),
    RemoveEntry(RemoveEntry),
    ActivateEntry(ActivateEntry),
}

impl SystemAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ResetDailyChallenges(_) => "reset_daily_challenges",
            Self::EndWeeklyArena(_) => "end_weekly_arena",
            Self::RemoveEntry(_) => "remove_entry",
            Self::ActivateEntry(_) => "activate_entry",
        }
    }
}

macro_rules! impl_into_action {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SystemAction {
                fn from(action: $variant) -> Self {
                    Self::$variant(action)
                }
            }

            impl From<$variant> for crate::action::Action {
                fn from(action: $variant) -> Self {
                    Self::System(SystemAction::$variant(action))
                }
            }
        )*
    };
}

impl_into_action!(ResetDailyChallenges, EndWeeklyArena, RemoveEntry, ActivateEntry);

/// Loads a weekly arena that is still open for mutation.
fn open_arena<'s>(
    state: &'s WorldState,
    address: &Address,
) -> Result<&'s WeeklyArenaState, SystemActionError> {
    let arena = state
        .weekly_arena_state(address)
        .ok_or(SystemActionError::ArenaNotFound(*address))?;
    if arena.ended {
        return Err(SystemActionError::ArenaClosed(*address));
    }
    Ok(arena)
}

/// Clones the arena at `address` for rewriting. Assumes `open_arena` passed.
fn arena_copy(
    state: &WorldState,
    address: &Address,
) -> Result<WeeklyArenaState, SystemActionError> {
    open_arena(state, address).cloned()
}
