//! Arena actions and the execution context they run under.
//!
//! # Module Structure
//!
//! - `ranking_battle`: the ranking battle input and its transition
//! - `execute`: validation, battle, and reward stages of a ranking battle
//! - `join`: weekly arena registration
//! - `system`: administrative actions (daily reset, epoch end, entry admin)
//! - `transition`: the three-phase [`ActionTransition`] contract
//! - `codec`: canonical byte encoding
//! - `error`: per-action error types

#[cfg(feature = "serde")]
pub mod codec;
pub mod error;
pub mod execute;
pub mod join;
pub mod ranking_battle;
pub mod system;
pub mod transition;

#[cfg(feature = "serde")]
pub use codec::CodecError;
pub use error::{JoinArenaError, RankingBattleError, StateSubject, SystemActionError};
pub use join::JoinArena;
pub use ranking_battle::{BattleResolution, RankingBattle, RankingBattleOutput};
pub use system::{ActivateEntry, EndWeeklyArena, RemoveEntry, ResetDailyChallenges, SystemAction};
pub use transition::ActionTransition;

use crate::state::Address;

/// Externally visible inputs every executor must agree on.
///
/// Nothing else (clock, local entropy) may influence an execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionContext {
    /// Identity that signed the action envelope.
    pub signer: Address,
    pub block_index: u64,
    pub random_seed: u64,
}

impl ActionContext {
    pub const fn new(signer: Address, block_index: u64, random_seed: u64) -> Self {
        Self {
            signer,
            block_index,
            random_seed,
        }
    }

    /// Context for administrative actions.
    pub const fn system(block_index: u64, random_seed: u64) -> Self {
        Self::new(Address::SYSTEM, block_index, random_seed)
    }
}

/// Every action the arena engine executes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    RankingBattle(RankingBattle),
    JoinArena(JoinArena),
    System(SystemAction),
}

impl Action {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RankingBattle(_) => "ranking_battle",
            Self::JoinArena(_) => "join_arena",
            Self::System(system) => system.as_str(),
        }
    }

    pub const fn is_system(&self) -> bool {
        matches!(self, Self::System(_))
    }

    /// Weekly arena the action reads or writes.
    pub fn weekly_arena_address(&self) -> Address {
        match self {
            Self::RankingBattle(battle) => battle.weekly_arena_address,
            Self::JoinArena(join) => join.weekly_arena_address,
            Self::System(SystemAction::ResetDailyChallenges(action)) => {
                action.weekly_arena_address
            }
            Self::System(SystemAction::EndWeeklyArena(action)) => action.weekly_arena_address,
            Self::System(SystemAction::RemoveEntry(action)) => action.weekly_arena_address,
            Self::System(SystemAction::ActivateEntry(action)) => action.weekly_arena_address,
        }
    }
}

impl From<RankingBattle> for Action {
    fn from(action: RankingBattle) -> Self {
        Self::RankingBattle(action)
    }
}

impl From<JoinArena> for Action {
    fn from(action: JoinArena) -> Self {
        Self::JoinArena(action)
    }
}

impl From<SystemAction> for Action {
    fn from(action: SystemAction) -> Self {
        Self::System(action)
    }
}

/// Action-specific result of a committed execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    RankingBattle(RankingBattleOutput),
    /// Rank of the freshly joined entry.
    JoinArena { rank: usize },
    System,
}
