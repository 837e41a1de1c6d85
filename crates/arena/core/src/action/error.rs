//! Error types for arena actions.
//!
//! Each action has its own error enum. Callers distinguish failures by
//! variant (or [`ArenaError::error_code`]), never by message text.

use crate::env::{OracleError, ResolverError, Side};
use crate::error::{ArenaError, ErrorSeverity};
use crate::state::{Address, InventoryError, ItemId};

/// Which record a `StateNotFound` error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateSubject {
    Actor,
    Enemy,
    WeeklyArena,
}

impl StateSubject {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Enemy => "enemy",
            Self::WeeklyArena => "weekly arena",
        }
    }
}

impl core::fmt::Display for StateSubject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while executing a ranking battle.
///
/// Validation variants are listed in the order the checks run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RankingBattleError {
    #[error("an avatar cannot challenge itself")]
    InvalidTarget,

    #[error("signer {signer} does not own avatar {avatar}")]
    UnauthorizedActor { signer: Address, avatar: Address },

    #[error("{which} state not found at {address}")]
    StateNotFound {
        which: StateSubject,
        address: Address,
    },

    #[error("stage {required} must be cleared to enter the arena (cleared {cleared})")]
    InsufficientProgress { required: u32, cleared: u32 },

    #[error("weekly arena {0} has ended")]
    ArenaClosed(Address),

    #[error("{which} is not ranked in this weekly arena")]
    ActorNotRanked { which: Side },

    #[error("{which} entry is not active")]
    EntryInactive { which: Side },

    #[error("no daily challenges left")]
    ChallengeExhausted,

    #[error("item {id} is listed more than once in the loadout")]
    DuplicateItem { id: ItemId },

    #[error("item {id} is not held as the requested kind")]
    ItemNotOwned { id: ItemId },

    #[error("costume sheet {sheet_id} is not held")]
    CostumeNotOwned { sheet_id: u32 },

    #[error("combat resolver failed: {0}")]
    ResolverFailure(#[from] ResolverError),

    #[error("reward could not be stored: {0}")]
    Reward(#[from] InventoryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ArenaError for RankingBattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ChallengeExhausted => ErrorSeverity::Recoverable,
            Self::ResolverFailure(_) | Self::Reward(_) => ErrorSeverity::Internal,
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget => "RANKING_BATTLE_INVALID_TARGET",
            Self::UnauthorizedActor { .. } => "RANKING_BATTLE_UNAUTHORIZED_ACTOR",
            Self::StateNotFound { .. } => "RANKING_BATTLE_STATE_NOT_FOUND",
            Self::InsufficientProgress { .. } => "RANKING_BATTLE_INSUFFICIENT_PROGRESS",
            Self::ArenaClosed(_) => "RANKING_BATTLE_ARENA_CLOSED",
            Self::ActorNotRanked { .. } => "RANKING_BATTLE_ACTOR_NOT_RANKED",
            Self::EntryInactive { .. } => "RANKING_BATTLE_ENTRY_INACTIVE",
            Self::ChallengeExhausted => "RANKING_BATTLE_CHALLENGE_EXHAUSTED",
            Self::DuplicateItem { .. } => "RANKING_BATTLE_DUPLICATE_ITEM",
            Self::ItemNotOwned { .. } => "RANKING_BATTLE_ITEM_NOT_OWNED",
            Self::CostumeNotOwned { .. } => "RANKING_BATTLE_COSTUME_NOT_OWNED",
            Self::ResolverFailure(_) => "RANKING_BATTLE_RESOLVER_FAILURE",
            Self::Reward(_) => "RANKING_BATTLE_REWARD",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Errors that can occur while joining a weekly arena.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JoinArenaError {
    #[error("{which} state not found at {address}")]
    StateNotFound {
        which: StateSubject,
        address: Address,
    },

    #[error("signer {signer} does not own avatar {avatar}")]
    UnauthorizedActor { signer: Address, avatar: Address },

    #[error("weekly arena {0} has ended")]
    ArenaClosed(Address),

    #[error("avatar {0} is already ranked in this weekly arena")]
    AlreadyRanked(Address),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ArenaError for JoinArenaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StateNotFound { .. } => "JOIN_ARENA_STATE_NOT_FOUND",
            Self::UnauthorizedActor { .. } => "JOIN_ARENA_UNAUTHORIZED_ACTOR",
            Self::ArenaClosed(_) => "JOIN_ARENA_ARENA_CLOSED",
            Self::AlreadyRanked(_) => "JOIN_ARENA_ALREADY_RANKED",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Errors raised by administrative arena actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SystemActionError {
    #[error("weekly arena not found at {0}")]
    ArenaNotFound(Address),

    #[error("weekly arena {0} has ended")]
    ArenaClosed(Address),

    #[error("avatar {0} has no entry in this weekly arena")]
    EntryNotFound(Address),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ArenaError for SystemActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ArenaNotFound(_) => "SYSTEM_ARENA_NOT_FOUND",
            Self::ArenaClosed(_) => "SYSTEM_ARENA_CLOSED",
            Self::EntryNotFound(_) => "SYSTEM_ENTRY_NOT_FOUND",
            Self::Oracle(error) => error.error_code(),
        }
    }
}
