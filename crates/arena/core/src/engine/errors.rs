//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, ActivateEntry, EndWeeklyArena, JoinArena, RankingBattle, RemoveEntry,
    ResetDailyChallenges,
};
use crate::error::{ArenaError, ErrorSeverity};
use crate::state::Address;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    Validate,
    Resolve,
    Apply,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::Validate => "validate",
            TransitionPhase::Resolve => "resolve",
            TransitionPhase::Apply => "apply",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the arena engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("ranking battle failed: {0}")]
    RankingBattle(TransitionPhaseError<<RankingBattle as ActionTransition>::Error>),

    #[error("join arena failed: {0}")]
    JoinArena(TransitionPhaseError<<JoinArena as ActionTransition>::Error>),

    #[error("reset daily challenges failed: {0}")]
    ResetDailyChallenges(TransitionPhaseError<<ResetDailyChallenges as ActionTransition>::Error>),

    #[error("end weekly arena failed: {0}")]
    EndWeeklyArena(TransitionPhaseError<<EndWeeklyArena as ActionTransition>::Error>),

    #[error("remove entry failed: {0}")]
    RemoveEntry(TransitionPhaseError<<RemoveEntry as ActionTransition>::Error>),

    #[error("activate entry failed: {0}")]
    ActivateEntry(TransitionPhaseError<<ActivateEntry as ActionTransition>::Error>),

    #[error("invalid signer: system action must be signed by SYSTEM (got {signer})")]
    SystemActionNotFromSystem { signer: Address },
}

impl ExecuteError {
    /// Phase that failed, or `None` for envelope errors raised before any phase.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::RankingBattle(e) => Some(e.phase),
            Self::JoinArena(e) => Some(e.phase),
            Self::ResetDailyChallenges(e) => Some(e.phase),
            Self::EndWeeklyArena(e) => Some(e.phase),
            Self::RemoveEntry(e) => Some(e.phase),
            Self::ActivateEntry(e) => Some(e.phase),
            Self::SystemActionNotFromSystem { .. } => None,
        }
    }

    /// Inner ranking battle error, if this is one.
    pub fn as_ranking_battle(&self) -> Option<&<RankingBattle as ActionTransition>::Error> {
        match self {
            Self::RankingBattle(e) => Some(&e.error),
            _ => None,
        }
    }
}

impl ArenaError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RankingBattle(e) => e.error.severity(),
            Self::JoinArena(e) => e.error.severity(),
            Self::ResetDailyChallenges(e) => e.error.severity(),
            Self::EndWeeklyArena(e) => e.error.severity(),
            Self::RemoveEntry(e) => e.error.severity(),
            Self::ActivateEntry(e) => e.error.severity(),
            Self::SystemActionNotFromSystem { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RankingBattle(e) => e.error.error_code(),
            Self::JoinArena(e) => e.error.error_code(),
            Self::ResetDailyChallenges(e) => e.error.error_code(),
            Self::EndWeeklyArena(e) => e.error.error_code(),
            Self::RemoveEntry(e) => e.error.error_code(),
            Self::ActivateEntry(e) => e.error.error_code(),
            Self::SystemActionNotFromSystem { .. } => "SYSTEM_ACTION_NOT_FROM_SYSTEM",
        }
    }
}
