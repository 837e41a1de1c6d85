//! Oracle access errors.
//!
//! Errors related to oracle availability.

use crate::error::{ArenaError, ErrorSeverity};

/// Errors that occur when accessing oracle data.
///
/// The engine cannot proceed without configuration, reward tables, or a combat
/// resolver, so all of these are fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// ConfigOracle is not available in the environment.
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    /// RewardOracle is not available in the environment.
    #[error("RewardOracle not available")]
    RewardsNotAvailable,

    /// CombatResolver is not available in the environment.
    #[error("CombatResolver not available")]
    ResolverNotAvailable,
}

impl ArenaError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RewardsNotAvailable => "ORACLE_REWARDS_NOT_AVAILABLE",
            ResolverNotAvailable => "ORACLE_RESOLVER_NOT_AVAILABLE",
        }
    }
}
