//! Traits describing read-only inputs to the pipeline.
//!
//! Oracles expose arena configuration, the reward table, and the combat
//! resolver. The [`Env`] aggregate bundles them so the engine can reach
//! everything it needs without hard coupling to concrete implementations.
//! Randomness is not an oracle: every seed is derived from the
//! [`ActionContext`](crate::action::ActionContext) with [`compute_seed`].
mod combat;
mod config;
mod error;
mod rewards;
mod rng;

pub use combat::{
    BattleEvent, BattleLog, BattleResult, CombatResolver, CombatSnapshot, DuelResolver,
    ResolverError, Side,
};
pub use config::ConfigOracle;
pub use error::OracleError;
pub use rewards::{RewardOracle, RewardRow, RewardTable};
pub use rng::{PcgRng, RngOracle, compute_seed, seed_context};

/// Aggregates read-only oracles required by the action pipeline.
pub struct Env<'a, C, W, B>
where
    C: ConfigOracle + ?Sized,
    W: RewardOracle + ?Sized,
    B: CombatResolver + ?Sized,
{
    config: Option<&'a C>,
    rewards: Option<&'a W>,
    resolver: Option<&'a B>,
}

// Manual impls: the slots are shared references, so no bounds on the oracles.
impl<C, W, B> Clone for Env<'_, C, W, B>
where
    C: ConfigOracle + ?Sized,
    W: RewardOracle + ?Sized,
    B: CombatResolver + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, W, B> Copy for Env<'_, C, W, B>
where
    C: ConfigOracle + ?Sized,
    W: RewardOracle + ?Sized,
    B: CombatResolver + ?Sized,
{
}

pub type ArenaEnv<'a> = Env<
    'a,
    dyn ConfigOracle + 'a,
    dyn RewardOracle + 'a,
    dyn CombatResolver + 'a,
>;

impl<'a, C, W, B> Env<'a, C, W, B>
where
    C: ConfigOracle + ?Sized,
    W: RewardOracle + ?Sized,
    B: CombatResolver + ?Sized,
{
    pub fn new(
        config: Option<&'a C>,
        rewards: Option<&'a W>,
        resolver: Option<&'a B>,
    ) -> Self {
        Self {
            config,
            rewards,
            resolver,
        }
    }

    pub fn with_all(config: &'a C, rewards: &'a W, resolver: &'a B) -> Self {
        Self::new(Some(config), Some(rewards), Some(resolver))
    }

    pub fn empty() -> Self {
        Self {
            config: None,
            rewards: None,
            resolver: None,
        }
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RewardOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RewardsNotAvailable` if no reward table was provided.
    pub fn rewards(&self) -> Result<&'a W, OracleError> {
        self.rewards.ok_or(OracleError::RewardsNotAvailable)
    }

    /// Returns the CombatResolver, or an error if not available.
    pub fn resolver(&self) -> Result<&'a B, OracleError> {
        self.resolver.ok_or(OracleError::ResolverNotAvailable)
    }
}

impl<'a, C, W, B> Env<'a, C, W, B>
where
    C: ConfigOracle + 'a,
    W: RewardOracle + 'a,
    B: CombatResolver + 'a,
{
    /// Converts this environment into a trait-object based `ArenaEnv` (borrows self).
    pub fn as_arena_env(&self) -> ArenaEnv<'a> {
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rewards: Option<&'a dyn RewardOracle> = self.rewards.map(|rewards| rewards as _);
        let resolver: Option<&'a dyn CombatResolver> = self.resolver.map(|resolver| resolver as _);
        Env::new(config, rewards, resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[test]
    fn missing_oracles_surface_as_errors() {
        let env = ArenaEnv::empty();
        assert_eq!(env.config().err(), Some(OracleError::ConfigNotAvailable));
        assert_eq!(env.rewards().err(), Some(OracleError::RewardsNotAvailable));
        assert_eq!(env.resolver().err(), Some(OracleError::ResolverNotAvailable));
    }

    #[test]
    fn as_arena_env_keeps_every_slot() {
        let config = ArenaConfig::default();
        let rewards = RewardTable::default();
        let resolver = DuelResolver::new(10);

        let env = Env::with_all(&config, &rewards, &resolver).as_arena_env();
        assert_eq!(env.config().unwrap().required_stage(), config.required_stage);
        assert!(env.rewards().unwrap().rows().is_empty());
        assert!(env.resolver().is_ok());
    }
}
