//! Oracle instances owned by the runtime.
//!
//! The engine only borrows oracles through [`ArenaEnv`]; [`OracleSet`] is the
//! owner the commit worker keeps for its whole lifetime.

use arena_content::{ContentBundle, ContentFactory};
use arena_core::{
    ArenaConfig, ArenaEnv, CombatResolver, ConfigOracle, Env, RewardOracle, RewardTable,
};

/// Arena rules, reward table, and combat resolver for one runtime.
pub struct OracleSet {
    config: ArenaConfig,
    rewards: RewardTable,
    resolver: Box<dyn CombatResolver>,
}

impl OracleSet {
    pub fn new(
        config: ArenaConfig,
        rewards: RewardTable,
        resolver: impl CombatResolver + 'static,
    ) -> Self {
        Self {
            config,
            rewards,
            resolver: Box::new(resolver),
        }
    }

    /// Oracles built from the data files shipped with `arena-content`.
    pub fn bundled() -> anyhow::Result<Self> {
        Ok(ContentFactory::bundled().load_bundle()?.into())
    }

    /// Replaces the combat resolver, keeping rules and rewards.
    #[must_use]
    pub fn with_resolver(self, resolver: impl CombatResolver + 'static) -> Self {
        self.with_boxed_resolver(Box::new(resolver))
    }

    #[must_use]
    pub fn with_boxed_resolver(mut self, resolver: Box<dyn CombatResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the arena rules, keeping rewards and resolver.
    #[must_use]
    pub fn with_config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    /// Borrows the oracles as the engine's environment.
    pub fn env(&self) -> ArenaEnv<'_> {
        let config: &dyn ConfigOracle = &self.config;
        let rewards: &dyn RewardOracle = &self.rewards;
        let resolver: &dyn CombatResolver = self.resolver.as_ref();
        Env::with_all(config, rewards, resolver)
    }
}

impl From<ContentBundle> for OracleSet {
    fn from(bundle: ContentBundle) -> Self {
        Self::new(bundle.config, bundle.rewards, bundle.resolver)
    }
}

impl std::fmt::Debug for OracleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleSet")
            .field("config", &self.config)
            .field("rewards", &self.rewards)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_env_exposes_every_oracle() {
        let oracles = OracleSet::bundled().expect("bundled content should load");
        let env = oracles.env();

        assert!(env.config().is_ok());
        assert!(env.resolver().is_ok());
        assert!(!env.rewards().unwrap().rows().is_empty());
    }
}
