//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use arena_core::{ArenaConfig, ArenaEnv, DuelResolver, Env, RewardTable};

use crate::loaders::{ConfigLoader, LoadResult, RewardLoader};

/// Every oracle the arena engine needs, loaded from one data directory.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: ArenaConfig,
    pub rewards: RewardTable,
    pub resolver: DuelResolver,
}

impl ContentBundle {
    /// Builds the reference resolver from the config's turn cap.
    pub fn new(config: ArenaConfig, rewards: RewardTable) -> Self {
        let resolver = DuelResolver::new(config.max_turns);
        Self {
            config,
            rewards,
            resolver,
        }
    }

    /// Borrows the bundle as a trait-object environment for the engine.
    pub fn env(&self) -> ArenaEnv<'_> {
        Env::with_all(&self.config, &self.rewards, &self.resolver).as_arena_env()
    }
}

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── arena.toml
/// └── rewards.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load arena rules from `arena.toml`.
    pub fn load_config(&self) -> LoadResult<ArenaConfig> {
        ConfigLoader::load(&self.data_dir.join("arena.toml"))
    }

    /// Load the reward table from `rewards.ron`.
    pub fn load_rewards(&self) -> LoadResult<RewardTable> {
        RewardLoader::load(&self.data_dir.join("rewards.ron"))
    }

    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle::new(self.load_config()?, self.load_rewards()?))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
