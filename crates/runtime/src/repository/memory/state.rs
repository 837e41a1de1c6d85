//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use arena_core::WorldState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Snapshots are stored by value; cloning a [`WorldState`] only copies record
/// pointers, so keeping every commit is cheap.
pub struct InMemoryStateRepo {
    states: RwLock<BTreeMap<u64, WorldState>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create with a genesis snapshot at nonce 0.
    pub fn with_genesis(genesis: WorldState) -> Self {
        Self {
            states: RwLock::new(BTreeMap::from([(0, genesis)])),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, nonce: u64, state: &WorldState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(nonce, state.clone());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<WorldState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&nonce).cloned())
    }

    fn exists(&self, nonce: u64) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&nonce))
            .unwrap_or(false)
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(&nonce);
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().copied().collect())
    }
}
