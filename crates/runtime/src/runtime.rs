//! High-level runtime orchestrator.
//!
//! The runtime owns the commit worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the arena.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use arena_core::{ArenaConfig, CombatResolver, WorldState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::ArenaEvent;
use crate::oracle::OracleSet;
use crate::repository::{
    ActionRepository, FileActionLog, FileStateRepository, InMemoryActionLog, InMemoryStateRepo,
    StateRepository,
};
use crate::utils::hash::short_root;
use crate::workers::{Command, CommitWorker};

const ACTION_LOG_FILE: &str = "actions.log";
const STATES_DIR: &str = "states";

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Arena rules used when no explicit [`OracleSet`] is supplied.
    pub arena: ArenaConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Block index of the genesis snapshot; the first action runs in the next one.
    pub genesis_block: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            genesis_block: 0,
        }
    }
}

/// Main runtime that orchestrates arena commits.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Start a runtime with bundled content, an empty genesis snapshot, and
    /// in-memory repositories.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ArenaEvent> {
        self.handle.subscribe_events()
    }

    /// Stop accepting commands and wait for the worker to drain.
    ///
    /// The worker exits once every outstanding handle clone is dropped too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<WorldState>,
    oracles: Option<OracleSet>,
    resolver: Option<Box<dyn CombatResolver>>,
    states: Option<Arc<dyn StateRepository>>,
    actions: Option<Box<dyn ActionRepository>>,
    data_dir: Option<PathBuf>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            resolver: None,
            states: None,
            actions: None,
            data_dir: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Genesis snapshot. Ignored when the state repository already holds
    /// snapshots; the runtime resumes from the latest one instead.
    pub fn initial_state(mut self, state: WorldState) -> Self {
        self.state = Some(state);
        self
    }

    /// Oracles to execute against. Takes precedence over `config.arena`.
    pub fn oracles(mut self, oracles: OracleSet) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Replace the combat resolver of whichever oracles are used.
    pub fn resolver(mut self, resolver: impl CombatResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn state_repository(mut self, states: Arc<dyn StateRepository>) -> Self {
        self.states = Some(states);
        self
    }

    pub fn action_repository(mut self, actions: impl ActionRepository + 'static) -> Self {
        self.actions = Some(Box::new(actions));
        self
    }

    /// Persist snapshots under `dir/states` and the action log at
    /// `dir/actions.log`, unless repositories were set explicitly.
    pub fn persist_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Build the runtime and spawn its commit worker.
    pub async fn build(self) -> Result<Runtime> {
        let mut oracles = match self.oracles {
            Some(oracles) => oracles,
            None => OracleSet::bundled()
                .map_err(RuntimeError::Content)?
                .with_config(self.config.arena.clone()),
        };
        if let Some(resolver) = self.resolver {
            oracles = oracles.with_boxed_resolver(resolver);
        }

        let states: Arc<dyn StateRepository> = match (self.states, &self.data_dir) {
            (Some(states), _) => states,
            (None, Some(dir)) => Arc::new(FileStateRepository::new(dir.join(STATES_DIR))?),
            (None, None) => Arc::new(InMemoryStateRepo::new()),
        };
        let actions: Box<dyn ActionRepository> = match (self.actions, &self.data_dir) {
            (Some(actions), _) => actions,
            (None, Some(dir)) => Box::new(FileActionLog::open_or_create(dir, ACTION_LOG_FILE)?),
            (None, None) => Box::new(InMemoryActionLog::new()),
        };

        let (state, nonce, block_index) = match states.latest()? {
            Some((nonce, state)) => {
                let block_index = actions
                    .entries()?
                    .last()
                    .map_or(self.config.genesis_block, |entry| entry.ctx.block_index);
                info!(
                    target: "runtime::worker",
                    nonce,
                    block = block_index,
                    root = %short_root(&state.state_root()?),
                    "Resuming from stored snapshot"
                );
                (state, nonce, block_index)
            }
            None => {
                let genesis = self.state.unwrap_or_default();
                states.save(0, &genesis)?;
                (genesis, 0, self.config.genesis_block)
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<ArenaEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = CommitWorker::new(
            state,
            nonce,
            block_index,
            oracles,
            states,
            actions,
            command_rx,
            event_tx,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
