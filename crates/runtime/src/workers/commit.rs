//! Commit worker that owns the authoritative [`WorldState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! actions one at a time via [`ArenaEngine`], persists each commit, and
//! publishes [`ArenaEvent`] notifications.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, warn};

use arena_core::{
    Action, ActionContext, Address, ArenaEngine, ArenaError, ExecuteError, TransitionPhase,
    WorldState,
};

use crate::api::{CommitReceipt, Result, RuntimeError};
use crate::events::ArenaEvent;
use crate::oracle::OracleSet;
use crate::repository::{ActionLogEntry, ActionRepository, RepositoryError, StateRepository};
use crate::utils::hash::short_root;

/// Commands that can be sent to the commit worker.
pub enum Command {
    /// Execute an action in the next block.
    Execute {
        action: Action,
        signer: Address,
        random_seed: u64,
        reply: oneshot::Sender<Result<CommitReceipt>>,
    },
    /// Clone of the current snapshot.
    QueryState { reply: oneshot::Sender<WorldState> },
    /// Snapshot stored under a nonce.
    LoadState {
        nonce: u64,
        reply: oneshot::Sender<Result<WorldState>>,
    },
    QueryNonce { reply: oneshot::Sender<u64> },
}

/// Background task that serializes commits.
pub struct CommitWorker {
    state: WorldState,
    nonce: u64,
    block_index: u64,
    engine: ArenaEngine,
    oracles: OracleSet,
    states: Arc<dyn StateRepository>,
    actions: Box<dyn ActionRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<ArenaEvent>,
}

impl CommitWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: WorldState,
        nonce: u64,
        block_index: u64,
        oracles: OracleSet,
        states: Arc<dyn StateRepository>,
        actions: Box<dyn ActionRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<ArenaEvent>,
    ) -> Self {
        Self {
            state,
            nonce,
            block_index,
            engine: ArenaEngine::new(),
            oracles,
            states,
            actions,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Exits once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        if let Err(e) = self.actions.flush() {
            error!(target: "runtime::worker", error = %e, "Failed to flush action log on shutdown");
        }
        debug!(target: "runtime::worker", nonce = self.nonce, "Commit worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute {
                action,
                signer,
                random_seed,
                reply,
            } => {
                let result = self.execute(action, signer, random_seed);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::LoadState { nonce, reply } => {
                let result = self
                    .states
                    .load(nonce)
                    .map_err(RuntimeError::from)
                    .and_then(|state| state.ok_or(RuntimeError::MissingSnapshot(nonce)));
                let _ = reply.send(result);
            }
            Command::QueryNonce { reply } => {
                let _ = reply.send(self.nonce);
            }
        }
    }

    fn execute(
        &mut self,
        action: Action,
        signer: Address,
        random_seed: u64,
    ) -> Result<CommitReceipt> {
        let ctx = ActionContext::new(signer, self.block_index + 1, random_seed);

        let outcome = match self
            .engine
            .execute(&self.state, &self.oracles.env(), &action, &ctx)
        {
            Ok(outcome) => outcome,
            Err(error) => {
                self.report_rejection(&action, &ctx, &error);
                return Err(error.into());
            }
        };

        let nonce = self.nonce + 1;
        let before_root = self.state.state_root()?;
        let after_root = outcome.state.state_root()?;

        // Persist before the in-memory snapshot advances.
        let log_offset = self.actions.size()?;
        self.states.save(nonce, &outcome.state)?;
        let entry = ActionLogEntry {
            nonce,
            ctx,
            action: action.clone(),
            before_root,
            after_root,
            delta: outcome.delta.clone(),
            result: outcome.result.clone(),
            events: outcome
                .battle_log()
                .map(|log| log.events.clone())
                .unwrap_or_default(),
        };
        if let Err(e) = self.append_entry(&entry) {
            self.roll_back(nonce, log_offset, &e);
            return Err(e.into());
        }

        self.state = outcome.state;
        self.nonce = nonce;
        self.block_index = ctx.block_index;

        info!(
            target: "runtime::worker",
            nonce,
            block = ctx.block_index,
            action = action.as_str(),
            touched = outcome.delta.touched().len(),
            root = %short_root(&after_root),
            "Action committed"
        );

        let _ = self.event_tx.send(ArenaEvent::ActionExecuted {
            nonce,
            block_index: ctx.block_index,
            action,
            delta: outcome.delta.clone(),
            result: outcome.result.clone(),
            state_root: after_root,
        });

        Ok(CommitReceipt {
            nonce,
            block_index: ctx.block_index,
            state_root: after_root,
            delta: outcome.delta,
            result: outcome.result,
        })
    }

    fn append_entry(&mut self, entry: &ActionLogEntry) -> std::result::Result<(), RepositoryError> {
        self.actions.append(entry)?;
        self.actions.flush()
    }

    /// Undoes a half-persisted commit so `nonce` can be reused.
    fn roll_back(&mut self, nonce: u64, log_offset: u64, cause: &RepositoryError) {
        warn!(
            target: "runtime::worker",
            nonce,
            error = %cause,
            "Action log write failed, rolling back commit"
        );

        if let Err(e) = self.actions.truncate(log_offset) {
            error!(target: "runtime::worker", nonce, error = %e, "Failed to truncate action log");
        }
        if let Err(e) = self.states.delete(nonce) {
            error!(target: "runtime::worker", nonce, error = %e, "Failed to delete snapshot");
        }
    }

    fn report_rejection(&self, action: &Action, ctx: &ActionContext, error: &ExecuteError) {
        let past_validate = matches!(
            error.phase(),
            Some(TransitionPhase::Resolve | TransitionPhase::Apply)
        );

        if past_validate || error.severity().is_internal() {
            error!(
                target: "runtime::worker",
                action = action.as_str(),
                signer = %ctx.signer,
                phase = error.phase().map(|p| p.as_str()),
                code = error.error_code(),
                error = %error,
                "Action execution failed"
            );
        } else {
            debug!(
                target: "runtime::worker",
                action = action.as_str(),
                signer = %ctx.signer,
                code = error.error_code(),
                error = %error,
                "Action rejected during validate"
            );
        }

        let _ = self.event_tx.send(ArenaEvent::ActionRejected {
            block_index: ctx.block_index,
            signer: ctx.signer,
            action: action.clone(),
            error: error.clone(),
        });
    }
}
