//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting actions, reading snapshots, and streaming events.

use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{Action, ActionResult, Address, StateDelta, WorldState};

use super::errors::{Result, RuntimeError};
use crate::events::ArenaEvent;
use crate::workers::Command;

/// What a committed action produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Commit sequence number; the snapshot is stored under it.
    pub nonce: u64,
    /// Block the action was executed in.
    pub block_index: u64,
    pub state_root: [u8; 32],
    pub delta: StateDelta,
    pub result: ActionResult,
}

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<ArenaEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<ArenaEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute `action` signed by `signer` in the next block.
    ///
    /// Actions are committed one at a time in submission order. A rejected
    /// action returns [`RuntimeError::Execute`] and leaves the snapshot as
    /// it was.
    pub async fn execute(
        &self,
        action: impl Into<Action>,
        signer: Address,
        random_seed: u64,
    ) -> Result<CommitReceipt> {
        let action = action.into();
        self.request(|reply| Command::Execute {
            action,
            signer,
            random_seed,
            reply,
        })
        .await?
    }

    /// Current committed snapshot.
    pub async fn query_state(&self) -> Result<WorldState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Snapshot stored under `nonce`.
    pub async fn load_state(&self, nonce: u64) -> Result<WorldState> {
        self.request(|reply| Command::LoadState { nonce, reply })
            .await?
    }

    /// Nonce of the latest commit (0 before any action commits).
    pub async fn nonce(&self) -> Result<u64> {
        self.request(|reply| Command::QueryNonce { reply }).await
    }

    /// Subscribe to commit and rejection events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<ArenaEvent> {
        self.event_tx.subscribe()
    }
}
