//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content loading,
//! and the engine so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use arena_core::{ExecuteError, StateRootError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("commit worker command channel closed")]
    CommandChannelClosed,

    #[error("commit worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("commit worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// The engine rejected the action; nothing was committed.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    StateRoot(#[from] StateRootError),

    #[error("failed to load arena content")]
    Content(#[source] anyhow::Error),

    #[error("no snapshot stored at nonce {0}")]
    MissingSnapshot(u64),
}

impl RuntimeError {
    /// Engine rejection, if this is one.
    pub fn as_execute(&self) -> Option<&ExecuteError> {
        match self {
            Self::Execute(error) => Some(error),
            _ => None,
        }
    }
}
