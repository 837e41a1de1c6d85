//! Action log replay.
//!
//! Re-executes every logged action from the genesis snapshot and checks that
//! each step reproduces the recorded roots. Replaying needs only the log, the
//! genesis snapshot, and the same oracles.

use thiserror::Error;

use arena_core::{ArenaEngine, ArenaEnv, ExecuteError, StateRootError, WorldState};

use crate::repository::ActionLogEntry;
use crate::utils::hash::short_root;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("entry out of order: expected nonce {expected}, found {found}")]
    OutOfOrder { expected: u64, found: u64 },

    #[error(
        "entry {nonce} starts from root {}, replay is at {}",
        short_root(.recorded),
        short_root(.replayed)
    )]
    BeforeRootMismatch {
        nonce: u64,
        recorded: [u8; 32],
        replayed: [u8; 32],
    },

    #[error("entry {nonce} failed to re-execute")]
    Execute {
        nonce: u64,
        #[source]
        source: ExecuteError,
    },

    #[error("entry {nonce} produced a snapshot that cannot be hashed")]
    StateRoot {
        nonce: u64,
        #[source]
        source: StateRootError,
    },

    #[error(
        "entry {nonce} recorded root {}, replay produced {}",
        short_root(.recorded),
        short_root(.replayed)
    )]
    AfterRootMismatch {
        nonce: u64,
        recorded: [u8; 32],
        replayed: [u8; 32],
    },
}

/// Replays `entries` on top of `genesis` and returns the final snapshot.
pub fn replay_log(
    genesis: &WorldState,
    entries: &[ActionLogEntry],
    env: &ArenaEnv<'_>,
) -> Result<WorldState, ReplayError> {
    let engine = ArenaEngine::new();
    let mut state = genesis.clone();

    for (expected, entry) in (1..).zip(entries) {
        if entry.nonce != expected {
            return Err(ReplayError::OutOfOrder {
                expected,
                found: entry.nonce,
            });
        }

        let root = root_of(&state, entry.nonce)?;
        if root != entry.before_root {
            return Err(ReplayError::BeforeRootMismatch {
                nonce: entry.nonce,
                recorded: entry.before_root,
                replayed: root,
            });
        }

        let outcome = engine
            .execute(&state, env, &entry.action, &entry.ctx)
            .map_err(|source| ReplayError::Execute {
                nonce: entry.nonce,
                source,
            })?;

        let root = root_of(&outcome.state, entry.nonce)?;
        if root != entry.after_root {
            return Err(ReplayError::AfterRootMismatch {
                nonce: entry.nonce,
                recorded: entry.after_root,
                replayed: root,
            });
        }

        state = outcome.state;
    }

    Ok(state)
}

fn root_of(state: &WorldState, nonce: u64) -> Result<[u8; 32], ReplayError> {
    state
        .state_root()
        .map_err(|source| ReplayError::StateRoot { nonce, source })
}
