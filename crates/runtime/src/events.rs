//! Events broadcast by the commit worker.

use arena_core::{
    Action, ActionResult, Address, ArenaError, ExecuteError, StateDelta, TransitionPhase,
};

/// Notification published after every executed command.
///
/// Events are best-effort: a lagging subscriber may miss some, while the
/// action log stays authoritative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaEvent {
    /// An action committed and the snapshot advanced to `state_root`.
    ActionExecuted {
        nonce: u64,
        block_index: u64,
        action: Action,
        delta: StateDelta,
        result: ActionResult,
        state_root: [u8; 32],
    },

    /// The engine rejected an action; the snapshot is unchanged.
    ActionRejected {
        block_index: u64,
        signer: Address,
        action: Action,
        error: ExecuteError,
    },
}

impl ArenaEvent {
    pub fn action(&self) -> &Action {
        match self {
            Self::ActionExecuted { action, .. } | Self::ActionRejected { action, .. } => action,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ActionRejected { .. })
    }

    /// Failing phase of a rejection, `None` for commits and envelope errors.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::ActionExecuted { .. } => None,
            Self::ActionRejected { error, .. } => error.phase(),
        }
    }

    /// Stable error code of a rejection.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::ActionExecuted { .. } => None,
            Self::ActionRejected { error, .. } => Some(error.error_code()),
        }
    }
}
