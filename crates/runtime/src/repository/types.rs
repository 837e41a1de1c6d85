//! Action log entry type.

use serde::{Deserialize, Serialize};

use arena_core::{Action, ActionContext, ActionResult, BattleEvent, StateDelta};

/// One committed action, as stored in the action log.
///
/// Entries carry roots rather than full snapshots. A replaying party starts
/// from the genesis snapshot, re-executes `action` under `ctx`, and checks
/// that it lands on `after_root`.
///
/// # Layout
///
/// Each entry is serialized using bincode and stored with a length prefix:
/// ```text
/// [u32 length][bincode serialized ActionLogEntry]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Sequential commit nonce, starting at 1.
    pub nonce: u64,

    /// Context the action executed under.
    pub ctx: ActionContext,

    pub action: Action,

    pub before_root: [u8; 32],

    pub after_root: [u8; 32],

    /// Addresses the action touched.
    pub delta: StateDelta,

    pub result: ActionResult,

    /// Battle event sequence, empty for non-battle actions.
    pub events: Vec<BattleEvent>,
}
