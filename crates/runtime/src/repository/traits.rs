//! Repository contracts for saving and loading mutable runtime state.

use arena_core::WorldState;

use super::error::Result;
use super::types::ActionLogEntry;

/// Snapshot persistence indexed by commit nonce.
///
/// Nonce 0 is the genesis snapshot; nonce `n` is the state after the `n`-th
/// committed action.
pub trait StateRepository: Send + Sync {
    /// Save a snapshot under `nonce`, replacing any previous one.
    fn save(&self, nonce: u64, state: &WorldState) -> Result<()>;

    /// Load the snapshot saved under `nonce`.
    fn load(&self, nonce: u64) -> Result<Option<WorldState>>;

    fn exists(&self, nonce: u64) -> bool;

    fn delete(&self, nonce: u64) -> Result<()>;

    /// All saved nonces in ascending order.
    fn list_nonces(&self) -> Result<Vec<u64>>;

    /// Highest saved nonce and its snapshot.
    fn latest(&self) -> Result<Option<(u64, WorldState)>> {
        let Some(nonce) = self.list_nonces()?.last().copied() else {
            return Ok(None);
        };
        Ok(self.load(nonce)?.map(|state| (nonce, state)))
    }
}

/// Append-only log of committed actions.
///
/// Rejected actions are never appended; every entry links a before root to
/// an after root so the log can be replayed and checked.
pub trait ActionRepository: Send + Sync {
    /// Append an entry and return the offset it was written at.
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64>;

    /// Read the entry at `offset`.
    ///
    /// Returns `Some((entry, next_offset))`, or `None` past the end of the log.
    fn read_at_offset(&self, offset: u64) -> Result<Option<(ActionLogEntry, u64)>>;

    fn flush(&mut self) -> Result<()>;

    /// Discard every entry at or after `offset`, including unflushed ones.
    fn truncate(&mut self, offset: u64) -> Result<()>;

    /// Offset the next entry will be written at.
    fn size(&self) -> Result<u64>;

    /// Every entry from the start of the log, in commit order.
    fn entries(&self) -> Result<Vec<ActionLogEntry>> {
        let mut entries = Vec::new();
        let mut offset = 0;
        while let Some((entry, next)) = self.read_at_offset(offset)? {
            entries.push(entry);
            offset = next;
        }
        Ok(entries)
    }
}
