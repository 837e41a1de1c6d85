//! Address-level diff between two snapshots.

use crate::state::{Address, WorldState};

/// Minimal description of an executed action's impact on the world state.
///
/// Lists addresses only; the caller reads values from the new snapshot.
/// All lists are in ascending address order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    pub created: Vec<Address>,
    pub updated: Vec<Address>,
    pub removed: Vec<Address>,
}

impl StateDelta {
    /// Creates a delta by comparing two snapshots.
    ///
    /// Records carried over by pointer are skipped without a deep comparison,
    /// so the cost is proportional to the number of rewritten records.
    pub fn from_states(before: &WorldState, after: &WorldState) -> Self {
        let mut delta = Self::default();

        for address in after.addresses() {
            match before.get(address) {
                None => delta.created.push(*address),
                Some(_) if after.shares_record(before, address) => {}
                Some(previous) => {
                    if after.get(address) != Some(previous) {
                        delta.updated.push(*address);
                    }
                }
            }
        }

        delta.removed = before
            .addresses()
            .filter(|address| !after.contains(address))
            .copied()
            .collect();

        delta
    }

    /// Returns true if no record changed (no-op action).
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Every touched address, ascending.
    pub fn touched(&self) -> Vec<Address> {
        let mut all: Vec<Address> = self
            .created
            .iter()
            .chain(&self.updated)
            .chain(&self.removed)
            .copied()
            .collect();
        all.sort_unstable();
        all
    }
}
