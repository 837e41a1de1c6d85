//! Authoritative world state representation.
//!
//! A [`WorldState`] is an immutable-by-convention snapshot of every record the
//! arena reads or writes, keyed by [`Address`]. Records sit behind [`Arc`], so
//! deriving a new snapshot clones pointers and replaces only the records an
//! action touched. The engine never mutates the snapshot it was handed.
pub mod delta;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use delta::StateDelta;
pub use types::{
    Address, AgentState, ArenaInfo, ArenaInfoError, AvatarState, Inventory, InventoryError,
    InventoryItem, ItemId, ItemKind, WeeklyArenaState,
};

/// A record that could not be encoded while computing the state root.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
#[error("failed to encode record at {address} for the state root")]
pub struct StateRootError {
    pub address: Address,
    #[source]
    pub source: bincode::Error,
}

/// A record stored at one address.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateRecord {
    Agent(AgentState),
    Avatar(AvatarState),
    WeeklyArena(WeeklyArenaState),
}

impl StateRecord {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Agent(_) => "agent",
            Self::Avatar(_) => "avatar",
            Self::WeeklyArena(_) => "weekly_arena",
        }
    }
}

/// Content-addressed snapshot of the arena world.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    records: BTreeMap<Address, Arc<StateRecord>>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &Address) -> Option<&StateRecord> {
        self.records.get(address).map(Arc::as_ref)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.records.contains_key(address)
    }

    /// Returns the avatar at `address`, or `None` if absent or of another kind.
    pub fn avatar_state(&self, address: &Address) -> Option<&AvatarState> {
        match self.get(address)? {
            StateRecord::Avatar(avatar) => Some(avatar),
            _ => None,
        }
    }

    pub fn agent_state(&self, address: &Address) -> Option<&AgentState> {
        match self.get(address)? {
            StateRecord::Agent(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn weekly_arena_state(&self, address: &Address) -> Option<&WeeklyArenaState> {
        match self.get(address)? {
            StateRecord::WeeklyArena(arena) => Some(arena),
            _ => None,
        }
    }

    /// Stores `record` at `address`, replacing any previous record.
    ///
    /// Other snapshots sharing the previous record are unaffected.
    pub fn set_state(&mut self, address: Address, record: StateRecord) {
        self.records.insert(address, Arc::new(record));
    }

    pub fn set_agent_state(&mut self, agent: AgentState) {
        self.set_state(agent.address, StateRecord::Agent(agent));
    }

    pub fn set_avatar_state(&mut self, avatar: AvatarState) {
        self.set_state(avatar.address, StateRecord::Avatar(avatar));
    }

    pub fn set_weekly_arena_state(&mut self, arena: WeeklyArenaState) {
        self.set_state(arena.address, StateRecord::WeeklyArena(arena));
    }

    /// Deletes the record at `address`, returning it if present.
    pub fn remove_state(&mut self, address: &Address) -> Option<StateRecord> {
        self.records
            .remove(address)
            .map(Arc::unwrap_or_clone)
    }

    /// Builder-style [`set_state`](Self::set_state) for fixtures and genesis.
    #[must_use]
    pub fn with_state(mut self, address: Address, record: StateRecord) -> Self {
        self.set_state(address, record);
        self
    }

    /// Returns true when both snapshots hold the very same allocation at
    /// `address`, i.e. the record was carried over without being rewritten.
    pub fn shares_record(&self, other: &WorldState, address: &Address) -> bool {
        match (self.records.get(address), other.records.get(address)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Addresses in ascending order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// SHA-256 commitment to the whole snapshot.
    ///
    /// Computed over the bincode encoding of the address-ordered record map,
    /// so two executors that agree on every record agree on the root.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], StateRootError> {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for (address, record) in &self.records {
            let bytes = bincode::serialize(record.as_ref()).map_err(|source| StateRootError {
                address: *address,
                source,
            })?;
            hasher.update(address.as_bytes());
            hasher.update((bytes.len() as u64).to_be_bytes());
            hasher.update(&bytes);
        }
        Ok(hasher.finalize().into())
    }
}
