//! Agent and avatar records.

use std::collections::BTreeMap;

use crate::state::types::{Address, Inventory};

/// Account record of a signing identity.
///
/// The slot map is the agent's owned-avatar set; an agent may act only
/// through avatars listed here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub address: Address,
    pub avatars: BTreeMap<u8, Address>,
}

impl AgentState {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            avatars: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, slot: u8, avatar: Address) -> Self {
        self.avatars.insert(slot, avatar);
        self
    }

    pub fn owns(&self, avatar: &Address) -> bool {
        self.avatars.values().any(|owned| owned == avatar)
    }
}

/// In-game persona controlled by an agent.
///
/// Arena actions read `level` and `cleared_stage` and write inventory
/// additions; every other field is carried through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvatarState {
    pub address: Address,
    pub agent_address: Address,
    pub name: String,
    pub level: u32,
    /// Highest adventure stage cleared so far (0 = none).
    pub cleared_stage: u32,
    pub inventory: Inventory,
}

impl AvatarState {
    pub fn new(address: Address, agent_address: Address, name: impl Into<String>) -> Self {
        Self {
            address,
            agent_address,
            name: name.into(),
            level: 1,
            cleared_stage: 0,
            inventory: Inventory::empty(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_cleared_stage(mut self, stage: u32) -> Self {
        self.cleared_stage = stage;
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn has_cleared(&self, stage: u32) -> bool {
        self.cleared_stage >= stage
    }
}
