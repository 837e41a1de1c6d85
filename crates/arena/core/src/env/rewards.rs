//! Reward table oracle.

use crate::state::ItemKind;

/// One configured reward: `quantity` units of the item built from `sheet_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardRow {
    pub sheet_id: u32,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grade: u8,
    pub quantity: u32,
}

impl RewardRow {
    pub const fn new(sheet_id: u32, kind: ItemKind, grade: u8, quantity: u32) -> Self {
        Self {
            sheet_id,
            kind,
            grade,
            quantity,
        }
    }

    pub const fn material(sheet_id: u32, quantity: u32) -> Self {
        Self::new(sheet_id, ItemKind::Material, 0, quantity)
    }
}

/// Oracle providing the arena reward table.
///
/// Every row is granted to the winner of a battle, in table order.
pub trait RewardOracle: Send + Sync {
    fn rows(&self) -> &[RewardRow];
}

/// Reward table backed by an in-memory list of rows.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTable {
    pub rows: Vec<RewardRow>,
}

impl RewardTable {
    pub fn new(rows: Vec<RewardRow>) -> Self {
        Self { rows }
    }
}

impl RewardOracle for RewardTable {
    fn rows(&self) -> &[RewardRow] {
        &self.rows
    }
}
