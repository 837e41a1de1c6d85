//! Avatar inventory.
//!
//! Only the addition/removal contract lives here. Item balance (stats per
//! sheet row, upgrade tiers) belongs to the content tables.

use crate::state::types::ItemId;

/// Broad item category.
///
/// Materials are fungible and stack by `sheet_id`; every other kind is a
/// distinct item addressed by its [`ItemId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Costume,
    Equipment,
    Consumable,
    Material,
}

impl ItemKind {
    #[inline]
    pub const fn is_fungible(self) -> bool {
        matches!(self, Self::Material)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    pub id: ItemId,
    /// Row in the item sheet this item was created from.
    pub sheet_id: u32,
    pub kind: ItemKind,
    pub grade: u8,
    pub count: u32,
    /// Whether the avatar wears this item outside of explicit loadouts.
    pub equipped: bool,
}

impl InventoryItem {
    pub const fn new(id: ItemId, sheet_id: u32, kind: ItemKind, grade: u8) -> Self {
        Self {
            id,
            sheet_id,
            kind,
            grade,
            count: 1,
            equipped: false,
        }
    }

    pub const fn material(id: ItemId, sheet_id: u32, count: u32) -> Self {
        Self {
            id,
            sheet_id,
            kind: ItemKind::Material,
            grade: 0,
            count,
            equipped: false,
        }
    }

    #[must_use]
    pub const fn with_equipped(mut self, equipped: bool) -> Self {
        self.equipped = equipped;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("item {0} is already in the inventory")]
    DuplicateItem(ItemId),

    #[error("fungible item count for sheet {sheet_id} overflowed")]
    CountOverflow { sheet_id: u32 },
}

/// Ordered list of items held by an avatar.
///
/// Insertion order is preserved so that encodings and state roots do not
/// depend on hash iteration.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds an item, stacking fungible items onto an existing row.
    pub fn add_item(&mut self, item: InventoryItem) -> Result<(), InventoryError> {
        if item.kind.is_fungible()
            && let Some(stack) = self
                .items
                .iter_mut()
                .find(|held| held.kind.is_fungible() && held.sheet_id == item.sheet_id)
        {
            stack.count = stack
                .count
                .checked_add(item.count)
                .ok_or(InventoryError::CountOverflow {
                    sheet_id: item.sheet_id,
                })?;
            return Ok(());
        }

        if self.items.iter().any(|held| held.id == item.id) {
            return Err(InventoryError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes a non-fungible item by id.
    pub fn remove_item(&mut self, id: ItemId) -> Option<InventoryItem> {
        let index = self.items.iter().position(|held| held.id == id)?;
        Some(self.items.remove(index))
    }

    /// Removes `count` units of a fungible item. Returns `false` (and leaves
    /// the inventory untouched) when not enough units are held.
    pub fn remove_fungible(&mut self, sheet_id: u32, count: u32) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|held| held.kind.is_fungible() && held.sheet_id == sheet_id)
        else {
            return false;
        };

        let stack = &mut self.items[index];
        if stack.count < count {
            return false;
        }
        stack.count -= count;
        if stack.count == 0 {
            self.items.remove(index);
        }
        true
    }

    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|held| held.id == id)
    }

    /// Looks up a costume by its sheet row.
    pub fn costume(&self, sheet_id: u32) -> Option<&InventoryItem> {
        self.items
            .iter()
            .find(|held| held.kind == ItemKind::Costume && held.sheet_id == sheet_id)
    }

    /// Total units held for a sheet row across all kinds.
    pub fn count_of(&self, sheet_id: u32) -> u32 {
        self.items
            .iter()
            .filter(|held| held.sheet_id == sheet_id)
            .map(|held| held.count)
            .sum()
    }

    pub fn equipped(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(|held| held.equipped)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
