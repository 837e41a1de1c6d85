//! Record types stored in a [`WorldState`](crate::state::WorldState) snapshot.

mod arena;
mod avatar;
mod common;
mod inventory;

pub use arena::{ArenaInfo, ArenaInfoError, WeeklyArenaState};
pub use avatar::{AgentState, AvatarState};
pub use common::{Address, ItemId};
pub use inventory::{Inventory, InventoryError, InventoryItem, ItemKind};
