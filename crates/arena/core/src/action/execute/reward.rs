//! Reward minting for the winner of a ranking battle.

use crate::action::{RankingBattleError, StateSubject};
use crate::env::{BattleLog, RewardOracle, RewardRow};
use crate::state::{
    Address, AvatarState, Inventory, InventoryError, InventoryItem, ItemId, WorldState,
};

/// Mints one item per reward unit, in table order.
///
/// Fungible rows become a single stack of `quantity`; other rows become
/// `quantity` separate items. Identifiers come from `seed` and a running
/// index; indices whose id `held` already contains are skipped, so repeated
/// wins under one seed still mint fresh ids. Rows with zero quantity mint
/// nothing.
pub fn mint(rows: &[RewardRow], seed: u64, held: &Inventory) -> Vec<InventoryItem> {
    let mut minted = Vec::new();
    let mut index = 0u32;
    let mut next_id = || loop {
        let id = ItemId::derive(seed, index);
        index = index.wrapping_add(1);
        if held.item(id).is_none() {
            break id;
        }
    };

    for row in rows.iter().filter(|row| row.quantity > 0) {
        if row.kind.is_fungible() {
            minted.push(InventoryItem::material(next_id(), row.sheet_id, row.quantity));
        } else {
            for _ in 0..row.quantity {
                minted.push(InventoryItem::new(next_id(), row.sheet_id, row.kind, row.grade));
            }
        }
    }
    minted
}

/// Adds the reward table to `avatar`'s inventory when `outcome` is a win.
///
/// Returns the minted items; a loss mints nothing and leaves the inventory
/// untouched.
pub fn distribute_rewards<W>(
    outcome: &BattleLog,
    avatar: &mut AvatarState,
    rewards: &W,
    seed: u64,
) -> Result<Vec<InventoryItem>, InventoryError>
where
    W: RewardOracle + ?Sized,
{
    if !outcome.is_win() {
        return Ok(Vec::new());
    }

    let minted = mint(rewards.rows(), seed, &avatar.inventory);
    for item in &minted {
        avatar.inventory.add_item(*item)?;
    }
    Ok(minted)
}

/// State-level wrapper: rewrites only the actor's avatar record.
pub fn distribute<W>(
    outcome: &BattleLog,
    actor: &Address,
    state: &mut WorldState,
    rewards: &W,
    seed: u64,
) -> Result<Vec<InventoryItem>, RankingBattleError>
where
    W: RewardOracle + ?Sized,
{
    if !outcome.is_win() {
        return Ok(Vec::new());
    }

    let mut avatar = state
        .avatar_state(actor)
        .cloned()
        .ok_or(RankingBattleError::StateNotFound {
            which: StateSubject::Actor,
            address: *actor,
        })?;

    let minted = distribute_rewards(outcome, &mut avatar, rewards, seed)?;
    state.set_avatar_state(avatar);
    Ok(minted)
}
