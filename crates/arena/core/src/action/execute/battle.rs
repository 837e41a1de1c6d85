//! Loadout assembly, combat resolution, and leaderboard update.

use crate::action::execute::validation::load_avatar;
use crate::action::{
    ActionContext, BattleResolution, RankingBattle, RankingBattleError, StateSubject,
};
use crate::env::{ArenaEnv, BattleLog, CombatSnapshot, Side, compute_seed, seed_context};
use crate::state::{AvatarState, ItemKind, WorldState};

/// Builds the actor's combat snapshot from the loadout named in the action.
///
/// Costumes are looked up by sheet id, equipment and consumables by item id.
/// Every entry must be held in the actor's inventory as the matching kind.
/// Equipping is transient: the inventory itself is not touched.
pub fn actor_snapshot(
    action: &RankingBattle,
    avatar: &AvatarState,
) -> Result<CombatSnapshot, RankingBattleError> {
    let mut snapshot = CombatSnapshot::new(avatar.address, avatar.level);

    for &sheet_id in &action.costume_ids {
        let costume = avatar
            .inventory
            .costume(sheet_id)
            .ok_or(RankingBattleError::CostumeNotOwned { sheet_id })?;
        snapshot.costumes.push(*costume);
    }

    for (ids, kind, slot) in [
        (&action.equipment_ids, ItemKind::Equipment, &mut snapshot.equipment),
        (&action.consumable_ids, ItemKind::Consumable, &mut snapshot.consumables),
    ] {
        for &id in ids {
            match avatar.inventory.item(id) {
                Some(item) if item.kind == kind => slot.push(*item),
                _ => return Err(RankingBattleError::ItemNotOwned { id }),
            }
        }
    }

    Ok(snapshot)
}

/// The enemy defends with whatever its inventory marks as equipped.
pub fn enemy_snapshot(avatar: &AvatarState) -> CombatSnapshot {
    let mut snapshot = CombatSnapshot::new(avatar.address, avatar.level);
    snapshot.wear(avatar.inventory.equipped());
    snapshot
}

/// Runs the combat resolver with a seed derived from the execution context.
///
/// Reads only; resolver failures are propagated verbatim.
pub fn resolve(
    action: &RankingBattle,
    state: &WorldState,
    env: &ArenaEnv<'_>,
    ctx: &ActionContext,
) -> Result<BattleResolution, RankingBattleError> {
    let resolver = env.resolver()?;

    let actor = load_avatar(state, &action.avatar_address, StateSubject::Actor)?;
    let enemy = load_avatar(state, &action.enemy_address, StateSubject::Enemy)?;

    let combat_seed = compute_seed(
        ctx.random_seed,
        ctx.block_index,
        &action.avatar_address,
        seed_context::COMBAT,
    );
    let log = resolver.resolve(
        &actor_snapshot(action, actor)?,
        &enemy_snapshot(enemy),
        combat_seed,
    )?;

    Ok(BattleResolution {
        log,
        reward_seed: compute_seed(
            ctx.random_seed,
            ctx.block_index,
            &action.avatar_address,
            seed_context::REWARD,
        ),
    })
}

/// Folds the battle result into the actor's leaderboard entry.
///
/// Works on a copy of the weekly arena and writes it back as one record, so
/// the shared leaderboard is replaced atomically. The enemy entry is read for
/// its score and never written.
///
/// Returns the applied score change and the actor's new rank.
pub fn apply_outcome(
    action: &RankingBattle,
    log: &BattleLog,
    state: &mut WorldState,
    env: &ArenaEnv<'_>,
) -> Result<(i64, usize), RankingBattleError> {
    let config = env.config()?;

    let mut arena = state
        .weekly_arena_state(&action.weekly_arena_address)
        .cloned()
        .ok_or(RankingBattleError::StateNotFound {
            which: StateSubject::WeeklyArena,
            address: action.weekly_arena_address,
        })?;

    let enemy_info = arena
        .get(&action.enemy_address)
        .cloned()
        .ok_or(RankingBattleError::ActorNotRanked { which: Side::Enemy })?;
    let actor_info = arena
        .get_mut(&action.avatar_address)
        .ok_or(RankingBattleError::ActorNotRanked { which: Side::Actor })?;

    let score_delta = actor_info
        .update(&enemy_info, log.result, config.score_curve())
        .map_err(|_| RankingBattleError::ChallengeExhausted)?;

    let rank = arena
        .rank_of(&action.avatar_address)
        .ok_or(RankingBattleError::ActorNotRanked { which: Side::Actor })?;

    state.set_weekly_arena_state(arena);
    Ok((score_delta, rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Address, Inventory, InventoryItem, ItemId};

    fn armed_avatar() -> AvatarState {
        let inventory = Inventory::new(vec![
            InventoryItem::new(ItemId::from_u128(1), 40100000, ItemKind::Costume, 1),
            InventoryItem::new(ItemId::from_u128(2), 10100000, ItemKind::Equipment, 3)
                .with_equipped(true),
            InventoryItem::new(ItemId::from_u128(3), 20100000, ItemKind::Consumable, 1),
        ]);
        AvatarState::new(Address::from_low_u64(1), Address::ZERO, "armed")
            .with_level(10)
            .with_inventory(inventory)
    }

    #[test]
    fn actor_loadout_comes_from_the_action() {
        let avatar = armed_avatar();
        let action = RankingBattle::new(avatar.address, Address::from_low_u64(2), Address::ZERO)
            .with_costumes([40100000])
            .with_consumables(vec![ItemId::from_u128(3)]);

        let snapshot = actor_snapshot(&action, &avatar).unwrap();
        assert_eq!(snapshot.costumes.len(), 1);
        assert!(snapshot.equipment.is_empty(), "equipped flag is ignored for the actor");
        assert_eq!(snapshot.consumables[0].id, ItemId::from_u128(3));
    }

    #[test]
    fn loadout_rejects_wrong_kind_and_missing_items() {
        let avatar = armed_avatar();
        let base = RankingBattle::new(avatar.address, Address::from_low_u64(2), Address::ZERO);

        let wrong_kind = base.clone().with_equipment(vec![ItemId::from_u128(3)]);
        assert_eq!(
            actor_snapshot(&wrong_kind, &avatar).unwrap_err(),
            RankingBattleError::ItemNotOwned {
                id: ItemId::from_u128(3)
            }
        );

        let missing_costume = base.with_costumes([1]);
        assert_eq!(
            actor_snapshot(&missing_costume, &avatar).unwrap_err(),
            RankingBattleError::CostumeNotOwned { sheet_id: 1 }
        );
    }

    #[test]
    fn enemy_fights_with_equipped_items() {
        let snapshot = enemy_snapshot(&armed_avatar());
        assert_eq!(snapshot.equipment.len(), 1);
        assert!(snapshot.costumes.is_empty());
        assert!(snapshot.consumables.is_empty());
    }
}
