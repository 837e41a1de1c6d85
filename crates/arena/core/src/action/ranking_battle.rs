//! Ranking battle: one challenge against another avatar on a weekly leaderboard.

use std::collections::BTreeSet;

use crate::action::execute::{battle, reward, validation};
use crate::action::{ActionContext, ActionTransition, RankingBattleError};
use crate::env::{ArenaEnv, BattleEvent, BattleLog};
use crate::state::{Address, InventoryItem, ItemId, WorldState};

/// Immutable input of a ranking battle.
///
/// `equipment_ids` and `consumable_ids` are ordered and must not repeat an id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingBattle {
    pub avatar_address: Address,
    pub enemy_address: Address,
    pub weekly_arena_address: Address,
    /// Costume sheet ids to wear for this battle.
    pub costume_ids: BTreeSet<u32>,
    pub equipment_ids: Vec<ItemId>,
    pub consumable_ids: Vec<ItemId>,
}

impl RankingBattle {
    pub fn new(
        avatar_address: Address,
        enemy_address: Address,
        weekly_arena_address: Address,
    ) -> Self {
        Self {
            avatar_address,
            enemy_address,
            weekly_arena_address,
            costume_ids: BTreeSet::new(),
            equipment_ids: Vec::new(),
            consumable_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_costumes(mut self, costume_ids: impl IntoIterator<Item = u32>) -> Self {
        self.costume_ids = costume_ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment_ids: Vec<ItemId>) -> Self {
        self.equipment_ids = equipment_ids;
        self
    }

    #[must_use]
    pub fn with_consumables(mut self, consumable_ids: Vec<ItemId>) -> Self {
        self.consumable_ids = consumable_ids;
        self
    }

    /// First item id that appears twice across equipment and consumables.
    pub fn duplicate_item(&self) -> Option<ItemId> {
        let mut seen = BTreeSet::new();
        self.equipment_ids
            .iter()
            .chain(&self.consumable_ids)
            .find(|id| !seen.insert(**id))
            .copied()
    }
}

/// Result of the resolve phase: the battle log produced by the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleResolution {
    pub log: BattleLog,
    /// Seed for minting reward identifiers.
    pub reward_seed: u64,
}

/// Observable outcome of a committed ranking battle.
///
/// The log is an audit trail and does not feed back into state. A win ends
/// it with a [`BattleEvent::Reward`] listing the minted items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingBattleOutput {
    pub log: BattleLog,
    /// Signed score change applied to the actor's entry.
    pub score_delta: i64,
    /// Actor's 1-based rank after the battle.
    pub rank: usize,
    /// Items minted into the actor's inventory (empty on a loss).
    pub rewards: Vec<InventoryItem>,
}

impl ActionTransition for RankingBattle {
    type Error = RankingBattleError;
    type Resolution = BattleResolution;
    type Output = RankingBattleOutput;

    fn validate(
        &self,
        state: &WorldState,
        env: &ArenaEnv<'_>,
        ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        let participants = validation::validate(self, state, env.config()?, &ctx.signer)?;
        battle::actor_snapshot(self, participants.actor)?;
        Ok(())
    }

    fn resolve(
        &self,
        state: &WorldState,
        env: &ArenaEnv<'_>,
        ctx: &ActionContext,
    ) -> Result<Self::Resolution, Self::Error> {
        battle::resolve(self, state, env, ctx)
    }

    fn apply(
        &self,
        resolution: Self::Resolution,
        state: &mut WorldState,
        env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<Self::Output, Self::Error> {
        let mut log = resolution.log;
        let (score_delta, rank) = battle::apply_outcome(self, &log, state, env)?;

        let rewards = if log.is_win() {
            let minted = reward::distribute(
                &log,
                &self.avatar_address,
                state,
                env.rewards()?,
                resolution.reward_seed,
            )?;
            log.events.push(BattleEvent::Reward {
                items: minted.clone(),
            });
            minted
        } else {
            Vec::new()
        };

        Ok(RankingBattleOutput {
            log,
            score_delta,
            rank,
            rewards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_item_spans_both_lists() {
        let id = ItemId::from_u128(7);
        let action = RankingBattle::new(Address::ZERO, Address::ZERO, Address::ZERO)
            .with_equipment(vec![id])
            .with_consumables(vec![ItemId::from_u128(8), id]);
        assert_eq!(action.duplicate_item(), Some(id));

        let clean = action.clone().with_consumables(vec![ItemId::from_u128(8)]);
        assert_eq!(clean.duplicate_item(), None);
    }
}
