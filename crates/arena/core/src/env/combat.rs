//! Combat resolver seam.
//!
//! Combat math is not part of the arena rules. The pipeline assembles a
//! [`CombatSnapshot`] for each side, hands both to a [`CombatResolver`] with a
//! context-derived seed, and consumes the returned [`BattleLog`] read-only.
//! [`DuelResolver`] is a small bounded resolver used by the runtime and tests;
//! production deployments plug their combat engine in through the trait.

use crate::env::{PcgRng, RngOracle};
use crate::state::{Address, InventoryItem, ItemKind};

/// Which participant an event or error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Actor,
    Enemy,
}

impl Side {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Side::Actor => "actor",
            Side::Enemy => "enemy",
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Side::Actor => Side::Enemy,
            Side::Enemy => Side::Actor,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome from the acting avatar's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    Win,
    Lose,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    Spawn {
        side: Side,
        hp: u32,
        attack: u32,
    },
    Attack {
        side: Side,
        damage: u32,
        critical: bool,
        remaining_hp: u32,
    },
    Dead {
        side: Side,
    },
    TimeOver {
        turns: u32,
    },
    /// Appended by the ranking battle after a win, never by resolvers.
    Reward {
        items: Vec<InventoryItem>,
    },
}

/// Result of one battle plus its ordered event sequence.
///
/// The events are an audit trail; only `result` feeds back into state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    pub result: BattleResult,
    pub events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new(result: BattleResult, events: Vec<BattleEvent>) -> Self {
        Self { result, events }
    }

    pub fn is_win(&self) -> bool {
        self.result == BattleResult::Win
    }
}

/// Combat-ready view of one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub address: Address,
    pub level: u32,
    pub costumes: Vec<InventoryItem>,
    pub equipment: Vec<InventoryItem>,
    pub consumables: Vec<InventoryItem>,
}

impl CombatSnapshot {
    pub fn new(address: Address, level: u32) -> Self {
        Self {
            address,
            level,
            costumes: Vec::new(),
            equipment: Vec::new(),
            consumables: Vec::new(),
        }
    }

    /// Sorts `items` into the snapshot's slots by kind. Materials are ignored.
    pub fn wear<'a>(&mut self, items: impl IntoIterator<Item = &'a InventoryItem>) {
        for item in items {
            match item.kind {
                ItemKind::Costume => self.costumes.push(*item),
                ItemKind::Equipment => self.equipment.push(*item),
                ItemKind::Consumable => self.consumables.push(*item),
                ItemKind::Material => {}
            }
        }
    }
}

/// Errors surfaced by a combat resolver. Propagated verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolverError {
    #[error("invalid combat snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("combat engine failure: {0}")]
    Engine(String),
}

/// External combat engine.
///
/// Must be a pure function of its inputs: the same snapshots and seed must
/// produce the same log on every executor.
pub trait CombatResolver: Send + Sync {
    fn resolve(
        &self,
        actor: &CombatSnapshot,
        enemy: &CombatSnapshot,
        seed: u64,
    ) -> Result<BattleLog, ResolverError>;
}

/// Bounded alternating-strike duel.
///
/// The actor strikes first. Each strike deals the striker's attack plus up to
/// a quarter of it again, doubled on a d100 roll above 90. The battle is a
/// loss for the actor if nobody falls within `max_turns` strikes.
#[derive(Clone, Copy, Debug)]
pub struct DuelResolver {
    max_turns: u32,
    rng: PcgRng,
}

impl DuelResolver {
    pub const fn new(max_turns: u32) -> Self {
        Self {
            max_turns,
            rng: PcgRng,
        }
    }

    fn hp(snapshot: &CombatSnapshot) -> u32 {
        let potions = snapshot.consumables.len() as u32;
        100u32
            .saturating_add(snapshot.level.saturating_mul(10))
            .saturating_add(potions.saturating_mul(25))
    }

    fn attack(snapshot: &CombatSnapshot) -> u32 {
        let gear: u32 = snapshot
            .equipment
            .iter()
            .map(|item| u32::from(item.grade) * 3)
            .chain(snapshot.costumes.iter().map(|item| u32::from(item.grade)))
            .sum();
        10u32
            .saturating_add(snapshot.level.saturating_mul(2))
            .saturating_add(gear)
    }
}

impl CombatResolver for DuelResolver {
    fn resolve(
        &self,
        actor: &CombatSnapshot,
        enemy: &CombatSnapshot,
        seed: u64,
    ) -> Result<BattleLog, ResolverError> {
        if self.max_turns == 0 {
            return Err(ResolverError::Engine("turn limit is zero".into()));
        }

        let mut hp = [Self::hp(actor), Self::hp(enemy)];
        let attack = [Self::attack(actor), Self::attack(enemy)];
        let mut events = vec![
            BattleEvent::Spawn {
                side: Side::Actor,
                hp: hp[0],
                attack: attack[0],
            },
            BattleEvent::Spawn {
                side: Side::Enemy,
                hp: hp[1],
                attack: attack[1],
            },
        ];

        let mut striker = Side::Actor;
        for turn in 0..self.max_turns {
            let (me, them) = match striker {
                Side::Actor => (0, 1),
                Side::Enemy => (1, 0),
            };

            let turn_seed = seed.wrapping_add(u64::from(turn).wrapping_mul(2));
            let critical = self.rng.roll_d100(turn_seed) > 90;
            let variance = self.rng.range(turn_seed.wrapping_add(1), 0, attack[me] / 4);
            let mut damage = attack[me].saturating_add(variance);
            if critical {
                damage = damage.saturating_mul(2);
            }
            hp[them] = hp[them].saturating_sub(damage);

            events.push(BattleEvent::Attack {
                side: striker,
                damage,
                critical,
                remaining_hp: hp[them],
            });

            if hp[them] == 0 {
                let fallen = striker.opponent();
                events.push(BattleEvent::Dead { side: fallen });
                let result = match fallen {
                    Side::Enemy => BattleResult::Win,
                    Side::Actor => BattleResult::Lose,
                };
                return Ok(BattleLog::new(result, events));
            }

            striker = striker.opponent();
        }

        events.push(BattleEvent::TimeOver {
            turns: self.max_turns,
        });
        Ok(BattleLog::new(BattleResult::Lose, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ItemId;

    fn snapshot(seed: u64, level: u32) -> CombatSnapshot {
        CombatSnapshot::new(Address::from_low_u64(seed), level)
    }

    #[test]
    fn duel_is_deterministic() {
        let resolver = DuelResolver::new(200);
        let a = resolver.resolve(&snapshot(1, 10), &snapshot(2, 10), 77).unwrap();
        let b = resolver.resolve(&snapshot(1, 10), &snapshot(2, 10), 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn overwhelming_level_wins() {
        let resolver = DuelResolver::new(200);
        for seed in 0..32 {
            let log = resolver
                .resolve(&snapshot(1, 500), &snapshot(2, 1), seed)
                .unwrap();
            assert_eq!(log.result, BattleResult::Win);
            assert_eq!(log.events.last(), Some(&BattleEvent::Dead { side: Side::Enemy }));
        }
    }

    #[test]
    fn turn_limit_counts_as_loss() {
        let resolver = DuelResolver::new(1);
        let log = resolver
            .resolve(&snapshot(1, 1), &snapshot(2, 1), 3)
            .unwrap();
        assert_eq!(log.result, BattleResult::Lose);
        assert_eq!(log.events.last(), Some(&BattleEvent::TimeOver { turns: 1 }));
    }

    #[test]
    fn zero_turn_limit_is_an_engine_error() {
        let err = DuelResolver::new(0)
            .resolve(&snapshot(1, 1), &snapshot(2, 1), 0)
            .unwrap_err();
        assert!(matches!(err, ResolverError::Engine(_)));
    }

    #[test]
    fn wear_sorts_items_by_kind() {
        let mut snap = snapshot(1, 1);
        let items = [
            InventoryItem::new(ItemId::from_u128(1), 1, ItemKind::Costume, 1),
            InventoryItem::new(ItemId::from_u128(2), 2, ItemKind::Equipment, 1),
            InventoryItem::new(ItemId::from_u128(3), 3, ItemKind::Consumable, 1),
            InventoryItem::material(ItemId::from_u128(4), 4, 10),
        ];
        snap.wear(&items);
        assert_eq!(snap.costumes.len(), 1);
        assert_eq!(snap.equipment.len(), 1);
        assert_eq!(snap.consumables.len(), 1);
    }
}
