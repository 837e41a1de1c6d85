//! Weekly leaderboard records.
//!
//! [`WeeklyArenaState`] is the one record shared between every participant of
//! an epoch. It keeps entries in insertion order, which is also the tie-break
//! order for rank computation, so nothing derived from it depends on hash
//! iteration.

use crate::config::ScoreCurve;
use crate::env::BattleResult;
use crate::state::types::Address;

/// One avatar's standing on a weekly leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaInfo {
    pub avatar_address: Address,
    pub agent_address: Address,
    pub score: u32,
    pub win_count: u32,
    pub lose_count: u32,
    /// Attempts left until the next daily reset. Never negative.
    pub daily_challenge_count: u32,
    pub active: bool,
}

/// Errors raised by [`ArenaInfo::update`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaInfoError {
    #[error("avatar {0} has no daily challenges left")]
    ChallengeExhausted(Address),
}

impl ArenaInfo {
    pub fn new(
        avatar_address: Address,
        agent_address: Address,
        initial_score: u32,
        daily_challenge_count: u32,
    ) -> Self {
        Self {
            avatar_address,
            agent_address,
            score: initial_score,
            win_count: 0,
            lose_count: 0,
            daily_challenge_count,
            active: false,
        }
    }

    /// Folds one battle against `opponent` into this record.
    ///
    /// Increments the win or lose counter, applies the score delta from
    /// `curve`, and consumes exactly one daily challenge. Each call is one
    /// battle attempt; calling twice consumes two challenges. The record is
    /// left untouched when no challenge remains.
    ///
    /// Returns the score change actually applied (scores saturate at zero).
    /// The opponent record is read, never written.
    pub fn update(
        &mut self,
        opponent: &ArenaInfo,
        result: BattleResult,
        curve: &ScoreCurve,
    ) -> Result<i64, ArenaInfoError> {
        if self.daily_challenge_count == 0 {
            return Err(ArenaInfoError::ChallengeExhausted(self.avatar_address));
        }

        match result {
            BattleResult::Win => self.win_count = self.win_count.saturating_add(1),
            BattleResult::Lose => self.lose_count = self.lose_count.saturating_add(1),
        }

        let before = i64::from(self.score);
        let delta = curve.score_delta(self.score, opponent.score, result);
        let after = (before + delta).clamp(0, i64::from(u32::MAX));
        self.score = after as u32;

        self.daily_challenge_count -= 1;

        Ok(after - before)
    }

    /// Marks the entry as participating. Independent of challenge throttling.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn reset_daily_challenges(&mut self, max: u32) {
        self.daily_challenge_count = max;
    }
}

/// Leaderboard for one weekly epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklyArenaState {
    pub address: Address,
    /// Terminal flag for the epoch. Once set, actions refuse to mutate it.
    pub ended: bool,
    entries: Vec<ArenaInfo>,
}

impl WeeklyArenaState {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            ended: false,
            entries: Vec::new(),
        }
    }

    pub fn get(&self, avatar: &Address) -> Option<&ArenaInfo> {
        self.entries
            .iter()
            .find(|entry| &entry.avatar_address == avatar)
    }

    pub fn get_mut(&mut self, avatar: &Address) -> Option<&mut ArenaInfo> {
        self.entries
            .iter_mut()
            .find(|entry| &entry.avatar_address == avatar)
    }

    pub fn contains(&self, avatar: &Address) -> bool {
        self.get(avatar).is_some()
    }

    /// Inserts or replaces an entry. Replacement keeps the original position.
    pub fn set(&mut self, info: ArenaInfo) {
        match self.get_mut(&info.avatar_address) {
            Some(existing) => *existing = info,
            None => self.entries.push(info),
        }
    }

    /// Deletes an entry entirely. Used by epoch rollover, never by battles.
    pub fn remove(&mut self, avatar: &Address) -> Option<ArenaInfo> {
        let index = self
            .entries
            .iter()
            .position(|entry| &entry.avatar_address == avatar)?;
        Some(self.entries.remove(index))
    }

    /// Activates an entry. Returns `false` if the avatar has no entry.
    pub fn activate(&mut self, avatar: &Address) -> bool {
        match self.get_mut(avatar) {
            Some(entry) => {
                entry.activate();
                true
            }
            None => false,
        }
    }

    pub fn reset_daily_challenges(&mut self, max: u32) {
        for entry in &mut self.entries {
            entry.reset_daily_challenges(max);
        }
    }

    pub fn end(&mut self) {
        self.ended = true;
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ArenaInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by score (highest first). Equal scores keep insertion
    /// order, so the ranking is fully determined by the record contents.
    pub fn ranked(&self) -> Vec<&ArenaInfo> {
        let mut ranked: Vec<&ArenaInfo> = self.entries.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// 1-based rank of `avatar`, if present.
    pub fn rank_of(&self, avatar: &Address) -> Option<usize> {
        self.ranked()
            .iter()
            .position(|entry| &entry.avatar_address == avatar)
            .map(|index| index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(seed: u64, score: u32, challenges: u32) -> ArenaInfo {
        ArenaInfo::new(
            Address::from_low_u64(seed),
            Address::from_low_u64(seed + 1000),
            score,
            challenges,
        )
    }

    #[test]
    fn update_on_win_raises_score_and_consumes_one_challenge() {
        let curve = ScoreCurve::default();
        let mut me = info(1, 1000, 5);
        let enemy = info(2, 1000, 5);

        let delta = me.update(&enemy, BattleResult::Win, &curve).unwrap();

        assert!(delta > 0);
        assert_eq!(me.score, 1000 + delta as u32);
        assert_eq!(me.win_count, 1);
        assert_eq!(me.lose_count, 0);
        assert_eq!(me.daily_challenge_count, 4);
    }

    #[test]
    fn update_on_lose_never_raises_score() {
        let curve = ScoreCurve::default();
        let mut me = info(1, 1000, 5);
        let enemy = info(2, 1200, 5);

        let delta = me.update(&enemy, BattleResult::Lose, &curve).unwrap();

        assert!(delta <= 0);
        assert!(me.score <= 1000);
        assert_eq!(me.lose_count, 1);
        assert_eq!(me.daily_challenge_count, 4);
    }

    #[test]
    fn update_is_not_idempotent() {
        let curve = ScoreCurve::default();
        let mut me = info(1, 1000, 5);
        let enemy = info(2, 1000, 5);

        me.update(&enemy, BattleResult::Win, &curve).unwrap();
        me.update(&enemy, BattleResult::Win, &curve).unwrap();

        assert_eq!(me.win_count, 2);
        assert_eq!(me.daily_challenge_count, 3);
    }

    #[test]
    fn update_refuses_when_exhausted_and_leaves_record_untouched() {
        let curve = ScoreCurve::default();
        let mut me = info(1, 1000, 0);
        let before = me.clone();

        let err = me
            .update(&info(2, 1000, 5), BattleResult::Win, &curve)
            .unwrap_err();

        assert_eq!(err, ArenaInfoError::ChallengeExhausted(me.avatar_address));
        assert_eq!(me, before);
    }

    #[test]
    fn score_saturates_at_zero() {
        let curve = ScoreCurve::default();
        let mut me = info(1, 2, 5);

        let delta = me
            .update(&info(2, 0, 5), BattleResult::Lose, &curve)
            .unwrap();

        assert_eq!(me.score, 0);
        assert_eq!(delta, -2);
    }

    #[test]
    fn set_replaces_in_place_and_remove_deletes() {
        let mut arena = WeeklyArenaState::new(Address::from_low_u64(99));
        arena.set(info(1, 1000, 5));
        arena.set(info(2, 1000, 5));

        let mut updated = info(1, 1100, 4);
        updated.win_count = 1;
        arena.set(updated.clone());

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.entries()[0], updated);

        let removed = arena.remove(&Address::from_low_u64(1)).unwrap();
        assert_eq!(removed.score, 1100);
        assert!(!arena.contains(&Address::from_low_u64(1)));
        assert!(arena.remove(&Address::from_low_u64(1)).is_none());
    }

    #[test]
    fn ranking_breaks_ties_by_insertion_order() {
        let mut arena = WeeklyArenaState::new(Address::from_low_u64(99));
        arena.set(info(1, 1000, 5));
        arena.set(info(2, 1200, 5));
        arena.set(info(3, 1000, 5));

        assert_eq!(arena.rank_of(&Address::from_low_u64(2)), Some(1));
        assert_eq!(arena.rank_of(&Address::from_low_u64(1)), Some(2));
        assert_eq!(arena.rank_of(&Address::from_low_u64(3)), Some(3));
        assert_eq!(arena.rank_of(&Address::from_low_u64(4)), None);
    }

    #[test]
    fn activate_and_reset_touch_only_their_fields() {
        let mut arena = WeeklyArenaState::new(Address::from_low_u64(99));
        arena.set(info(1, 1000, 0));

        assert!(arena.activate(&Address::from_low_u64(1)));
        assert!(!arena.activate(&Address::from_low_u64(2)));
        arena.reset_daily_challenges(5);

        let entry = arena.get(&Address::from_low_u64(1)).unwrap();
        assert!(entry.active);
        assert_eq!(entry.daily_challenge_count, 5);
        assert_eq!(entry.score, 1000);
    }
}
