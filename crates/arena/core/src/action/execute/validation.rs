//! Ordered precondition checks for a ranking battle.
//!
//! Checks run strictly in order and the first failure short-circuits:
//!
//! 1. actor and enemy differ
//! 2. the signer's agent owns the actor
//! 3. both avatars exist (actor first)
//! 4. the actor cleared the required stage
//! 5. the weekly arena exists and has not ended
//! 6. both avatars are ranked in it (actor first)
//! 7. the actor has a daily challenge left
//!
//! When the arena requires active entries, the active flag of both sides is
//! checked between 6 and 7. Loadout id uniqueness is checked last.

use crate::action::{RankingBattle, RankingBattleError, StateSubject};
use crate::env::{ConfigOracle, Side};
use crate::state::{Address, ArenaInfo, AvatarState, WeeklyArenaState, WorldState};

/// Records read while validating, borrowed from the prior snapshot.
#[derive(Clone, Copy, Debug)]
pub struct Participants<'s> {
    pub actor: &'s AvatarState,
    pub enemy: &'s AvatarState,
    pub arena: &'s WeeklyArenaState,
    pub actor_info: &'s ArenaInfo,
    pub enemy_info: &'s ArenaInfo,
}

pub fn validate<'s, C>(
    action: &RankingBattle,
    state: &'s WorldState,
    config: &C,
    signer: &Address,
) -> Result<Participants<'s>, RankingBattleError>
where
    C: ConfigOracle + ?Sized,
{
    if action.avatar_address == action.enemy_address {
        return Err(RankingBattleError::InvalidTarget);
    }

    let owns_actor = state
        .agent_state(signer)
        .is_some_and(|agent| agent.owns(&action.avatar_address));
    if !owns_actor {
        return Err(RankingBattleError::UnauthorizedActor {
            signer: *signer,
            avatar: action.avatar_address,
        });
    }

    let actor = load_avatar(state, &action.avatar_address, StateSubject::Actor)?;
    let enemy = load_avatar(state, &action.enemy_address, StateSubject::Enemy)?;

    let required = config.required_stage();
    if !actor.has_cleared(required) {
        return Err(RankingBattleError::InsufficientProgress {
            required,
            cleared: actor.cleared_stage,
        });
    }

    let arena = state
        .weekly_arena_state(&action.weekly_arena_address)
        .ok_or(RankingBattleError::StateNotFound {
            which: StateSubject::WeeklyArena,
            address: action.weekly_arena_address,
        })?;
    if arena.ended {
        return Err(RankingBattleError::ArenaClosed(arena.address));
    }

    let actor_info = arena
        .get(&action.avatar_address)
        .ok_or(RankingBattleError::ActorNotRanked { which: Side::Actor })?;
    let enemy_info = arena
        .get(&action.enemy_address)
        .ok_or(RankingBattleError::ActorNotRanked { which: Side::Enemy })?;

    if config.require_active() {
        if !actor_info.active {
            return Err(RankingBattleError::EntryInactive { which: Side::Actor });
        }
        if !enemy_info.active {
            return Err(RankingBattleError::EntryInactive { which: Side::Enemy });
        }
    }

    if actor_info.daily_challenge_count == 0 {
        return Err(RankingBattleError::ChallengeExhausted);
    }

    if let Some(id) = action.duplicate_item() {
        return Err(RankingBattleError::DuplicateItem { id });
    }

    Ok(Participants {
        actor,
        enemy,
        arena,
        actor_info,
        enemy_info,
    })
}

pub(crate) fn load_avatar<'s>(
    state: &'s WorldState,
    address: &Address,
    which: StateSubject,
) -> Result<&'s AvatarState, RankingBattleError> {
    state
        .avatar_state(address)
        .ok_or(RankingBattleError::StateNotFound {
            which,
            address: *address,
        })
}
