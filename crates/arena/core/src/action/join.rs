//! Weekly arena registration.

use crate::action::{ActionContext, ActionTransition, JoinArenaError, StateSubject};
use crate::env::ArenaEnv;
use crate::state::{Address, ArenaInfo, AvatarState, WorldState};

/// Enters a signer-owned avatar into a weekly arena.
///
/// The new entry starts at the configured initial score with a full daily
/// budget and is active immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinArena {
    pub avatar_address: Address,
    pub weekly_arena_address: Address,
}

impl JoinArena {
    pub fn new(avatar_address: Address, weekly_arena_address: Address) -> Self {
        Self {
            avatar_address,
            weekly_arena_address,
        }
    }

    fn avatar<'s>(&self, state: &'s WorldState) -> Result<&'s AvatarState, JoinArenaError> {
        state
            .avatar_state(&self.avatar_address)
            .ok_or(JoinArenaError::StateNotFound {
                which: StateSubject::Actor,
                address: self.avatar_address,
            })
    }
}

impl ActionTransition for JoinArena {
    type Error = JoinArenaError;
    type Resolution = ArenaInfo;
    /// Rank of the new entry.
    type Output = usize;

    fn validate(
        &self,
        state: &WorldState,
        _env: &ArenaEnv<'_>,
        ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        self.avatar(state)?;

        let owns_avatar = state
            .agent_state(&ctx.signer)
            .is_some_and(|agent| agent.owns(&self.avatar_address));
        if !owns_avatar {
            return Err(JoinArenaError::UnauthorizedActor {
                signer: ctx.signer,
                avatar: self.avatar_address,
            });
        }

        let arena = state
            .weekly_arena_state(&self.weekly_arena_address)
            .ok_or(JoinArenaError::StateNotFound {
                which: StateSubject::WeeklyArena,
                address: self.weekly_arena_address,
            })?;
        if arena.ended {
            return Err(JoinArenaError::ArenaClosed(arena.address));
        }
        if arena.contains(&self.avatar_address) {
            return Err(JoinArenaError::AlreadyRanked(self.avatar_address));
        }

        Ok(())
    }

    fn resolve(
        &self,
        state: &WorldState,
        env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<ArenaInfo, Self::Error> {
        let config = env.config()?;
        let avatar = self.avatar(state)?;

        let mut info = ArenaInfo::new(
            avatar.address,
            avatar.agent_address,
            config.initial_score(),
            config.max_daily_challenges(),
        );
        info.activate();
        Ok(info)
    }

    fn apply(
        &self,
        info: ArenaInfo,
        state: &mut WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<usize, Self::Error> {
        let mut arena = state
            .weekly_arena_state(&self.weekly_arena_address)
            .cloned()
            .ok_or(JoinArenaError::StateNotFound {
                which: StateSubject::WeeklyArena,
                address: self.weekly_arena_address,
            })?;

        arena.set(info);
        let rank = arena
            .rank_of(&self.avatar_address)
            .unwrap_or(arena.len());
        state.set_weekly_arena_state(arena);
        Ok(rank)
    }
}
