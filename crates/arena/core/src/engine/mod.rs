//! Action execution pipeline.
//!
//! [`ArenaEngine`] is the authoritative reducer for [`WorldState`]. Given a
//! prior snapshot, the oracles, an action, and its context, it produces either
//! a complete new snapshot or a typed error. The prior snapshot is never
//! written: execution works on a copy-on-write clone that is returned on
//! success and dropped on failure, so no partial commit is observable.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionContext, ActionResult};
use crate::env::{ArenaEnv, BattleLog};
use crate::state::{StateDelta, WorldState};

/// Complete outcome of a committed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// New snapshot. Untouched records are shared with the prior snapshot.
    pub state: WorldState,

    /// Addresses created, updated, or removed by the action.
    pub delta: StateDelta,

    /// Action-specific result (battle log, minted rewards, new rank).
    pub result: ActionResult,
}

impl ExecutionOutcome {
    /// Battle event sequence for audit logs. Not part of the state.
    pub fn battle_log(&self) -> Option<&BattleLog> {
        match &self.result {
            ActionResult::RankingBattle(output) => Some(&output.log),
            _ => None,
        }
    }
}

/// Stateless arena reducer.
///
/// All transitions, player and system alike, go through
/// validate → resolve → apply.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArenaEngine;

impl ArenaEngine {
    pub fn new() -> Self {
        Self
    }

    /// Executes `action` against `prior` and returns the resulting snapshot.
    ///
    /// System actions must be signed by [`Address::SYSTEM`](crate::state::Address::SYSTEM).
    pub fn execute(
        &self,
        prior: &WorldState,
        env: &ArenaEnv<'_>,
        action: &Action,
        ctx: &ActionContext,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        if action.is_system() && !ctx.signer.is_system() {
            return Err(ExecuteError::SystemActionNotFromSystem { signer: ctx.signer });
        }

        let mut state = prior.clone();
        let result = transition::execute_transition(action, &mut state, env, ctx)?;
        let delta = StateDelta::from_states(prior, &state);

        Ok(ExecutionOutcome {
            state,
            delta,
            result,
        })
    }
}
