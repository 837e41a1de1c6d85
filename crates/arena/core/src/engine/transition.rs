//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionContext, ActionResult, ActionTransition, SystemAction};
use crate::env::ArenaEnv;
use crate::state::WorldState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns its output.
///
/// `validate` and `resolve` see `state` read-only; only `apply` writes.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut WorldState,
    env: &ArenaEnv<'_>,
    ctx: &ActionContext,
) -> Result<T::Output, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .validate(state, env, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Validate, error))?;

    let resolution = transition
        .resolve(state, env, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Resolve, error))?;

    transition
        .apply(resolution, state, env, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))
}

/// Routes each action to its transition and wraps the output in [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut WorldState,
    env: &ArenaEnv<'_>,
    ctx: &ActionContext,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::RankingBattle(transition) => {
            let output =
                drive_transition(transition, state, env, ctx).map_err(ExecuteError::RankingBattle)?;
            Ok(ActionResult::RankingBattle(output))
        }
        Action::JoinArena(transition) => {
            let rank =
                drive_transition(transition, state, env, ctx).map_err(ExecuteError::JoinArena)?;
            Ok(ActionResult::JoinArena { rank })
        }
        Action::System(kind) => {
            match kind {
                SystemAction::ResetDailyChallenges(transition) => {
                    drive_transition(transition, state, env, ctx)
                        .map_err(ExecuteError::ResetDailyChallenges)?;
                }
                SystemAction::EndWeeklyArena(transition) => {
                    drive_transition(transition, state, env, ctx)
                        .map_err(ExecuteError::EndWeeklyArena)?;
                }
                SystemAction::RemoveEntry(transition) => {
                    drive_transition(transition, state, env, ctx)
                        .map_err(ExecuteError::RemoveEntry)?;
                }
                SystemAction::ActivateEntry(transition) => {
                    drive_transition(transition, state, env, ctx)
                        .map_err(ExecuteError::ActivateEntry)?;
                }
            }
            Ok(ActionResult::System)
        }
    }
}
