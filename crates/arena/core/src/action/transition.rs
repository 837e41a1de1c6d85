use crate::action::ActionContext;
use crate::env::ArenaEnv;
use crate::state::WorldState;

/// Defines how a concrete action moves the world from one snapshot to the next.
///
/// The engine drives every implementation through the same three phases:
///
/// 1. `validate` reads the prior snapshot and rejects the action on the first
///    violated precondition.
/// 2. `resolve` computes everything the action needs from outside the state
///    (battle outcomes, minted identifiers) without writing anything.
/// 3. `apply` folds the resolution into a working copy of the snapshot.
///
/// All hooks must be pure functions of `(state, env, ctx)`. The engine
/// discards the working copy when any phase fails, so implementations may
/// write to `state` in `apply` before returning an error.
pub trait ActionTransition {
    type Error;
    type Resolution;
    type Output;

    /// Validates preconditions against the state **before** mutation.
    fn validate(
        &self,
        _state: &WorldState,
        _env: &ArenaEnv<'_>,
        _ctx: &ActionContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Computes the outcome of the action. Assumes `validate` succeeded.
    fn resolve(
        &self,
        state: &WorldState,
        env: &ArenaEnv<'_>,
        ctx: &ActionContext,
    ) -> Result<Self::Resolution, Self::Error>;

    /// Writes the resolved outcome into `state`.
    fn apply(
        &self,
        resolution: Self::Resolution,
        state: &mut WorldState,
        env: &ArenaEnv<'_>,
        ctx: &ActionContext,
    ) -> Result<Self::Output, Self::Error>;
}
