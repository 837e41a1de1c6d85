//! Deterministic weekly arena rules.
//!
//! `arena-core` defines the canonical ranking battle pipeline (validation,
//! combat resolution, leaderboard update, reward minting), the world state it
//! runs against, and the oracle traits that feed it configuration. Every
//! transition is a pure function of `(prior state, oracles, action, context)`
//! and flows through [`engine::ArenaEngine`]; the crate performs no I/O and
//! reads no clock.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionContext, ActionResult, ActionTransition, ActivateEntry, EndWeeklyArena,
    JoinArena, JoinArenaError, RankingBattle, RankingBattleError, RankingBattleOutput,
    RemoveEntry, ResetDailyChallenges, StateSubject, SystemAction, SystemActionError,
};
#[cfg(feature = "serde")]
pub use action::CodecError;
pub use config::{ArenaConfig, ScoreCurve, ScoreCurveError, ScoreStep};
pub use engine::{
    ArenaEngine, ExecuteError, ExecutionOutcome, TransitionPhase, TransitionPhaseError,
};
pub use env::{
    ArenaEnv, BattleEvent, BattleLog, BattleResult, CombatResolver, CombatSnapshot, ConfigOracle,
    DuelResolver, Env, OracleError, PcgRng, ResolverError, RewardOracle, RewardRow, RewardTable,
    RngOracle, Side, compute_seed,
};
pub use error::{ArenaError, ErrorSeverity};
pub use state::{
    Address, AgentState, ArenaInfo, ArenaInfoError, AvatarState, Inventory, InventoryError,
    InventoryItem, ItemId, ItemKind, StateDelta, StateRecord, WeeklyArenaState, WorldState,
};
#[cfg(feature = "serde")]
pub use state::StateRootError;
