//! Commit layer for the weekly arena.
//!
//! This crate wires the deterministic `arena-core` engine to oracles loaded by
//! `arena-content`, a single commit worker, repositories, and an event
//! channel. Consumers embed [`Runtime`] and drive it through the cloneable
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] defines what the worker broadcasts after each command
//! - [`oracle`] owns the oracle instances the engine borrows
//! - [`repository`] persists snapshots and the action log
//! - [`replay`] re-executes a recorded action log and checks its roots
pub mod api;
pub mod events;
pub mod oracle;
pub mod replay;
pub mod repository;
pub mod runtime;

mod utils;
mod workers;

pub use api::{CommitReceipt, Result, RuntimeError, RuntimeHandle};
pub use events::ArenaEvent;
pub use oracle::OracleSet;
pub use replay::{ReplayError, replay_log};
pub use repository::{
    ActionLogEntry, ActionRepository, FileActionLog, FileStateRepository, InMemoryActionLog,
    InMemoryStateRepo, RepositoryError, StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use utils::hash::short_root;
