//! In-memory repositories for tests and ephemeral runs.

mod action_log;
mod state;

pub use action_log::InMemoryActionLog;
pub use state::InMemoryStateRepo;
