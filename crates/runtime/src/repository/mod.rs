//! Repository layer for dynamic runtime data.
//!
//! Repositories handle data that CHANGES as actions commit:
//! - World state snapshots, indexed by commit nonce
//! - The append-only action log used for replay
//!
//! Static arena content (rules, reward tables) is handled by oracles, not
//! repositories.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileActionLog, FileRepository, FileStateRepository};
pub use memory::{InMemoryActionLog, InMemoryStateRepo};
pub use traits::{ActionRepository, StateRepository};
pub use types::ActionLogEntry;
