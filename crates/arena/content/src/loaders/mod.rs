//! Content loaders for reading arena data from files.
//!
//! Every loader has a `load(path)` entry point and a `parse(str)` variant for
//! embedded or test data.

pub mod config;
pub mod factory;
pub mod rewards;

pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use rewards::{RewardCatalog, RewardLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
