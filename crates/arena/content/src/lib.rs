//! Data-driven arena content and loaders.
//!
//! This crate reads the static inputs of the arena from data files:
//! - arena rules and the score curve (TOML)
//! - the winner's reward table (RON)
//!
//! Content is consumed through the oracle traits of `arena-core` and never
//! appears in world state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentBundle, ContentFactory, RewardCatalog, RewardLoader};
