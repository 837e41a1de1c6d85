//! Public runtime API surface.
//!
//! Types exposed to consumers of the runtime crate live here so the worker
//! and repositories stay internal.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::{CommitReceipt, RuntimeHandle};
