//! File-backed repositories.

mod log;
mod state;

pub use log::{FileActionLog, FileRepository};
pub use state::FileStateRepository;
