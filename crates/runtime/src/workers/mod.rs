//! Background tasks owned by the runtime.

mod commit;

pub use commit::{Command, CommitWorker};
