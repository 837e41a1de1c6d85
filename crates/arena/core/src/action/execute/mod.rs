//! Ranking battle pipeline stages.
//!
//! - `validation`: ordered precondition checks over the prior snapshot
//! - `battle`: loadout assembly, combat resolution, leaderboard update
//! - `reward`: reward minting for the winner
pub mod battle;
pub mod reward;
pub mod validation;

pub use battle::{actor_snapshot, apply_outcome, enemy_snapshot, resolve};
pub use reward::{distribute, distribute_rewards, mint};
pub use validation::{Participants, validate};
