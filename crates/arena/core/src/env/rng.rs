//! RNG oracle for deterministic random number generation.
//!
//! All randomness in a transition derives from the seed carried in the
//! [`ActionContext`](crate::action::ActionContext). Implementations must be
//! pure functions of their seed: replaying the same action with the same
//! context must draw the same numbers.

use crate::state::Address;

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: each draw is computed from the seed it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Well-known `context` values for [`compute_seed`].
pub mod seed_context {
    /// Seed handed to the combat resolver.
    pub const COMBAT: u32 = 0;
    /// Seed for minting reward item identifiers.
    pub const REWARD: u32 = 1;
}

/// Compute a deterministic seed from execution context components.
///
/// # Arguments
///
/// * `random_seed` - Seed supplied by the execution context
/// * `block_index` - Height the action executes at
/// * `address` - Address the draw is made for (the acting avatar)
/// * `context` - Distinguishes independent draws within one action
///   (see [`seed_context`])
pub fn compute_seed(random_seed: u64, block_index: u64, address: &Address, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = random_seed;

    hash ^= block_index.wrapping_mul(0x9e3779b97f4a7c15);

    for chunk in address.as_bytes().chunks(8) {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        hash ^= u64::from_be_bytes(word).wrapping_mul(0x517cc1b727220a95);
        hash = hash.rotate_left(23);
    }

    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
