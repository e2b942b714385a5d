//! RNG oracle for deterministic random number generation.
//!
//! Every roll in a battle (accuracy, variance, critical hits, status chances,
//! AI jitter) is a pure function of a seed derived from the battle seed, the
//! action nonce, the acting combatant and a per-roll context value. Replaying
//! a battle with the same seed and the same submitted actions reproduces it
//! exactly.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
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
/// Stateless: each call derives its output from the seed alone, which keeps
/// the oracle shareable behind `&dyn RngOracle`.
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

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Roll purposes. Each independent roll inside one action uses its own
/// context so the values are uncorrelated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Accuracy = 0,
    Variance = 1,
    Critical = 2,
    StatusChance = 3,
    AiJitter = 4,
}

impl RollContext {
    const STRIDE: u32 = 8;

    /// Context value for a roll against the `target_index`-th target of an action.
    pub const fn for_target(self, target_index: u32) -> u32 {
        target_index * Self::STRIDE + self as u32
    }
}

/// Compute deterministic seed from battle state components.
///
/// # Arguments
///
/// * `battle_seed` - Seed fixed at battle start
/// * `nonce` - Resolution sequence number (increments each resolved action)
/// * `actor` - Raw id of the acting combatant
/// * `context` - Distinguishes multiple rolls in the same action
pub fn compute_seed(battle_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = battle_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
