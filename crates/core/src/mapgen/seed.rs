//! Deterministic seed mixing and random stream helpers for level generation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use xxhash_rust::xxh3::xxh3_64;

/// Stream feeding the wall carve. Kept apart from the cosmetic stream so the
/// maze structure never depends on how many grass tiles were rolled.
pub(super) const STRUCTURE_STREAM: u64 = 1;
pub(super) const COSMETIC_STREAM: u64 = 2;

pub(super) fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, stream))
}

pub(super) fn random_index(rng: &mut impl Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for one visit to a generated level. Every entry regenerates the maze,
/// so the visit counter takes part in the mix.
pub(crate) fn derive_level_seed(run_seed: u64, level_name: &str, visit: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= xxh3_64(level_name.as_bytes()).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= u64::from(visit).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
