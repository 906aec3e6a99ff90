//! RNG seed derivation utilities for deterministic game behavior.
//!
//! One game seed fans out into independent seeds for dealing and for each
//! CPU seat, so a whole game replays from a single number.

/// SplitMix64 finalizer; spreads nearby inputs across the whole u64 range.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for shuffling the deck.
pub fn derive_dealing_seed(game_seed: u64) -> u64 {
    mix(game_seed.wrapping_add(2))
}

/// Seed for the CPU policy sitting at `seat`.
///
/// Different seats of the same game get different seeds; the same
/// (game, seat) pair always gets the same one.
pub fn derive_cpu_seed(game_seed: u64, seat: u8) -> u64 {
    mix(game_seed
        .wrapping_add((seat as u64 + 1).wrapping_mul(10_000))
        .wrapping_add(1))
}
