//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{DECK_SIZE, MAX_SEATS, MIN_SEATS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::GameError;

/// Full 52-card deck in display order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Cards per seat: `52 / n` each, the first `52 % n` seats get one extra.
pub fn hand_sizes(seat_count: usize) -> Result<Vec<usize>, GameError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&seat_count) {
        return Err(GameError::invalid_setup(format!(
            "seat count must be {MIN_SEATS}..={MAX_SEATS}, got {seat_count}"
        )));
    }
    let base = DECK_SIZE / seat_count;
    let extra = DECK_SIZE % seat_count;
    Ok((0..seat_count)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect())
}

/// Shuffle the whole deck with a seeded ChaCha RNG and split it across seats.
///
/// Every card lands in exactly one hand. Hands come back sorted for display.
pub fn deal_hands(seat_count: usize, seed: u64) -> Result<Vec<Vec<Card>>, GameError> {
    let sizes = hand_sizes(seat_count)?;

    let mut deck = full_deck();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands = Vec::with_capacity(seat_count);
    let mut start = 0usize;
    for size in sizes {
        let mut hand = deck[start..start + size].to_vec();
        hand.sort();
        hands.push(hand);
        start += size;
    }

    Ok(hands)
}
