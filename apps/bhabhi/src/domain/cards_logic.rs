//! Card helpers: suit membership, led-suit comparisons, extremes within a suit

use super::cards_types::{Card, Suit};
use crate::domain::state::SeatId;

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Cards of `suit` in `hand`, ascending by rank.
pub fn cards_of_suit(hand: &[Card], suit: Suit) -> Vec<Card> {
    let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == suit).collect();
    v.sort();
    v
}

/// `a` beats `b` only when both follow the led suit and `a` ranks higher.
/// Off-suit cards never beat anything.
pub fn card_beats(a: Card, b: Card, lead: Suit) -> bool {
    a.suit == lead && (b.suit != lead || a.rank > b.rank)
}

/// Highest led-suit play among `plays`, optionally filtered by `eligible`.
pub fn highest_led_play<F>(plays: &[(SeatId, Card)], lead: Suit, eligible: F) -> Option<(SeatId, Card)>
where
    F: Fn(SeatId) -> bool,
{
    plays
        .iter()
        .copied()
        .filter(|(seat, card)| card.suit == lead && eligible(*seat))
        .max_by_key(|(_, card)| card.rank)
}

pub fn suit_count(hand: &[Card], suit: Suit) -> usize {
    hand.iter().filter(|c| c.suit == suit).count()
}
