// Proptest generators for domain types.
// These generators ensure unique cards so hands and tricks never share a card.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::state::SeatId;
use crate::domain::tricks::Trick;
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Spades),
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

/// Generate a vector of N unique cards
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards = full_deck();
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Generate a vector of 1 to max_count unique cards
pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count).prop_flat_map(unique_cards)
}

/// Generate a hand (1-18 unique cards, the largest 3-seat deal)
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_up_to(18)
}

/// Generate a hand containing NO cards of the given suit
pub fn hand_without_suit(excluded_suit: Suit) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut cards: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| c.suit != excluded_suit)
            .collect();
        let count = rng.random_range(1..=13usize);
        for i in 0..count {
            let j = rng.random_range(i..cards.len());
            cards.swap(i, j);
        }
        cards.truncate(count);
        cards
    })
}

/// A hand for seat 0 plus an open trick led by seat 1, sharing no cards.
///
/// The trick has 0-4 plays by seats 1.. in order; its led suit is the first
/// play's suit. An empty trick is sometimes the opening trick.
pub fn hand_and_trick() -> impl Strategy<Value = (Vec<Card>, Trick)> {
    (1usize..=13, 0usize..=4, any::<bool>()).prop_flat_map(|(hand_len, plays, opening)| {
        unique_cards(hand_len + plays).prop_map(move |cards| {
            let (hand, played) = cards.split_at(hand_len);
            let mut trick = if opening && plays == 0 {
                Trick::opening(1)
            } else {
                Trick::new(1)
            };
            for (i, card) in played.iter().enumerate() {
                if trick.led_suit.is_none() {
                    trick.led_suit = Some(card.suit);
                }
                trick.plays.push(((i + 1) as SeatId, *card));
            }
            (hand.to_vec(), trick)
        })
    })
}
