/// Property-based tests for follow-suit legality rules
use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::tricks::{legal_moves, Trick};
use crate::domain::{test_gens, test_prelude, Card};

fn led_by(suit_card: Card) -> Trick {
    let mut trick = Trick::new(1);
    trick.led_suit = Some(suit_card.suit);
    trick.plays.push((1, suit_card));
    trick
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: if a hand holds the led suit, the legal set is exactly those cards.
    #[test]
    fn prop_follow_suit_is_strict(
        cards in test_gens::unique_cards(14),
    ) {
        let lead_card = cards[0];
        let mut hand: Vec<Card> = cards[1..].to_vec();
        prop_assume!(hand.iter().any(|c| c.suit == lead_card.suit));
        hand.sort();

        let legal = legal_moves(&hand, &led_by(lead_card)).unwrap();
        let expected: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead_card.suit).collect();
        prop_assert_eq!(legal, expected);
    }

    /// Property: a void hand may play anything.
    #[test]
    fn prop_void_hand_plays_anything((lead_suit, hand) in test_gens::suit().prop_flat_map(|s| {
        (Just(s), test_gens::hand_without_suit(s))
    }), lead_rank in test_gens::rank()) {
        let legal = legal_moves(&hand, &led_by(Card::new(lead_suit, lead_rank))).unwrap();
        let mut expected = hand.clone();
        expected.sort();
        prop_assert_eq!(legal, expected);
    }

    /// Property: legal moves are a non-empty, duplicate-free subset of the hand.
    #[test]
    fn prop_legal_moves_subset((hand, trick) in test_gens::hand_and_trick()) {
        let legal = legal_moves(&hand, &trick).unwrap();
        prop_assert!(!legal.is_empty());

        let legal_set: HashSet<Card> = legal.iter().copied().collect();
        prop_assert_eq!(legal_set.len(), legal.len());
        for card in &legal {
            prop_assert!(hand.contains(card), "legal card {} not in hand", card);
        }
    }
}
