/// Property-based tests for trick resolution: tochoo detection and winner choice
use proptest::prelude::*;

use crate::domain::state::SeatId;
use crate::domain::tricks::{resolve_trick, Outcome, Trick};
use crate::domain::{test_gens, test_prelude, Card, Rank, Suit};

/// Independent oracle: highest rank among cards of the first play's suit.
fn oracle_winner(plays: &[(SeatId, Card)]) -> SeatId {
    let lead = plays[0].1.suit;
    let mut best = plays[0];
    for &(seat, card) in &plays[1..] {
        if card.suit == lead && card.rank.value() > best.1.rank.value() {
            best = (seat, card);
        }
    }
    best.0
}

fn trick_of(cards: &[Card]) -> Trick {
    let mut trick = Trick::new(0);
    trick.led_suit = Some(cards[0].suit);
    for (i, card) in cards.iter().enumerate() {
        trick.plays.push((i as SeatId, *card));
    }
    trick
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: winner is the highest led-suit card.
    #[test]
    fn prop_winner_is_highest_led_card(cards in (2usize..=6).prop_flat_map(test_gens::unique_cards)) {
        let trick = trick_of(&cards);
        let res = resolve_trick(&trick, &vec![false; cards.len()]).unwrap();
        prop_assert_eq!(res.winner, oracle_winner(&trick.plays));
        prop_assert_eq!(res.cards, cards);
    }

    /// Property: pickup iff some play is off the led suit.
    #[test]
    fn prop_tochoo_iff_pickup(cards in (2usize..=6).prop_flat_map(test_gens::unique_cards)) {
        let trick = trick_of(&cards);
        let lead = cards[0].suit;
        let off_suit = cards.iter().any(|c| c.suit != lead);
        let res = resolve_trick(&trick, &vec![false; cards.len()]).unwrap();
        match res.outcome {
            Outcome::Pickup { receiver } => {
                prop_assert!(off_suit);
                prop_assert_eq!(receiver, res.winner);
                prop_assert_eq!(res.next_leader, Some(receiver));
            }
            Outcome::Discard => {
                prop_assert!(!off_suit);
                prop_assert_eq!(res.next_leader, Some(res.winner));
            }
        }
    }

    /// Property: a finished seat never receives a pickup.
    #[test]
    fn prop_finished_seat_never_receives(
        cards in (2usize..=6).prop_flat_map(test_gens::unique_cards),
        finished_mask in any::<u8>(),
    ) {
        let trick = trick_of(&cards);
        let finished: Vec<bool> = (0..cards.len()).map(|i| finished_mask & (1 << i) != 0).collect();
        let res = resolve_trick(&trick, &finished).unwrap();
        if let Outcome::Pickup { receiver } = res.outcome {
            prop_assert!(!finished[receiver as usize]);
        }
        if let Some(leader) = res.next_leader {
            prop_assert!(!finished[leader as usize]);
        } else {
            prop_assert!(finished.iter().all(|f| *f));
        }
    }
}

#[test]
fn spade_lead_with_club_tochoo() {
    let cards = [
        Card::new(Suit::Spades, Rank::Five),
        Card::new(Suit::Spades, Rank::Nine),
        Card::new(Suit::Clubs, Rank::Ace),
    ];
    let res = resolve_trick(&trick_of(&cards), &[false, false, false]).unwrap();
    assert_eq!(res.outcome, Outcome::Pickup { receiver: 1 });
}
