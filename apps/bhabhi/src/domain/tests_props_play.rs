/// Property-based tests over whole games driven through the domain layer only
use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::dealing::{deal_hands, full_deck};
use crate::domain::rules::{RuleVariant, TochooTiming, DECK_SIZE, OPENING_CARD};
use crate::domain::state::{GameState, Phase, SeatId, SeatKind};
use crate::domain::tricks::{close_current_trick, legal_moves, play_card, Trick};
use crate::domain::{test_prelude, Card};

const TRICK_CAP: usize = 5_000;

fn start(seats: usize, seed: u64, timing: TochooTiming) -> GameState {
    let rules = RuleVariant {
        tochoo_timing: timing,
    };
    let mut state = GameState::setup(&vec![SeatKind::Cpu; seats], rules);
    for (seat, hand) in state.seats.iter_mut().zip(deal_hands(seats, seed).unwrap()) {
        seat.hand = hand;
    }
    let leader = state.holder_of(OPENING_CARD).unwrap();
    state.phase = Phase::Play;
    state.trick = Some(Trick::opening(leader));
    state.turn = Some(leader);
    state
}

fn assert_conserved(state: &GameState) {
    let all = state.accounted_cards();
    assert_eq!(all.len(), DECK_SIZE);
    let unique: HashSet<Card> = all.into_iter().collect();
    let deck: HashSet<Card> = full_deck().into_iter().collect();
    assert_eq!(unique, deck);
}

/// Plays with a picker that takes the legal card at `pick % len`.
/// Returns the state once at most one seat is unfinished.
fn run(mut state: GameState, picks: &[usize]) -> GameState {
    let mut i = 0usize;
    for _ in 0..TRICK_CAP {
        loop {
            let turn = state.turn.unwrap();
            let legal = legal_moves(&state.seats[turn as usize].hand, state.trick.as_ref().unwrap()).unwrap();
            let card = legal[picks[i % picks.len()] % legal.len()];
            i += 1;
            let out = play_card(&mut state, turn, card).unwrap();
            assert_conserved(&state);
            if out.trick_complete {
                break;
            }
        }
        let res = close_current_trick(&mut state).unwrap();
        assert_conserved(&state);
        if state.unfinished_count() <= 1 {
            return state;
        }
        let leader: SeatId = res.next_leader.unwrap();
        state.trick = Some(Trick::new(leader));
        state.turn = Some(leader);
    }
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: cards are never duplicated or lost, and finished seats stay empty.
    #[test]
    fn prop_conservation_and_monotone_finish(
        seats in 3usize..=6,
        seed in any::<u64>(),
        picks in proptest::collection::vec(0usize..20, 1..16),
        end_of_round in any::<bool>(),
    ) {
        let timing = if end_of_round { TochooTiming::EndOfRound } else { TochooTiming::Immediate };
        let state = run(start(seats, seed, timing), &picks);

        let mut ranks: Vec<u8> = Vec::new();
        for seat_id in state.ranking() {
            let seat = &state.seats[*seat_id as usize];
            prop_assert!(seat.finished);
            prop_assert!(seat.hand.is_empty());
            ranks.push(seat.finish_rank.unwrap());
        }
        let expected: Vec<u8> = (1..=ranks.len() as u8).collect();
        prop_assert_eq!(ranks, expected);
    }

    /// Property: the opening trick always starts with the opening card.
    #[test]
    fn prop_first_card_is_opening_card(seats in 3usize..=6, seed in any::<u64>()) {
        let mut state = start(seats, seed, TochooTiming::Immediate);
        let leader = state.turn.unwrap();
        let legal = legal_moves(&state.seats[leader as usize].hand, state.trick.as_ref().unwrap()).unwrap();
        prop_assert_eq!(legal, vec![OPENING_CARD]);
        play_card(&mut state, leader, OPENING_CARD).unwrap();
        prop_assert_eq!(state.trick.as_ref().unwrap().required_lead, None);
    }
}
