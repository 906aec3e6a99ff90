//! Per-seat views: a hand with playable flags, and what a CPU sees when it acts.

use serde::Serialize;

use crate::domain::state::{GameState, Phase, SeatId};
use crate::domain::tricks::{legal_moves, Trick};
use crate::domain::{Card, Suit};
use crate::errors::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandCard {
    pub card: Card,
    pub playable: bool,
}

/// One seat's hand, each card flagged playable or not for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandView {
    pub seat: SeatId,
    pub cards: Vec<HandCard>,
}

/// Build the hand view for `seat`. Cards are only playable on that seat's turn.
pub fn hand_view(state: &GameState, seat: SeatId) -> Result<HandView, GameError> {
    let hand = &state.seat(seat)?.hand;
    let legal = match (state.phase, state.turn, &state.trick) {
        (Phase::Play, Some(turn), Some(trick)) if turn == seat => legal_moves(hand, trick)?,
        _ => Vec::new(),
    };
    Ok(HandView {
        seat,
        cards: hand
            .iter()
            .map(|&card| HandCard {
                card,
                playable: legal.contains(&card),
            })
            .collect(),
    })
}

/// Everything a CPU policy may look at when it is asked for a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuView {
    pub seat: SeatId,
    pub hand: Vec<Card>,
    pub trick: Trick,
    /// Never empty.
    pub legal: Vec<Card>,
    /// Cards held per seat, indexed by seat id.
    pub card_counts: Vec<usize>,
    pub finished: Vec<bool>,
    /// Suit this seat last picked up.
    pub avoid_suit: Option<Suit>,
}

impl CpuView {
    /// View for the seat whose turn it is.
    pub fn for_turn(state: &GameState) -> Result<Self, GameError> {
        let seat = state
            .turn
            .ok_or_else(|| GameError::illegal_state("CpuView requested with no turn"))?;
        let trick = state
            .trick
            .clone()
            .ok_or_else(|| GameError::illegal_state("CpuView requested with no open trick"))?;
        let me = state.seat(seat)?;
        Self::new(
            seat,
            me.hand.clone(),
            trick,
            state.finished_flags(),
            state.seats.iter().map(|s| s.hand.len()).collect(),
            me.avoid_suit,
        )
    }

    /// Build a view from its parts; `legal` is derived from the hand and trick.
    pub fn new(
        seat: SeatId,
        hand: Vec<Card>,
        trick: Trick,
        finished: Vec<bool>,
        card_counts: Vec<usize>,
        avoid_suit: Option<Suit>,
    ) -> Result<Self, GameError> {
        let legal = legal_moves(&hand, &trick)?;
        Ok(Self {
            seat,
            hand,
            trick,
            legal,
            card_counts,
            finished,
            avoid_suit,
        })
    }

    pub fn is_leading(&self) -> bool {
        self.trick.plays.is_empty()
    }

    /// The led suit is set and this seat holds none of it.
    pub fn is_tochoo_turn(&self) -> bool {
        self.trick
            .led_suit
            .is_some_and(|lead| !self.hand.iter().any(|c| c.suit == lead))
    }

    /// No other unfinished seat is still waiting to play in this trick.
    pub fn is_last_to_play(&self) -> bool {
        self.finished
            .iter()
            .enumerate()
            .filter(|(i, done)| !**done && *i as SeatId != self.seat)
            .all(|(i, _)| self.trick.has_played(i as SeatId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards_parsing::parse_cards;
    use crate::domain::rules::RuleVariant;
    use crate::domain::state::SeatKind;

    fn state_mid_trick() -> GameState {
        let mut state = GameState::setup(&[SeatKind::Human, SeatKind::Cpu, SeatKind::Cpu], RuleVariant::default());
        state.seats[0].hand = parse_cards(&["5H", "2C"]);
        state.seats[1].hand = parse_cards(&["AH", "KD", "3C"]);
        state.seats[2].hand = parse_cards(&["4S"]);
        let mut trick = Trick::new(2);
        trick.led_suit = Some(Suit::Clubs);
        trick.plays.push((2, "9C".parse().unwrap()));
        state.trick = Some(trick);
        state.turn = Some(0);
        state.phase = Phase::Play;
        state
    }

    #[test]
    fn hand_view_flags_only_turn_seat() {
        let state = state_mid_trick();
        let mine = hand_view(&state, 0).unwrap();
        let flags: Vec<bool> = mine.cards.iter().map(|c| c.playable).collect();
        assert_eq!(flags, vec![false, true]);
        let other = hand_view(&state, 1).unwrap();
        assert!(other.cards.iter().all(|c| !c.playable));
    }

    #[test]
    fn cpu_view_knows_position_in_trick() {
        let state = state_mid_trick();
        let view = CpuView::for_turn(&state).unwrap();
        assert_eq!(view.seat, 0);
        assert!(!view.is_leading());
        assert!(!view.is_tochoo_turn());
        assert!(!view.is_last_to_play(), "seat 1 has not played yet");
        assert_eq!(view.legal, parse_cards(&["2C"]));
        assert_eq!(view.card_counts, vec![2, 3, 1]);
    }

    #[test]
    fn cpu_view_requires_a_turn() {
        let mut state = state_mid_trick();
        state.turn = None;
        assert!(matches!(
            CpuView::for_turn(&state),
            Err(GameError::IllegalState(_))
        ));
    }
}
