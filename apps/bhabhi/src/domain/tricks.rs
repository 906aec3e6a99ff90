use serde::Serialize;
use tracing::debug;

use crate::domain::cards_logic::{card_beats, cards_of_suit, hand_has_suit, highest_led_play};
use crate::domain::rules::{TochooTiming, OPENING_CARD};
use crate::domain::state::{
    next_unfinished_after, require_trick, require_trick_mut, require_turn, GameState, Phase,
    ResolvedTrick, Seat, SeatId,
};
use crate::domain::{Card, Suit};
use crate::errors::GameError;

/// Cards on the table for the current trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trick {
    pub leader: SeatId,
    /// Unset until the first play; fixed afterwards.
    pub led_suit: Option<Suit>,
    /// Ordered plays (who, card).
    pub plays: Vec<(SeatId, Card)>,
    /// Card the leader is obliged to lead with (first trick of a game only).
    pub required_lead: Option<Card>,
}

impl Trick {
    pub fn new(leader: SeatId) -> Self {
        Self {
            leader,
            led_suit: None,
            plays: Vec::new(),
            required_lead: None,
        }
    }

    /// First trick of a game: the leader must open with the opening card.
    pub fn opening(leader: SeatId) -> Self {
        Self {
            required_lead: Some(OPENING_CARD),
            ..Self::new(leader)
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|(_, c)| *c).collect()
    }

    pub fn has_played(&self, seat: SeatId) -> bool {
        self.plays.iter().any(|(s, _)| *s == seat)
    }

    /// Any off-suit play so far.
    pub fn has_tochoo(&self) -> bool {
        match self.led_suit {
            Some(lead) => self.plays.iter().any(|(_, c)| c.suit != lead),
            None => false,
        }
    }

    /// Highest led-suit play so far.
    pub fn current_winner(&self) -> Option<(SeatId, Card)> {
        let lead = self.led_suit?;
        highest_led_play(&self.plays, lead, |_| true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Cards leave the game.
    Discard,
    /// Cards go into `receiver`'s hand.
    Pickup { receiver: SeatId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Highest led-suit play, whether or not that seat is still in the game.
    pub winner: SeatId,
    /// `None` only when every seat has finished.
    pub next_leader: Option<SeatId>,
    pub cards: Vec<Card>,
}

/// Result of playing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The play was off-suit.
    pub tochoo: bool,
    /// The play emptied the hand; carries the rank assigned.
    pub finished_rank: Option<u8>,
    /// The trick must now be resolved.
    pub trick_complete: bool,
}

/// Compute legal cards for `hand` against `trick`, independent of turn enforcement.
///
/// Always non-empty for a non-empty hand.
pub fn legal_moves(hand: &[Card], trick: &Trick) -> Result<Vec<Card>, GameError> {
    if hand.is_empty() {
        return Err(GameError::illegal_state(
            "legal_moves asked for an empty hand",
        ));
    }

    if trick.plays.is_empty() {
        if let Some(required) = trick.required_lead {
            if hand.contains(&required) {
                return Ok(vec![required]);
            }
        }
    }

    if let Some(lead) = trick.led_suit {
        if hand_has_suit(hand, lead) {
            return Ok(cards_of_suit(hand, lead));
        }
    }

    let mut any = hand.to_vec();
    any.sort();
    Ok(any)
}

/// Playing `card` into `trick` would be off-suit.
pub fn is_tochoo(trick: &Trick, card: Card) -> bool {
    trick.led_suit.is_some_and(|lead| card.suit != lead)
}

/// The trick has met a resolution condition.
///
/// Every unfinished seat has played; or, under `Immediate` timing, someone
/// went off-suit.
pub fn trick_is_complete(trick: &Trick, seats: &[Seat], timing: TochooTiming) -> bool {
    if trick.plays.is_empty() {
        return false;
    }
    if timing == TochooTiming::Immediate && trick.has_tochoo() {
        return true;
    }
    seats
        .iter()
        .filter(|s| !s.finished)
        .all(|s| trick.has_played(s.id))
}

/// Decide what happens to a finished trick. Pure; the caller applies it.
///
/// `finished` holds per-seat finished flags as of the last play.
pub fn resolve_trick(trick: &Trick, finished: &[bool]) -> Result<Resolution, GameError> {
    let lead = trick
        .led_suit
        .ok_or_else(|| GameError::illegal_state("resolve_trick on a trick with no plays"))?;
    let (winner, _) = highest_led_play(&trick.plays, lead, |_| true)
        .ok_or_else(|| GameError::illegal_state("trick has no led-suit play"))?;

    let is_unfinished = |seat: SeatId| !finished.get(seat as usize).copied().unwrap_or(true);

    let outcome = if trick.has_tochoo() {
        // A seat that emptied its hand in this trick never takes cards back.
        match highest_led_play(&trick.plays, lead, is_unfinished) {
            Some((receiver, _)) => Outcome::Pickup { receiver },
            None => Outcome::Discard,
        }
    } else {
        Outcome::Discard
    };

    let next_leader = match outcome {
        Outcome::Pickup { receiver } => Some(receiver),
        Outcome::Discard if is_unfinished(winner) => Some(winner),
        Outcome::Discard => next_unfinished_after(finished, winner),
    };

    Ok(Resolution {
        outcome,
        winner,
        next_leader,
        cards: trick.cards(),
    })
}

/// Play a card into the current trick, enforcing phase, turn and legality.
///
/// On success the card has moved from the hand to the trick, a seat that
/// emptied its hand is ranked, and `turn` points at the next unfinished seat
/// (or is cleared when the trick is complete).
pub fn play_card(
    state: &mut GameState,
    seat: SeatId,
    card: Card,
) -> Result<PlayOutcome, GameError> {
    if state.phase != Phase::Play {
        return Err(GameError::phase_mismatch("play_card", state.phase));
    }

    let turn = require_turn(state, "play_card")?;
    if turn != seat {
        return Err(GameError::NotYourTurn {
            seat,
            expected: Some(turn),
        });
    }

    let trick = require_trick(state, "play_card")?;
    let hand = &state.seat(seat)?.hand;
    if !hand.contains(&card) {
        return Err(GameError::illegal_card(seat, card, "card not in hand"));
    }
    let legal = legal_moves(hand, trick)?;
    if !legal.contains(&card) {
        let detail = match (trick.plays.is_empty(), trick.required_lead, trick.led_suit) {
            (true, Some(required), _) => format!("the opening lead must be {required}"),
            (_, _, Some(lead)) => format!("must follow {lead:?}"),
            _ => "not a legal move".to_string(),
        };
        return Err(GameError::illegal_card(seat, card, detail));
    }
    let tochoo = is_tochoo(trick, card);

    let player = state.seat_mut(seat)?;
    player.hand.retain(|c| *c != card);
    player.avoid_suit = None;
    let emptied = player.hand.is_empty();

    let trick = require_trick_mut(state, "play_card")?;
    if trick.plays.is_empty() {
        trick.led_suit = Some(card.suit);
    }
    trick.required_lead = None;
    trick.plays.push((seat, card));

    let finished_rank = if emptied {
        Some(state.mark_finished(seat)?)
    } else {
        None
    };

    let trick = require_trick(state, "play_card")?;
    let trick_complete = trick_is_complete(trick, &state.seats, state.rules.tochoo_timing);
    state.turn = if trick_complete {
        None
    } else {
        let next = state.next_unfinished_after(seat).ok_or_else(|| {
            GameError::illegal_state("open trick with no unfinished seat left to play")
        })?;
        Some(next)
    };

    debug!(seat, card = %card, tochoo, trick_complete, "card played");

    Ok(PlayOutcome {
        tochoo,
        finished_rank,
        trick_complete,
    })
}

/// Resolve the open trick and apply the result to `state`.
///
/// Discarded cards move to the discard pile; picked-up cards are merged into
/// the receiver's hand, which is re-sorted and remembers the led suit. The
/// trick is kept as `last_trick` and `turn` is cleared.
pub fn close_current_trick(state: &mut GameState) -> Result<Resolution, GameError> {
    let trick = require_trick(state, "close_current_trick")?;
    let resolution = resolve_trick(trick, &state.finished_flags())?;

    let trick = state
        .trick
        .take()
        .ok_or_else(|| GameError::illegal_state("trick vanished during close"))?;

    match resolution.outcome {
        Outcome::Discard => state.discarded.extend(resolution.cards.iter().copied()),
        Outcome::Pickup { receiver } => {
            let seat = state.seat_mut(receiver)?;
            if seat.finished {
                return Err(GameError::illegal_state(format!(
                    "finished seat {receiver} cannot pick up"
                )));
            }
            seat.hand.extend(resolution.cards.iter().copied());
            seat.hand.sort();
            seat.avoid_suit = trick.led_suit;
            state.pickups += 1;
        }
    }

    state.tricks_played += 1;
    state.turn = None;
    state.last_trick = Some(ResolvedTrick {
        trick,
        resolution: resolution.clone(),
    });

    Ok(resolution)
}

/// Whether `a` would currently win `trick` if played now.
pub fn would_win(trick: &Trick, a: Card) -> bool {
    match (trick.led_suit, trick.current_winner()) {
        (Some(lead), Some((_, best))) => card_beats(a, best, lead),
        _ => true,
    }
}
