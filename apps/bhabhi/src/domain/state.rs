use serde::{Deserialize, Serialize};

use crate::domain::rules::{RuleVariant, DECK_SIZE};
use crate::domain::tricks::{Resolution, Trick};
use crate::domain::{Card, Suit};
use crate::errors::GameError;

/// Seat index, 0-based in table order.
pub type SeatId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    Human,
    Cpu,
}

/// Phase a paused game returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumePhase {
    Play,
    ShowingTrick,
}

impl ResumePhase {
    pub const fn phase(self) -> Phase {
        match self {
            ResumePhase::Play => Phase::Play,
            ResumePhase::ShowingTrick => Phase::ShowingTrick,
        }
    }
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Phase {
    /// Seats configured, nothing dealt.
    Setup,
    /// Waiting on `turn` to play a card.
    Play,
    /// A trick was resolved; waiting for the display interval to pass.
    ShowingTrick,
    /// Terminal; ranking is complete.
    Finished,
    /// Timers and CPU play are frozen.
    Paused { resume_to: ResumePhase },
}

impl Phase {
    pub const fn is_paused(self) -> bool {
        matches!(self, Phase::Paused { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub kind: SeatKind,
    /// Kept sorted (suit display order, then rank).
    pub hand: Vec<Card>,
    /// Set exactly when the hand empties; never cleared.
    pub finished: bool,
    /// 1 = first to empty. The loser gets the last rank without being `finished`.
    pub finish_rank: Option<u8>,
    /// Led suit of the last trick this seat picked up; cleared on its next play.
    pub avoid_suit: Option<Suit>,
}

impl Seat {
    pub fn new(id: SeatId, kind: SeatKind) -> Self {
        Self {
            id,
            kind,
            hand: Vec::new(),
            finished: false,
            finish_rank: None,
            avoid_suit: None,
        }
    }
}

/// Most recently resolved trick, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrick {
    pub trick: Trick,
    pub resolution: Resolution,
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub rules: RuleVariant,
    pub seats: Vec<Seat>,
    /// Trick in progress.
    /// - Some during Play (possibly with no plays yet)
    /// - None in Setup, ShowingTrick and Finished
    pub trick: Option<Trick>,
    /// Seat expected to act.
    /// - Some(seat) during Play
    /// - None whenever nobody can play a card
    pub turn: Option<SeatId>,
    pub last_trick: Option<ResolvedTrick>,
    /// Seats in the order they received a rank.
    pub finish_order: Vec<SeatId>,
    /// Cards permanently removed by discarded tricks.
    pub discarded: Vec<Card>,
    pub tricks_played: u32,
    pub pickups: u32,
}

impl GameState {
    /// Fresh table in `Setup` with empty hands.
    pub fn setup(kinds: &[SeatKind], rules: RuleVariant) -> Self {
        let seats = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Seat::new(i as SeatId, *kind))
            .collect();
        Self {
            phase: Phase::Setup,
            rules,
            seats,
            trick: None,
            turn: None,
            last_trick: None,
            finish_order: Vec::new(),
            discarded: Vec::new(),
            tricks_played: 0,
            pickups: 0,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seat(&self, id: SeatId) -> Result<&Seat, GameError> {
        self.seats
            .get(id as usize)
            .ok_or_else(|| GameError::illegal_state(format!("no seat {id}")))
    }

    pub fn seat_mut(&mut self, id: SeatId) -> Result<&mut Seat, GameError> {
        self.seats
            .get_mut(id as usize)
            .ok_or_else(|| GameError::illegal_state(format!("no seat {id}")))
    }

    pub fn unfinished_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.finished).count()
    }

    pub fn finished_flags(&self) -> Vec<bool> {
        self.seats.iter().map(|s| s.finished).collect()
    }

    /// Seat currently holding `card`, if any.
    pub fn holder_of(&self, card: Card) -> Option<SeatId> {
        self.seats
            .iter()
            .find(|s| s.hand.contains(&card))
            .map(|s| s.id)
    }

    /// Next unfinished seat after `seat` in table order, wrapping.
    /// `seat` itself is only returned when it is the sole unfinished seat.
    pub fn next_unfinished_after(&self, seat: SeatId) -> Option<SeatId> {
        next_unfinished_after(&self.finished_flags(), seat)
    }

    /// Mark `seat` finished and give it the next rank.
    pub fn mark_finished(&mut self, seat: SeatId) -> Result<u8, GameError> {
        let rank = self.finish_order.len() as u8 + 1;
        let s = self.seat_mut(seat)?;
        if s.finished {
            return Err(GameError::illegal_state(format!(
                "seat {seat} finished twice"
            )));
        }
        if !s.hand.is_empty() {
            return Err(GameError::illegal_state(format!(
                "seat {seat} marked finished while holding cards"
            )));
        }
        s.finished = true;
        s.finish_rank = Some(rank);
        self.finish_order.push(seat);
        Ok(rank)
    }

    /// Give the remaining seat the last rank. It keeps its cards and is not `finished`.
    pub fn assign_last_rank(&mut self, seat: SeatId) -> Result<u8, GameError> {
        let rank = self.finish_order.len() as u8 + 1;
        let s = self.seat_mut(seat)?;
        if s.finish_rank.is_some() {
            return Err(GameError::illegal_state(format!(
                "seat {seat} already ranked"
            )));
        }
        s.finish_rank = Some(rank);
        self.finish_order.push(seat);
        Ok(rank)
    }

    /// Seats from best to worst. Complete only once the game is `Finished`.
    pub fn ranking(&self) -> &[SeatId] {
        &self.finish_order
    }

    pub fn loser(&self) -> Option<SeatId> {
        match self.phase {
            Phase::Finished => self.finish_order.last().copied(),
            _ => None,
        }
    }

    /// Every card the game is tracking: hands, the open trick and the discard pile.
    pub fn accounted_cards(&self) -> Vec<Card> {
        let mut all = Vec::with_capacity(DECK_SIZE);
        for seat in &self.seats {
            all.extend(seat.hand.iter().copied());
        }
        if let Some(trick) = &self.trick {
            all.extend(trick.cards());
        }
        all.extend(self.discarded.iter().copied());
        all
    }
}

/// Next unfinished seat after `seat` given per-seat finished flags.
pub fn next_unfinished_after(finished: &[bool], seat: SeatId) -> Option<SeatId> {
    let n = finished.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (seat as usize + step) % n)
        .find(|&i| !finished[i])
        .map(|i| i as SeatId)
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<SeatId, GameError> {
    state.turn.ok_or_else(|| {
        GameError::illegal_state(format!("Invariant violated: turn must be set ({ctx})"))
    })
}

pub fn require_trick<'a>(state: &'a GameState, ctx: &'static str) -> Result<&'a Trick, GameError> {
    state.trick.as_ref().ok_or_else(|| {
        GameError::illegal_state(format!("Invariant violated: trick must be set ({ctx})"))
    })
}

pub fn require_trick_mut<'a>(
    state: &'a mut GameState,
    ctx: &'static str,
) -> Result<&'a mut Trick, GameError> {
    state.trick.as_mut().ok_or_else(|| {
        GameError::illegal_state(format!("Invariant violated: trick must be set ({ctx})"))
    })
}
