//! Read-only projection of the game for rendering.

use serde::Serialize;

use crate::domain::player_view::{hand_view, HandView};
use crate::domain::state::{GameState, Phase, SeatId, SeatKind};
use crate::domain::tricks::{legal_moves, Resolution, Trick};
use crate::domain::{Card, Suit};
use crate::errors::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatPublic {
    pub id: SeatId,
    pub kind: SeatKind,
    pub card_count: usize,
    pub finished: bool,
    pub finish_rank: Option<u8>,
    pub avoid_suit: Option<Suit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastTrickPublic {
    pub trick: Trick,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub turn: Option<SeatId>,
    pub seats: Vec<SeatPublic>,
    pub trick: Option<Trick>,
    pub last_trick: Option<LastTrickPublic>,
    /// Legal moves of the seat to act; empty when nobody can play.
    pub playable: Vec<Card>,
    /// Hands of human seats, for a shared local screen.
    pub human_hands: Vec<HandView>,
    pub ranking: Vec<SeatId>,
    pub tricks_played: u32,
    pub pickups: u32,
    pub discarded: usize,
}

/// Produce a snapshot of `state`.
///
/// `playable` is computed on demand from the rule engine; nothing on the
/// state stores a per-card playable flag.
pub fn snapshot(state: &GameState) -> Result<GameSnapshot, GameError> {
    let seats = state
        .seats
        .iter()
        .map(|s| SeatPublic {
            id: s.id,
            kind: s.kind,
            card_count: s.hand.len(),
            finished: s.finished,
            finish_rank: s.finish_rank,
            avoid_suit: s.avoid_suit,
        })
        .collect();

    let playable = match (state.phase, state.turn, &state.trick) {
        (Phase::Play, Some(turn), Some(trick)) => legal_moves(&state.seat(turn)?.hand, trick)?,
        _ => Vec::new(),
    };

    let human_hands = state
        .seats
        .iter()
        .filter(|s| s.kind == SeatKind::Human)
        .map(|s| hand_view(state, s.id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GameSnapshot {
        phase: state.phase,
        turn: state.turn,
        seats,
        trick: state.trick.clone(),
        last_trick: state.last_trick.as_ref().map(|lt| LastTrickPublic {
            trick: lt.trick.clone(),
            resolution: lt.resolution.clone(),
        }),
        playable,
        human_hands,
        ranking: state.ranking().to_vec(),
        tricks_played: state.tricks_played,
        pickups: state.pickups,
        discarded: state.discarded.len(),
    })
}
