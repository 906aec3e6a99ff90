//! Engine-level error type shared by the rule engine, the turn state machine
//! and the table driver.
//!
//! Player-facing errors are rejections: the state machine returns them to the
//! caller and leaves the game state untouched. `IllegalState` is the only
//! variant that signals a caller bug rather than bad input.

use thiserror::Error;

use crate::domain::state::{Phase, SeatId};
use crate::domain::Card;
use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal card {card} for seat {seat}: {detail}")]
    IllegalCard {
        seat: SeatId,
        card: Card,
        detail: String,
    },
    #[error("not your turn: seat {seat} acted, expected {expected:?}")]
    NotYourTurn {
        seat: SeatId,
        expected: Option<SeatId>,
    },
    #[error("game is paused")]
    GamePaused,
    #[error("illegal engine state: {0}")]
    IllegalState(String),
    #[error("{action} is not allowed in phase {phase:?}")]
    PhaseMismatch { action: &'static str, phase: Phase },
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
    #[error("parse card: {0}")]
    ParseCard(String),
}

impl GameError {
    pub fn illegal_card(seat: SeatId, card: Card, detail: impl Into<String>) -> Self {
        Self::IllegalCard {
            seat,
            card,
            detail: detail.into(),
        }
    }

    pub fn illegal_state(detail: impl Into<String>) -> Self {
        Self::IllegalState(detail.into())
    }

    pub fn invalid_setup(detail: impl Into<String>) -> Self {
        Self::InvalidSetup(detail.into())
    }

    pub fn phase_mismatch(action: &'static str, phase: Phase) -> Self {
        Self::PhaseMismatch { action, phase }
    }

    /// Stable machine-readable code for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::IllegalCard { .. } => ErrorCode::IllegalCard,
            Self::NotYourTurn { .. } => ErrorCode::NotYourTurn,
            Self::GamePaused => ErrorCode::GamePaused,
            Self::IllegalState(_) => ErrorCode::IllegalState,
            Self::PhaseMismatch { .. } => ErrorCode::PhaseMismatch,
            Self::InvalidSetup(_) => ErrorCode::InvalidSetup,
            Self::ParseCard(_) => ErrorCode::ParseCard,
        }
    }

    /// True for recoverable rejections the presentation can simply re-offer.
    /// False only for engine invariant violations.
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::IllegalState(_))
    }
}
