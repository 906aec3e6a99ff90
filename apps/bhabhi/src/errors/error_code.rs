//! Error codes for the Bhabhi engine.
//!
//! Every `GameError` maps to exactly one code. Codes are SCREAMING_SNAKE_CASE
//! and stable, so presentation layers can key warnings and translations on
//! them instead of on message text.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Card is not in the seat's legal set
    IllegalCard,
    /// Intent came from a seat other than the one to act
    NotYourTurn,
    /// Intent arrived while the game is paused
    GamePaused,
    /// Engine invariant violated (caller bug)
    IllegalState,
    /// Intent not valid in the current phase
    PhaseMismatch,
    /// Seat configuration rejected
    InvalidSetup,
    /// Card token could not be parsed
    ParseCard,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        Self::IllegalCard,
        Self::NotYourTurn,
        Self::GamePaused,
        Self::IllegalState,
        Self::PhaseMismatch,
        Self::InvalidSetup,
        Self::ParseCard,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IllegalCard => "ILLEGAL_CARD",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::GamePaused => "GAME_PAUSED",
            Self::IllegalState => "ILLEGAL_STATE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidSetup => "INVALID_SETUP",
            Self::ParseCard => "PARSE_CARD",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
