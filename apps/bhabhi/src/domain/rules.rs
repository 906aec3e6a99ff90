use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Rank, Suit};
use crate::errors::GameError;

pub const MIN_SEATS: usize = 3;
pub const MAX_SEATS: usize = 6;
pub const DECK_SIZE: usize = 52;

/// Whoever holds this card leads the first trick, and must lead with it.
pub const OPENING_CARD: Card = Card::new(Suit::Spades, Rank::Ace);

/// When an off-suit play ends the trick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TochooTiming {
    /// The first off-suit play ends the trick at once.
    #[default]
    Immediate,
    /// Every active seat plays; the trick is then picked up if anyone went off-suit.
    EndOfRound,
}

impl TochooTiming {
    pub const fn as_str(self) -> &'static str {
        match self {
            TochooTiming::Immediate => "immediate",
            TochooTiming::EndOfRound => "end_of_round",
        }
    }
}

impl fmt::Display for TochooTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TochooTiming {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(TochooTiming::Immediate),
            "end_of_round" | "end-of-round" => Ok(TochooTiming::EndOfRound),
            other => Err(GameError::invalid_setup(format!(
                "unknown tochoo timing {other:?} (expected immediate or end_of_round)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleVariant {
    #[serde(default)]
    pub tochoo_timing: TochooTiming,
}
