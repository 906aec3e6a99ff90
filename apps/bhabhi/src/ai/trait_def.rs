//! CPU policy trait definition.

use thiserror::Error;

use crate::domain::{Card, CpuView};
use crate::errors::GameError;

/// Errors that can occur during CPU decision-making.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    /// Policy encountered an internal error
    #[error("AI internal error: {0}")]
    Internal(String),
    /// Policy could not produce a legal move
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

impl From<AiError> for GameError {
    fn from(err: AiError) -> Self {
        GameError::illegal_state(format!("AI error: {err}"))
    }
}

/// Trait for CPU seats.
///
/// Implementations receive what the seat can see and must return a member
/// of `view.legal`. The state machine re-validates the choice anyway.
pub trait CpuPolicy: Send + Sync {
    /// Stable registry name.
    fn name(&self) -> &'static str;

    /// Choose a card to play.
    fn choose_card(&self, view: &CpuView) -> Result<Card, AiError>;
}
