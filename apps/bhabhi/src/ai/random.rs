//! Random CPU policy - plays a uniformly random legal card.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, CpuPolicy};
use crate::domain::{Card, CpuView};

/// Policy that plays random legal cards.
///
/// Seeded for reproducible games, or drawn from OS entropy otherwise.
pub struct RandomPlayer {
    /// `choose_card` takes `&self`; the RNG needs mutable access.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl CpuPolicy for RandomPlayer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&self, view: &CpuView) -> Result<Card, AiError> {
        if view.legal.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        view.legal
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random card".into()))
    }
}
