use tracing::{debug, warn};

use super::mutation::Draft;
use crate::domain::player_view::CpuView;
use crate::domain::state::{Phase, SeatId};
use crate::errors::GameError;
use crate::services::game_flow::GameFlowService;

impl GameFlowService {
    /// Let the CPU at `seat` choose and play a card.
    ///
    /// The choice goes through the same play path as a human's. A policy error
    /// or an illegal choice falls back to the first legal card.
    pub(super) fn run_cpu_turn(&self, draft: &mut Draft, seat: SeatId) -> Result<(), GameError> {
        if draft.state.phase != Phase::Play || draft.state.turn != Some(seat) {
            return Err(GameError::illegal_state(format!(
                "CPU timer for seat {seat} fired with turn {:?} in {:?}",
                draft.state.turn, draft.state.phase
            )));
        }

        let policy = self
            .policies
            .get(seat as usize)
            .and_then(|p| p.as_ref())
            .ok_or_else(|| GameError::illegal_state(format!("seat {seat} has no CPU policy")))?;

        let view = CpuView::for_turn(&draft.state)?;
        let fallback = view
            .legal
            .first()
            .copied()
            .ok_or_else(|| GameError::illegal_state("CPU seat has no legal move"))?;

        let card = match policy.choose_card(&view) {
            Ok(card) if view.legal.contains(&card) => card,
            Ok(card) => {
                warn!(seat, card = %card, policy = policy.name(), "CPU chose an illegal card, falling back");
                fallback
            }
            Err(err) => {
                warn!(seat, error = %err, policy = policy.name(), "CPU policy failed, falling back");
                fallback
            }
        };
        debug!(seat, card = %card, policy = policy.name(), "CPU move");

        Self::apply_play(draft, seat, card)
    }
}
