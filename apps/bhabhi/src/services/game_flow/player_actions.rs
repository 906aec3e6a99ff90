use tracing::info;

use super::mutation::Draft;
use crate::domain::game_transition::GameEvent;
use crate::domain::state::{Phase, SeatId, SeatKind};
use crate::domain::tricks::play_card;
use crate::domain::Card;
use crate::errors::GameError;
use crate::services::game_flow::GameFlowService;

impl GameFlowService {
    /// A `PlayCard` intent from the presentation. Only human seats may use it.
    pub(super) fn human_play(
        &self,
        draft: &mut Draft,
        seat: SeatId,
        card: Card,
    ) -> Result<(), GameError> {
        if draft.state.phase != Phase::Play {
            return Err(GameError::phase_mismatch("play_card", draft.state.phase));
        }
        let is_human = draft
            .state
            .seats
            .get(seat as usize)
            .is_some_and(|s| s.kind == SeatKind::Human);
        if !is_human {
            return Err(GameError::NotYourTurn {
                seat,
                expected: draft.state.turn,
            });
        }
        Self::apply_play(draft, seat, card)
    }

    /// Shared play path for humans and CPUs: validate, move the card, close the trick if done.
    pub(super) fn apply_play(draft: &mut Draft, seat: SeatId, card: Card) -> Result<(), GameError> {
        let outcome = play_card(&mut draft.state, seat, card)?;

        draft.events.push(GameEvent::CardPlayed {
            seat,
            card,
            tochoo: outcome.tochoo,
        });
        if let Some(rank) = outcome.finished_rank {
            info!(seat, rank, "seat finished");
            draft.events.push(GameEvent::SeatFinished { seat, rank });
        }

        if outcome.trick_complete {
            Self::close_trick(draft)?;
        }
        Ok(())
    }
}
