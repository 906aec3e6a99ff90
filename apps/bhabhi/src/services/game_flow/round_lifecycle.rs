use tracing::info;

use super::mutation::Draft;
use crate::ai::create_ai;
use crate::domain::game_transition::GameEvent;
use crate::domain::rules::OPENING_CARD;
use crate::domain::state::{GameState, Phase, SeatKind};
use crate::domain::tricks::{close_current_trick, Outcome, Trick};
use crate::domain::{deal_hands, derive_cpu_seed, derive_dealing_seed};
use crate::errors::GameError;
use crate::services::game_flow::GameFlowService;

impl GameFlowService {
    /// Deal and enter Play.
    ///
    /// Seed precedence: the intent's seed, then the table seed, then OS entropy.
    /// Dealing and every CPU seat get their own seed derived from it.
    pub(super) fn start_game(&self, draft: &mut Draft, seed: Option<u64>) -> Result<(), GameError> {
        let setup = &self.setup;
        setup.validate()?;

        let game_seed = seed.or(self.config.seed).unwrap_or_else(rand::random::<u64>);

        let mut policies = Vec::with_capacity(setup.seats.len());
        for (i, seat) in setup.seats.iter().enumerate() {
            let policy = match seat.kind {
                SeatKind::Human => None,
                SeatKind::Cpu => {
                    let mut ai_config = seat.ai_config.clone();
                    if ai_config.seed.is_none() {
                        ai_config.seed = Some(derive_cpu_seed(game_seed, i as u8));
                    }
                    let policy = create_ai(seat.policy_name(), &ai_config).ok_or_else(|| {
                        GameError::invalid_setup(format!(
                            "seat {i}: unknown CPU policy {:?}",
                            seat.policy_name()
                        ))
                    })?;
                    Some(policy)
                }
            };
            policies.push(policy);
        }

        let hands = deal_hands(setup.seats.len(), derive_dealing_seed(game_seed))?;
        let mut state = GameState::setup(&setup.kinds(), self.config.rules);
        for (seat, hand) in state.seats.iter_mut().zip(hands) {
            seat.hand = hand;
        }

        let leader = state
            .holder_of(OPENING_CARD)
            .ok_or_else(|| GameError::illegal_state("opening card was not dealt"))?;
        state.phase = Phase::Play;
        state.trick = Some(Trick::opening(leader));
        state.turn = Some(leader);

        info!(
            seats = setup.seats.len(),
            leader,
            seed = game_seed,
            timing = %self.config.rules.tochoo_timing,
            "game started"
        );

        draft.state = state;
        draft.policies = Some(policies);
        draft.game_seed = Some(game_seed);
        draft.events.push(GameEvent::GameStarted { leader });
        Ok(())
    }

    /// Resolve the completed trick, then show it or end the game.
    pub(super) fn close_trick(draft: &mut Draft) -> Result<(), GameError> {
        let resolution = close_current_trick(&mut draft.state)?;

        let receiver = match resolution.outcome {
            Outcome::Discard => {
                draft.events.push(GameEvent::TrickDiscarded {
                    winner: resolution.winner,
                    cards: resolution.cards.clone(),
                });
                None
            }
            Outcome::Pickup { receiver } => {
                draft.events.push(GameEvent::TochooPickup {
                    seat: receiver,
                    cards: resolution.cards.clone(),
                });
                Some(receiver)
            }
        };
        info!(
            outcome = ?resolution.outcome,
            winner = resolution.winner,
            ?receiver,
            cards = resolution.cards.len(),
            "trick resolved"
        );

        if draft.state.unfinished_count() <= 1 {
            Self::finish_game(&mut draft.state)
        } else {
            draft.state.phase = Phase::ShowingTrick;
            Ok(())
        }
    }

    /// Rank the seat still holding cards last and enter Finished.
    ///
    /// If every seat emptied, the last one to do so already holds the last rank.
    fn finish_game(state: &mut GameState) -> Result<(), GameError> {
        if let Some(last) = state.seats.iter().find(|s| !s.finished).map(|s| s.id) {
            state.assign_last_rank(last)?;
        }
        state.phase = Phase::Finished;
        state.turn = None;
        info!(ranking = ?state.ranking(), loser = ?state.loser(), "game finished");
        Ok(())
    }

    /// Leave ShowingTrick: the next leader opens a fresh trick.
    pub(super) fn begin_next_trick(state: &mut GameState) -> Result<(), GameError> {
        if state.phase != Phase::ShowingTrick {
            return Err(GameError::illegal_state(format!(
                "trick display ended in phase {:?}",
                state.phase
            )));
        }
        let leader = state
            .last_trick
            .as_ref()
            .and_then(|lt| lt.resolution.next_leader)
            .ok_or_else(|| GameError::illegal_state("no next leader after resolved trick"))?;

        state.trick = Some(Trick::new(leader));
        state.turn = Some(leader);
        state.phase = Phase::Play;
        Ok(())
    }
}
