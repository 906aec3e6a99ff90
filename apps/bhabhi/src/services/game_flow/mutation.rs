use tracing::{error, warn};

use crate::ai::CpuPolicy;
use crate::domain::game_transition::{derive_game_transitions, GameEvent, GameLifecycleView};
use crate::domain::state::GameState;
use crate::errors::GameError;
use crate::services::game_flow::{GameFlowService, Intent, ScheduleRequest, SetupConfig};

/// What one accepted intent produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFlowMutationResult {
    /// Explicit events first, then edge-triggered ones.
    pub events: Vec<GameEvent>,
    /// Timer the presentation should start.
    pub schedule: Option<ScheduleRequest>,
    /// Ticket of a timer that is no longer wanted.
    pub cancelled: Option<u64>,
}

impl GameFlowMutationResult {
    /// Nothing happened (stale timer).
    pub fn is_noop(&self) -> bool {
        self.events.is_empty() && self.schedule.is_none() && self.cancelled.is_none()
    }
}

/// Working copy an intent mutates; committed only if the intent succeeds.
pub(super) struct Draft {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub setup: Option<SetupConfig>,
    pub policies: Option<Vec<Option<Box<dyn CpuPolicy>>>>,
    pub game_seed: Option<u64>,
    pub consumed_timer: bool,
}

pub(super) enum Dispatch {
    Applied,
    Stale,
}

impl GameFlowService {
    /// Process one intent to completion.
    ///
    /// On error the table is exactly as it was before the call.
    pub fn apply(&mut self, intent: Intent) -> Result<GameFlowMutationResult, GameError> {
        let before = GameLifecycleView::of(&self.state);
        let mut draft = Draft {
            state: self.state.clone(),
            events: Vec::new(),
            setup: None,
            policies: None,
            game_seed: self.game_seed,
            consumed_timer: false,
        };

        match self.dispatch(&mut draft, intent) {
            Ok(Dispatch::Applied) => {}
            Ok(Dispatch::Stale) => return Ok(GameFlowMutationResult::default()),
            Err(err) => {
                if err.is_rejection() {
                    warn!(code = %err.code(), error = %err, "intent rejected");
                } else {
                    error!(code = %err.code(), error = %err, "engine invariant broken");
                }
                return Err(err);
            }
        }

        let mut events = std::mem::take(&mut draft.events);
        self.commit(draft);

        let after = GameLifecycleView::of(&self.state);
        events.extend(derive_game_transitions(&before, &after));

        let (schedule, cancelled) = self.reschedule();

        Ok(GameFlowMutationResult {
            events,
            schedule,
            cancelled,
        })
    }

    fn commit(&mut self, draft: Draft) {
        self.state = draft.state;
        if let Some(setup) = draft.setup {
            self.setup = setup;
        }
        if let Some(policies) = draft.policies {
            self.policies = policies;
        }
        self.game_seed = draft.game_seed;
        if draft.consumed_timer {
            self.live_timer = None;
        }
    }
}
