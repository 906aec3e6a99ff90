//! Binds the state machine to a presentation collaborator.
//!
//! The presentation owns the clock and the screen; the engine tells it what
//! happened (`notify`), what to wait for (`schedule`/`cancel`) and what to
//! draw (`render`).

use tracing::debug;

use crate::domain::game_transition::GameEvent;
use crate::domain::snapshot::GameSnapshot;
use crate::errors::GameError;
use crate::services::game_flow::{GameFlowMutationResult, GameFlowService, Intent, ScheduleRequest};

pub trait Presentation {
    /// Draw the table. Called after every accepted intent.
    fn render(&mut self, snapshot: &GameSnapshot);

    /// Post `Intent::TimerFired { ticket }` after `delay_ms`.
    fn schedule(&mut self, request: ScheduleRequest);

    /// Drop a pending timer. Firing it anyway is harmless.
    fn cancel(&mut self, _ticket: u64) {}

    /// Cue hook for sounds and animations.
    fn notify(&mut self, event: &GameEvent);

    /// An intent was rejected; the table is unchanged.
    fn rejected(&mut self, _error: &GameError) {}
}

/// A game plus the presentation it drives.
pub struct Table<P: Presentation> {
    flow: GameFlowService,
    presentation: P,
}

impl<P: Presentation> Table<P> {
    pub fn new(flow: GameFlowService, presentation: P) -> Self {
        Self { flow, presentation }
    }

    pub fn flow(&self) -> &GameFlowService {
        &self.flow
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// Feed one intent through the state machine and fan its results out.
    pub fn submit(&mut self, intent: Intent) -> Result<GameFlowMutationResult, GameError> {
        let result = match self.flow.apply(intent) {
            Ok(result) => result,
            Err(err) => {
                self.presentation.rejected(&err);
                return Err(err);
            }
        };
        if result.is_noop() {
            return Ok(result);
        }

        for event in &result.events {
            self.presentation.notify(event);
        }
        if let Some(ticket) = result.cancelled {
            debug!(ticket, "timer cancelled");
            self.presentation.cancel(ticket);
        }
        if let Some(request) = result.schedule {
            self.presentation.schedule(request);
        }
        let snapshot = self.flow.snapshot()?;
        self.presentation.render(&snapshot);
        Ok(result)
    }
}
