//! Turn state machine - serialized intents in, events and timer requests out.
//!
//! One intent is processed to completion before the next. Each intent runs
//! against a draft copy of the game state that is committed only on success,
//! so a rejected intent never leaves a partial mutation behind.

mod ai_coordinator;
mod mutation;
mod orchestration;
mod player_actions;
mod round_lifecycle;
pub mod seats;

pub use mutation::GameFlowMutationResult;
pub use seats::{SeatConfig, SetupConfig};
use serde::Serialize;

use crate::ai::CpuPolicy;
use crate::config::TableConfig;
use crate::domain::state::{GameState, SeatId};
use crate::domain::Card;

/// Everything the presentation can ask of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Replace the seat layout. Setup only.
    Configure(SetupConfig),
    /// Deal and begin. `seed` overrides the table seed.
    Start { seed: Option<u64> },
    PlayCard { seat: SeatId, card: Card },
    Pause,
    Resume,
    /// Back to Setup with the current layout. Accepted in any phase.
    Reset,
    /// Callback for a `ScheduleRequest`.
    TimerFired { ticket: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerKind {
    /// Let the CPU at `seat` play.
    CpuTurn { seat: SeatId },
    /// End the resolved-trick display and start the next trick.
    TrickDisplay,
}

/// Ask the presentation to post `TimerFired { ticket }` after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleRequest {
    pub ticket: u64,
    pub kind: TimerKind,
    pub delay_ms: u64,
}

/// The turn state machine for one table.
pub struct GameFlowService {
    config: TableConfig,
    setup: SetupConfig,
    state: GameState,
    /// Indexed by seat; `None` for human seats.
    policies: Vec<Option<Box<dyn CpuPolicy>>>,
    /// The only timer whose `TimerFired` is honoured.
    live_timer: Option<ScheduleRequest>,
    next_ticket: u64,
    /// Seed of the game in progress.
    game_seed: Option<u64>,
}

impl GameFlowService {
    pub fn new(config: TableConfig, setup: SetupConfig) -> Self {
        let state = GameState::setup(&setup.kinds(), config.rules);
        Self {
            config,
            setup,
            state,
            policies: Vec::new(),
            live_timer: None,
            next_ticket: 1,
            game_seed: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn setup(&self) -> &SetupConfig {
        &self.setup
    }

    /// Timer currently awaited, if any.
    pub fn live_timer(&self) -> Option<ScheduleRequest> {
        self.live_timer
    }

    pub fn game_seed(&self) -> Option<u64> {
        self.game_seed
    }
}
