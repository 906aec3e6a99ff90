//! In-memory game runner.
//!
//! Games go through the same turn state machine as the terminal table; the
//! simulator stands in for the presentation clock and fires each scheduled
//! timer as soon as it is issued.

use bhabhi::domain::{GameEvent, Phase, SeatId, SeatKind};
use bhabhi::{GameError, GameFlowService, Intent, SetupConfig, TableConfig};
use tracing::debug;

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Finished,
    /// Hit the step cap before Finished.
    Capped,
}

/// Per-seat counters gathered from engine events.
#[derive(Debug, Clone, Default)]
pub struct SeatTally {
    pub finish_rank: Option<u8>,
    /// Tricks this seat had to pick up.
    pub pickups: u32,
    /// Off-suit plays this seat made.
    pub tochoos: u32,
}

/// Result of simulating one game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub seed: u64,
    pub ending: Ending,
    /// Best to worst; complete only when `ending` is `Finished`.
    pub ranking: Vec<SeatId>,
    pub seats: Vec<SeatTally>,
    pub tricks_played: u32,
    pub steps: usize,
}

impl GameResult {
    pub fn loser(&self) -> Option<SeatId> {
        match self.ending {
            Ending::Finished => self.ranking.last().copied(),
            Ending::Capped => None,
        }
    }
}

/// Runs all-CPU games for one seat layout.
pub struct Simulator {
    config: TableConfig,
    setup: SetupConfig,
    step_cap: usize,
}

impl Simulator {
    pub fn new(config: TableConfig, setup: SetupConfig, step_cap: usize) -> Result<Self, GameError> {
        setup.validate()?;
        if let Some(i) = setup.seats.iter().position(|s| s.kind == SeatKind::Human) {
            return Err(GameError::invalid_setup(format!(
                "seat {i} is human; simulated tables are CPU only"
            )));
        }
        Ok(Self {
            config,
            setup,
            step_cap,
        })
    }

    pub fn setup(&self) -> &SetupConfig {
        &self.setup
    }

    /// Play one game from `seed` until Finished or the step cap.
    pub fn simulate_game(&self, seed: u64) -> Result<GameResult, GameError> {
        let mut flow = GameFlowService::new(self.config.clone(), self.setup.clone());
        let mut seats = vec![SeatTally::default(); self.setup.seats.len()];

        let started = flow.apply(Intent::Start { seed: Some(seed) })?;
        tally(&mut seats, &started.events);

        let mut steps = 0;
        let ending = loop {
            if flow.state().phase == Phase::Finished {
                break Ending::Finished;
            }
            if steps >= self.step_cap {
                break Ending::Capped;
            }
            let ticket = flow
                .live_timer()
                .ok_or_else(|| {
                    GameError::illegal_state(format!(
                        "nothing scheduled in phase {:?}",
                        flow.state().phase
                    ))
                })?
                .ticket;
            let result = flow.apply(Intent::TimerFired { ticket })?;
            tally(&mut seats, &result.events);
            steps += 1;
        };

        let state = flow.state();
        for &seat in state.ranking() {
            if let Some(tally) = seats.get_mut(seat as usize) {
                tally.finish_rank = state.seat(seat)?.finish_rank;
            }
        }
        debug!(seed, ?ending, steps, tricks = state.tricks_played, "game simulated");

        Ok(GameResult {
            seed,
            ending,
            ranking: state.ranking().to_vec(),
            seats,
            tricks_played: state.tricks_played,
            steps,
        })
    }
}

fn tally(seats: &mut [SeatTally], events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::CardPlayed {
                seat, tochoo: true, ..
            } => {
                if let Some(t) = seats.get_mut(*seat as usize) {
                    t.tochoos += 1;
                }
            }
            GameEvent::TochooPickup { seat, .. } => {
                if let Some(t) = seats.get_mut(*seat as usize) {
                    t.pickups += 1;
                }
            }
            _ => {}
        }
    }
}
