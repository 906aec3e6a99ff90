use tracing::{debug, info};

use super::mutation::{Dispatch, Draft};
use crate::domain::player_view::{hand_view, HandView};
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::{GameState, Phase, ResumePhase, SeatId, SeatKind};
use crate::errors::GameError;
use crate::services::game_flow::{GameFlowService, Intent, ScheduleRequest, TimerKind};

impl GameFlowService {
    /// Route one intent. Phase gating lives here; the work lives in the sibling modules.
    pub(super) fn dispatch(&self, draft: &mut Draft, intent: Intent) -> Result<Dispatch, GameError> {
        let phase = draft.state.phase;
        match intent {
            Intent::Reset => {
                self.reset(draft);
                Ok(Dispatch::Applied)
            }
            Intent::TimerFired { ticket } => {
                let Some(live) = self.live_timer.filter(|t| t.ticket == ticket) else {
                    debug!(ticket, "stale timer ignored");
                    return Ok(Dispatch::Stale);
                };
                draft.consumed_timer = true;
                match live.kind {
                    TimerKind::CpuTurn { seat } => self.run_cpu_turn(draft, seat)?,
                    TimerKind::TrickDisplay => Self::begin_next_trick(&mut draft.state)?,
                }
                Ok(Dispatch::Applied)
            }
            Intent::Resume => match phase {
                Phase::Paused { resume_to } => {
                    draft.state.phase = resume_to.phase();
                    info!(phase = ?draft.state.phase, "game resumed");
                    Ok(Dispatch::Applied)
                }
                other => Err(GameError::phase_mismatch("resume", other)),
            },
            _ if phase.is_paused() => Err(GameError::GamePaused),
            Intent::Pause => {
                let resume_to = match phase {
                    Phase::Play => ResumePhase::Play,
                    Phase::ShowingTrick => ResumePhase::ShowingTrick,
                    other => return Err(GameError::phase_mismatch("pause", other)),
                };
                draft.state.phase = Phase::Paused { resume_to };
                info!(?resume_to, "game paused");
                Ok(Dispatch::Applied)
            }
            Intent::Configure(setup) => {
                if phase != Phase::Setup {
                    return Err(GameError::phase_mismatch("configure", phase));
                }
                setup.validate()?;
                draft.state = GameState::setup(&setup.kinds(), self.config.rules);
                draft.setup = Some(setup);
                Ok(Dispatch::Applied)
            }
            Intent::Start { seed } => {
                if phase != Phase::Setup {
                    return Err(GameError::phase_mismatch("start", phase));
                }
                self.start_game(draft, seed)?;
                Ok(Dispatch::Applied)
            }
            Intent::PlayCard { seat, card } => {
                self.human_play(draft, seat, card)?;
                Ok(Dispatch::Applied)
            }
        }
    }

    fn reset(&self, draft: &mut Draft) {
        draft.state = GameState::setup(&self.setup.kinds(), self.config.rules);
        draft.policies = Some(Vec::new());
        draft.game_seed = None;
        info!(layout = %self.setup, "table reset");
    }

    /// Timer that should be running for the committed state.
    fn desired_timer(&self) -> Option<(TimerKind, u64)> {
        match self.state.phase {
            Phase::Play => {
                let seat = self.state.turn?;
                let is_cpu = self.state.seat(seat).ok()?.kind == SeatKind::Cpu;
                is_cpu.then_some((TimerKind::CpuTurn { seat }, self.config.cpu_delay_ms))
            }
            Phase::ShowingTrick => Some((TimerKind::TrickDisplay, self.config.trick_display_ms)),
            _ => None,
        }
    }

    /// Align the live timer with the committed state.
    ///
    /// Returns the request to start (if a new one was issued) and the ticket
    /// that was superseded (if any).
    pub(super) fn reschedule(&mut self) -> (Option<ScheduleRequest>, Option<u64>) {
        match (self.live_timer, self.desired_timer()) {
            (Some(live), Some((kind, _))) if live.kind == kind => (None, None),
            (live, Some((kind, delay_ms))) => {
                let request = ScheduleRequest {
                    ticket: self.next_ticket,
                    kind,
                    delay_ms,
                };
                self.next_ticket += 1;
                self.live_timer = Some(request);
                debug!(ticket = request.ticket, ?kind, delay_ms, "timer scheduled");
                (Some(request), live.map(|l| l.ticket))
            }
            (live, None) => {
                self.live_timer = None;
                (None, live.map(|l| l.ticket))
            }
        }
    }

    pub fn snapshot(&self) -> Result<GameSnapshot, GameError> {
        snapshot(&self.state)
    }

    pub fn hand_view(&self, seat: SeatId) -> Result<HandView, GameError> {
        hand_view(&self.state, seat)
    }
}
