use bhabhi::domain::{GameEvent, GameSnapshot};
use bhabhi::{ErrorCode, GameError, Presentation, ScheduleRequest};

/// Presentation that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub renders: Vec<GameSnapshot>,
    pub scheduled: Vec<ScheduleRequest>,
    pub cancelled: Vec<u64>,
    pub events: Vec<GameEvent>,
    pub rejections: Vec<ErrorCode>,
}

impl RecordingPresentation {
    pub fn last_render(&self) -> &GameSnapshot {
        self.renders.last().expect("at least one render")
    }

    pub fn last_scheduled(&self) -> ScheduleRequest {
        *self.scheduled.last().expect("at least one schedule request")
    }
}

impl Presentation for RecordingPresentation {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.renders.push(snapshot.clone());
    }

    fn schedule(&mut self, request: ScheduleRequest) {
        self.scheduled.push(request);
    }

    fn cancel(&mut self, ticket: u64) {
        self.cancelled.push(ticket);
    }

    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn rejected(&mut self, error: &GameError) {
        self.rejections.push(error.code());
    }
}
