pub mod game_flow;
pub mod table;

pub use game_flow::{GameFlowService, Intent, ScheduleRequest, SetupConfig, TimerKind};
pub use table::{Presentation, Table};
