//! Helpers for driving a `GameFlowService` without a clock.

use std::collections::HashSet;

use bhabhi::domain::rules::DECK_SIZE;
use bhabhi::domain::{Card, Phase, SeatId, SeatKind};
use bhabhi::services::game_flow::GameFlowMutationResult;
use bhabhi::{GameFlowService, Intent, SetupConfig, TableConfig};

pub fn table(layout: &str) -> GameFlowService {
    let setup: SetupConfig = layout.parse().expect("valid seat layout");
    GameFlowService::new(TableConfig::default(), setup)
}

pub fn started(layout: &str, seed: u64) -> GameFlowService {
    let mut flow = table(layout);
    flow.apply(Intent::Start { seed: Some(seed) })
        .expect("start should be accepted in Setup");
    flow
}

/// Fire the live timer as if the presentation's clock ran out.
pub fn fire(flow: &mut GameFlowService) -> Option<GameFlowMutationResult> {
    let ticket = flow.live_timer()?.ticket;
    Some(
        flow.apply(Intent::TimerFired { ticket })
            .expect("live timer should be accepted"),
    )
}

/// Seat to move and the first card it may legally play.
pub fn first_legal(flow: &GameFlowService) -> (SeatId, Card) {
    let snap = flow.snapshot().expect("snapshot");
    let seat = snap.turn.expect("a seat should be on turn");
    let card = *snap.playable.first().expect("seat on turn has a legal card");
    (seat, card)
}

fn turn_is_human(flow: &GameFlowService) -> bool {
    flow.state()
        .turn
        .and_then(|seat| flow.state().seat(seat).ok())
        .is_some_and(|s| s.kind == SeatKind::Human)
}

/// Advance one step: a human plays its first legal card, anything else waits on the timer.
pub fn step(flow: &mut GameFlowService) -> GameFlowMutationResult {
    if flow.state().phase == Phase::Play && turn_is_human(flow) {
        let (seat, card) = first_legal(flow);
        flow.apply(Intent::PlayCard { seat, card })
            .expect("first legal card should be accepted")
    } else {
        fire(flow).unwrap_or_else(|| {
            panic!(
                "no timer pending in phase {:?} with turn {:?}",
                flow.state().phase,
                flow.state().turn
            )
        })
    }
}

/// Step until the open trick has been resolved (ShowingTrick or Finished).
pub fn play_out_trick(flow: &mut GameFlowService) -> Vec<GameFlowMutationResult> {
    let mut results = Vec::new();
    while flow.state().phase == Phase::Play {
        results.push(step(flow));
    }
    results
}

/// Every card is somewhere exactly once.
pub fn assert_conservation(flow: &GameFlowService) {
    let cards = flow.state().accounted_cards();
    assert_eq!(cards.len(), DECK_SIZE, "card count drifted");
    let unique: HashSet<Card> = cards.into_iter().collect();
    assert_eq!(unique.len(), DECK_SIZE, "a card is duplicated");
}

/// Drive to Finished, checking conservation after every step.
///
/// Returns the number of steps taken, or None if `max_steps` ran out first.
pub fn run_to_finish(flow: &mut GameFlowService, max_steps: usize) -> Option<usize> {
    for steps in 0..max_steps {
        if flow.state().phase == Phase::Finished {
            return Some(steps);
        }
        step(flow);
        assert_conservation(flow);
    }
    (flow.state().phase == Phase::Finished).then_some(max_steps)
}
