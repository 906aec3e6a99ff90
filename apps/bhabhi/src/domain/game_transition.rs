//! Game events and the edge-triggered ones derived from before/after views.

use serde::Serialize;

use crate::domain::state::{GameState, Phase, SeatId};
use crate::domain::Card;

/// The slice of state that edge-triggered events are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub phase: Phase,
    pub turn: Option<SeatId>,
    pub ranking: Vec<SeatId>,
}

impl GameLifecycleView {
    pub fn of(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            turn: state.turn,
            ranking: state.ranking().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Explicit: cards dealt, `leader` holds the opening card.
    GameStarted { leader: SeatId },

    /// Explicit: a card left `seat`'s hand.
    CardPlayed {
        seat: SeatId,
        card: Card,
        tochoo: bool,
    },

    /// Explicit: a trick left the game.
    TrickDiscarded { winner: SeatId, cards: Vec<Card> },

    /// Explicit: `seat` picked up a tochoo trick.
    TochooPickup { seat: SeatId, cards: Vec<Card> },

    /// Explicit: `seat` emptied its hand.
    SeatFinished { seat: SeatId, rank: u8 },

    /// Edge-triggered: the turn became a specific seat.
    TurnBecame { seat: SeatId },

    /// Edge-triggered: the phase changed (pause and resume included).
    PhaseChanged { from: Phase, to: Phase },

    /// Edge-triggered: the game moved into Finished.
    GameEnded { ranking: Vec<SeatId> },
}

/// Derive edge-triggered events from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameEvent> {
    let mut transitions = Vec::new();

    // 1. Phase change
    if before.phase != after.phase {
        transitions.push(GameEvent::PhaseChanged {
            from: before.phase,
            to: after.phase,
        });
    }

    // 2. Turn change
    if let Some(seat) = after.turn {
        if before.turn != Some(seat) {
            transitions.push(GameEvent::TurnBecame { seat });
        }
    }

    // 3. Game end (!Finished -> Finished)
    if before.phase != Phase::Finished && after.phase == Phase::Finished {
        transitions.push(GameEvent::GameEnded {
            ranking: after.ranking.clone(),
        });
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::ResumePhase;

    fn view(phase: Phase, turn: Option<SeatId>) -> GameLifecycleView {
        GameLifecycleView {
            phase,
            turn,
            ranking: Vec::new(),
        }
    }

    #[test]
    fn test_derive_turn_change() {
        let before = view(Phase::Play, Some(0));
        let after = view(Phase::Play, Some(1));
        let transitions = derive_game_transitions(&before, &after);
        assert_eq!(transitions, vec![GameEvent::TurnBecame { seat: 1 }]);
    }

    #[test]
    fn test_same_turn_is_silent() {
        let v = view(Phase::Play, Some(2));
        assert!(derive_game_transitions(&v, &v).is_empty());
    }

    #[test]
    fn test_pause_is_a_phase_change_without_turn_event() {
        let before = view(Phase::Play, Some(1));
        let after = view(
            Phase::Paused {
                resume_to: ResumePhase::Play,
            },
            Some(1),
        );
        let transitions = derive_game_transitions(&before, &after);
        assert_eq!(
            transitions,
            vec![GameEvent::PhaseChanged {
                from: Phase::Play,
                to: after.phase
            }]
        );
    }

    #[test]
    fn test_derive_game_ended() {
        let before = view(Phase::Play, Some(0));
        let mut after = view(Phase::Finished, None);
        after.ranking = vec![2, 0, 1];
        let transitions = derive_game_transitions(&before, &after);
        assert!(transitions.contains(&GameEvent::GameEnded {
            ranking: vec![2, 0, 1]
        }));
        assert!(!transitions
            .iter()
            .any(|t| matches!(t, GameEvent::TurnBecame { .. })));
    }

    #[test]
    fn test_event_json_is_tagged() {
        let ev = GameEvent::TochooPickup {
            seat: 1,
            cards: vec!["TC".parse().unwrap()],
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "tochoo_pickup");
        assert_eq!(json["seat"], 1);
        assert_eq!(json["cards"][0], "TC");
    }
}
