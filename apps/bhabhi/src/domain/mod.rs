//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod game_transition;
pub mod player_view;
pub mod rules;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_play;
#[cfg(test)]
mod tests_props_resolution;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use dealing::deal_hands;
pub use game_transition::GameEvent;
pub use player_view::{CpuView, HandView};
pub use rules::{RuleVariant, TochooTiming};
pub use seed_derivation::{derive_cpu_seed, derive_dealing_seed};
pub use snapshot::GameSnapshot;
pub use state::{GameState, Phase, SeatId, SeatKind};
pub use tricks::{legal_moves, resolve_trick, Outcome, Resolution, Trick};
