//! How to register a CPU policy
//!
//! 1) Implement `CpuPolicy` for your type in its module.
//! 2) Add a new `AiFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same config seed ⇒ same behavior (where applicable).

use crate::ai::config::AiConfig;
use crate::ai::{CpuPolicy, Heuristic, RandomPlayer};

/// Factory definition for constructing CPU policies.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &AiConfig) -> Box<dyn CpuPolicy>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        make: make_heuristic,
    },
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
];

/// Returns the statically registered policy factories. The first is the default.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered factory by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_random_player(config: &AiConfig) -> Box<dyn CpuPolicy> {
    Box::new(RandomPlayer::new(config.seed()))
}

fn make_heuristic(config: &AiConfig) -> Box<dyn CpuPolicy> {
    Box::new(Heuristic::from_config(config))
}
