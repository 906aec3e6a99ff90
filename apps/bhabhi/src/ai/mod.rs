//! CPU player module - automated card choices for CPU seats.
//!
//! - `CpuPolicy` trait and its error type
//! - `Heuristic`: deterministic default
//! - `RandomPlayer`: uniform over legal moves (seedable for tests)
//! - a static registry of factories and a JSON-backed config

pub mod config;
mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use config::AiConfig;
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use registry::{by_name, registered_ais, AiFactory};
pub use trait_def::{AiError, CpuPolicy};

/// Name of the policy used when a CPU seat does not ask for one.
pub const DEFAULT_POLICY: &str = Heuristic::NAME;

/// Create a policy by registered name.
///
/// Returns None if `name` is not registered.
pub fn create_ai(name: &str, config: &AiConfig) -> Option<Box<dyn CpuPolicy>> {
    by_name(name).map(|factory| (factory.make)(config))
}
