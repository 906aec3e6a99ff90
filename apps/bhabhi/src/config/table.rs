use std::env;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::rules::{RuleVariant, TochooTiming};
use crate::errors::GameError;

/// Pacing, seed and rule variant for one table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Delay before a CPU seat plays.
    pub cpu_delay_ms: u64,
    /// How long a resolved trick stays on the table.
    pub trick_display_ms: u64,
    /// Game seed; drawn from OS entropy at start when unset.
    pub seed: Option<u64>,
    pub rules: RuleVariant,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            cpu_delay_ms: 1_000,
            trick_display_ms: 3_000,
            seed: None,
            rules: RuleVariant::default(),
        }
    }
}

impl TableConfig {
    /// Defaults overridden by `BHABHI_*` environment variables.
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_var::<u64, _>(&lookup, "BHABHI_CPU_DELAY_MS")? {
            config.cpu_delay_ms = v;
        }
        if let Some(v) = parse_var::<u64, _>(&lookup, "BHABHI_TRICK_DISPLAY_MS")? {
            config.trick_display_ms = v;
        }
        if let Some(v) = parse_var::<u64, _>(&lookup, "BHABHI_SEED")? {
            config.seed = Some(v);
        }
        if let Some(raw) = lookup("BHABHI_TOCHOO_TIMING") {
            config.rules.tochoo_timing = raw.parse::<TochooTiming>()?;
        }
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, GameError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| GameError::invalid_setup(format!("{key} has invalid value {raw:?}"))),
    }
}
