use std::fmt;
use std::str::FromStr;

use crate::ai::{by_name, AiConfig, RandomPlayer, DEFAULT_POLICY};
use crate::domain::rules::{MAX_SEATS, MIN_SEATS};
use crate::domain::state::SeatKind;
use crate::errors::GameError;

/// How one seat is controlled.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatConfig {
    pub kind: SeatKind,
    /// Registered policy name; CPU seats only.
    pub policy: Option<String>,
    pub ai_config: AiConfig,
}

impl SeatConfig {
    pub fn human() -> Self {
        Self {
            kind: SeatKind::Human,
            policy: None,
            ai_config: AiConfig::empty(),
        }
    }

    pub fn cpu(policy: &str) -> Self {
        Self {
            kind: SeatKind::Cpu,
            policy: Some(policy.to_string()),
            ai_config: AiConfig::empty(),
        }
    }

    pub fn policy_name(&self) -> &str {
        self.policy.as_deref().unwrap_or(DEFAULT_POLICY)
    }
}

/// Seat layout for the next game.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupConfig {
    pub seats: Vec<SeatConfig>,
}

impl Default for SetupConfig {
    /// One human against three default CPUs.
    fn default() -> Self {
        Self {
            seats: std::iter::once(SeatConfig::human())
                .chain(std::iter::repeat_with(|| SeatConfig::cpu(DEFAULT_POLICY)).take(3))
                .collect(),
        }
    }
}

impl SetupConfig {
    /// `n` CPU seats all running `policy`.
    pub fn all_cpu(n: usize, policy: &str) -> Self {
        Self {
            seats: (0..n).map(|_| SeatConfig::cpu(policy)).collect(),
        }
    }

    pub fn kinds(&self) -> Vec<SeatKind> {
        self.seats.iter().map(|s| s.kind).collect()
    }

    /// Seat count in range and every CPU policy registered.
    pub fn validate(&self) -> Result<(), GameError> {
        let n = self.seats.len();
        if !(MIN_SEATS..=MAX_SEATS).contains(&n) {
            return Err(GameError::invalid_setup(format!(
                "seat count must be {MIN_SEATS}..={MAX_SEATS}, got {n}"
            )));
        }
        for (i, seat) in self.seats.iter().enumerate() {
            if seat.kind == SeatKind::Cpu && by_name(seat.policy_name()).is_none() {
                return Err(GameError::invalid_setup(format!(
                    "seat {i}: unknown CPU policy {:?}",
                    seat.policy_name()
                )));
            }
        }
        Ok(())
    }
}

/// Layout string, one letter per seat: `H` human, `C` default CPU, `R` random CPU.
impl FromStr for SetupConfig {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seats = s
            .trim()
            .chars()
            .map(|ch| match ch.to_ascii_uppercase() {
                'H' => Ok(SeatConfig::human()),
                'C' => Ok(SeatConfig::cpu(DEFAULT_POLICY)),
                'R' => Ok(SeatConfig::cpu(RandomPlayer::NAME)),
                other => Err(GameError::invalid_setup(format!(
                    "unknown seat letter {other:?} (use H, C or R)"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let config = Self { seats };
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for SetupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seat in &self.seats {
            let letter = match (seat.kind, seat.policy_name()) {
                (SeatKind::Human, _) => 'H',
                (SeatKind::Cpu, name) if name.eq_ignore_ascii_case(RandomPlayer::NAME) => 'R',
                (SeatKind::Cpu, _) => 'C',
            };
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layout_strings() {
        let config: SetupConfig = "hcRc".parse().unwrap();
        assert_eq!(
            config.kinds(),
            vec![SeatKind::Human, SeatKind::Cpu, SeatKind::Cpu, SeatKind::Cpu]
        );
        assert_eq!(config.seats[2].policy_name(), RandomPlayer::NAME);
        assert_eq!(config.to_string(), "HCRC");
    }

    #[test]
    fn rejects_bad_layouts() {
        for layout in ["HC", "HCCCCCC", "HCX", ""] {
            assert!(matches!(
                layout.parse::<SetupConfig>(),
                Err(GameError::InvalidSetup(_))
            ));
        }
    }

    #[test]
    fn rejects_unknown_policy() {
        let mut config = SetupConfig::all_cpu(3, DEFAULT_POLICY);
        config.seats[1].policy = Some("Oracle".into());
        assert!(matches!(config.validate(), Err(GameError::InvalidSetup(_))));
    }

    #[test]
    fn default_is_one_human_three_cpus() {
        let config = SetupConfig::default();
        assert_eq!(config.to_string(), "HCCC");
        assert!(config.validate().is_ok());
    }
}
