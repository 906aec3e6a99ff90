//! CPU policy configuration.
//!
//! Standard fields are typed; anything else stays available as custom JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for CPU policies.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "honour_avoid_suit": false}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Optional RNG seed for deterministic behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Policy-specific fields.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AiConfig {
    /// Build from optional JSON, falling back to an empty config on a bad shape.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::empty()
    }
}
