//! Machine configuration.

use crate::core::StateHistory;
use serde::{Deserialize, Serialize};

/// Settings applied to a [`Machine`](crate::runtime::Machine) at construction.
///
/// Missing fields take their defaults when deserializing, so a partial
/// document such as `{"name": "door"}` is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Human-readable name, used in log events
    pub name: String,
    /// Maximum number of transitions kept in history; 0 disables it
    pub history_limit: usize,
}

impl MachineConfig {
    pub const DEFAULT_NAME: &'static str = "fsm";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            history_limit: StateHistory::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MachineConfig::default();
        assert_eq!(config.name, "fsm");
        assert_eq!(config.history_limit, 64);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = MachineConfig::from_json(r#"{"name": "door"}"#).unwrap();
        assert_eq!(config, MachineConfig::new("door"));
    }

    #[test]
    fn full_json() {
        let config = MachineConfig::from_json(r#"{"name": "door", "history_limit": 0}"#).unwrap();
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(MachineConfig::from_json("{ not json").is_err());
    }
}
