//! Perception configuration with documented constants
//!
//! All distance thresholds and timing windows are collected here with
//! explanations of what they gate. The config is owned by the perception
//! session; there is no process-wide copy.

use serde::Deserialize;
use std::path::Path;

use crate::core::error::{PerceptionError, Result};

/// Configuration for the perception systems
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    // === SIGHT ===
    /// How close another living player must be to be seen (world units)
    ///
    /// Compared with strict less-than against the snapped positions.
    /// Players beyond this range are out of sight even with a clear ray.
    pub player_sight_range: f32,

    /// How close a corpse must be before it can be identified (world units)
    ///
    /// Bodies further away still steer the agent through the
    /// nearest-body direction, but are not marked as found.
    pub body_sight_range: f32,

    /// Radius around a corpse inside which players count as witnesses
    pub witness_radius: f32,

    // === CONCEALMENT ===
    /// How many tick intervals a sighting stays fresh for vent detection
    ///
    /// A player seen within `window * delta` seconds who is now inside a
    /// vent must have entered it in front of the agent. At 2.0 the previous
    /// tick always qualifies and anything older never does.
    pub concealment_window_ticks: f32,

    // === MAP FRAME ===
    /// How many doors and vents are reported in the map frame
    pub nearby_object_count: usize,

    // === NARRATION ===
    /// Place name reported when no ship is loaded
    pub lobby_label: String,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            player_sight_range: 5.0,
            body_sight_range: 3.0,
            witness_radius: 3.0,
            concealment_window_ticks: 2.0,
            nearby_object_count: 3,
            lobby_label: "the lobby".to_string(),
        }
    }
}

impl PerceptionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, filling missing keys with defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: PerceptionConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("player_sight_range", self.player_sight_range),
            ("body_sight_range", self.body_sight_range),
            ("witness_radius", self.witness_radius),
            ("concealment_window_ticks", self.concealment_window_ticks),
        ];
        for (name, value) in ranges {
            if !value.is_finite() || value <= 0.0 {
                return Err(PerceptionError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.lobby_label.trim().is_empty() {
            return Err(PerceptionError::InvalidConfig(
                "lobby_label must not be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PerceptionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player_sight_range, 5.0);
        assert_eq!(config.body_sight_range, 3.0);
        assert_eq!(config.nearby_object_count, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PerceptionConfig::from_toml_str("player_sight_range = 7.5").unwrap();
        assert_eq!(config.player_sight_range, 7.5);
        assert_eq!(config.witness_radius, 3.0);
        assert_eq!(config.lobby_label, "the lobby");
    }

    #[test]
    fn test_negative_range_rejected() {
        let result = PerceptionConfig::from_toml_str("body_sight_range = -1.0");
        assert!(matches!(result, Err(PerceptionError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_lobby_label_rejected() {
        let config = PerceptionConfig {
            lobby_label: "  ".into(),
            ..PerceptionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = PerceptionConfig::from_toml_str("player_sight_range = \"far\"");
        assert!(matches!(result, Err(PerceptionError::TomlError(_))));
    }
}
