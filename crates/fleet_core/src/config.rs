//! Tunable constants for fleet decision making.
//!
//! Defaults reproduce the stock tactical doctrine. Any subset of fields can
//! be overridden from a RON file; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};
use crate::math::Vec2;

/// Fleet AI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetAiConfig {
    /// Distance covered by one planner step.
    pub step_distance: f32,
    /// A path is considered arrived once within this distance of the goal.
    pub arrival_radius: f32,
    /// Average ship speed used for travel-time estimates (units/second).
    pub average_ship_speed: f32,
    /// Hard cap on greedy planner steps.
    pub max_path_steps: u32,
    /// Hard cap on lattice search node expansions.
    pub max_search_nodes: u32,
    /// Desired stand-off distance from the enemy fleet.
    pub optimal_distance: f32,
    /// Engagement requires a power ratio strictly above this.
    pub engage_power_ratio: f32,
    /// Engagement requires wind effect strictly above this.
    pub engage_min_wind: f32,
    /// Engagement requires terrain effect strictly above this.
    pub engage_min_terrain: f32,
    /// Retreat when the power ratio drops strictly below this.
    pub retreat_power_ratio: f32,
    /// Weather-driven retreat: wind effect below this...
    pub retreat_max_wind: f32,
    /// ...and fleet health below this.
    pub retreat_max_health: f32,
    /// Weight of wind effect in the enemy threat multiplier.
    pub threat_wind_weight: f32,
    /// Weight of terrain effect in the enemy threat multiplier.
    pub threat_terrain_weight: f32,
    /// Where a fleet falls back to when checking for an escape route.
    pub retreat_destination: Vec2,
}

impl Default for FleetAiConfig {
    fn default() -> Self {
        Self {
            step_distance: 100.0,
            arrival_radius: 100.0,
            average_ship_speed: 5.0,
            max_path_steps: 1000,
            max_search_nodes: 20_000,
            optimal_distance: 200.0,
            engage_power_ratio: 1.2,
            engage_min_wind: 0.7,
            engage_min_terrain: 0.7,
            retreat_power_ratio: 0.7,
            retreat_max_wind: 0.3,
            retreat_max_health: 0.3,
            threat_wind_weight: 0.5,
            threat_terrain_weight: 0.3,
            retreat_destination: Vec2::ZERO,
        }
    }
}

impl FleetAiConfig {
    /// Load and validate a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FleetError::ConfigNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse and validate a config from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let config: Self = ron::from_str(ron)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make planning or ratios meaningless.
    pub fn validate(&self) -> Result<()> {
        positive("step_distance", self.step_distance)?;
        positive("arrival_radius", self.arrival_radius)?;
        positive("average_ship_speed", self.average_ship_speed)?;
        positive("optimal_distance", self.optimal_distance)?;

        if self.max_path_steps == 0 {
            return Err(FleetError::InvalidConfig {
                field: "max_path_steps",
                reason: "must be at least 1".into(),
            });
        }
        if self.max_search_nodes == 0 {
            return Err(FleetError::InvalidConfig {
                field: "max_search_nodes",
                reason: "must be at least 1".into(),
            });
        }
        if !self.retreat_destination.is_finite() {
            return Err(FleetError::InvalidConfig {
                field: "retreat_destination",
                reason: "must be finite".into(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FleetError::InvalidConfig {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FleetAiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = FleetAiConfig::from_ron_str(
            "(optimal_distance: 350.0, retreat_destination: (x: 10.0, y: -5.0))",
        )
        .unwrap();
        assert_eq!(config.optimal_distance, 350.0);
        assert_eq!(config.retreat_destination, Vec2::new(10.0, -5.0));
        assert_eq!(config.step_distance, 100.0);
        assert_eq!(config.average_ship_speed, 5.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = FleetAiConfig::default();
        let text = ron::to_string(&config).unwrap();
        assert_eq!(FleetAiConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = FleetAiConfig::from_ron_str("(average_ship_speed: 0.0)").unwrap_err();
        assert!(matches!(
            err,
            FleetError::InvalidConfig {
                field: "average_ship_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_step_cap() {
        let config = FleetAiConfig {
            max_path_steps: 0,
            ..FleetAiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = FleetAiConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, FleetError::ConfigNotFound(_)));
    }

    #[test]
    fn test_malformed_ron() {
        let err = FleetAiConfig::from_ron_str("(step_distance: \"far\")").unwrap_err();
        assert!(matches!(err, FleetError::Parse(_)));
    }
}
