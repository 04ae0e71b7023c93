//! Scenario loading.
//!
//! A scenario pits one fleet against another in a given environment. Files
//! are RON, and optional fields may omit `Some(..)`:
//!
//! ```ron
//! (
//!     name: "Strait ambush",
//!     environment: Static((wind_effect: 0.9, terrain_effect: 0.8)),
//!     fleet: (id: (1), name: "Home", position: (x: 100.0, y: 0.0), ships: [
//!         (id: (1), attack_power: 60.0, health: 100.0, max_health: 100.0),
//!     ]),
//!     enemy: (id: (2), name: "Raiders", position: (x: 600.0, y: 0.0), ships: []),
//!     destination: (x: 900.0, y: 0.0),
//! )
//! ```

use std::path::Path;

use fleet_core::chart::SeaChart;
use fleet_core::environment::{Environment, StaticEnvironment};
use fleet_core::fleet::Fleet;
use fleet_core::math::Vec2;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// Environment a scenario is played in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnvironmentSpec {
    /// Same conditions everywhere.
    Static(StaticEnvironment),
    /// Grid chart with reefs and shallows.
    Chart(SeaChart),
}

impl Default for EnvironmentSpec {
    fn default() -> Self {
        Self::Static(StaticEnvironment::default())
    }
}

impl Environment for EnvironmentSpec {
    fn wind_effect(&self, position: Vec2) -> f32 {
        match self {
            Self::Static(env) => env.wind_effect(position),
            Self::Chart(chart) => chart.wind_effect(position),
        }
    }

    fn wind_direction(&self, position: Vec2) -> f32 {
        match self {
            Self::Static(env) => env.wind_direction(position),
            Self::Chart(chart) => chart.wind_direction(position),
        }
    }

    fn terrain_effect(&self, position: Vec2) -> f32 {
        match self {
            Self::Static(env) => env.terrain_effect(position),
            Self::Chart(chart) => chart.terrain_effect(position),
        }
    }

    fn is_position_safe(&self, position: Vec2) -> bool {
        match self {
            Self::Static(env) => env.is_position_safe(position),
            Self::Chart(chart) => chart.is_position_safe(position),
        }
    }
}

/// A complete scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Conditions; calm open sea when omitted.
    #[serde(default)]
    pub environment: EnvironmentSpec,
    /// Fleet being advised.
    pub fleet: Fleet,
    /// Opposing fleet.
    pub enemy: Fleet,
    /// Where the fleet wants to go, if anywhere.
    #[serde(default)]
    pub destination: Option<Vec2>,
    /// Overrides the configured fallback point.
    #[serde(default)]
    pub retreat_destination: Option<Vec2>,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ToolError::ScenarioNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse a scenario from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let scenario: Self = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(ron)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject scenarios the engine cannot make sense of.
    pub fn validate(&self) -> Result<()> {
        if let EnvironmentSpec::Chart(chart) = &self.environment {
            chart.validate()?;
        }
        if self.fleet.id == self.enemy.id {
            return Err(ToolError::InvalidArgument(format!(
                "fleet and enemy share id {}",
                self.fleet.id.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::chart::Cell;

    const MINIMAL: &str = r#"(
        name: "Minimal",
        fleet: (id: (1), position: (x: 0.0, y: 0.0)),
        enemy: (id: (2), position: (x: 500.0, y: 0.0)),
    )"#;

    #[test]
    fn test_minimal_scenario_uses_defaults() {
        let scenario = Scenario::from_ron_str(MINIMAL).unwrap();
        assert_eq!(scenario.name, "Minimal");
        assert_eq!(scenario.environment, EnvironmentSpec::default());
        assert!(scenario.fleet.ships.is_empty());
        assert_eq!(scenario.destination, None);
    }

    #[test]
    fn test_static_environment_and_implicit_some() {
        let scenario = Scenario::from_ron_str(
            r#"(
                name: "Calm",
                environment: Static((wind_effect: 0.1)),
                fleet: (id: (1), position: (x: 0.0, y: 0.0)),
                enemy: (id: (2), position: (x: 500.0, y: 0.0)),
                destination: (x: 10.0, y: 20.0),
            )"#,
        )
        .unwrap();

        let EnvironmentSpec::Static(env) = scenario.environment else {
            panic!("expected a static environment");
        };
        assert_eq!(env.wind_effect, 0.1);
        assert_eq!(env.terrain_effect, 0.8);
        assert_eq!(scenario.destination, Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_chart_scenario_round_trip() {
        let mut chart = SeaChart::new(4, 4, 100.0);
        chart.set_cell(2, 2, Cell::Reef);
        let scenario = Scenario {
            name: "Charted".into(),
            environment: EnvironmentSpec::Chart(chart),
            fleet: Fleet::new(1, "Home", Vec2::new(50.0, 50.0)),
            enemy: Fleet::new(2, "Raiders", Vec2::new(350.0, 350.0)),
            destination: None,
            retreat_destination: Some(Vec2::new(50.0, 350.0)),
        };

        let text = ron::to_string(&scenario).unwrap();
        let back = Scenario::from_ron_str(&text).unwrap();
        assert_eq!(back, scenario);
        assert!(!back.environment.is_position_safe(Vec2::new(250.0, 250.0)));
    }

    #[test]
    fn test_rejects_shared_fleet_ids() {
        let text = MINIMAL.replace("id: (2)", "id: (1)");
        assert!(matches!(
            Scenario::from_ron_str(&text),
            Err(ToolError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scenario::load("/nonexistent/scenario.ron"),
            Err(ToolError::ScenarioNotFound(_))
        ));
    }
}
