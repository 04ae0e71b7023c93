//! Scenario assessment.
//!
//! Builds a [`FleetAi`] for a scenario, runs every tactical query and
//! bundles the answers into a JSON-friendly [`ScenarioReport`].

use clap::ValueEnum;
use fleet_core::ai::{FleetAi, TacticalReport};
use fleet_core::config::FleetAiConfig;
use fleet_core::math::Vec2;
use fleet_core::navigation::{GreedyPlanner, NavigationPath, PathPlanner};
use fleet_core::pathfinding::LatticePlanner;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::scenario::Scenario;

/// Which path planner to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlannerKind {
    /// Eight-way greedy stepping.
    #[default]
    Greedy,
    /// Bounded A* with line-of-sight smoothing.
    Lattice,
}

impl PlannerKind {
    /// Instantiate the planner.
    pub fn build(self) -> Box<dyn PathPlanner> {
        match self {
            Self::Greedy => Box::new(GreedyPlanner),
            Self::Lattice => Box::new(LatticePlanner::new().with_smoothing(true)),
        }
    }
}

/// Everything the tools print for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub scenario: String,
    /// Planner used for every route in this report.
    pub planner: PlannerKind,
    /// Tactical answers for the fleet against the enemy.
    pub tactical: TacticalReport,
    /// Route to the scenario destination, when one is set.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub route: Option<NavigationPath>,
}

/// Config with the scenario's fallback point applied.
fn scenario_config(scenario: &Scenario, config: &FleetAiConfig) -> FleetAiConfig {
    let mut config = config.clone();
    if let Some(retreat) = scenario.retreat_destination {
        config.retreat_destination = retreat;
    }
    config
}

/// Assess a scenario.
pub fn assess_scenario(
    scenario: &Scenario,
    config: &FleetAiConfig,
    planner: PlannerKind,
) -> ScenarioReport {
    let mut ai = FleetAi::with_planner(
        &scenario.environment,
        scenario_config(scenario, config),
        planner.build(),
    );
    ai.update(0.0);

    let tactical = ai.assess(&scenario.fleet, &scenario.enemy);
    let route = scenario
        .destination
        .map(|destination| ai.find_optimal_path(scenario.fleet.position, destination));

    info!(
        scenario = %scenario.name,
        ratio = tactical.power_ratio,
        band = ?tactical.band,
        engage = tactical.engage,
        retreat = tactical.retreat,
        "Scenario assessed"
    );

    ScenarioReport {
        scenario: scenario.name.clone(),
        planner,
        tactical,
        route,
    }
}

/// Plan a route from the scenario fleet's position to `to`.
pub fn plan_route(
    scenario: &Scenario,
    config: &FleetAiConfig,
    planner: PlannerKind,
    to: Vec2,
) -> NavigationPath {
    let ai = FleetAi::with_planner(
        &scenario.environment,
        scenario_config(scenario, config),
        planner.build(),
    );
    let path = ai.find_optimal_path(scenario.fleet.position, to);
    debug!(
        scenario = %scenario.name,
        ?planner,
        waypoints = path.waypoints.len(),
        complete = path.complete,
        "Route planned"
    );
    path
}

/// Parse `"X,Y"` into a position.
pub fn parse_point(text: &str) -> Option<Vec2> {
    let (x, y) = text.split_once(',')?;
    let x: f32 = x.trim().parse().ok()?;
    let y: f32 = y.trim().parse().ok()?;
    let point = Vec2::new(x, y);
    point.is_finite().then_some(point)
}
