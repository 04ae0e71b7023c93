//! Navigation paths and the planners that produce them.
//!
//! A [`PathPlanner`] only decides waypoints; [`NavigationPath::measure`]
//! turns them into a path with distance, travel time and risk metrics.
//! [`GreedyPlanner`] is the default: cheap eight-way stepping towards the
//! goal. See [`crate::pathfinding::LatticePlanner`] for a search-based
//! planner that can route around concave obstacles.

use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config::FleetAiConfig;
use crate::environment::{clamp_effect, Environment};
use crate::math::{polyline_length, Vec2};

/// Waypoints produced by a planner, before metrics are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Ordered waypoints, starting at the start position.
    pub waypoints: Vec<Vec2>,
    /// Whether the route ends at the requested destination.
    pub complete: bool,
}

impl PlannedRoute {
    /// Route that reached its destination.
    #[must_use]
    pub fn complete(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            complete: true,
        }
    }

    /// Best-effort route that stopped short.
    #[must_use]
    pub fn partial(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            complete: false,
        }
    }
}

/// Strategy for choosing waypoints between two positions.
pub trait PathPlanner {
    /// Plan a route from `start` to `end`.
    ///
    /// The returned route must begin at `start`. If `complete` is set it
    /// must end at `end` and contain at least two waypoints.
    fn plan(
        &self,
        env: &dyn Environment,
        config: &FleetAiConfig,
        start: Vec2,
        end: Vec2,
    ) -> PlannedRoute;
}

impl<P: PathPlanner + ?Sized> PathPlanner for Box<P> {
    fn plan(
        &self,
        env: &dyn Environment,
        config: &FleetAiConfig,
        start: Vec2,
        end: Vec2,
    ) -> PlannedRoute {
        (**self).plan(env, config, start, end)
    }
}

/// A planned route with travel metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPath {
    /// Ordered waypoints; first is the start.
    ///
    /// Complete paths hold at least two waypoints. A partial path from a
    /// start with no safe heading holds only the start.
    pub waypoints: Vec<Vec2>,
    /// Sum of distances between consecutive waypoints.
    pub total_distance: f32,
    /// `total_distance / average_ship_speed`.
    pub estimated_time: f32,
    /// Mean terrain effect over all waypoints.
    pub risk_level: f32,
    /// False when the planner gave up before reaching the destination.
    pub complete: bool,
}

impl NavigationPath {
    /// Attach metrics to a planned route.
    #[must_use]
    pub fn measure(route: PlannedRoute, env: &dyn Environment, average_ship_speed: f32) -> Self {
        let PlannedRoute {
            waypoints,
            complete,
        } = route;

        let total_distance = polyline_length(&waypoints);
        let estimated_time = total_distance / average_ship_speed;
        let risk_level = if waypoints.is_empty() {
            0.0
        } else {
            let sum: f32 = waypoints
                .iter()
                .map(|&p| clamp_effect(env.terrain_effect(p)))
                .sum();
            sum / waypoints.len() as f32
        };

        Self {
            waypoints,
            total_distance,
            estimated_time,
            risk_level,
            complete,
        }
    }

    /// First waypoint.
    #[must_use]
    pub fn start(&self) -> Option<Vec2> {
        self.waypoints.first().copied()
    }

    /// Last waypoint.
    #[must_use]
    pub fn end(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    /// True when every waypoint passes the safety oracle.
    #[must_use]
    pub fn is_safe(&self, env: &dyn Environment) -> bool {
        self.waypoints.iter().all(|&p| env.is_position_safe(p))
    }
}

/// Eight-way greedy stepper.
///
/// Each step projects eight candidates at 45° increments, drops unsafe ones
/// and moves to whichever lands closest to the goal. When no candidate gets
/// closer and the goal is a safe step away, it heads straight for the goal,
/// so a tight arrival radius cannot leave it circling. Fast, but it can walk
/// into dead ends; the step cap in [`FleetAiConfig::max_path_steps`] bounds
/// the damage.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPlanner;

impl GreedyPlanner {
    /// Closest safe candidate to `end`, first in angle order on ties.
    fn best_step(env: &dyn Environment, current: Vec2, end: Vec2, step: f32) -> Option<Vec2> {
        let mut best: Option<(Vec2, f32)> = None;
        for i in 0..8u8 {
            let angle = f32::from(i) * FRAC_PI_4;
            let candidate = current + Vec2::from_angle(angle) * step;
            if !env.is_position_safe(candidate) {
                continue;
            }
            let distance = candidate.distance(end);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }
        best.map(|(p, _)| p)
    }
}

impl PathPlanner for GreedyPlanner {
    fn plan(
        &self,
        env: &dyn Environment,
        config: &FleetAiConfig,
        start: Vec2,
        end: Vec2,
    ) -> PlannedRoute {
        let mut waypoints = vec![start];
        let mut current = start;
        let mut steps = 0u32;

        while current.distance(end) > config.arrival_radius {
            if steps >= config.max_path_steps {
                warn!(
                    steps,
                    remaining = current.distance(end),
                    "Greedy planner hit step cap before reaching destination"
                );
                return PlannedRoute::partial(waypoints);
            }

            let Some(next) = Self::best_step(env, current, end, config.step_distance) else {
                warn!(
                    x = current.x,
                    y = current.y,
                    "Greedy planner found no safe heading"
                );
                return PlannedRoute::partial(waypoints);
            };

            // Final approach: no heading gets closer, but the goal is one
            // safe step away.
            let remaining = current.distance(end);
            if next.distance(end) >= remaining
                && remaining <= config.step_distance
                && env.is_position_safe(end)
            {
                trace!(steps, remaining, "Greedy planner closing on destination");
                break;
            }

            waypoints.push(next);
            current = next;
            steps += 1;
        }

        waypoints.push(end);
        trace!(steps, "Greedy planner reached destination");
        PlannedRoute::complete(waypoints)
    }
}
