//! Lattice A* path planning.
//!
//! The search runs over an implicit lattice anchored at the start position
//! with spacing [`FleetAiConfig::step_distance`], so it needs nothing from
//! the world except the safety oracle. Expansion is capped by
//! [`FleetAiConfig::max_search_nodes`]; when the cap is hit, or the goal is
//! unreachable, the planner returns a partial route to the explored position
//! closest to the goal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::f32::consts::SQRT_2;

use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::config::FleetAiConfig;
use crate::environment::Environment;
use crate::math::Vec2;
use crate::navigation::{PathPlanner, PlannedRoute};

/// Lattice coordinates relative to the start position.
type LatticeCoord = (i32, i32);

/// A node in the A* open set priority queue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct SearchNode {
    coord: LatticeCoord,
    /// g_score + heuristic.
    f_score: OrderedFloat<f32>,
    /// Tie-breaker for determinism when f_scores are equal.
    tie_breaker: u64,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys for min-heap behavior.
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.tie_breaker.cmp(&self.tie_breaker),
            ord => ord,
        }
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Direction offsets for 8-directional movement.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),   // East
    (1, 1),   // Northeast
    (0, 1),   // North
    (-1, 1),  // Northwest
    (-1, 0),  // West
    (-1, -1), // Southwest
    (0, -1),  // South
    (1, -1),  // Southeast
];

/// Bounded A* planner over a lattice of safe positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticePlanner {
    smoothing: bool,
}

impl LatticePlanner {
    /// Planner without path smoothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { smoothing: false }
    }

    /// Builder method to enable line-of-sight smoothing of the result.
    #[must_use]
    pub const fn with_smoothing(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }
}

/// Distance still to cover once within `reach` of the goal. Admissible.
#[inline]
fn heuristic(pos: Vec2, end: Vec2, reach: f32) -> f32 {
    (pos.distance(end) - reach).max(0.0)
}

#[inline]
fn lattice_point(start: Vec2, step: f32, (x, y): LatticeCoord) -> Vec2 {
    start + Vec2::new(x as f32 * step, y as f32 * step)
}

#[inline]
#[allow(clippy::cast_sign_loss)]
fn coords_to_tie_breaker((x, y): LatticeCoord) -> u64 {
    (u64::from(y as u32) << 32) | u64::from(x as u32)
}

fn reconstruct(
    start: Vec2,
    step: f32,
    came_from: &HashMap<LatticeCoord, LatticeCoord>,
    goal: LatticeCoord,
) -> Vec<Vec2> {
    let mut path = vec![lattice_point(start, step, goal)];
    let mut current = goal;

    while let Some(&prev) = came_from.get(&current) {
        path.push(lattice_point(start, step, prev));
        current = prev;
    }

    path.reverse();
    path
}

impl PathPlanner for LatticePlanner {
    fn plan(
        &self,
        env: &dyn Environment,
        config: &FleetAiConfig,
        start: Vec2,
        end: Vec2,
    ) -> PlannedRoute {
        let step = config.step_distance;
        let radius = config.arrival_radius;
        // A node one step from the goal with clear water to it also arrives.
        let reach = radius.max(step);

        if start.distance(end) <= radius {
            return PlannedRoute::complete(vec![start, end]);
        }

        let mut open_set: BinaryHeap<SearchNode> = BinaryHeap::new();
        let mut came_from: HashMap<LatticeCoord, LatticeCoord> = HashMap::new();
        let mut g_score: HashMap<LatticeCoord, f32> = HashMap::new();
        let mut closed: HashSet<LatticeCoord> = HashSet::new();

        let origin: LatticeCoord = (0, 0);
        g_score.insert(origin, 0.0);
        open_set.push(SearchNode {
            coord: origin,
            f_score: OrderedFloat(heuristic(start, end, reach)),
            tie_breaker: coords_to_tie_breaker(origin),
        });

        let mut closest = origin;
        let mut closest_distance = start.distance(end);
        let mut expanded = 0u32;

        while let Some(current) = open_set.pop() {
            if !closed.insert(current.coord) {
                continue;
            }

            let pos = lattice_point(start, step, current.coord);
            let distance = pos.distance(end);
            let arrived = distance <= radius
                || (distance <= step && has_line_of_sight(env, pos, end, step / 4.0));
            if arrived {
                let mut waypoints = reconstruct(start, step, &came_from, current.coord);
                waypoints.push(end);
                debug!(
                    expanded,
                    waypoints = waypoints.len(),
                    "Lattice planner reached destination"
                );
                if self.smoothing {
                    waypoints = smooth_path(env, waypoints, step / 4.0);
                }
                return PlannedRoute::complete(waypoints);
            }

            if distance < closest_distance {
                closest = current.coord;
                closest_distance = distance;
            }

            expanded += 1;
            if expanded > config.max_search_nodes {
                warn!(expanded, "Lattice planner hit node cap");
                break;
            }

            let current_g = g_score.get(&current.coord).copied().unwrap_or(f32::MAX);

            for &(dx, dy) in &DIRECTIONS {
                let neighbor = (current.coord.0 + dx, current.coord.1 + dy);
                if closed.contains(&neighbor) {
                    continue;
                }

                let neighbor_pos = lattice_point(start, step, neighbor);
                if !env.is_position_safe(neighbor_pos) {
                    continue;
                }

                // No corner cutting past unsafe cardinal neighbors.
                let diagonal = dx != 0 && dy != 0;
                if diagonal {
                    let side_a = lattice_point(start, step, (current.coord.0 + dx, current.coord.1));
                    let side_b = lattice_point(start, step, (current.coord.0, current.coord.1 + dy));
                    if !env.is_position_safe(side_a) || !env.is_position_safe(side_b) {
                        continue;
                    }
                }

                let move_cost = if diagonal { step * SQRT_2 } else { step };
                let tentative_g = current_g + move_cost;
                let neighbor_g = g_score.get(&neighbor).copied().unwrap_or(f32::MAX);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.coord);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(SearchNode {
                        coord: neighbor,
                        f_score: OrderedFloat(tentative_g + heuristic(neighbor_pos, end, reach)),
                        tie_breaker: coords_to_tie_breaker(neighbor),
                    });
                }
            }
        }

        warn!(
            expanded,
            remaining = closest_distance,
            "Lattice planner could not reach destination, returning partial route"
        );
        PlannedRoute::partial(reconstruct(start, step, &came_from, closest))
    }
}

/// Remove waypoints that can be skipped without leaving safe water.
///
/// Keeps the first and last waypoint. Segments are checked by sampling
/// every `sample_spacing` units.
#[must_use]
pub fn smooth_path(env: &dyn Environment, path: Vec<Vec2>, sample_spacing: f32) -> Vec<Vec2> {
    if path.len() <= 2 {
        return path;
    }

    let mut smoothed = Vec::with_capacity(path.len());
    smoothed.push(path[0]);

    let mut current_idx = 0;

    while current_idx < path.len() - 1 {
        let mut furthest_visible = current_idx + 1;

        for check_idx in (current_idx + 2)..path.len() {
            if has_line_of_sight(env, path[current_idx], path[check_idx], sample_spacing) {
                furthest_visible = check_idx;
            }
        }

        smoothed.push(path[furthest_visible]);
        current_idx = furthest_visible;
    }

    smoothed
}

/// Check that every sample along the segment `a -> b` is safe.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn has_line_of_sight(env: &dyn Environment, a: Vec2, b: Vec2, sample_spacing: f32) -> bool {
    if sample_spacing <= 0.0 {
        return false;
    }
    let samples = (a.distance(b) / sample_spacing).ceil().max(1.0) as u32;
    (1..=samples).all(|i| env.is_position_safe(a.lerp(b, i as f32 / samples as f32)))
}
