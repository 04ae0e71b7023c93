//! Scripted environments for decision tests.
//!
//! [`ScriptedEnvironment`] starts from uniform conditions and layers
//! circular zones on top: hazards that make positions unsafe and patches
//! that override wind or terrain. It also counts environment queries so
//! tests can observe memoization.

use std::cell::Cell;

use fleet_core::environment::{Environment, StaticEnvironment};
use fleet_core::math::Vec2;
use serde::{Deserialize, Serialize};

/// Circular region of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone center.
    pub center: Vec2,
    /// Zone radius; the boundary is inside.
    pub radius: f32,
}

impl Zone {
    /// Create a zone.
    #[must_use]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `position` lies inside the zone.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        self.center.distance_squared(position) <= self.radius * self.radius
    }
}

/// Zone with its own wind and terrain values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Where the override applies.
    pub zone: Zone,
    /// Wind effect inside the zone.
    pub wind_effect: f32,
    /// Terrain effect inside the zone.
    pub terrain_effect: f32,
}

/// Uniform conditions plus hazards and patches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedEnvironment {
    /// Conditions outside every patch.
    pub base: StaticEnvironment,
    /// Unsafe regions.
    pub hazards: Vec<Zone>,
    /// Local overrides; the last matching patch wins.
    pub patches: Vec<Patch>,
    #[serde(skip)]
    queries: Cell<usize>,
}

impl ScriptedEnvironment {
    /// Uniform conditions with no zones.
    #[must_use]
    pub fn new(base: StaticEnvironment) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Builder method to add an unsafe zone.
    #[must_use]
    pub fn with_hazard(mut self, center: Vec2, radius: f32) -> Self {
        self.hazards.push(Zone::new(center, radius));
        self
    }

    /// Builder method to add a wind/terrain override.
    #[must_use]
    pub fn with_patch(
        mut self,
        center: Vec2,
        radius: f32,
        wind_effect: f32,
        terrain_effect: f32,
    ) -> Self {
        self.patches.push(Patch {
            zone: Zone::new(center, radius),
            wind_effect,
            terrain_effect,
        });
        self
    }

    /// Wind and terrain queries answered so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    /// Reset the query counter.
    pub fn reset_query_count(&self) {
        self.queries.set(0);
    }

    fn patch_at(&self, position: Vec2) -> Option<&Patch> {
        self.queries.set(self.queries.get() + 1);
        self.patches.iter().rev().find(|p| p.zone.contains(position))
    }
}

impl Environment for ScriptedEnvironment {
    fn wind_effect(&self, position: Vec2) -> f32 {
        self.patch_at(position)
            .map_or(self.base.wind_effect, |p| p.wind_effect)
    }

    fn wind_direction(&self, _position: Vec2) -> f32 {
        self.base.wind_direction
    }

    fn terrain_effect(&self, position: Vec2) -> f32 {
        self.patch_at(position)
            .map_or(self.base.terrain_effect, |p| p.terrain_effect)
    }

    fn is_position_safe(&self, position: Vec2) -> bool {
        self.base.safe && !self.hazards.iter().any(|zone| zone.contains(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_makes_positions_unsafe() {
        let env = ScriptedEnvironment::default().with_hazard(Vec2::new(100.0, 0.0), 50.0);
        assert!(!env.is_position_safe(Vec2::new(120.0, 10.0)));
        assert!(!env.is_position_safe(Vec2::new(150.0, 0.0)));
        assert!(env.is_position_safe(Vec2::new(200.0, 0.0)));
    }

    #[test]
    fn test_last_patch_wins() {
        let env = ScriptedEnvironment::default()
            .with_patch(Vec2::ZERO, 100.0, 0.1, 0.2)
            .with_patch(Vec2::ZERO, 10.0, 0.9, 0.95);
        assert_eq!(env.wind_effect(Vec2::new(5.0, 0.0)), 0.9);
        assert_eq!(env.terrain_effect(Vec2::new(50.0, 0.0)), 0.2);
        assert_eq!(env.wind_effect(Vec2::new(500.0, 0.0)), 0.8);
    }

    #[test]
    fn test_counts_queries() {
        let env = ScriptedEnvironment::default();
        env.wind_effect(Vec2::ZERO);
        env.terrain_effect(Vec2::ZERO);
        assert_eq!(env.query_count(), 2);
        env.reset_query_count();
        assert_eq!(env.query_count(), 0);
    }
}
