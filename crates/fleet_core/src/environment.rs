//! Environment queries consumed by the decision engine.
//!
//! [`Environment`] is the port through which the world reports wind,
//! terrain and hazards at a position. [`StaticEnvironment`] answers every
//! query with the same values; its default is the calm-sea doctrine the
//! decision thresholds were tuned against.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// World conditions at a position.
pub trait Environment {
    /// How favorable the wind is, in `[0, 1]`.
    fn wind_effect(&self, position: Vec2) -> f32;

    /// Direction the wind blows towards, in degrees.
    fn wind_direction(&self, position: Vec2) -> f32;

    /// How favorable the terrain is, in `[0, 1]`.
    fn terrain_effect(&self, position: Vec2) -> f32;

    /// Whether a fleet can occupy `position`.
    fn is_position_safe(&self, position: Vec2) -> bool;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn wind_effect(&self, position: Vec2) -> f32 {
        (**self).wind_effect(position)
    }

    fn wind_direction(&self, position: Vec2) -> f32 {
        (**self).wind_direction(position)
    }

    fn terrain_effect(&self, position: Vec2) -> f32 {
        (**self).terrain_effect(position)
    }

    fn is_position_safe(&self, position: Vec2) -> bool {
        (**self).is_position_safe(position)
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn wind_effect(&self, position: Vec2) -> f32 {
        (**self).wind_effect(position)
    }

    fn wind_direction(&self, position: Vec2) -> f32 {
        (**self).wind_direction(position)
    }

    fn terrain_effect(&self, position: Vec2) -> f32 {
        (**self).terrain_effect(position)
    }

    fn is_position_safe(&self, position: Vec2) -> bool {
        (**self).is_position_safe(position)
    }
}

/// Clamp an environment score into `[0, 1]`, mapping NaN to 0.
#[must_use]
pub fn clamp_effect(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Position-independent environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticEnvironment {
    /// Wind effect reported everywhere.
    pub wind_effect: f32,
    /// Wind direction in degrees reported everywhere.
    pub wind_direction: f32,
    /// Terrain effect reported everywhere.
    pub terrain_effect: f32,
    /// Whether every position is safe.
    pub safe: bool,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            wind_effect: 0.8,
            wind_direction: 0.0,
            terrain_effect: 0.8,
            safe: true,
        }
    }
}

impl Environment for StaticEnvironment {
    fn wind_effect(&self, _position: Vec2) -> f32 {
        self.wind_effect
    }

    fn wind_direction(&self, _position: Vec2) -> f32 {
        self.wind_direction
    }

    fn terrain_effect(&self, _position: Vec2) -> f32 {
        self.terrain_effect
    }

    fn is_position_safe(&self, _position: Vec2) -> bool {
        self.safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_static_environment() {
        let env = StaticEnvironment::default();
        let pos = Vec2::new(-512.0, 77.0);
        assert_eq!(env.wind_effect(pos), 0.8);
        assert_eq!(env.terrain_effect(pos), 0.8);
        assert_eq!(env.wind_direction(pos), 0.0);
        assert!(env.is_position_safe(pos));
    }

    #[test]
    fn test_clamp_effect() {
        assert_eq!(clamp_effect(1.7), 1.0);
        assert_eq!(clamp_effect(-0.2), 0.0);
        assert_eq!(clamp_effect(f32::NAN), 0.0);
        assert_eq!(clamp_effect(0.45), 0.45);
    }

    #[test]
    fn test_reference_and_box_forward() {
        let env = StaticEnvironment {
            wind_effect: 0.1,
            safe: false,
            ..StaticEnvironment::default()
        };
        let by_ref: &dyn Environment = &env;
        assert_eq!(by_ref.wind_effect(Vec2::ZERO), 0.1);

        let boxed: Box<dyn Environment> = Box::new(env);
        assert!(!boxed.is_position_safe(Vec2::ZERO));
        assert_eq!((&boxed).terrain_effect(Vec2::ZERO), 0.8);
    }
}
