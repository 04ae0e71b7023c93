//! Fleets and ships as seen by the decision engine.
//!
//! The engine that owns the real entities plugs them in through
//! [`FleetView`] and [`ShipView`]. [`Fleet`] and [`Ship`] are plain data
//! implementations used by scenarios, tools and tests.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Unique identifier for a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FleetId(pub u32);

/// Unique identifier for a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Read-only view of a single ship.
pub trait ShipView {
    /// Identity used when reporting targets.
    fn id(&self) -> ShipId;
    /// Raw offensive strength at full health.
    fn attack_power(&self) -> f32;
    /// Remaining health in `[0, 1]`.
    fn health_percentage(&self) -> f32;
    /// World position.
    fn position(&self) -> Vec2;
}

/// Read-only view of a fleet.
pub trait FleetView {
    /// Ship type held by this fleet.
    type Ship: ShipView;

    /// Identity used as the cache key.
    fn id(&self) -> FleetId;
    /// Aggregate fleet position.
    fn position(&self) -> Vec2;
    /// Ships in enumeration order.
    fn ships(&self) -> &[Self::Ship];
    /// Aggregate remaining health in `[0, 1]`.
    fn health_percentage(&self) -> f32;
}

/// A warship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Ship identifier.
    pub id: ShipId,
    /// Offensive strength at full health.
    pub attack_power: f32,
    /// Current hull points.
    pub health: f32,
    /// Hull points when undamaged.
    pub max_health: f32,
    /// World position.
    #[serde(default)]
    pub position: Vec2,
}

impl Ship {
    /// Create an undamaged ship at the origin.
    #[must_use]
    pub fn new(id: u32, attack_power: f32, max_health: f32) -> Self {
        Self {
            id: ShipId(id),
            attack_power,
            health: max_health,
            max_health,
            position: Vec2::ZERO,
        }
    }

    /// Builder method to set current health.
    #[must_use]
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    /// Builder method to set position.
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

impl ShipView for Ship {
    fn id(&self) -> ShipId {
        self.id
    }

    fn attack_power(&self) -> f32 {
        self.attack_power
    }

    fn health_percentage(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

/// A fleet of ships moving as one formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    /// Fleet identifier.
    pub id: FleetId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Formation position.
    pub position: Vec2,
    /// Ships in the fleet.
    #[serde(default)]
    pub ships: Vec<Ship>,
}

impl Fleet {
    /// Create an empty fleet.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: FleetId(id),
            name: name.into(),
            position,
            ships: Vec::new(),
        }
    }

    /// Builder method to add a ship.
    #[must_use]
    pub fn with_ship(mut self, ship: Ship) -> Self {
        self.ships.push(ship);
        self
    }

    /// Find a ship by id.
    #[must_use]
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    /// Find a ship by id for mutation.
    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }
}

impl FleetView for Fleet {
    type Ship = Ship;

    fn id(&self) -> FleetId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn ships(&self) -> &[Ship] {
        &self.ships
    }

    fn health_percentage(&self) -> f32 {
        let max: f32 = self.ships.iter().map(|s| s.max_health.max(0.0)).sum();
        if max <= 0.0 {
            return 0.0;
        }
        let current: f32 = self
            .ships
            .iter()
            .map(|s| s.health.clamp(0.0, s.max_health.max(0.0)))
            .sum();
        current / max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_health_percentage() {
        let ship = Ship::new(1, 10.0, 200.0).with_health(50.0);
        assert_eq!(ship.health_percentage(), 0.25);
        assert_eq!(Ship::new(2, 10.0, 0.0).health_percentage(), 0.0);
        assert_eq!(
            Ship::new(3, 10.0, 100.0).with_health(150.0).health_percentage(),
            1.0
        );
    }

    #[test]
    fn test_fleet_health_is_hull_weighted() {
        let fleet = Fleet::new(1, "Home", Vec2::ZERO)
            .with_ship(Ship::new(1, 10.0, 300.0).with_health(300.0))
            .with_ship(Ship::new(2, 10.0, 100.0).with_health(0.0));
        assert_eq!(fleet.health_percentage(), 0.75);
    }

    #[test]
    fn test_empty_fleet_health() {
        let fleet = Fleet::new(1, "Ghost", Vec2::ZERO);
        assert_eq!(fleet.health_percentage(), 0.0);
        assert!(fleet.ships().is_empty());
    }

    #[test]
    fn test_ship_lookup() {
        let mut fleet = Fleet::new(7, "Raiders", Vec2::ZERO).with_ship(Ship::new(4, 12.0, 80.0));
        assert!(fleet.ship(ShipId(4)).is_some());
        assert!(fleet.ship(ShipId(5)).is_none());
        fleet.ship_mut(ShipId(4)).unwrap().health = 40.0;
        assert_eq!(fleet.ship(ShipId(4)).unwrap().health_percentage(), 0.5);
    }
}
