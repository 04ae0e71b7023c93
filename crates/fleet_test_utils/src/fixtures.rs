//! Test fixtures and helpers.
//!
//! Pre-built fleets and ships for consistent testing.

use fleet_core::fleet::{Fleet, Ship};
use fleet_core::math::Vec2;

/// Standard hull for fixture ships.
pub const FIXTURE_MAX_HEALTH: f32 = 100.0;

/// Shorthand for [`Vec2::new`].
#[must_use]
pub fn pos(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// A ship with the given attack power at `health_fraction` of a
/// [`FIXTURE_MAX_HEALTH`] hull.
#[must_use]
pub fn ship(id: u32, attack_power: f32, health_fraction: f32) -> Ship {
    Ship::new(id, attack_power, FIXTURE_MAX_HEALTH)
        .with_health(health_fraction * FIXTURE_MAX_HEALTH)
}

/// A fleet of full-health ships, one per entry in `powers`.
///
/// Ship ids are `id * 100 + index`, so ships from different fixture fleets
/// never collide.
#[must_use]
pub fn fleet_with_powers(id: u32, position: Vec2, powers: &[f32]) -> Fleet {
    let ships: Vec<(f32, f32)> = powers.iter().map(|&p| (p, 1.0)).collect();
    fleet_with_ships(id, position, &ships)
}

/// A fleet built from `(attack_power, health_fraction)` pairs.
#[must_use]
pub fn fleet_with_ships(id: u32, position: Vec2, ships: &[(f32, f32)]) -> Fleet {
    let mut fleet = Fleet::new(id, format!("Fleet {id}"), position);
    for (index, &(attack, health)) in (0u32..).zip(ships) {
        fleet.ships.push(ship(id * 100 + index, attack, health));
    }
    fleet
}

/// A fleet whose combat power is exactly `power`, as one full-health ship.
#[must_use]
pub fn fleet_with_power(id: u32, position: Vec2, power: f32) -> Fleet {
    fleet_with_powers(id, position, &[power])
}

/// A fleet with no ships.
#[must_use]
pub fn empty_fleet(id: u32, position: Vec2) -> Fleet {
    Fleet::new(id, format!("Empty {id}"), position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::fleet::{FleetView, ShipView};

    #[test]
    fn test_fleet_with_powers_assigns_unique_ids() {
        let fleet = fleet_with_powers(3, pos(0.0, 0.0), &[10.0, 20.0]);
        let ids: Vec<u32> = fleet.ships().iter().map(|s| s.id().0).collect();
        assert_eq!(ids, vec![300, 301]);
        assert_eq!(fleet.health_percentage(), 1.0);
    }

    #[test]
    fn test_ship_fixture_health() {
        assert_eq!(ship(1, 10.0, 0.25).health_percentage(), 0.25);
    }
}
