//! Property-based testing strategies.

use fleet_core::chart::{Cell, SeaChart};
use fleet_core::environment::StaticEnvironment;
use fleet_core::fleet::{Fleet, Ship};
use fleet_core::math::Vec2;
use proptest::prelude::*;

/// Side length of the square [`arb_position`] draws from.
pub const ARENA_SIZE: f32 = 2000.0;

/// Any position inside the arena.
pub fn arb_position() -> impl Strategy<Value = Vec2> {
    (0.0f32..ARENA_SIZE, 0.0f32..ARENA_SIZE).prop_map(|(x, y)| Vec2::new(x, y))
}

/// A ship with positive attack and hull, possibly damaged.
pub fn arb_ship(id: u32) -> impl Strategy<Value = Ship> {
    (0.0f32..200.0, 1.0f32..500.0, 0.0f32..=1.0)
        .prop_map(move |(attack, max_health, fraction)| {
            Ship::new(id, attack, max_health).with_health(max_health * fraction)
        })
}

/// A fleet of up to `max_ships` ships with ids `id * 100 + index`.
pub fn arb_fleet(id: u32, max_ships: usize) -> impl Strategy<Value = Fleet> {
    (arb_position(), prop::collection::vec(arb_ship(0), 0..=max_ships)).prop_map(
        move |(position, ships)| {
            let mut fleet = Fleet::new(id, format!("Fleet {id}"), position);
            for (index, mut ship) in (0u32..).zip(ships) {
                ship.id.0 = id * 100 + index;
                fleet.ships.push(ship);
            }
            fleet
        },
    )
}

/// Uniform conditions with effects anywhere in `[0, 1]`, always safe.
pub fn arb_static_environment() -> impl Strategy<Value = StaticEnvironment> {
    (0.0f32..=1.0, 0.0f32..360.0, 0.0f32..=1.0).prop_map(
        |(wind_effect, wind_direction, terrain_effect)| StaticEnvironment {
            wind_effect,
            wind_direction,
            terrain_effect,
            safe: true,
        },
    )
}

/// Chart covering the arena with a few reef blocks scattered over it.
pub fn arb_chart() -> impl Strategy<Value = SeaChart> {
    prop::collection::vec((0u32..40, 0u32..40, 1u32..6, 1u32..6), 0..6).prop_map(|reefs| {
        let mut chart = SeaChart::new(40, 40, ARENA_SIZE / 40.0);
        for (x, y, w, h) in reefs {
            chart.fill_rect(x, y, x + w, y + h, Cell::Reef);
        }
        chart
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::fleet::{FleetView, ShipView};

    proptest! {
        #[test]
        fn fleet_ship_ids_are_unique(fleet in arb_fleet(7, 8)) {
            let mut ids: Vec<u32> = fleet.ships().iter().map(|s| s.id().0).collect();
            ids.dedup();
            prop_assert_eq!(ids.len(), fleet.ships().len());
        }

        #[test]
        fn ship_health_in_unit_range(ship in arb_ship(1)) {
            let h = ship.health_percentage();
            prop_assert!((0.0..=1.0).contains(&h));
        }
    }
}
