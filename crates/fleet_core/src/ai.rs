//! Fleet combat decision engine.
//!
//! [`FleetAi`] answers tactical questions for one fleet facing another:
//! where to sail, how to fight, whether to engage or fall back, where to
//! stand and what to shoot first. All answers are best-effort advice; no
//! query fails or panics on degenerate input.
//!
//! # Caching
//!
//! Combat power and enemy threat are memoized per fleet id. The caches are
//! cleared at the start of every [`FleetAi::update`] call and nowhere else,
//! so within a tick repeated queries return identical values even if the
//! fleets change underneath.
//!
//! # Example
//!
//! ```
//! use fleet_core::ai::FleetAi;
//! use fleet_core::environment::StaticEnvironment;
//! use fleet_core::fleet::{Fleet, Ship};
//! use fleet_core::math::Vec2;
//!
//! let world = StaticEnvironment::default();
//! let mut ai = FleetAi::new(&world);
//!
//! let home = Fleet::new(1, "Home", Vec2::new(100.0, 0.0))
//!     .with_ship(Ship::new(1, 60.0, 100.0))
//!     .with_ship(Ship::new(2, 40.0, 100.0));
//! let raiders = Fleet::new(2, "Raiders", Vec2::new(600.0, 0.0))
//!     .with_ship(Ship::new(10, 20.0, 100.0));
//!
//! ai.update(0.016);
//! assert!(ai.should_engage_combat(&home, &raiders));
//! assert!(!ai.should_retreat(&home, &raiders));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cache::MemoCache;
use crate::config::FleetAiConfig;
use crate::environment::{clamp_effect, Environment};
use crate::fleet::{FleetId, FleetView, ShipId, ShipView};
use crate::math::Vec2;
use crate::navigation::{GreedyPlanner, NavigationPath, PathPlanner};
use crate::strategy::{CombatStrategy, StrategyBand};

/// Power ratio reported when the enemy poses no threat but we do.
pub const OVERWHELMING_POWER_RATIO: f32 = f32::MAX;

/// Every tactical answer for one fleet pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalReport {
    /// Fleet being advised.
    pub fleet: FleetId,
    /// Opposing fleet.
    pub enemy: FleetId,
    /// Own combat power.
    pub combat_power: f32,
    /// Enemy threat level.
    pub enemy_threat: f32,
    /// Own power over enemy threat.
    pub power_ratio: f32,
    /// Doctrine band the ratio falls in.
    pub band: StrategyBand,
    /// Doctrine to fight with.
    pub strategy: CombatStrategy,
    /// Whether to engage now.
    pub engage: bool,
    /// Whether to fall back.
    pub retreat: bool,
    /// Where to take station relative to the enemy.
    pub optimal_position: Vec2,
    /// Enemy ships to fire on, highest priority first.
    pub targets: Vec<ShipId>,
}

/// Stateful fleet decision engine.
#[derive(Debug)]
pub struct FleetAi<E, P = GreedyPlanner> {
    world: E,
    planner: P,
    config: FleetAiConfig,
    combat_power: MemoCache,
    threat_level: MemoCache,
    tick: u64,
    elapsed: f32,
}

impl<E: Environment> FleetAi<E> {
    /// Engine with the default doctrine and greedy path planner.
    #[must_use]
    pub fn new(world: E) -> Self {
        Self::with_config(world, FleetAiConfig::default())
    }

    /// Engine with a custom doctrine and the greedy path planner.
    #[must_use]
    pub fn with_config(world: E, config: FleetAiConfig) -> Self {
        Self::with_planner(world, config, GreedyPlanner)
    }
}

impl<E: Environment, P: PathPlanner> FleetAi<E, P> {
    /// Engine with a custom doctrine and path planner.
    #[must_use]
    pub fn with_planner(world: E, config: FleetAiConfig, planner: P) -> Self {
        Self {
            world,
            planner,
            config,
            combat_power: MemoCache::new("combat_power"),
            threat_level: MemoCache::new("threat_level"),
            tick: 0,
            elapsed: 0.0,
        }
    }

    /// The environment this engine reads.
    pub fn world(&self) -> &E {
        &self.world
    }

    /// Mutable access to the environment.
    pub fn world_mut(&mut self) -> &mut E {
        &mut self.world
    }

    /// Active doctrine.
    pub fn config(&self) -> &FleetAiConfig {
        &self.config
    }

    /// Number of `update` calls so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Sum of `delta_time` over all updates.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Cached combat power for a fleet, without computing it.
    pub fn cached_combat_power(&self, id: FleetId) -> Option<f32> {
        self.combat_power.get(id)
    }

    /// Cached threat level for a fleet, without computing it.
    pub fn cached_threat_level(&self, id: FleetId) -> Option<f32> {
        self.threat_level.get(id)
    }

    fn env(&self) -> &dyn Environment {
        &self.world
    }

    fn wind_at(&self, position: Vec2) -> f32 {
        clamp_effect(self.world.wind_effect(position))
    }

    fn terrain_at(&self, position: Vec2) -> f32 {
        clamp_effect(self.world.terrain_effect(position))
    }

    /// Start a new tick. Drops every cached value; nothing is recomputed
    /// until queried.
    pub fn update(&mut self, delta_time: f32) {
        self.tick += 1;
        self.elapsed += delta_time;
        self.combat_power.clear();
        self.threat_level.clear();
        trace!(tick = self.tick, delta_time, "Fleet AI caches cleared");
    }

    /// Plan a route from `start` to `end` with the configured planner.
    pub fn find_optimal_path(&self, start: Vec2, end: Vec2) -> NavigationPath {
        let route = self.planner.plan(self.env(), &self.config, start, end);
        NavigationPath::measure(route, self.env(), self.config.average_ship_speed)
    }

    /// Sum over ships of `attack_power * health_percentage`, memoized.
    pub fn calculate_combat_power<F: FleetView>(&mut self, fleet: &F) -> f32 {
        self.combat_power.get_or_insert_with(fleet.id(), || {
            fleet
                .ships()
                .iter()
                .map(|ship| ship.attack_power() * ship.health_percentage())
                .sum()
        })
    }

    /// Enemy combat power scaled by wind and terrain at its position, memoized.
    pub fn calculate_enemy_threat<F: FleetView>(&mut self, enemy: &F) -> f32 {
        if let Some(threat) = self.threat_level.get(enemy.id()) {
            return threat;
        }

        let power = self.calculate_combat_power(enemy);
        let position = enemy.position();
        let multiplier = 1.0
            + self.wind_at(position) * self.config.threat_wind_weight
            + self.terrain_at(position) * self.config.threat_terrain_weight;

        self.threat_level
            .get_or_insert_with(enemy.id(), || power * multiplier)
    }

    /// Own combat power over enemy threat.
    ///
    /// A harmless enemy gives [`OVERWHELMING_POWER_RATIO`], or parity (1.0)
    /// when neither side has any power.
    pub fn power_ratio<F: FleetView, G: FleetView>(&mut self, fleet: &F, enemy: &G) -> f32 {
        let own = self.calculate_combat_power(fleet);
        let threat = self.calculate_enemy_threat(enemy);

        if threat <= f32::EPSILON {
            if own > 0.0 {
                OVERWHELMING_POWER_RATIO
            } else {
                1.0
            }
        } else {
            own / threat
        }
    }

    /// Pick a doctrine band from the power ratio.
    pub fn determine_combat_strategy<F: FleetView, G: FleetView>(
        &mut self,
        fleet: &F,
        enemy: &G,
    ) -> CombatStrategy {
        let ratio = self.power_ratio(fleet, enemy);
        let band = StrategyBand::from_power_ratio(ratio);
        debug!(
            fleet = fleet.id().0,
            enemy = enemy.id().0,
            ratio,
            ?band,
            "Combat strategy selected"
        );
        band.strategy()
    }

    /// Engage only with clear superiority, good conditions and a way out.
    ///
    /// The way out is a safe, complete route to
    /// [`FleetAiConfig::retreat_destination`].
    pub fn should_engage_combat<F: FleetView, G: FleetView>(&mut self, fleet: &F, enemy: &G) -> bool {
        let destination = self.config.retreat_destination;
        self.should_engage_combat_with_escape(fleet, enemy, destination)
    }

    /// [`Self::should_engage_combat`] with an explicit fallback point.
    pub fn should_engage_combat_with_escape<F: FleetView, G: FleetView>(
        &mut self,
        fleet: &F,
        enemy: &G,
        retreat_destination: Vec2,
    ) -> bool {
        let ratio = self.power_ratio(fleet, enemy);
        if ratio <= self.config.engage_power_ratio {
            debug!(fleet = fleet.id().0, ratio, "Not engaging: insufficient power");
            return false;
        }

        let position = fleet.position();
        let wind = self.wind_at(position);
        if wind <= self.config.engage_min_wind {
            debug!(fleet = fleet.id().0, wind, "Not engaging: unfavorable wind");
            return false;
        }

        let terrain = self.terrain_at(position);
        if terrain <= self.config.engage_min_terrain {
            debug!(fleet = fleet.id().0, terrain, "Not engaging: unfavorable terrain");
            return false;
        }

        let escape = self.has_escape_route(position, retreat_destination);
        debug!(fleet = fleet.id().0, ratio, escape, "Engagement evaluated");
        escape
    }

    /// True when a complete route from `from` to `to` exists and every
    /// waypoint on it is safe.
    pub fn has_escape_route(&self, from: Vec2, to: Vec2) -> bool {
        let path = self.find_optimal_path(from, to);
        path.complete && path.is_safe(self.env())
    }

    /// Fall back when badly outgunned, or when battered in poor wind.
    pub fn should_retreat<F: FleetView, G: FleetView>(&mut self, fleet: &F, enemy: &G) -> bool {
        let ratio = self.power_ratio(fleet, enemy);
        if ratio < self.config.retreat_power_ratio {
            debug!(fleet = fleet.id().0, ratio, "Retreat: outgunned");
            return true;
        }

        let wind = self.wind_at(fleet.position());
        let health = fleet.health_percentage();
        let retreat = wind < self.config.retreat_max_wind && health < self.config.retreat_max_health;
        if retreat {
            debug!(fleet = fleet.id().0, wind, health, "Retreat: battered in poor wind");
        }
        retreat
    }

    /// Station `optimal_distance` from the enemy, along our bearing to it
    /// rotated by the local wind direction.
    pub fn calculate_optimal_position<F: FleetView, G: FleetView>(&self, fleet: &F, enemy: &G) -> Vec2 {
        let own = fleet.position();
        let target = enemy.position();
        let bearing = own.bearing_to(target);

        let wind_degrees = self.world.wind_direction(own);
        let wind_angle = if wind_degrees.is_finite() {
            wind_degrees.to_radians()
        } else {
            0.0
        };

        target + Vec2::from_angle(bearing + wind_angle) * self.config.optimal_distance
    }

    /// Enemy ships ranked by `attack_power * (1 - health)`, highest first,
    /// at most one per own ship. Ties keep the enemy's ship order.
    pub fn select_targets<'a, F: FleetView, G: FleetView>(
        &self,
        fleet: &F,
        enemy: &'a G,
    ) -> Vec<&'a G::Ship> {
        let mut ranked: Vec<(f32, &'a G::Ship)> = enemy
            .ships()
            .iter()
            .map(|ship| (ship.attack_power() * (1.0 - ship.health_percentage()), ship))
            .collect();

        // Stable sort keeps enumeration order among equal scores.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(fleet.ships().len());

        ranked.into_iter().map(|(_, ship)| ship).collect()
    }

    /// Run every query for a fleet pairing.
    pub fn assess<F: FleetView, G: FleetView>(&mut self, fleet: &F, enemy: &G) -> TacticalReport {
        let combat_power = self.calculate_combat_power(fleet);
        let enemy_threat = self.calculate_enemy_threat(enemy);
        let power_ratio = self.power_ratio(fleet, enemy);
        let band = StrategyBand::from_power_ratio(power_ratio);

        TacticalReport {
            fleet: fleet.id(),
            enemy: enemy.id(),
            combat_power,
            enemy_threat,
            power_ratio,
            band,
            strategy: self.determine_combat_strategy(fleet, enemy),
            engage: self.should_engage_combat(fleet, enemy),
            retreat: self.should_retreat(fleet, enemy),
            optimal_position: self.calculate_optimal_position(fleet, enemy),
            targets: self
                .select_targets(fleet, enemy)
                .into_iter()
                .map(ShipView::id)
                .collect(),
        }
    }
}
