//! # Fleet Core
//!
//! Tactical decision engine for naval fleet combat.
//!
//! Given two fleets and an environment, the engine answers:
//! - How do we get from here to there safely?
//! - How strong are we, and how dangerous is the enemy here?
//! - Which doctrine should we fight with?
//! - Should we engage, or fall back?
//! - Where should we take station, and what do we shoot first?
//!
//! The crate owns no entities and runs no simulation. Callers plug their
//! own fleets in through [`fleet::FleetView`] and their own world through
//! [`environment::Environment`].
//!
//! ## Crate Structure
//!
//! - [`ai`] - The [`ai::FleetAi`] engine and tactical reports
//! - [`fleet`] - Fleet and ship views plus plain data implementations
//! - [`environment`] - Wind, terrain and safety queries
//! - [`chart`] - Grid sea chart environment
//! - [`navigation`] - Route metrics and the greedy planner
//! - [`pathfinding`] - Bounded A* lattice planner
//! - [`strategy`] - Doctrine bands
//! - [`cache`] - Per-tick memoization
//! - [`config`] - Tunable thresholds, loadable from RON
//! - [`math`] - 2D vector math

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod cache;
pub mod chart;
pub mod config;
pub mod environment;
pub mod error;
pub mod fleet;
pub mod math;
pub mod navigation;
pub mod pathfinding;
pub mod strategy;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ai::{FleetAi, TacticalReport, OVERWHELMING_POWER_RATIO};
    pub use crate::chart::{Cell, SeaChart, Wind};
    pub use crate::config::FleetAiConfig;
    pub use crate::environment::{Environment, StaticEnvironment};
    pub use crate::error::{FleetError, Result};
    pub use crate::fleet::{Fleet, FleetId, FleetView, Ship, ShipId, ShipView};
    pub use crate::math::Vec2;
    pub use crate::navigation::{GreedyPlanner, NavigationPath, PathPlanner, PlannedRoute};
    pub use crate::pathfinding::LatticePlanner;
    pub use crate::strategy::{CombatStrategy, StrategyBand};
}
