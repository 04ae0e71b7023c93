//! Combat doctrine selection.
//!
//! Doctrine comes in four fixed bands keyed on the power ratio. A band
//! is applied as a whole; fields are never mixed between bands.

use serde::{Deserialize, Serialize};

/// How a fleet should fight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStrategy {
    /// Willingness to attack, in `[0, 1]`.
    pub aggression_level: f32,
    /// Health floor below which retreat is favored, in `[0, 1]`.
    pub retreat_threshold: f32,
    /// Desired distance between ships.
    pub formation_spacing: f32,
    /// Fight at range rather than closing in.
    pub prefer_ranged_combat: bool,
}

impl Default for CombatStrategy {
    /// The cautious band.
    fn default() -> Self {
        StrategyBand::Cautious.strategy()
    }
}

/// Power-ratio bands, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyBand {
    /// Ratio above 1.5: close in and overwhelm.
    Overwhelming,
    /// Ratio above 1.2.
    Superior,
    /// Ratio above 0.8.
    Even,
    /// Anything else.
    Cautious,
}

impl StrategyBand {
    /// Band for a power ratio. First matching threshold wins.
    #[must_use]
    pub fn from_power_ratio(power_ratio: f32) -> Self {
        if power_ratio > 1.5 {
            Self::Overwhelming
        } else if power_ratio > 1.2 {
            Self::Superior
        } else if power_ratio > 0.8 {
            Self::Even
        } else {
            Self::Cautious
        }
    }

    /// Doctrine for this band.
    #[must_use]
    pub const fn strategy(self) -> CombatStrategy {
        let (aggression_level, retreat_threshold, formation_spacing, prefer_ranged_combat) =
            match self {
                Self::Overwhelming => (1.0, 0.2, 50.0, false),
                Self::Superior => (0.8, 0.3, 75.0, true),
                Self::Even => (0.6, 0.4, 100.0, true),
                Self::Cautious => (0.4, 0.5, 150.0, true),
            };
        CombatStrategy {
            aggression_level,
            retreat_threshold,
            formation_spacing,
            prefer_ranged_combat,
        }
    }
}

impl CombatStrategy {
    /// Doctrine for a power ratio.
    #[must_use]
    pub fn for_power_ratio(power_ratio: f32) -> Self {
        StrategyBand::from_power_ratio(power_ratio).strategy()
    }
}
