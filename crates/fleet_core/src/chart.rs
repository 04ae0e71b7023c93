//! Grid-backed sea chart.
//!
//! A [`SeaChart`] divides the world into square cells, each open water,
//! shallows or reef, and carries a single prevailing [`Wind`]. It implements
//! [`Environment`] so decision logic can run against real map data.

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::{FleetError, Result};
use crate::math::Vec2;

/// Cell types on a sea chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Deep navigable water.
    #[default]
    Open,
    /// Navigable but cramped; poor footing for a battle line.
    Shallows,
    /// Impassable.
    Reef,
}

impl Cell {
    /// Terrain effect for this cell, in `[0, 1]`.
    #[must_use]
    pub const fn terrain_effect(self) -> f32 {
        match self {
            Self::Open => 0.8,
            Self::Shallows => 0.4,
            Self::Reef => 0.0,
        }
    }

    /// Returns true if ships can enter this cell.
    #[must_use]
    pub const fn is_navigable(self) -> bool {
        !matches!(self, Self::Reef)
    }
}

/// Prevailing wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Strength in `[0, 1]`.
    pub strength: f32,
    /// Direction the wind blows towards, in degrees.
    pub direction_degrees: f32,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            strength: 0.8,
            direction_degrees: 0.0,
        }
    }
}

/// Navigation chart with terrain and wind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaChart {
    /// Chart width in cells.
    width: u32,
    /// Chart height in cells.
    height: u32,
    /// World position of the corner of cell (0, 0).
    origin: Vec2,
    /// Size of each cell in world units.
    cell_size: f32,
    /// Cell data stored in row-major order.
    cells: Vec<Cell>,
    /// Prevailing wind.
    #[serde(default)]
    wind: Wind,
}

impl SeaChart {
    /// Create a chart of open water.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, or if `cell_size` is not positive.
    #[must_use]
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        assert!(width > 0, "SeaChart width must be positive");
        assert!(height > 0, "SeaChart height must be positive");
        assert!(cell_size > 0.0, "SeaChart cell_size must be positive");

        let cell_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            origin: Vec2::ZERO,
            cell_size,
            cells: vec![Cell::Open; cell_count],
            wind: Wind::default(),
        }
    }

    /// Builder method to move the chart's corner.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Builder method to set the wind.
    #[must_use]
    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = wind;
        self
    }

    /// Chart width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Chart height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell size in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Prevailing wind.
    #[must_use]
    pub const fn wind(&self) -> Wind {
        self.wind
    }

    /// Change the prevailing wind.
    pub fn set_wind(&mut self, wind: Wind) {
        self.wind = wind;
    }

    #[inline]
    fn coords_to_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Check if coordinates are within chart bounds.
    #[must_use]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Get cell at coordinates, `None` if out of bounds.
    #[must_use]
    pub fn get_cell(&self, x: u32, y: u32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.coords_to_index(x, y)).copied()
        } else {
            None
        }
    }

    /// Set cell at coordinates. Returns `false` if out of bounds.
    pub fn set_cell(&mut self, x: u32, y: u32, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let index = self.coords_to_index(x, y);
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Fill the inclusive cell rectangle `(x0, y0)..=(x1, y1)`, clipped to the chart.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, cell: Cell) {
        let x_end = x1.min(self.width.saturating_sub(1));
        let y_end = y1.min(self.height.saturating_sub(1));
        for y in y0..=y_end {
            for x in x0..=x_end {
                self.set_cell(x, y, cell);
            }
        }
    }

    /// Convert a world position to chart coordinates.
    ///
    /// Returns `None` if the position lies outside the chart.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn world_to_grid(&self, pos: Vec2) -> Option<(u32, u32)> {
        let local = pos - self.origin;
        if !local.is_finite() || local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let x = (local.x / self.cell_size).floor();
        let y = (local.y / self.cell_size).floor();

        if x < self.width as f32 && y < self.height as f32 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }

    /// Convert chart coordinates to a world position (center of cell).
    #[must_use]
    pub fn grid_to_world(&self, x: u32, y: u32) -> Vec2 {
        let half = self.cell_size / 2.0;
        self.origin
            + Vec2::new(
                x as f32 * self.cell_size + half,
                y as f32 * self.cell_size + half,
            )
    }

    /// Check that a deserialized chart is internally consistent.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| FleetError::InvalidConfig {
            field: "chart",
            reason,
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !self.origin.is_finite() {
            return Err(invalid("origin must be finite".into()));
        }
        let expected = (self.width as usize) * (self.height as usize);
        if self.cells.len() != expected {
            return Err(invalid(format!(
                "expected {expected} cells, found {}",
                self.cells.len()
            )));
        }
        Ok(())
    }

    /// Cell under a world position, `None` outside the chart.
    #[must_use]
    pub fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        self.world_to_grid(pos).and_then(|(x, y)| self.get_cell(x, y))
    }
}

impl Default for SeaChart {
    /// 64x64 cells of 50 units each.
    fn default() -> Self {
        Self::new(64, 64, 50.0)
    }
}

impl Environment for SeaChart {
    fn wind_effect(&self, position: Vec2) -> f32 {
        let strength = self.wind.strength.clamp(0.0, 1.0);
        match self.cell_at(position) {
            Some(Cell::Shallows) => strength * 0.5,
            _ => strength,
        }
    }

    fn wind_direction(&self, _position: Vec2) -> f32 {
        self.wind.direction_degrees
    }

    fn terrain_effect(&self, position: Vec2) -> f32 {
        self.cell_at(position).map_or(0.0, Cell::terrain_effect)
    }

    fn is_position_safe(&self, position: Vec2) -> bool {
        self.cell_at(position).is_some_and(Cell::is_navigable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_creation() {
        let chart = SeaChart::new(10, 8, 25.0);
        assert_eq!(chart.width(), 10);
        assert_eq!(chart.height(), 8);
        assert_eq!(chart.cell_size(), 25.0);
        assert_eq!(chart.get_cell(9, 7), Some(Cell::Open));
        assert_eq!(chart.get_cell(10, 7), None);
    }

    #[test]
    fn test_world_to_grid_conversion() {
        let chart = SeaChart::new(10, 10, 2.0);

        assert_eq!(chart.world_to_grid(Vec2::new(1.0, 1.0)), Some((0, 0)));
        assert_eq!(chart.world_to_grid(Vec2::new(3.0, 3.0)), Some((1, 1)));
        assert_eq!(chart.world_to_grid(Vec2::new(19.0, 19.0)), Some((9, 9)));
        assert_eq!(chart.world_to_grid(Vec2::new(20.0, 20.0)), None);
        assert_eq!(chart.world_to_grid(Vec2::new(-1.0, 0.0)), None);
    }

    #[test]
    fn test_origin_offset() {
        let chart = SeaChart::new(4, 4, 10.0).with_origin(Vec2::new(-20.0, -20.0));
        assert_eq!(chart.world_to_grid(Vec2::new(-15.0, -15.0)), Some((0, 0)));
        assert_eq!(chart.world_to_grid(Vec2::ZERO), Some((2, 2)));
        assert_eq!(chart.grid_to_world(0, 0), Vec2::new(-15.0, -15.0));
    }

    #[test]
    fn test_grid_to_world_conversion() {
        let chart = SeaChart::new(10, 10, 2.0);
        assert_eq!(chart.grid_to_world(0, 0), Vec2::new(1.0, 1.0));
        assert_eq!(chart.grid_to_world(1, 1), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_cell_effects() {
        let mut chart = SeaChart::new(3, 1, 10.0).with_wind(Wind {
            strength: 0.6,
            direction_degrees: 90.0,
        });
        chart.set_cell(1, 0, Cell::Shallows);
        chart.set_cell(2, 0, Cell::Reef);

        let open = Vec2::new(5.0, 5.0);
        let shallows = Vec2::new(15.0, 5.0);
        let reef = Vec2::new(25.0, 5.0);
        let outside = Vec2::new(35.0, 5.0);

        assert!(chart.is_position_safe(open));
        assert!(chart.is_position_safe(shallows));
        assert!(!chart.is_position_safe(reef));
        assert!(!chart.is_position_safe(outside));

        assert_eq!(chart.terrain_effect(open), 0.8);
        assert_eq!(chart.terrain_effect(shallows), 0.4);
        assert_eq!(chart.terrain_effect(reef), 0.0);
        assert_eq!(chart.terrain_effect(outside), 0.0);

        assert_eq!(chart.wind_effect(open), 0.6);
        assert_eq!(chart.wind_effect(shallows), 0.3);
        assert_eq!(chart.wind_direction(outside), 90.0);
    }

    #[test]
    fn test_validate_catches_bad_cell_count() {
        assert!(SeaChart::new(3, 3, 10.0).validate().is_ok());

        let mut chart = SeaChart::new(3, 3, 10.0);
        chart.cells.pop();
        assert!(matches!(
            chart.validate(),
            Err(FleetError::InvalidConfig { field: "chart", .. })
        ));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut chart = SeaChart::new(5, 5, 1.0);
        chart.fill_rect(3, 3, 10, 10, Cell::Reef);
        assert_eq!(chart.get_cell(4, 4), Some(Cell::Reef));
        assert_eq!(chart.get_cell(3, 3), Some(Cell::Reef));
        assert_eq!(chart.get_cell(2, 2), Some(Cell::Open));
        assert!(!chart.set_cell(5, 0, Cell::Reef));
    }

    #[test]
    fn test_chart_ron_round_trip() {
        let mut chart = SeaChart::new(2, 2, 5.0);
        chart.set_cell(0, 1, Cell::Reef);
        let text = ron::to_string(&chart).unwrap();
        let parsed: SeaChart = ron::from_str(&text).unwrap();
        assert_eq!(parsed, chart);
    }
}
