//! Layout generation parameters.

use crate::{CoreError, CoreResult};

/// Parameters for the random city layout generator.
///
/// Typically built by the application from command-line flags and passed to
/// the generator together with a [`CityRng`](crate::CityRng) seeded from
/// `seed`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Widest road band (in cells).  Each band picks a width in
    /// `1..=max_road_width`.  Default: 2.
    pub max_road_width: u32,

    /// Smallest building side, and the minimum gap between parallel roads.
    /// Default: 2.
    pub min_building_size: u32,

    /// Largest building side.  Default: 6.
    pub max_building_size: u32,

    /// Consecutive failed placements before building placement stops.  Every
    /// success resets the counter.  Default: 200.
    pub placement_attempts: u32,

    /// Share of placed buildings flagged as warehouses.  Default: 0.1.
    pub warehouse_fraction: f64,

    /// Master RNG seed.  The same seed always produces the identical grid.
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_road_width:     2,
            min_building_size:  2,
            max_building_size:  6,
            placement_attempts: 200,
            warehouse_fraction: 0.1,
            seed:               0,
        }
    }
}

impl LayoutConfig {
    /// Check parameter ranges before generation.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_road_width == 0 {
            return Err(CoreError::Config("max_road_width must be at least 1".into()));
        }
        if self.min_building_size == 0 {
            return Err(CoreError::Config("min_building_size must be at least 1".into()));
        }
        if self.max_building_size < self.min_building_size {
            return Err(CoreError::Config(format!(
                "max_building_size ({}) is smaller than min_building_size ({})",
                self.max_building_size, self.min_building_size
            )));
        }
        if !(0.0..=1.0).contains(&self.warehouse_fraction) {
            return Err(CoreError::Config(format!(
                "warehouse_fraction {} is outside [0, 1]",
                self.warehouse_fraction
            )));
        }
        Ok(())
    }

    /// Number of warehouses to draw from `building_count` placed buildings.
    #[inline]
    pub fn warehouse_count(&self, building_count: usize) -> usize {
        ((building_count as f64) * self.warehouse_fraction).round() as usize
    }
}
