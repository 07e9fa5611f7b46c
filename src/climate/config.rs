//! Climate configuration parameters.

use serde::{Deserialize, Serialize};

/// Coefficients of the daily atmosphere model.
///
/// Units are abstract: depth is in the same units as the terrain depth map,
/// temperature and humidity are fractions in [0, 1], wind is a magnitude
/// centred on `wind_base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    // Reference depths
    /// Cells at or below this depth are water.
    pub sea_level: f32,
    /// Depth at which land temperature and solar gain reach zero.
    pub depth_scale: f32,

    // Initial state
    pub sea_temp: f32,
    pub sea_humidity: f32,
    pub land_humidity: f32,

    // Wind model
    /// Wind magnitude over flat ground.
    pub wind_base: f32,
    /// Elevation difference that cancels `wind_base`.
    pub wind_gradient_scale: f32,
    /// Upwind distance per unit of wind, in cells.
    pub advection_scale: f32,

    // Temperature model
    pub cooling_rate: f32,
    pub solar_gain: f32,
    pub rain_cooling: f32,
    pub sun_weight: f32,
    pub cooling_weight: f32,

    // Moisture model
    pub land_evaporation: f32,
    pub sea_evaporation: f32,
    pub rainout: f32,

    // Downfall thresholds: humidity >= base + slope * temperature
    pub rain_base: f32,
    pub rain_slope: f32,
    pub cloud_base: f32,
    pub cloud_slope: f32,

    // Averaging horizon
    pub days_per_year: u32,
    /// Simulated years folded into the averaged fields.
    pub average_years: u32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            sea_level: 200.0,
            depth_scale: 2000.0,

            sea_temp: 0.7,
            sea_humidity: 0.4,
            land_humidity: 0.2,

            wind_base: 5.0,
            wind_gradient_scale: 1000.0,
            advection_scale: 2.0,

            cooling_rate: 0.5,
            solar_gain: 0.008,
            rain_cooling: 0.01,
            sun_weight: 0.8,
            cooling_weight: 0.6,

            land_evaporation: 0.01,
            sea_evaporation: 0.05,
            rainout: 0.8,

            rain_base: 0.35,
            rain_slope: 0.5,
            cloud_base: 0.3,
            cloud_slope: 0.3,

            days_per_year: 365,
            average_years: 1,
        }
    }
}

impl ClimateConfig {
    /// Number of daily steps folded by `Climate::calc_average`.
    pub fn horizon_days(&self) -> u32 {
        self.days_per_year.saturating_mul(self.average_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_horizon_is_one_year() {
        let cfg = ClimateConfig::default();
        assert_eq!(cfg.horizon_days(), 365);
    }

    #[test]
    fn horizon_scales_with_years() {
        let cfg = ClimateConfig { average_years: 3, ..Default::default() };
        assert_eq!(cfg.horizon_days(), 3 * 365);
    }
}
