//! Erosion configuration.

use serde::{Deserialize, Serialize};

/// Coefficients of climate-driven terrain decay.
///
/// The number of passes is not part of this struct; it is passed to
/// `Terrain::erode` and set for generation by `WorldConfig::erosion_years`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErosionConfig {
    /// Peak decay per pass, reached at half of `depth_scale`.
    pub rate: f32,
    /// Depth at which the logistic decay term returns to zero.
    pub depth_scale: f32,
    /// Weight of averaged wind relative to averaged rain.
    pub wind_weight: f32,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            rate: 5.0,
            depth_scale: 2000.0,
            wind_weight: 0.5,
        }
    }
}
