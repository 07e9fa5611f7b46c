//! Climate-driven terrain decay.
//!
//! Each erosion year simulates a full averaging horizon over the terrain and
//! lowers every cell in proportion to its averaged rain and wind exposure.
//! The decay term is logistic in depth, so sea floor and high peaks barely
//! move while mid-elevation land erodes fastest.

use log::debug;
use rayon::prelude::*;

use crate::climate::{Climate, ClimateModel};
use crate::terrain::Terrain;

use super::ErosionConfig;

/// Depth after one erosion pass for a cell with the given averaged climate.
///
/// `depth - rate * r * (1 - r) * (rain + wind_weight * wind)` with
/// `r = depth / depth_scale`. Negative exposure is treated as zero, so for
/// `depth` in `[0, depth_scale]` the result never exceeds `depth`.
#[inline]
pub fn erosion_decay(depth: f32, avg_rain: f32, avg_wind: f32, cfg: &ErosionConfig) -> f32 {
    let r = depth / cfg.depth_scale;
    let exposure = (avg_rain + cfg.wind_weight * avg_wind).max(0.0);
    depth - cfg.rate * r * (1.0 - r) * exposure
}

/// Runs one averaging horizon over `terrain` on a fresh scratch climate.
fn averaged_climate(terrain: &Terrain, seed: i32, model: &ClimateModel) -> Climate {
    let mut climate = Climate::new(terrain.grid_size(), model.clone());
    climate.init(0, seed, terrain);
    climate.calc_average(seed, terrain);
    climate
}

impl Terrain {
    /// Erodes the depth map for `years` passes.
    ///
    /// Every pass re-simulates the climate against the depth left by the
    /// previous pass.
    pub fn erode(&mut self, seed: i32, years: u32, model: &ClimateModel) {
        for year in 0..years {
            let climate = averaged_climate(self, seed, model);
            self.apply_erosion(&climate);
            let (min, max) = self.depth_range();
            debug!("erosion year {}/{years}: depth range {min:.1}..{max:.1}", year + 1);
        }
    }

    /// Erodes the depth map using climate simulated over `reference`.
    ///
    /// # Panics
    /// Panics if `reference` has a different grid size.
    pub fn erode_against(&mut self, seed: i32, reference: &Terrain, years: u32, model: &ClimateModel) {
        assert_eq!(
            reference.grid_size(),
            self.grid_size(),
            "reference terrain must share the grid size"
        );
        for year in 0..years {
            let climate = averaged_climate(reference, seed, model);
            self.apply_erosion(&climate);
            debug!("erosion year {}/{years} against reference terrain", year + 1);
        }
    }

    fn apply_erosion(&mut self, climate: &Climate) {
        let cfg = &self.erosion_config;
        let rain = &climate.avg_rain_map;
        let wind = &climate.avg_wind_map;
        self.depth_map
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(cell, depth)| {
                *depth = erosion_decay(*depth, rain[cell], wind[cell], cfg);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    #[test]
    fn decay_is_zero_at_sea_floor_and_scale() {
        let cfg = ErosionConfig::default();
        assert_eq!(erosion_decay(0.0, 1.0, 5.0, &cfg), 0.0);
        assert_eq!(erosion_decay(2000.0, 1.0, 5.0, &cfg), 2000.0);
    }

    #[test]
    fn decay_peaks_at_half_scale() {
        let cfg = ErosionConfig::default();
        // 5 * 0.25 * (0.5 + 0.5 * 5)
        let eroded = erosion_decay(1000.0, 0.5, 5.0, &cfg);
        assert!((eroded - (1000.0 - 3.75)).abs() < 1e-3);
    }

    #[test]
    fn negative_exposure_never_raises_terrain() {
        let cfg = ErosionConfig::default();
        assert_eq!(erosion_decay(800.0, 0.0, -4.0, &cfg), 800.0);
    }

    #[test]
    fn erosion_is_monotonic_on_flat_land() {
        let cfg = WorldConfig::new(50, 20, 15);
        let model = ClimateModel::new(&cfg).unwrap();
        let mut terrain = Terrain::new(&cfg).unwrap();
        terrain.depth_map.fill(1000.0);

        terrain.erode(15, 1, &model);
        assert!(terrain.depth_map.iter().all(|&d| d <= 1000.0 && d >= 0.0));
        assert!(terrain.depth_map.iter().any(|&d| d < 1000.0));
    }

    #[test]
    fn erosion_never_raises_generated_terrain_below_scale() {
        let cfg = WorldConfig::new(50, 20, 7);
        let model = ClimateModel::new(&cfg).unwrap();
        let mut terrain = Terrain::new(&cfg).unwrap();
        terrain.gen_depth(7);
        let before = terrain.depth_map.clone();

        terrain.erode(7, 1, &model);
        for (&after, &prev) in terrain.depth_map.iter().zip(before.iter()) {
            if (0.0..=2000.0).contains(&prev) {
                assert!(after <= prev);
            }
        }
    }

    #[test]
    fn erode_against_leaves_reference_untouched() {
        let cfg = WorldConfig::new(50, 20, 3);
        let model = ClimateModel::new(&cfg).unwrap();
        let mut reference = Terrain::new(&cfg).unwrap();
        reference.gen_depth(3);
        let snapshot = reference.depth_map.clone();

        let mut target = Terrain::new(&cfg).unwrap();
        target.depth_map.fill(1000.0);
        target.erode_against(3, &reference, 2, &model);

        assert_eq!(reference.depth_map, snapshot);
        assert!(target.depth_map.iter().all(|&d| d <= 1000.0));
    }
}
