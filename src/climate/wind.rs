//! Daily wind direction and elevation-driven wind magnitude.

use glam::DVec2;
use rayon::prelude::*;

use crate::noise::NoiseSampler;
use crate::terrain::Terrain;

use super::util::source_cell;
use super::Climate;

/// Wind direction for `day`, from two noise samples along the time axis.
///
/// The second component shifts its y coordinate by the time fraction so the
/// two components decorrelate.
pub fn wind_direction(noise: &dyn NoiseSampler, day: u32, seed: i32, days_per_year: u32) -> DVec2 {
    let t = day as f32 / days_per_year.max(1) as f32;
    let s = seed as f32;
    DVec2::new(noise.sample(t, s, s) as f64, noise.sample(t, s + t, s) as f64)
}

impl Climate {
    /// Recomputes today's wind direction and the wind magnitude of every cell.
    ///
    /// A cell's wind is `base * (1 - (depth - upwind_depth) / gradient_scale)`,
    /// where the upwind cell lies `cell_size * direction` away. This is the
    /// only step operation that also writes border cells.
    pub fn calc_wind(&mut self, day: u32, seed: i32, terrain: &Terrain) {
        let cfg = &self.model.config;
        let direction = wind_direction(self.model.wind_noise(), day, seed, cfg.days_per_year);
        self.wind_direction = direction;

        let n = self.grid_size();
        let offset = direction * self.model.cell_size as f64;
        let depth = &terrain.depth_map;
        let (base, scale) = (cfg.wind_base, cfg.wind_gradient_scale);

        self.wind_map
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(cell, wind)| {
                let from = source_cell(cell / n, cell % n, offset, n);
                *wind = base * (1.0 - (depth[cell] - depth[from]) / scale);
            });
    }
}
