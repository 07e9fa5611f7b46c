//! Daily temperature update.

use rayon::prelude::*;

use crate::terrain::Terrain;

use super::util::{advect, clamp_unit};
use super::Climate;

impl Climate {
    /// Advances the temperature field by one day.
    ///
    /// Interior cells take the upwind temperature, are smoothed with the four
    /// diagonal neighbours of the advected field, then receive solar heating
    /// (cloud-free cells, less at altitude), uplift cooling from strong wind
    /// and rain cooling. Heating is weighted by `1 - T`, cooling by `T`.
    pub fn calc_temp_map(&mut self, terrain: &Terrain) {
        let cfg = &self.model.config;
        let n = self.grid_size();
        let advected = advect(
            &self.temp_map,
            &self.wind_map,
            self.wind_direction,
            cfg.advection_scale as f64,
        );

        let depth = &terrain.depth_map;
        let wind = &self.wind_map;
        let cloud = &self.cloud_map;
        let rain = &self.rain_map;

        self.temp_map
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(cell, temp)| {
                let (i, j) = (cell / n, cell % n);
                if advected.is_border(i, j) {
                    return;
                }

                let mut t = (advected[(i - 1, j - 1)]
                    + advected[(i + 1, j - 1)]
                    + advected[(i + 1, j + 1)]
                    + advected[(i - 1, j + 1)])
                    / 4.0;

                let add_cool = cfg.cooling_rate * (wind[cell] - cfg.wind_base);
                let add_sun = if cloud[cell] {
                    0.0
                } else {
                    (1.0 - depth[cell] / cfg.depth_scale) * cfg.solar_gain
                };
                let add_rain = if rain[cell] && t > 0.0 { -cfg.rain_cooling } else { 0.0 };

                t += cfg.sun_weight * (1.0 - t) * add_sun + cfg.cooling_weight * t * (add_rain + add_cool);
                *temp = clamp_unit(t);
            });
    }
}
