//! Humidity transport and cloud/rain formation.

use rayon::prelude::*;

use crate::terrain::Terrain;

use super::util::{advect, clamp_unit};
use super::{Climate, ClimateConfig};

/// Sky state of one cell after condensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downfall {
    Rain,
    Cloud,
    Clear,
}

impl Downfall {
    /// Classifies a humidity/temperature pair.
    ///
    /// Warmer air holds more water, so both thresholds rise with temperature.
    pub fn classify(humidity: f32, temp: f32, cfg: &ClimateConfig) -> Self {
        if humidity >= cfg.rain_base + cfg.rain_slope * temp {
            Downfall::Rain
        } else if humidity >= cfg.cloud_base + cfg.cloud_slope * temp {
            Downfall::Cloud
        } else {
            Downfall::Clear
        }
    }
}

impl Climate {
    /// Advances the humidity field by one day.
    ///
    /// Interior cells take the upwind humidity, are replaced by the 3×3 mean of
    /// the advected field, then gain moisture under clear skies (more over
    /// warm water) and lose a share of it when raining.
    pub fn calc_humidity_map(&mut self, terrain: &Terrain) {
        let cfg = &self.model.config;
        let n = self.grid_size();
        let advected = advect(
            &self.humidity_map,
            &self.wind_map,
            self.wind_direction,
            cfg.advection_scale as f64,
        );

        let depth = &terrain.depth_map;
        let temp = &self.temp_map;
        let cloud = &self.cloud_map;
        let rain = &self.rain_map;

        self.humidity_map
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(cell, humidity)| {
                let (i, j) = (cell / n, cell % n);
                if advected.is_border(i, j) {
                    return;
                }

                let mut sum = 0.0f32;
                for di in i - 1..=i + 1 {
                    for dj in j - 1..=j + 1 {
                        sum += advected[(di, dj)];
                    }
                }
                let mut h = sum / 9.0;

                let add_humidity = if cloud[cell] {
                    0.0
                } else if depth[cell] <= cfg.sea_level {
                    cfg.sea_evaporation * temp[cell]
                } else {
                    cfg.land_evaporation
                };
                let add_rain = if rain[cell] { -h * cfg.rainout } else { 0.0 };

                h += h * add_rain + (1.0 - h) * add_humidity;
                *humidity = clamp_unit(h);
            });
    }

    /// Moves clouds downwind, then re-derives clouds and rain from today's
    /// humidity and temperature.
    ///
    /// Rain cells keep the cloud cover carried in by the wind; cloud-only and
    /// clear cells are fully reclassified, so carried rain never survives the
    /// reclassification. Border cells are left untouched.
    pub fn calc_downfall_map(&mut self) {
        let cfg = &self.model.config;
        let n = self.grid_size();
        let carried_cloud = advect(
            &self.cloud_map,
            &self.wind_map,
            self.wind_direction,
            cfg.advection_scale as f64,
        );

        let states: Vec<(bool, bool)> = (0..n * n)
            .into_par_iter()
            .map(|cell| {
                let (i, j) = (cell / n, cell % n);
                if carried_cloud.is_border(i, j) {
                    return (self.cloud_map[cell], self.rain_map[cell]);
                }
                match Downfall::classify(self.humidity_map[cell], self.temp_map[cell], cfg) {
                    Downfall::Rain => (carried_cloud[cell], true),
                    Downfall::Cloud => (true, false),
                    Downfall::Clear => (false, false),
                }
            })
            .collect();

        for (cell, (cloud, rain)) in states.into_iter().enumerate() {
            self.cloud_map[cell] = cloud;
            self.rain_map[cell] = rain;
        }
    }
}
