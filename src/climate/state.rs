//! Climate field storage and one-time seeding.

use std::sync::Arc;

use glam::DVec2;

use crate::config::WorldConfig;
use crate::grid::Grid;
use crate::noise::{FractalNoise, FractalNoiseConfig, NoiseConfigError, NoiseSampler};
use crate::terrain::Terrain;

use super::ClimateConfig;

/// Everything a `Climate` needs besides its fields: coefficients, the wind
/// source distance and the wind-direction noise.
///
/// Cloning is cheap; scratch simulations share the (immutable) sampler.
#[derive(Debug, Clone)]
pub struct ClimateModel {
    pub config: ClimateConfig,
    /// Distance in cells between a cell and its wind source.
    pub cell_size: usize,
    wind_noise: Arc<dyn NoiseSampler>,
}

impl ClimateModel {
    /// Builds the model with the standard wind-direction noise.
    pub fn new(config: &WorldConfig) -> Result<Self, NoiseConfigError> {
        let noise = FractalNoise::new(FractalNoiseConfig::wind())?;
        Ok(Self::with_wind_noise(config, Arc::new(noise)))
    }

    /// Builds the model around a caller-supplied wind sampler.
    pub fn with_wind_noise(config: &WorldConfig, wind_noise: Arc<dyn NoiseSampler>) -> Self {
        Self {
            config: config.climate.clone(),
            cell_size: config.cell_size(),
            wind_noise,
        }
    }

    pub fn wind_noise(&self) -> &dyn NoiseSampler {
        self.wind_noise.as_ref()
    }
}

/// Instantaneous and averaged atmosphere fields over the global grid.
#[derive(Debug, Clone)]
pub struct Climate {
    pub(crate) model: ClimateModel,

    // --- Current state ---
    pub temp_map: Grid<f32>,
    pub humidity_map: Grid<f32>,
    pub cloud_map: Grid<bool>,
    pub rain_map: Grid<bool>,
    pub wind_map: Grid<f32>,
    /// Today's wind direction, each component roughly in [-1.5, 1.5].
    pub wind_direction: DVec2,

    // --- Averages over the simulated horizon ---
    pub avg_rain_map: Grid<f32>,
    pub avg_wind_map: Grid<f32>,
    pub avg_cloud_map: Grid<f32>,
    pub avg_temp_map: Grid<f32>,
    pub avg_humidity_map: Grid<f32>,
}

impl Climate {
    /// Allocates zeroed fields of `grid_size²` cells.
    pub fn new(grid_size: usize, model: ClimateModel) -> Self {
        let zeros = Grid::filled(grid_size, 0.0f32);
        let falses = Grid::filled(grid_size, false);
        Self {
            model,
            temp_map: zeros.clone(),
            humidity_map: zeros.clone(),
            cloud_map: falses.clone(),
            rain_map: falses,
            wind_map: zeros.clone(),
            wind_direction: DVec2::ONE,
            avg_rain_map: zeros.clone(),
            avg_wind_map: zeros.clone(),
            avg_cloud_map: zeros.clone(),
            avg_temp_map: zeros.clone(),
            avg_humidity_map: zeros,
        }
    }

    /// A fresh, independent climate of the same size and model.
    pub fn scratch(&self) -> Self {
        Self::new(self.grid_size(), self.model.clone())
    }

    pub fn grid_size(&self) -> usize {
        self.temp_map.size()
    }

    pub fn model(&self) -> &ClimateModel {
        &self.model
    }

    pub fn config(&self) -> &ClimateConfig {
        &self.model.config
    }

    /// Seeds the simulation for `day`: computes the wind, then resets
    /// temperature, humidity, rain and clouds.
    pub fn init(&mut self, day: u32, seed: i32, terrain: &Terrain) {
        self.calc_wind(day, seed, terrain);
        self.init_temp_map(terrain);
        self.init_humidity_map(terrain);
        self.init_rain_map();
        self.init_cloud_map();
    }

    /// Sea cells start at `sea_temp`; land cools linearly with depth.
    pub fn init_temp_map(&mut self, terrain: &Terrain) {
        let cfg = &self.model.config;
        for (temp, &depth) in self
            .temp_map
            .as_mut_slice()
            .iter_mut()
            .zip(terrain.depth_map.iter())
        {
            *temp = if depth > cfg.sea_level {
                1.0 - depth / cfg.depth_scale
            } else {
                cfg.sea_temp
            };
        }
    }

    /// Water cells start wetter than land.
    pub fn init_humidity_map(&mut self, terrain: &Terrain) {
        let cfg = &self.model.config;
        for (humidity, &depth) in self
            .humidity_map
            .as_mut_slice()
            .iter_mut()
            .zip(terrain.depth_map.iter())
        {
            *humidity = if depth < cfg.sea_level {
                cfg.sea_humidity
            } else {
                cfg.land_humidity
            };
        }
    }

    pub fn init_cloud_map(&mut self) {
        self.cloud_map.fill(false);
    }

    pub fn init_rain_map(&mut self) {
        self.rain_map.fill(false);
    }
}
