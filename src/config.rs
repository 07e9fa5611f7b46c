//! World-level configuration threaded into every subsystem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::BiomeConfig;
use crate::climate::ClimateConfig;
use crate::erosion::ErosionConfig;

pub const MIN_GRID_SIZE: usize = 50;
pub const MAX_GRID_SIZE: usize = 1000;
pub const MIN_LOCAL_GRID: usize = 10;
pub const MAX_LOCAL_GRID: usize = 100;

/// Errors raised while validating a [`WorldConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid size {0} out of range ({MIN_GRID_SIZE}..={MAX_GRID_SIZE})")]
    GridSize(usize),
    #[error("local grid {0} out of range ({MIN_LOCAL_GRID}..={MAX_LOCAL_GRID})")]
    LocalGrid(usize),
    #[error("screen width must be positive")]
    ScreenWidth,
    #[error("averaging horizon must cover at least one day")]
    EmptyHorizon,
}

/// Immutable parameters for one world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the global grid.
    pub grid_size: usize,
    /// Side length of the local patch.
    pub local_grid: usize,
    /// Noise determinism key.
    pub seed: i32,
    /// Nominal render width in pixels; fixes the wind source offset.
    pub screen_width: usize,
    /// Maximum terrain depth produced by noise.
    pub world_depth: f32,
    /// Erosion passes run during generation.
    pub erosion_years: u32,
    pub climate: ClimateConfig,
    pub erosion: ErosionConfig,
    pub biomes: BiomeConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            local_grid: 50,
            seed: 15,
            screen_width: 1000,
            world_depth: 4000.0,
            erosion_years: 1,
            climate: ClimateConfig::default(),
            erosion: ErosionConfig::default(),
            biomes: BiomeConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Builds a configuration, clamping the grid sizes into their valid ranges.
    pub fn new(grid_size: usize, local_grid: usize, seed: i32) -> Self {
        Self {
            grid_size: clamp_grid_size(grid_size),
            local_grid: clamp_local_grid(local_grid),
            seed,
            ..Default::default()
        }
    }

    /// Pixels per grid cell at the nominal render width.
    ///
    /// Also the distance, in cells, between a cell and its wind source.
    pub fn cell_size(&self) -> usize {
        (self.screen_width / self.grid_size.max(1)).max(1)
    }

    /// Checks values that bypassed [`WorldConfig::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(MIN_LOCAL_GRID..=MAX_LOCAL_GRID).contains(&self.local_grid) {
            return Err(ConfigError::LocalGrid(self.local_grid));
        }
        if self.screen_width == 0 {
            return Err(ConfigError::ScreenWidth);
        }
        if self.climate.horizon_days() == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        Ok(())
    }
}

pub fn clamp_grid_size(grid_size: usize) -> usize {
    grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}

pub fn clamp_local_grid(local_grid: usize) -> usize {
    local_grid.clamp(MIN_LOCAL_GRID, MAX_LOCAL_GRID)
}
