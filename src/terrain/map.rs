//! Terrain data: global depth grid, local patch and biome classification.

use crate::biomes::{Biome, BiomeConfig};
use crate::config::WorldConfig;
use crate::erosion::ErosionConfig;
use crate::grid::Grid;
use crate::noise::{FractalNoise, FractalNoiseConfig, NoiseConfigError};

/// Elevation and surface data for one world.
#[derive(Debug, Clone)]
pub struct Terrain {
    /// Maximum depth produced by noise before erosion.
    pub world_depth: f32,
    /// Elevation per cell, `grid_size²` cells.
    pub depth_map: Grid<f32>,
    /// Surface classification per cell (populated by `gen_biome`).
    pub biome_map: Grid<Biome>,
    /// Independently-noised patch around the player, `local_grid²` cells.
    pub local_map: Grid<f32>,
    pub(crate) depth_noise: FractalNoise,
    pub(crate) local_noise: FractalNoise,
    pub(crate) biome_config: BiomeConfig,
    pub(crate) erosion_config: ErosionConfig,
}

impl Terrain {
    /// Allocates zeroed grids sized from `config`.
    pub fn new(config: &WorldConfig) -> Result<Self, NoiseConfigError> {
        Ok(Self {
            world_depth: config.world_depth,
            depth_map: Grid::filled(config.grid_size, 0.0),
            biome_map: Grid::filled(config.grid_size, Biome::default()),
            local_map: Grid::filled(config.local_grid, 0.0),
            depth_noise: FractalNoise::new(FractalNoiseConfig::depth())?,
            local_noise: FractalNoise::new(FractalNoiseConfig::local())?,
            biome_config: config.biomes.clone(),
            erosion_config: config.erosion.clone(),
        })
    }

    /// Side length of the global grid.
    pub fn grid_size(&self) -> usize {
        self.depth_map.size()
    }

    /// Side length of the local patch.
    pub fn local_grid(&self) -> usize {
        self.local_map.size()
    }

    /// Minimum and maximum depth across the global grid.
    pub fn depth_range(&self) -> (f32, f32) {
        self.depth_map
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), &d| (min.min(d), max.max(d)))
    }
}
