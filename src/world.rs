//! The world: one terrain and one climate over a shared grid and seed.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::climate::{Climate, ClimateModel};
use crate::config::{clamp_grid_size, clamp_local_grid, ConfigError, WorldConfig};
use crate::noise::NoiseConfigError;
use crate::pipeline::{Pipeline, PipelineError};
use crate::terrain::Terrain;
use crate::vegetation::Vegetation;

/// Errors raised while building a [`World`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("invalid world configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid noise configuration: {0}")]
    Noise(#[from] NoiseConfigError),
}

/// Absolute player position in local-grid cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x_total: i64,
    pub y_total: i64,
}

impl Position {
    pub fn new(x_total: i64, y_total: i64) -> Self {
        Self { x_total, y_total }
    }
}

/// Pan direction for the view offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Terrain, climate and vegetation for one seed.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    /// Simulated days since generation.
    pub day: u32,
    /// View offset consumed by renderers, in local-grid cells.
    pub x_view: i64,
    pub y_view: i64,
    pub terrain: Terrain,
    pub climate: Climate,
    pub vegetation: Vegetation,
}

impl World {
    /// Allocates every grid once. Grid sizes are clamped into range; other
    /// fields are validated.
    pub fn new(mut config: WorldConfig) -> Result<Self, WorldError> {
        config.grid_size = clamp_grid_size(config.grid_size);
        config.local_grid = clamp_local_grid(config.local_grid);
        config.validate()?;

        let terrain = Terrain::new(&config)?;
        let climate = Climate::new(config.grid_size, ClimateModel::new(&config)?);
        let vegetation = Vegetation::new()?;
        let view = config.local_grid as i64;

        debug!(
            "world allocated: grid {0}x{0}, local {1}x{1}, seed {2}",
            config.grid_size, config.local_grid, config.seed
        );

        Ok(Self {
            config,
            day: 0,
            x_view: view,
            y_view: view,
            terrain,
            climate,
            vegetation,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> i32 {
        self.config.seed
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn local_grid(&self) -> usize {
        self.config.local_grid
    }

    /// Runs the standard generation pipeline: depth, erosion, climate
    /// averaging and biome classification.
    pub fn generate(&mut self) -> Result<(), PipelineError> {
        info!("generating world with seed {}", self.seed());
        Pipeline::standard(&self.config).run(self)
    }

    /// Advances the live climate by one day.
    pub fn advance_day(&mut self) {
        self.day += 1;
        let seed = self.config.seed;
        self.climate.step(self.day, seed, &self.terrain);
    }

    /// Pans the view by one local grid in `direction`.
    pub fn change_pos(&mut self, direction: Direction) {
        let step = self.config.local_grid as i64;
        match direction {
            Direction::Up => self.y_view -= step,
            Direction::Down => self.y_view += step,
            Direction::Left => self.x_view -= step,
            Direction::Right => self.x_view += step,
        }
    }

    /// Re-samples the local patch around `player`.
    pub fn gen_local(&mut self, player: &Position) {
        let seed = self.config.seed;
        self.terrain.gen_local(seed, player);
    }

    /// Whether a tree stands at local cell `(i, j)` around `player`.
    pub fn has_tree(&self, player: &Position, i: usize, j: usize) -> bool {
        self.vegetation.get_tree(self, player, i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::Biome;

    fn short_horizon(grid_size: usize, seed: i32) -> WorldConfig {
        let mut config = WorldConfig::new(grid_size, 20, seed);
        config.climate.days_per_year = 30;
        config
    }

    #[test]
    fn new_clamps_and_starts_view_at_local_grid() {
        let config = WorldConfig {
            grid_size: 3,
            local_grid: 4,
            ..Default::default()
        };
        let world = World::new(config).unwrap();
        assert_eq!(world.grid_size(), 50);
        assert_eq!(world.local_grid(), 10);
        assert_eq!((world.x_view, world.y_view), (10, 10));
        assert_eq!(world.terrain.depth_map.len(), 2500);
        assert_eq!(world.terrain.local_map.len(), 100);
    }

    #[test]
    fn new_rejects_zero_screen_width() {
        let config = WorldConfig {
            screen_width: 0,
            ..Default::default()
        };
        assert_eq!(
            World::new(config).unwrap_err(),
            WorldError::Config(ConfigError::ScreenWidth)
        );
    }

    #[test]
    fn generate_end_to_end() {
        let mut world = World::new(WorldConfig::new(50, 20, 15)).unwrap();
        world.generate().unwrap();

        assert!(world.terrain.depth_map.iter().all(|d| d.is_finite()));
        assert!(world
            .terrain
            .biome_map
            .iter()
            .all(|b| b.id() <= Biome::MountainPeak.id()));
        for grid in [&world.climate.avg_rain_map, &world.climate.avg_humidity_map] {
            assert!(grid.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }

        let histogram = world.terrain.biome_histogram();
        assert!(histogram[Biome::Water.id() as usize] > 0, "no water in {histogram:?}");
        assert!(histogram[Biome::MountainPeak.id() as usize] > 0, "no peaks in {histogram:?}");
        let bands = histogram.iter().filter(|&&count| count > 0).count();
        assert!(bands >= 4, "only {bands} biome band(s): {histogram:?}");
    }

    #[test]
    fn change_pos_pans_by_local_grid() {
        let mut world = World::new(short_horizon(50, 1)).unwrap();
        world.change_pos(Direction::Up);
        assert_eq!((world.x_view, world.y_view), (20, 0));
        world.change_pos(Direction::Right);
        world.change_pos(Direction::Right);
        assert_eq!((world.x_view, world.y_view), (60, 0));
        world.change_pos(Direction::Down);
        world.change_pos(Direction::Left);
        assert_eq!((world.x_view, world.y_view), (40, 20));
    }

    #[test]
    fn advance_day_keeps_fields_in_range() {
        let mut world = World::new(short_horizon(50, 15)).unwrap();
        world.generate().unwrap();
        let border_temp = world.climate.temp_map[(0, 7)];

        for _ in 0..5 {
            world.advance_day();
        }
        assert_eq!(world.day, 5);
        assert!(world.climate.temp_map.iter().all(|&t| (0.0..=1.0).contains(&t)));
        assert!(world.climate.humidity_map.iter().all(|&h| (0.0..=1.0).contains(&h)));
        assert_eq!(world.climate.temp_map[(0, 7)], border_temp);
    }

    #[test]
    fn gen_local_only_touches_local_patch() {
        let mut world = World::new(short_horizon(50, 2)).unwrap();
        world.terrain.gen_depth(2);
        let depth = world.terrain.depth_map.clone();

        world.gen_local(&Position::new(1234, -77));
        assert_eq!(world.terrain.depth_map, depth);
        assert!(world.terrain.local_map.iter().any(|&d| d != 0.0));
    }
}
