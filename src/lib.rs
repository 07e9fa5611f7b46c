//! Procedural world generator.
//!
//! This crate generates a noise heightfield over a square grid, erodes it
//! using a simulated long-run climate, derives a biome map, and exposes the
//! per-day climate simulation (wind, temperature, humidity, clouds and rain)
//! for callers that drive it afterwards.

pub mod biomes;
pub mod climate;
pub mod config;
pub mod erosion;
pub mod export;
pub mod grid;
pub mod noise;
pub mod pipeline;
pub mod terrain;
pub mod vegetation;
pub mod world;

pub use biomes::{Biome, BiomeConfig};
pub use climate::{Climate, ClimateConfig, ClimateModel, Downfall};
pub use config::{ConfigError, WorldConfig};
pub use erosion::ErosionConfig;
pub use grid::Grid;
pub use noise::{FractalNoise, FractalNoiseConfig, NoiseConfigError, NoiseSampler};
pub use pipeline::{GenerationStage, Pipeline, PipelineError, StageId};
pub use terrain::Terrain;
pub use vegetation::Vegetation;
pub use world::{Direction, Position, World, WorldError};
