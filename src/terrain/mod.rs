//! Terrain generation module.
//!
//! Provides the `Terrain` data structure and noise-based heightmap generation.
//! Erosion lives in `crate::erosion`, biome classification in `crate::biomes`.

mod map;
mod heightmap;

pub use map::Terrain;
pub use heightmap::{noise_to_depth, LOCAL_COORD_SCALE};
