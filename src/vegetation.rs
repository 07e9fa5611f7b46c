//! Per-cell tree placement for the local patch.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::noise::{FractalNoise, FractalNoiseConfig, NoiseConfigError, NoiseSampler};
use crate::terrain::LOCAL_COORD_SCALE;
use crate::world::{Position, World};

/// Noise-driven vegetation presence test.
#[derive(Debug, Clone)]
pub struct Vegetation {
    noise: FractalNoise,
}

/// Seed for the tree draw at absolute cell `(x, y)`.
fn cell_seed(x: i64, y: i64, world_seed: i32) -> u64 {
    const K1: u64 = 0x9e37_79b9_7f4a_7c15;
    const K2: u64 = 0xc2b2_ae3d_27d4_eb4f;
    (x as u64).wrapping_mul(K1) ^ (y as u64).wrapping_mul(K2) ^ (world_seed as u32 as u64)
}

/// `floor(1 / (n + 1))`, saturating at zero for samples at or below -1.
fn density_factor(noise: f32) -> u64 {
    let shifted = noise + 1.0;
    if shifted <= 0.0 {
        return 0;
    }
    (1.0 / shifted).floor() as u64
}

impl Vegetation {
    pub fn new() -> Result<Self, NoiseConfigError> {
        Ok(Self {
            noise: FractalNoise::new(FractalNoiseConfig::vegetation())?,
        })
    }

    /// Whether a tree stands at local cell `(i, j)` of the patch centred on
    /// `player`.
    ///
    /// Only cells where the vegetation noise is non-positive can carry a
    /// tree; of those, roughly one in five does. The answer depends only on
    /// the absolute cell, the world seed and the noise, so repeated calls
    /// agree.
    pub fn get_tree(&self, world: &World, player: &Position, i: usize, j: usize) -> bool {
        let half = (world.local_grid() / 2) as i64;
        let cell_x = player.x_total - half + i as i64;
        let cell_y = player.y_total - half + j as i64;

        let x = cell_x as f32 / LOCAL_COORD_SCALE;
        let y = cell_y as f32 / LOCAL_COORD_SCALE;
        let n = self.noise.sample(x, y, (world.seed() + 1) as f32);

        let mut rng = ChaCha8Rng::seed_from_u64(cell_seed(cell_x, cell_y, world.seed()));
        let r = rng.next_u32() as u64;
        density_factor(n).wrapping_mul(r) % 5 == 4
    }
}
