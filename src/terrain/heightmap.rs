//! Heightmap generation using fractal noise.

use rayon::prelude::*;

use crate::noise::NoiseSampler;
use crate::world::Position;
use super::map::Terrain;

/// Divisor mapping absolute player coordinates into noise space.
pub const LOCAL_COORD_SCALE: f32 = 100_000.0;

/// Maps a raw noise sample to a depth: `(n / 5 + 0.25) * world_depth`.
#[inline]
pub fn noise_to_depth(noise: f32, world_depth: f32) -> f32 {
    (noise / 5.0 + 0.25) * world_depth
}

impl Terrain {
    /// Fills the global depth map from noise keyed on `seed`.
    ///
    /// Cell `(i, j)` samples the noise at `(i/n, j/n, seed)`. The result is
    /// identical across runs for a fixed grid size and seed.
    pub fn gen_depth(&mut self, seed: i32) {
        let n = self.grid_size();
        let world_depth = self.world_depth;
        let samples = self.depth_noise.sample_block(0.0, 0.0, 1.0 / n as f32, n, seed as f32);

        self.depth_map
            .as_mut_slice()
            .par_iter_mut()
            .zip(samples.into_par_iter())
            .for_each(|(depth, noise)| *depth = noise_to_depth(noise, world_depth));
    }

    /// Re-samples the local patch centred on `player`.
    ///
    /// The patch is not a window into the global depth map; it is drawn from
    /// its own noise at the player's absolute position. Calling this twice with
    /// the same inputs yields the same patch.
    pub fn gen_local(&mut self, seed: i32, player: &Position) {
        let n = self.local_grid();
        let half = (n / 2) as i64;
        let world_depth = self.world_depth;
        let samples = self.local_noise.sample_block(
            (player.x_total - half) as f32,
            (player.y_total - half) as f32,
            1.0 / LOCAL_COORD_SCALE,
            n,
            seed as f32,
        );

        self.local_map
            .as_mut_slice()
            .par_iter_mut()
            .zip(samples.into_par_iter())
            .for_each(|(depth, noise)| *depth = noise_to_depth(noise, world_depth));
    }
}
