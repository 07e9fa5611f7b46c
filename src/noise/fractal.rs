//! Multi-octave fractal Brownian motion (fBm) noise.

use std::fmt::Debug;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;
use thiserror::Error;

/// Highest octave count accepted by [`FractalNoise::new`].
pub const MAX_OCTAVES: u8 = 30;

/// Rejected noise configurations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseConfigError {
    #[error("octave count {0} out of range (1..={MAX_OCTAVES})")]
    Octaves(u8),
    #[error("frequency must be finite and positive, got {0}")]
    Frequency(f32),
    #[error("persistence must lie in (0, 1], got {0}")]
    Persistence(f32),
    #[error("lacunarity must be finite and positive, got {0}")]
    Lacunarity(f32),
}

/// Configuration for multi-octave fractal noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves.
    pub octaves: u8,
    /// Base frequency applied to the input coordinates.
    pub frequency: f32,
    /// Frequency multiplier per octave.
    pub lacunarity: f32,
    /// Amplitude decay per octave.
    pub persistence: f32,
    /// Sampler seed. Callers key generation through the third coordinate
    /// instead, so this stays 0 for the built-in presets.
    pub seed: i32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 6,
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 0,
        }
    }
}

impl FractalNoiseConfig {
    /// Global heightfield: 12 octaves, frequency 2, persistence 0.6.
    pub fn depth() -> Self {
        Self {
            octaves: 12,
            frequency: 2.0,
            persistence: 0.6,
            ..Default::default()
        }
    }

    /// Local patch heightfield. Same recipe as [`Self::depth`].
    pub fn local() -> Self {
        Self::depth()
    }

    /// Daily wind direction: 2 octaves, frequency 4.
    pub fn wind() -> Self {
        Self {
            octaves: 2,
            frequency: 4.0,
            persistence: 0.5,
            ..Default::default()
        }
    }

    /// Vegetation placement: very fine, rough noise.
    pub fn vegetation() -> Self {
        Self {
            octaves: 20,
            frequency: 1000.0,
            persistence: 0.8,
            ..Default::default()
        }
    }

    /// Checks the parameters against the accepted ranges.
    pub fn validate(&self) -> Result<(), NoiseConfigError> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(NoiseConfigError::Octaves(self.octaves));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(NoiseConfigError::Frequency(self.frequency));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(NoiseConfigError::Persistence(self.persistence));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(NoiseConfigError::Lacunarity(self.lacunarity));
        }
        Ok(())
    }
}

/// A coherent noise source sampled at pseudo-3D coordinates.
pub trait NoiseSampler: Send + Sync + Debug {
    /// Returns a value centred on 0. One octave spans about [-1, 1].
    fn sample(&self, x: f32, y: f32, z: f32) -> f32;

    /// Samples an `n×n` lattice block, row-major, where cell `(i, j)` takes
    /// `sample((x0 + i) * step, (y0 + j) * step, z)`.
    fn sample_block(&self, x0: f32, y0: f32, step: f32, n: usize, z: f32) -> Vec<f32> {
        (0..n * n)
            .into_par_iter()
            .map(|cell| {
                let x = (x0 + (cell / n) as f32) * step;
                let y = (y0 + (cell % n) as f32) * step;
                self.sample(x, y, z)
            })
            .collect()
    }
}

/// Validated fractal noise sampler.
#[derive(Debug, Clone)]
pub struct FractalNoise {
    config: FractalNoiseConfig,
}

impl FractalNoise {
    /// Builds a sampler, rejecting out-of-range parameters.
    pub fn new(config: FractalNoiseConfig) -> Result<Self, NoiseConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FractalNoiseConfig {
        &self.config
    }
}

impl NoiseSampler for FractalNoise {
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        sample_fractal_noise(x, y, z, &self.config)
    }

    fn sample_block(&self, x0: f32, y0: f32, step: f32, n: usize, z: f32) -> Vec<f32> {
        sample_fractal_noise_block(x0, y0, step, n, z, &self.config)
    }
}

/// Sampler that returns the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSampler for ConstantNoise {
    fn sample(&self, _x: f32, _y: f32, _z: f32) -> f32 {
        self.0
    }
}

/// Output scale that brings one raw simplex octave into about [-1, 1].
///
/// simdnoise returns 3D simplex values without the final `* 32` of the
/// FastNoise formulation it ports, so a bare octave peaks near 0.03.
pub const SIMPLEX_3D_SCALE: f32 = 32.0;

/// Samples fractal noise at a 3D position.
///
/// Each octave is one simplex evaluation with a per-octave seed offset,
/// rescaled by [`SIMPLEX_3D_SCALE`]. Octaves are summed without dividing by
/// the total amplitude, so a single octave spans about [-1, 1] and the sum of
/// a high-persistence stack can reach past it. The depth preset at seed 15,
/// for instance, spans roughly [-1.6, 1.8] over the unit square.
pub fn sample_fractal_noise(x: f32, y: f32, z: f32, config: &FractalNoiseConfig) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = config.frequency;

    for octave in 0..config.octaves {
        let noise_value = NoiseBuilder::fbm_3d_offset(x * frequency, 1, y * frequency, 1, z * frequency, 1)
            .with_seed(octave_seed(config, octave))
            .with_freq(1.0)
            .with_octaves(1)
            .generate()
            .0[0];

        total += noise_value * SIMPLEX_3D_SCALE * amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    total
}

/// Samples fractal noise over an `n×n` block of a regular lattice.
///
/// Cell `(i, j)`, stored at `i * n + j`, takes the value at
/// `((x0 + i) * step, (y0 + j) * step, z)`. Every octave is generated as one
/// simdnoise block, and octaves run in parallel.
///
/// `step` must be positive.
pub fn sample_fractal_noise_block(
    x0: f32,
    y0: f32,
    step: f32,
    n: usize,
    z: f32,
    config: &FractalNoiseConfig,
) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }

    let octaves: Vec<(u8, f32, f32)> = (0..config.octaves)
        .scan((1.0f32, config.frequency), |(amplitude, frequency), octave| {
            let entry = (octave, *amplitude, *frequency);
            *amplitude *= config.persistence;
            *frequency *= config.lacunarity;
            Some(entry)
        })
        .collect();

    let layers: Vec<Vec<f32>> = octaves
        .into_par_iter()
        .map(|(octave, amplitude, frequency)| {
            // simdnoise multiplies every coordinate, z included, by the
            // builder frequency.
            let (block, _, _) = NoiseBuilder::fbm_3d_offset(x0, n, y0, n, z / step, 1)
                .with_seed(octave_seed(config, octave))
                .with_freq(step * frequency)
                .with_octaves(1)
                .generate();
            // simdnoise runs x fastest; transpose into row-major (i, j).
            let mut layer = vec![0.0f32; n * n];
            for (index, value) in block.into_iter().enumerate() {
                let (j, i) = (index / n, index % n);
                layer[i * n + j] = value * SIMPLEX_3D_SCALE * amplitude;
            }
            layer
        })
        .collect();

    // Summed in octave order so the result does not depend on scheduling.
    let mut total = vec![0.0f32; n * n];
    for layer in layers {
        for (t, v) in total.iter_mut().zip(layer) {
            *t += v;
        }
    }
    total
}

fn octave_seed(config: &FractalNoiseConfig, octave: u8) -> i32 {
    config.seed.wrapping_add(octave as i32 * 31337)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            FractalNoiseConfig::depth(),
            FractalNoiseConfig::local(),
            FractalNoiseConfig::wind(),
            FractalNoiseConfig::vegetation(),
        ] {
            assert!(FractalNoise::new(config).is_ok());
        }
    }

    #[test]
    fn rejects_misconfiguration() {
        let zero_octaves = FractalNoiseConfig { octaves: 0, ..Default::default() };
        assert_eq!(
            FractalNoise::new(zero_octaves).unwrap_err(),
            NoiseConfigError::Octaves(0)
        );

        let bad_freq = FractalNoiseConfig { frequency: -1.0, ..Default::default() };
        assert!(matches!(
            FractalNoise::new(bad_freq),
            Err(NoiseConfigError::Frequency(_))
        ));

        let bad_persistence = FractalNoiseConfig { persistence: 1.5, ..Default::default() };
        assert!(matches!(
            FractalNoise::new(bad_persistence),
            Err(NoiseConfigError::Persistence(_))
        ));

        let nan_lacunarity = FractalNoiseConfig { lacunarity: f32::NAN, ..Default::default() };
        assert!(matches!(
            FractalNoise::new(nan_lacunarity),
            Err(NoiseConfigError::Lacunarity(_))
        ));
    }

    #[test]
    fn noise_is_reproducible() {
        let noise = FractalNoise::new(FractalNoiseConfig::depth()).unwrap();
        let a = noise.sample(0.31, 0.72, 15.0);
        let b = noise.sample(0.31, 0.72, 15.0);
        assert_eq!(a, b, "same input should produce the same value");
    }

    #[test]
    fn noise_range() {
        let noise = FractalNoise::new(FractalNoiseConfig::depth()).unwrap();
        let values: Vec<f32> = (0..20)
            .flat_map(|i| (0..20).map(move |j| (i as f32 / 20.0, j as f32 / 20.0)))
            .map(|(x, y)| noise.sample(x, y, 15.0))
            .collect();

        let min = values.iter().copied().fold(f32::MAX, f32::min);
        let max = values.iter().copied().fold(f32::MIN, f32::max);
        // The octave amplitudes sum to about 2.49.
        assert!(min >= -2.5 && max <= 2.5, "noise {min}..{max} out of expected range");
        assert!(min < -0.8, "noise minimum {min} lacks spread");
        assert!(max > 0.8, "noise maximum {max} lacks spread");
    }

    #[test]
    fn single_octave_spans_unit_range() {
        let config = FractalNoiseConfig { octaves: 1, ..Default::default() };
        let noise = FractalNoise::new(config).unwrap();
        let values: Vec<f32> = (0..40)
            .flat_map(|i| (0..40).map(move |j| (i as f32 * 0.37, j as f32 * 0.37)))
            .map(|(x, y)| noise.sample(x, y, 0.5))
            .collect();

        let min = values.iter().copied().fold(f32::MAX, f32::min);
        let max = values.iter().copied().fold(f32::MIN, f32::max);
        assert!(min >= -1.1 && max <= 1.1, "octave {min}..{max} out of range");
        assert!(min < -0.6 && max > 0.6, "octave {min}..{max} lacks spread");
    }

    #[test]
    fn block_sampling_matches_single_samples() {
        let noise = FractalNoise::new(FractalNoiseConfig::depth()).unwrap();
        let n = 12;
        let step = 1.0 / 50.0;
        let block = noise.sample_block(3.0, 7.0, step, n, 15.0);
        assert_eq!(block.len(), n * n);

        for i in 0..n {
            for j in 0..n {
                let x = (3.0 + i as f32) * step;
                let y = (7.0 + j as f32) * step;
                let single = noise.sample(x, y, 15.0);
                assert!(
                    (block[i * n + j] - single).abs() < 1e-3,
                    "block {} vs single {single} at ({i}, {j})",
                    block[i * n + j]
                );
            }
        }
    }

    #[test]
    fn block_sampling_falls_back_to_per_cell() {
        let block = ConstantNoise(0.25).sample_block(0.0, 0.0, 0.1, 4, 1.0);
        assert_eq!(block, vec![0.25; 16]);
        assert!(FractalNoise::new(FractalNoiseConfig::wind())
            .unwrap()
            .sample_block(0.0, 0.0, 0.1, 0, 1.0)
            .is_empty());
    }

    #[test]
    fn constant_noise_ignores_input() {
        let noise = ConstantNoise(0.0);
        assert_eq!(noise.sample(1.0, 2.0, 3.0), 0.0);
        assert_eq!(noise.sample(-5.0, 0.5, 99.0), 0.0);
    }
}
