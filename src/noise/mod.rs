//! Noise generation module for terrain, wind and vegetation.
//!
//! Uses simdnoise for the underlying simplex evaluations.

mod fractal;

pub use fractal::{
    sample_fractal_noise, sample_fractal_noise_block, ConstantNoise, FractalNoise,
    FractalNoiseConfig, NoiseConfigError, NoiseSampler, MAX_OCTAVES, SIMPLEX_3D_SCALE,
};
