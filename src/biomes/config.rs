//! Biome threshold table.

use serde::{Deserialize, Serialize};

/// Depth and rainfall cutoffs used by biome classification.
///
/// Depth cutoffs are inclusive upper bounds except `gravel_beach`, which is
/// strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub water: f32,
    pub sandy_beach: f32,
    pub gravel_beach: f32,
    pub stony_cliff: f32,
    pub plains: f32,
    pub temperate_forest: f32,
    pub forest: f32,
    pub mountain_tundra: f32,

    /// Averaged rain at or above which plains are wet.
    pub wet_plains_rain: f32,
    /// Averaged rain below which forest may turn into rocky hills.
    pub rocky_hills_rain: f32,

    // --- Rocky hills region ---
    /// Jittered row/column must lie strictly between these bounds.
    pub rocky_hills_min: i64,
    pub rocky_hills_max: i64,
    /// Jitter offsets are drawn from `-jitter..jitter`.
    pub rocky_hills_jitter: i64,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            water: 200.0,
            sandy_beach: 204.0,
            gravel_beach: 210.0,
            stony_cliff: 220.0,
            plains: 600.0,
            temperate_forest: 1100.0,
            forest: 1300.0,
            mountain_tundra: 1500.0,

            wet_plains_rain: 0.02,
            rocky_hills_rain: 0.001,

            rocky_hills_min: 5,
            rocky_hills_max: 95,
            rocky_hills_jitter: 2,
        }
    }
}
