//! Terrain erosion driven by the long-run climate average.

mod config;
mod decay;

pub use config::ErosionConfig;
pub use decay::erosion_decay;
