//! Pipeline module for orchestrating world generation stages.
//!
//! Provides a trait-based architecture for modular generation stages
//! that compose into the standard depth, erosion, climate, biome sequence.

mod stage;

pub use stage::{
    BiomeStage, ClimateStage, DepthStage, ErosionStage, GenerationStage, Pipeline, PipelineError,
    StageId,
};
