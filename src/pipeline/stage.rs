//! Generation stage trait and pipeline orchestration.

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::config::WorldConfig;
use crate::world::World;

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Noise heightfield over the global grid.
    Depth,
    /// Climate-driven decay of the heightfield.
    Erosion,
    /// Climate seeding and long-run averaging on the eroded terrain.
    Climate,
    /// Biome classification.
    Biomes,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Depth => "depth",
            StageId::Erosion => "erosion",
            StageId::Climate => "climate",
            StageId::Biomes => "biomes",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the world in place, building upon the stages
/// listed in [`GenerationStage::dependencies`].
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the world in place.
    fn execute(&self, world: &mut World) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full generation sequence: depth, erosion, climate, biomes.
    pub fn standard(config: &WorldConfig) -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(DepthStage)
            .add_stage(ErosionStage::new(config.erosion_years))
            .add_stage(ClimateStage)
            .add_stage(BiomeStage::default());
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given world.
    pub fn run(&self, world: &mut World) -> Result<(), PipelineError> {
        self.run_with_callbacks(world, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `world` - The world to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        world: &mut World,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(world)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Noise heightfield stage.
pub struct DepthStage;

impl GenerationStage for DepthStage {
    fn id(&self) -> StageId {
        StageId::Depth
    }

    fn name(&self) -> &str {
        "Depth Generation"
    }

    fn execute(&self, world: &mut World) -> Result<(), PipelineError> {
        let seed = world.seed();
        world.terrain.gen_depth(seed);

        let (min, max) = world.terrain.depth_range();
        if !(min.is_finite() && max.is_finite()) {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                "noise produced non-finite depth".to_string(),
            ));
        }
        info!("depth generated: {min:.1}..{max:.1}");
        Ok(())
    }
}

/// Climate-driven erosion stage.
pub struct ErosionStage {
    /// Erosion passes; each one simulates a full averaging horizon.
    pub years: u32,
}

impl ErosionStage {
    pub fn new(years: u32) -> Self {
        Self { years }
    }
}

impl GenerationStage for ErosionStage {
    fn id(&self) -> StageId {
        StageId::Erosion
    }

    fn name(&self) -> &str {
        "Erosion"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Depth]
    }

    fn execute(&self, world: &mut World) -> Result<(), PipelineError> {
        let seed = world.seed();
        let model = world.climate.model().clone();
        world.terrain.erode(seed, self.years, &model);

        let (min, max) = world.terrain.depth_range();
        info!("erosion finished after {} year(s): {min:.1}..{max:.1}", self.years);
        Ok(())
    }
}

/// Seeds the live climate and computes the long-run averages.
pub struct ClimateStage;

impl GenerationStage for ClimateStage {
    fn id(&self) -> StageId {
        StageId::Climate
    }

    fn name(&self) -> &str {
        "Climate Simulation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Depth]
    }

    fn execute(&self, world: &mut World) -> Result<(), PipelineError> {
        let days = world.climate.config().horizon_days();
        if days == 0 {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                "averaging horizon is empty".to_string(),
            ));
        }

        let (seed, day) = (world.seed(), world.day);
        world.climate.init(day, seed, &world.terrain);
        world.climate.calc_average(seed, &world.terrain);
        info!("climate averaged over {days} days");
        Ok(())
    }
}

/// Biome classification stage.
///
/// Uses the thread-local generator for the rocky-hills jitter unless a seed
/// is given.
#[derive(Default)]
pub struct BiomeStage {
    pub jitter_seed: Option<u64>,
}

impl BiomeStage {
    /// Classification with a reproducible jitter stream.
    pub fn seeded(seed: u64) -> Self {
        Self {
            jitter_seed: Some(seed),
        }
    }
}

impl GenerationStage for BiomeStage {
    fn id(&self) -> StageId {
        StageId::Biomes
    }

    fn name(&self) -> &str {
        "Biome Classification"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Climate]
    }

    fn execute(&self, world: &mut World) -> Result<(), PipelineError> {
        match self.jitter_seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                world.terrain.gen_biome_with_rng(&world.climate, &mut rng);
            }
            None => world.terrain.gen_biome(&world.climate),
        }

        let histogram = world.terrain.biome_histogram();
        let water = histogram[0] as f32 / world.terrain.biome_map.len() as f32;
        info!("biomes classified: {:.1}% water", water * 100.0);
        Ok(())
    }
}
