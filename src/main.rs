//! Territory CLI - procedural world generator.
//!
//! Generates a noise heightfield, erodes it with a simulated climate,
//! classifies biomes and exports the results as PNG images.

use clap::{Args, Parser, Subcommand};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::Instant;

use territory::config::{WorldConfig, MAX_GRID_SIZE, MAX_LOCAL_GRID, MIN_GRID_SIZE, MIN_LOCAL_GRID};
use territory::export::{
    export_biome_map_png, export_depth_png, export_overlays_png, ExportError, Overlay,
    PngExportOptions,
};
use territory::pipeline::Pipeline;
use territory::world::World;

/// Procedural world generator with climate-driven erosion.
#[derive(Parser)]
#[command(name = "territory")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and export its maps.
    Generate {
        #[command(flatten)]
        world: WorldArgs,

        /// Export all ten climate overlays in addition to the depth and biome maps.
        #[arg(long)]
        overlays: bool,
    },

    /// Generate a world, simulate a number of days and export the live climate.
    Simulate {
        #[command(flatten)]
        world: WorldArgs,

        /// Number of days to simulate after generation.
        #[arg(short, long, default_value = "30")]
        days: u32,
    },

    /// Display memory and cost estimates for a grid size.
    Info {
        /// Side length of the global grid.
        #[arg(short, long, default_value = "100")]
        grid_size: usize,
    },
}

#[derive(Args)]
struct WorldArgs {
    /// Side length of the global grid (50-1000).
    #[arg(short, long, default_value = "100")]
    grid_size: usize,

    /// Side length of the local patch (10-100).
    #[arg(short, long, default_value = "50")]
    local_grid: usize,

    /// Seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<i32>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "world")]
    name: String,

    /// Simulated years folded into the climate averages.
    #[arg(long, default_value = "1")]
    average_years: u32,

    /// Erosion passes during generation.
    #[arg(long, default_value = "1")]
    erosion_years: u32,
}

impl WorldArgs {
    fn to_config(&self) -> WorldConfig {
        let seed = self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos())
                .unwrap_or(0);
            (nanos & 0x7fff_ffff) as i32
        });

        let mut config = WorldConfig::new(self.grid_size, self.local_grid, seed);
        config.climate.average_years = self.average_years;
        config.erosion_years = self.erosion_years;
        config
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { world, overlays } => run_generate(&world, overlays),
        Commands::Simulate { world, days } => run_simulate(&world, days),
        Commands::Info { grid_size } => run_info(grid_size),
    }
}

fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error {what}: {e}");
        std::process::exit(1);
    })
}

/// Builds and generates a world, printing per-stage progress.
fn build_world(args: &WorldArgs) -> World {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&args.grid_size) {
        println!(
            "Note: grid size {} clamped into {MIN_GRID_SIZE}..={MAX_GRID_SIZE}",
            args.grid_size
        );
    }
    if !(MIN_LOCAL_GRID..=MAX_LOCAL_GRID).contains(&args.local_grid) {
        println!(
            "Note: local grid {} clamped into {MIN_LOCAL_GRID}..={MAX_LOCAL_GRID}",
            args.local_grid
        );
    }

    let config = args.to_config();
    println!("Territory - World Generation");
    println!("============================");
    println!("Grid:          {0}x{0}", config.grid_size);
    println!("Local patch:   {0}x{0}", config.local_grid);
    println!("Seed:          {}", config.seed);
    println!("Averaging:     {} day(s)", config.climate.horizon_days());
    println!("Erosion years: {}", config.erosion_years);
    println!();

    let pipeline = Pipeline::standard(&config);
    let mut world = exit_on_error(World::new(config), "creating world");

    let start = Instant::now();
    let stage_start = Cell::new(Instant::now());
    let result = pipeline.run_with_callbacks(
        &mut world,
        |name, i, total| {
            stage_start.set(Instant::now());
            println!("[{}/{}] {}...", i + 1, total, name);
        },
        |_, _, _| {
            println!("      done in {:.2?}", stage_start.get().elapsed());
        },
    );
    exit_on_error(result, "generating world");

    let (min, max) = world.terrain.depth_range();
    println!();
    println!("Generation completed in {:.2?}", start.elapsed());
    println!("Depth range: {min:.1} .. {max:.1}");
    print_biome_summary(&world);
    world
}

fn print_biome_summary(world: &World) {
    let total = world.terrain.biome_map.len() as f64;
    println!("Biomes:");
    for (id, &count) in world.terrain.biome_histogram().iter().enumerate() {
        if count == 0 {
            continue;
        }
        let name = territory::biomes::Biome::from_id(id as u8)
            .map(|b| b.name())
            .unwrap_or("?");
        println!("  {:<17} {:>6.2}%", name, count as f64 / total * 100.0);
    }
}

fn export_maps(world: &World, output: &Path, name: &str, overlays: &[Overlay]) -> Result<(), ExportError> {
    std::fs::create_dir_all(output)?;
    let options = PngExportOptions::default();

    let depth_path = output.join(format!("{name}_depth.png"));
    export_depth_png(&world.terrain, &depth_path, &options)?;
    println!("  Exported: {}", depth_path.display());

    let biome_path = output.join(format!("{name}_biomes.png"));
    export_biome_map_png(&world.terrain, &biome_path, &options)?;
    println!("  Exported: {}", biome_path.display());

    export_overlays_png(&world.climate, overlays, output, name, &options)?;
    for overlay in overlays {
        println!("  Exported: {}", output.join(format!("{name}_{overlay}.png")).display());
    }
    Ok(())
}

fn run_generate(args: &WorldArgs, overlays: bool) {
    let world = build_world(args);

    println!();
    println!("Exporting to {}...", args.output.display());
    let selected: &[Overlay] = if overlays { &Overlay::ALL } else { &[] };
    exit_on_error(export_maps(&world, &args.output, &args.name, selected), "exporting");
    println!("Done!");
}

fn run_simulate(args: &WorldArgs, days: u32) {
    let mut world = build_world(args);

    println!();
    println!("Simulating {days} day(s)...");
    let start = Instant::now();
    for _ in 0..days {
        world.advance_day();
    }
    let raining = world.climate.rain_map.iter().filter(|&&r| r).count();
    let cloudy = world.climate.cloud_map.iter().filter(|&&c| c).count();
    println!("Simulation completed in {:.2?}", start.elapsed());
    println!("Day {}: {cloudy} cloudy cell(s), {raining} raining", world.day);

    println!();
    println!("Exporting to {}...", args.output.display());
    exit_on_error(
        export_maps(&world, &args.output, &args.name, &Overlay::INSTANTANEOUS),
        "exporting",
    );
    println!("Done!");
}

fn run_info(grid_size: usize) {
    let config = WorldConfig::new(grid_size, 50, 0);
    let cells = (config.grid_size * config.grid_size) as u64;
    let local_cells = (config.local_grid * config.local_grid) as u64;

    // depth + 5 instantaneous f32/bool fields + 5 averages
    let bytes_terrain = cells * 4 + cells + local_cells * 4;
    let bytes_climate = cells * 4 * 3 + cells * 2 + cells * 4 * 5;
    // erosion and averaging each hold one scratch climate at a time
    let bytes_scratch = bytes_climate;
    let total = bytes_terrain + bytes_climate + bytes_scratch;
    let days = config.climate.horizon_days() as u64;
    let steps = days * (config.erosion_years as u64 + 1);

    println!("Territory - World Configuration Info");
    println!("====================================");
    println!();
    println!("Grid: {0}x{0} ({1} cells)", config.grid_size, cells);
    println!("Wind source distance: {} cell(s)", config.cell_size());
    println!();
    println!("Memory usage (in-memory):");
    println!("  Terrain:  {:>12} bytes ({:.2} MB)", bytes_terrain, bytes_terrain as f64 / 1024.0 / 1024.0);
    println!("  Climate:  {:>12} bytes ({:.2} MB)", bytes_climate, bytes_climate as f64 / 1024.0 / 1024.0);
    println!("  Scratch:  {:>12} bytes ({:.2} MB)", bytes_scratch, bytes_scratch as f64 / 1024.0 / 1024.0);
    println!("  Total:    {:>12} bytes ({:.2} MB)", total, total as f64 / 1024.0 / 1024.0);
    println!();
    println!("Generation cost:");
    println!("  Simulated days: {steps} ({days} per averaging pass)");
    println!("  Cell updates:   {}", steps * cells * 4);
}
