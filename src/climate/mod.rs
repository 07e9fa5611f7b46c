//! Daily climate simulation over the global grid.
//!
//! Wind is derived from the daily wind direction and the terrain gradient;
//! temperature, humidity, clouds and rain are then carried downwind and
//! updated in that order. `calc_average` runs the same loop on a scratch
//! climate to produce long-run averages for erosion and biome assignment.

mod average;
mod config;
mod moisture;
mod state;
mod temperature;
mod util;
mod wind;

pub use average::running_mean;
pub use config::ClimateConfig;
pub use moisture::Downfall;
pub use state::{Climate, ClimateModel};
pub use util::{advect, source_cell, source_coord};
pub use wind::wind_direction;
