//! Export module for saving world data as PNG images.
//!
//! Depth and climate fields are written as 16-bit grayscale, the biome map as
//! RGB using the biome palette.

mod biome_map;
mod overlay;
mod png;

pub use biome_map::export_biome_map_png;
pub use overlay::{export_overlay_png, export_overlays_png, Overlay};
pub use png::{export_depth_png, export_grid_png_f32, ExportError, PngExportOptions};
