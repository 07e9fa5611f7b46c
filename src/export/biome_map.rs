//! Biome map export.

use std::path::Path;

use image::{ImageBuffer, ImageEncoder, Rgb};

use crate::terrain::Terrain;

use super::png::{image_side, png_encoder, ExportError, PngExportOptions};

/// Export the biome map as an RGB PNG using each biome's map color.
pub fn export_biome_map_png(terrain: &Terrain, path: &Path, options: &PngExportOptions) -> Result<(), ExportError> {
    let biomes = &terrain.biome_map;
    let side = image_side(biomes)?;
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(side, side, |x, y| Rgb(biomes[(x as usize, y as usize)].preview_rgb()));

    let encoder = png_encoder(path, options)?;
    encoder.write_image(img.as_raw(), side, side, image::ExtendedColorType::Rgb8)?;
    Ok(())
}
