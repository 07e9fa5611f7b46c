//! 16-bit grayscale PNG export for scalar grids.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::grid::Grid;
use crate::terrain::Terrain;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidRange(f32, f32),
    #[error("grid of size {size} does not fit in an image")]
    TooLarge { size: usize },
}

/// Encoder settings shared by every exporter.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

pub(crate) fn image_side<T>(grid: &Grid<T>) -> Result<u32, ExportError> {
    u32::try_from(grid.size()).map_err(|_| ExportError::TooLarge { size: grid.size() })
}

pub(crate) fn png_encoder(path: &Path, options: &PngExportOptions) -> Result<PngEncoder<BufWriter<File>>, ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    Ok(PngEncoder::new_with_quality(writer, options.compression, options.filter))
}

/// Exports a scalar grid as a 16-bit grayscale PNG.
///
/// Cell `(i, j)` becomes pixel `(x = i, y = j)`. Values are mapped linearly
/// from `[min_value, max_value]` to the full 16-bit range and clamped.
pub fn export_grid_png_f32(
    grid: &Grid<f32>,
    path: &Path,
    min_value: f32,
    max_value: f32,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    if !(min_value < max_value) {
        return Err(ExportError::InvalidRange(min_value, max_value));
    }
    let side = image_side(grid)?;

    let range = max_value - min_value;
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(side, side, |x, y| {
        let v = grid[(x as usize, y as usize)];
        let normalized = ((v - min_value) / range).clamp(0.0, 1.0);
        Luma([(normalized * 65535.0) as u16])
    });

    let encoder = png_encoder(path, options)?;
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, side, side, image::ExtendedColorType::L16)?;
    Ok(())
}

/// Exports the terrain depth map, normalized to its own depth range.
///
/// A perfectly flat map is exported as black.
pub fn export_depth_png(terrain: &Terrain, path: &Path, options: &PngExportOptions) -> Result<(), ExportError> {
    let (min, max) = terrain.depth_range();
    let max = if max > min { max } else { min + 1.0 };
    export_grid_png_f32(&terrain.depth_map, path, min, max, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use tempfile::tempdir;

    #[test]
    fn test_export_gradient_png() {
        let n = 64;
        let grid = Grid::from_vec(n, (0..n * n).map(|c| (c % n) as f32 / n as f32).collect());

        let dir = tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        export_grid_png_f32(&grid, &path, 0.0, 1.0, &PngExportOptions::default()).unwrap();

        let img = image::open(&path).unwrap().into_luma16();
        assert_eq!(img.dimensions(), (64, 64));
        // Pixel (x, y) is cell (x, y): values grow along y.
        assert_eq!(img.get_pixel(5, 0)[0], 0);
        assert!(img.get_pixel(5, 63)[0] > img.get_pixel(5, 1)[0]);
    }

    #[test]
    fn test_invalid_range() {
        let grid = Grid::filled(8, 0.5f32);
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let result = export_grid_png_f32(&grid, &path, 1.0, -1.0, &PngExportOptions::default());
        assert!(matches!(result, Err(ExportError::InvalidRange(..))));
    }

    #[test]
    fn test_export_depth_png() {
        let config = WorldConfig::new(50, 20, 15);
        let mut terrain = Terrain::new(&config).unwrap();
        terrain.gen_depth(15);

        let dir = tempdir().unwrap();
        let path = dir.path().join("depth.png");
        export_depth_png(&terrain, &path, &PngExportOptions::default()).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_flat_depth_exports() {
        let config = WorldConfig::new(50, 20, 15);
        let terrain = Terrain::new(&config).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("flat.png");
        export_depth_png(&terrain, &path, &PngExportOptions::default()).unwrap();
        assert!(path.exists());
    }
}
