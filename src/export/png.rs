//! PNG export functionality for heightmaps and scalar fields.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::terrain::HeightField;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Minimum height value for normalization.
    pub min_height: f32,
    /// Maximum height value for normalization.
    pub max_height: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: -1.0,
            max_height: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options with auto-detected height range from the field.
    pub fn auto_range(heights: &HeightField) -> Self {
        let (min, max) = heights.height_range();
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Exports a heightfield as a 16-bit grayscale PNG.
///
/// Heights are normalized into `[options.min_height, options.max_height]`
/// and clamped, so eroded cells outside the nominal range still export.
///
/// # Arguments
/// * `heights` - The heightfield to export
/// * `path` - Output file path
/// * `options` - Export options including height range for normalization
///
/// # Returns
/// `Ok(())` on success, or an error if export fails
pub fn export_heightmap_png(
    heights: &HeightField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_height;
    let max = options.max_height;

    if min >= max {
        return Err(PngExportError::InvalidHeightRange(min, max));
    }

    let range = max - min;

    // Create 16-bit grayscale image
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::new(heights.width, heights.depth);

    for z in 0..heights.depth {
        for x in 0..heights.width {
            let height = heights.get(x, z);
            // Normalize to [0, 1] then scale to u16
            let normalized = ((height - min) / range).clamp(0.0, 1.0);
            let value = (normalized * 65535.0) as u16;
            img.put_pixel(x, z, Luma([value]));
        }
    }

    // Write with specified compression settings
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert u16 slice to bytes for the encoder
    let raw_data = img.as_raw();
    let byte_slice: &[u8] = bytemuck::cast_slice(raw_data);

    encoder.write_image(
        byte_slice,
        heights.width,
        heights.depth,
        image::ExtendedColorType::L16,
    )?;

    Ok(())
}

/// Exports an arbitrary scalar field (f32) as a 16-bit grayscale PNG.
///
/// `data` must be length `width*depth` in row-major order. The climate maps
/// pass their [0, 1] fields here with a (0.0, 1.0) range.
#[allow(clippy::too_many_arguments)]
pub fn export_scalar_png(
    width: u32,
    depth: u32,
    data: &[f32],
    path: &Path,
    min_value: f32,
    max_value: f32,
    compression: CompressionType,
    filter: FilterType,
) -> Result<(), PngExportError> {
    if min_value >= max_value {
        return Err(PngExportError::InvalidHeightRange(min_value, max_value));
    }
    let expected = (width as usize) * (depth as usize);
    if data.len() != expected {
        return Err(PngExportError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("scalar data length {} != expected {}", data.len(), expected),
        )));
    }

    let range = max_value - min_value;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, depth);
    for z in 0..depth {
        for x in 0..width {
            let v = data[(z * width + x) as usize];
            let normalized = ((v - min_value) / range).clamp(0.0, 1.0);
            let value = (normalized * 65535.0) as u16;
            img.put_pixel(x, z, Luma([value]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, compression, filter);
    let raw_data = img.as_raw();
    let byte_slice: &[u8] = bytemuck::cast_slice(raw_data);
    encoder.write_image(byte_slice, width, depth, image::ExtendedColorType::L16)?;
    Ok(())
}
