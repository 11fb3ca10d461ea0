//! Normal map export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use glam::Vec3;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};
use thiserror::Error;

use crate::terrain::NormalField;

/// Errors that can occur during normal map export.
#[derive(Error, Debug)]
pub enum NormalMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Options for normal map export.
#[derive(Debug, Clone)]
pub struct NormalMapOptions {
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for NormalMapOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

fn encode_normal_rgb8(n: Vec3) -> [u8; 3] {
    let c = (n * 0.5) + Vec3::splat(0.5);
    [
        (c.x.clamp(0.0, 1.0) * 255.0) as u8,
        (c.y.clamp(0.0, 1.0) * 255.0) as u8,
        (c.z.clamp(0.0, 1.0) * 255.0) as u8,
    ]
}

/// Exports a normal field as an RGB PNG.
///
/// Each component maps from [-1, 1] to [0, 255]. The field stores +Y-up
/// world normals, so flat terrain encodes green-dominant (127, 255, 127).
pub fn export_normal_map_png(
    normals: &NormalField,
    path: &Path,
    options: &NormalMapOptions,
) -> Result<(), NormalMapError> {
    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(normals.width, normals.depth);

    for z in 0..normals.depth {
        for x in 0..normals.width {
            img.put_pixel(x, z, Rgb(encode_normal_rgb8(normals.get(x, z))));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        normals.width,
        normals.depth,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}
