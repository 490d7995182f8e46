//! JPEG save policy for the pipelines.
//!
//! Batch auto-crop overwrites originals at maximum quality; matting output
//! and explicit save-as ("download") paths use the export quality.
use std::path::Path;

use image::RgbImage;

use crate::error::Result;
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::types::{Dpi, Pipeline};

pub const AUTOCROP_BATCH_QUALITY: u8 = 100;
pub const MATTING_QUALITY: u8 = 95;
pub const EXPORT_QUALITY: u8 = 95;

/// Quality used when a pipeline writes back over the source file.
pub fn batch_quality(pipeline: Pipeline) -> u8 {
    match pipeline {
        Pipeline::Autocrop => AUTOCROP_BATCH_QUALITY,
        Pipeline::Matting => MATTING_QUALITY,
    }
}

/// Encode `img` as a JPEG with the given quality and DPI pair.
pub fn save_rgb_jpeg(img: &RgbImage, output: &Path, dpi: Dpi, quality: u8) -> Result<()> {
    write_rgb_jpeg(output, img, dpi, quality)
}
