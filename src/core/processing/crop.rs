//! Face-aware crop-resize transform.
//!
//! Turns a detected face box into a stable, non-distorting crop: cut below
//! the chin, fill-scale with Lanczos resampling, then center-crop to the
//! exact target size.
use image::{RgbImage, imageops};
use tracing::{debug, warn};

use crate::core::geometry::{center_offsets, chin_row, scaled_dimensions};
use crate::detect::Detection;
use crate::error::Result;
use crate::types::TargetSize;

use super::resize::resize_rgb;

/// Apply the crop-resize transform; the output is always exactly `target`.
///
/// The first detection in the detector's native order with confidence
/// strictly above `confidence_threshold` wins; later detections are ignored
/// (no confidence re-ranking). With no qualifying detection the full image is
/// used — a documented fallback, not an error.
pub fn crop_to_target(
    img: &RgbImage,
    detections: &[Detection],
    confidence_threshold: f32,
    cut_fraction: f64,
    target: TargetSize,
) -> Result<RgbImage> {
    let (width, height) = img.dimensions();

    let face = detections
        .iter()
        .find(|d| d.confidence > confidence_threshold);

    let working = match face {
        Some(det) => {
            let (_, y0, _, y1) = det.to_pixels(width, height);
            let top = chin_row(y0, y1, cut_fraction, height);
            debug!("face at confidence {:.3}; cropping below row {}", det.confidence, top);
            imageops::crop_imm(img, 0, top, width, height - top).to_image()
        }
        None => {
            warn!(
                "no face above confidence {}; using the full image",
                confidence_threshold
            );
            img.clone()
        }
    };

    let (new_width, new_height) = scaled_dimensions(working.width(), working.height(), target);
    let resized = resize_rgb(&working, new_width, new_height)?;
    let (left, top) = center_offsets(new_width, new_height, target);
    Ok(imageops::crop_imm(&resized, left, top, target.width, target.height).to_image())
}
