//! Face detection seam: the `Detection` value type and the `FaceLocator`
//! trait, plus the bundled SSD backend.
pub mod ssd;

pub use ssd::SsdFaceLocator;

use image::RgbImage;

use crate::error::Result;

/// One detected face: a bounding box in `[0,1]`-relative image coordinates
/// and the detector's confidence score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub confidence: f32,
}

impl Detection {
    /// Scale the box to pixel coordinates. SSD boxes can spill outside the
    /// image, so the result is signed and unclamped; callers clamp as needed.
    pub fn to_pixels(&self, width: u32, height: u32) -> (i64, i64, i64, i64) {
        (
            (self.x0 * width as f32) as i64,
            (self.y0 * height as f32) as i64,
            (self.x1 * width as f32) as i64,
            (self.y1 * height as f32) as i64,
        )
    }
}

/// Pluggable face detection backend.
///
/// Implementations return detections in the detector's native output order;
/// the crop pipeline relies on that order when picking a face.
pub trait FaceLocator: Send + Sync {
    fn locate(&self, image: &RgbImage) -> Result<Vec<Detection>>;
}
