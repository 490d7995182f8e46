//! Segmentation model layer: the `Segmenter` seam, the tract-onnx U²-Net
//! backend, and the lazily loaded model cache shared between callers.
pub mod cache;
pub mod u2net;

pub use cache::ModelCache;
pub use u2net::U2Net;

use image::RgbImage;

use crate::error::{Error, Result};

/// Raw single-channel model output on the model's own pixel grid.
///
/// Values are unnormalized scores; higher means more likely foreground.
#[derive(Debug, Clone)]
pub struct SaliencyMap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl SaliencyMap {
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(Error::Processing(format!(
                "saliency map size mismatch: {}x{} with {} values",
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Pluggable background-segmentation backend.
///
/// Implement this to provide a custom segmentation model and pass it to the
/// matting pipeline; the bundled implementation is [`U2Net`].
pub trait Segmenter: Send + Sync {
    /// Produce a saliency map for `image`. The map may be at a different
    /// resolution than the input; callers rescale it to their pixel grid.
    fn saliency_map(&self, image: &RgbImage) -> Result<SaliencyMap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saliency_map_rejects_mismatched_buffer() {
        assert!(SaliencyMap::new(4, 4, vec![0.0; 15]).is_err());
        assert!(SaliencyMap::new(4, 4, vec![0.0; 16]).is_ok());
    }
}
