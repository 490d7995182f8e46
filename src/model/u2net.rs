//! U²-Net saliency backend over tract-onnx.
//!
//! The network consumes a 320x320 RGB tensor normalized the way the model was
//! trained: scale by the per-image max, then ImageNet mean/std per channel.
//! Its fused first output is a single-channel saliency map at the same
//! resolution; normalization to an alpha mask happens downstream, per pass.
use std::path::Path;

use image::RgbImage;
use tracing::debug;
use tract_onnx::prelude::*;

use crate::core::processing::resize::resize_rgb;
use crate::error::{Error, Result};

use super::{SaliencyMap, Segmenter};

type RunnableModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Fixed working resolution of the network input and output.
const INPUT_SIZE: u32 = 320;
const MEAN_RGB: [f32; 3] = [0.485, 0.456, 0.406];
const STD_RGB: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Debug)]
pub struct U2Net {
    runnable: RunnableModel,
}

impl U2Net {
    /// Load and optimize the segmentation graph. A missing weight file fails
    /// this load attempt; callers may retry by loading again.
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();
        if !path.exists() {
            return Err(Error::ModelLoad(format!(
                "matting model file not found: {}",
                path.display()
            )));
        }

        let side = INPUT_SIZE as usize;
        let runnable = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| Error::ModelLoad(e.to_string()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, side, side)),
            )
            .map_err(|e| Error::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| Error::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| Error::ModelLoad(e.to_string()))?;

        debug!("U2-Net model loaded from {}", path.display());
        Ok(Self { runnable })
    }

    fn preprocess(image: &RgbImage) -> Result<Tensor> {
        let resized = resize_rgb(image, INPUT_SIZE, INPUT_SIZE)?;
        // Scale by the per-image max, not a fixed 255.
        let max = resized.as_raw().iter().copied().max().unwrap_or(0).max(1) as f32;

        let side = INPUT_SIZE as usize;
        let mut input = tract_ndarray::Array4::<f32>::zeros((1, 3, side, side));
        for (x, y, pixel) in resized.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                input[[0, c, y, x]] = (pixel.0[c] as f32 / max - MEAN_RGB[c]) / STD_RGB[c];
            }
        }
        Ok(input.into_tensor())
    }
}

impl Segmenter for U2Net {
    fn saliency_map(&self, image: &RgbImage) -> Result<SaliencyMap> {
        let input = Self::preprocess(image)?;
        let outputs = self
            .runnable
            .run(tvec!(input.into()))
            .map_err(|e| Error::Inference(e.to_string()))?;
        // First output is the fused prediction; the auxiliary side outputs,
        // when present, are ignored.
        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| Error::Inference(e.to_string()))?;
        SaliencyMap::new(INPUT_SIZE, INPUT_SIZE, view.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_file_fails_load() {
        let err = U2Net::load("no/such/u2net.onnx").unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn invalid_model_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u2net.onnx");
        std::fs::write(&path, b"not a real onnx graph").unwrap();
        let err = U2Net::load(&path).unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }
}
