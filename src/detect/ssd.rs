//! SSD face detector backend over tract-onnx.
//!
//! Wraps a 300x300 ResNet-SSD face graph (the widely distributed OpenCV
//! "res10" detector exported to ONNX). The network consumes a BGR image with
//! per-channel mean subtraction and emits rows of
//! `[image_id, class_id, confidence, x0, y0, x1, y1]` with box coordinates
//! relative to `[0,1] x [0,1]`.
use std::path::Path;

use image::RgbImage;
use tracing::debug;
use tract_onnx::prelude::*;

use crate::core::processing::resize::resize_rgb;
use crate::error::{Error, Result};

use super::{Detection, FaceLocator};

type RunnableModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Fixed input edge of the SSD graph.
const INPUT_SIZE: u32 = 300;
/// Per-channel means subtracted during preprocessing, in BGR order.
const MEAN_BGR: [f32; 3] = [104.0, 177.0, 123.0];
/// Values per detection row: image id, class id, confidence, x0, y0, x1, y1.
const ROW_LEN: usize = 7;

#[derive(Debug)]
pub struct SsdFaceLocator {
    runnable: RunnableModel,
}

impl SsdFaceLocator {
    /// Load and optimize the detector graph. A missing weight file fails this
    /// load attempt; calling again retries from scratch.
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();
        if !path.exists() {
            return Err(Error::ModelLoad(format!(
                "face model file not found: {}",
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

        debug!("SSD face model loaded from {}", path.display());
        Ok(Self { runnable })
    }

    fn preprocess(image: &RgbImage) -> Result<Tensor> {
        let resized = resize_rgb(image, INPUT_SIZE, INPUT_SIZE)?;
        let side = INPUT_SIZE as usize;
        let mut input = tract_ndarray::Array4::<f32>::zeros((1, 3, side, side));
        for (x, y, pixel) in resized.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let (x, y) = (x as usize, y as usize);
            // The graph was trained on BGR input.
            input[[0, 0, y, x]] = b as f32 - MEAN_BGR[0];
            input[[0, 1, y, x]] = g as f32 - MEAN_BGR[1];
            input[[0, 2, y, x]] = r as f32 - MEAN_BGR[2];
        }
        Ok(input.into_tensor())
    }
}

impl FaceLocator for SsdFaceLocator {
    fn locate(&self, image: &RgbImage) -> Result<Vec<Detection>> {
        let input = Self::preprocess(image)?;
        let outputs = self
            .runnable
            .run(tvec!(input.into()))
            .map_err(|e| Error::Inference(e.to_string()))?;
        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| Error::Inference(e.to_string()))?;
        let raw: Vec<f32> = view.iter().copied().collect();
        Ok(decode_detections(&raw))
    }
}

/// Decode a flattened `[1, 1, N, 7]` SSD output into detections, preserving
/// the network's native row order. A trailing partial row is dropped.
pub fn decode_detections(raw: &[f32]) -> Vec<Detection> {
    raw.chunks_exact(ROW_LEN)
        .map(|row| Detection {
            x0: row[3],
            y0: row[4],
            x1: row[5],
            y1: row[6],
            confidence: row[2],
        })
        .collect()
}
