//! High-level, ergonomic entry points: process single images to buffers or
//! files, and batch helpers over directory trees. Prefer these over the
//! low-level processing modules when embedding BATCHCUT.
use std::fs;
use std::path::Path;

use image::RgbImage;
use tracing::{info, warn};

use crate::core::params::BatchParams;
use crate::core::processing::crop::crop_to_target;
use crate::core::processing::matting::remove_background;
use crate::core::processing::resize::resize_rgb;
use crate::core::processing::save::{EXPORT_QUALITY, batch_quality, save_rgb_jpeg};
use crate::detect::FaceLocator;
use crate::error::{Error, Result};
use crate::io::walk::collect_image_files;
use crate::model::Segmenter;
use crate::types::Pipeline;

/// A pipeline paired with the external collaborator it needs.
pub enum PipelineEngine<'a> {
    Autocrop { locator: &'a dyn FaceLocator },
    Matting { segmenter: &'a dyn Segmenter },
}

impl PipelineEngine<'_> {
    pub fn pipeline(&self) -> Pipeline {
        match self {
            PipelineEngine::Autocrop { .. } => Pipeline::Autocrop,
            PipelineEngine::Matting { .. } => Pipeline::Matting,
        }
    }
}

/// Outcome of a directory batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Run the selected pipeline over an in-memory image.
pub fn process_buffer(
    img: &RgbImage,
    engine: &PipelineEngine,
    params: &BatchParams,
) -> Result<RgbImage> {
    match engine {
        PipelineEngine::Autocrop { locator } => {
            let detections = locator.locate(img)?;
            crop_to_target(
                img,
                &detections,
                params.confidence,
                params.cut_fraction,
                params.target,
            )
        }
        PipelineEngine::Matting { segmenter } => {
            let matted = remove_background(img, *segmenter)?;
            // Matted output goes straight to the print size; the aspect
            // distortion is accepted.
            resize_rgb(&matted, params.target.width, params.target.height)
        }
    }
}

/// Process one image fully in memory (the single-image preview flow).
pub fn process_file_to_buffer(
    input: &Path,
    engine: &PipelineEngine,
    params: &BatchParams,
) -> Result<RgbImage> {
    params.validate()?;
    let img = image::open(input)?.to_rgb8();
    process_buffer(&img, engine, params)
}

/// Process one image and save it to an explicit path ("download").
pub fn process_file_to_path(
    input: &Path,
    output: &Path,
    engine: &PipelineEngine,
    params: &BatchParams,
) -> Result<()> {
    let result = process_file_to_buffer(input, engine, params)?;
    save_rgb_jpeg(&result, output, params.dpi, EXPORT_QUALITY)
}

/// Process one image and overwrite it in place at the pipeline's batch
/// quality. Destructive: the original pixels are gone afterwards.
pub fn process_file_in_place(
    input: &Path,
    engine: &PipelineEngine,
    params: &BatchParams,
) -> Result<()> {
    let result = process_file_to_buffer(input, engine, params)?;
    save_rgb_jpeg(&result, input, params.dpi, batch_quality(engine.pipeline()))
}

/// Sequentially apply `engine` to every supported image under `root`.
///
/// With `output_root = None` each file is overwritten in place, which is
/// destructive. With `Some(dir)` the input tree is mirrored under `dir` and
/// sources are left untouched.
///
/// Per-file failures (unreadable image, inference error) are logged and
/// counted; the batch always continues. There is no rollback: a failure
/// partway through leaves earlier files already written.
pub fn process_directory(
    root: &Path,
    engine: &PipelineEngine,
    params: &BatchParams,
    output_root: Option<&Path>,
) -> Result<BatchReport> {
    params.validate()?;

    let (files, skipped) = collect_image_files(root);
    let total = files.len();
    info!("batch start: {} image(s) under {:?}", total, root);

    let quality = batch_quality(engine.pipeline());
    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };

    for (index, path) in files.iter().enumerate() {
        let destination = match output_root {
            None => path.clone(),
            Some(out) => {
                let relative = path.strip_prefix(root).map_err(Error::external)?;
                let destination = out.join(relative);
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent)?;
                }
                destination
            }
        };

        match process_one(path, &destination, engine, params, quality) {
            Ok(()) => {
                info!("processed {}/{}: {:?}", index + 1, total, path);
                report.processed += 1;
            }
            Err(e) => {
                warn!("error processing {:?}: {e}", path);
                report.errors += 1;
            }
        }
    }

    info!(
        "batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

fn process_one(
    input: &Path,
    output: &Path,
    engine: &PipelineEngine,
    params: &BatchParams,
    quality: u8,
) -> Result<()> {
    let img = image::open(input)?.to_rgb8();
    let result = process_buffer(&img, engine, params)?;
    save_rgb_jpeg(&result, output, params.dpi, quality)
}
