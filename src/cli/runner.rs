use std::sync::Arc;

use tracing::info;

use batchcut::api::{
    PipelineEngine, process_directory, process_file_in_place, process_file_to_path,
};
use batchcut::core::params::BatchParams;
use batchcut::detect::SsdFaceLocator;
use batchcut::model::{ModelCache, U2Net};
use batchcut::types::{Dpi, Pipeline, TargetSize};

use super::args::CliArgs;
use super::errors::AppError;

/// Parse and validate every numeric field before any file is touched; a bad
/// value aborts the whole run.
fn build_params(args: &CliArgs) -> Result<BatchParams, AppError> {
    let target: TargetSize = args.size.parse().map_err(|_| AppError::InvalidSize {
        size: args.size.clone(),
    })?;
    let dpi: Dpi = args.dpi.parse().map_err(|_| AppError::InvalidDpi {
        dpi: args.dpi.clone(),
    })?;
    if !(0.0..=1.0).contains(&args.confidence) {
        return Err(AppError::InvalidConfidence {
            value: args.confidence,
        });
    }
    if !(args.cut_percentage > 0.0 && args.cut_percentage < 100.0) {
        return Err(AppError::InvalidCutPercentage {
            value: args.cut_percentage,
        });
    }

    Ok(BatchParams {
        pipeline: args.pipeline,
        target,
        dpi,
        confidence: args.confidence,
        cut_fraction: args.cut_percentage / 100.0,
    })
}

/// Collaborators owned for the duration of the run; only the selected
/// pipeline's model is loaded.
enum OwnedEngine {
    Autocrop(SsdFaceLocator),
    Matting(Arc<ModelCache<U2Net>>),
}

impl std::fmt::Debug for OwnedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnedEngine::Autocrop(_) => f.write_str("Autocrop"),
            OwnedEngine::Matting(_) => f.write_str("Matting"),
        }
    }
}

fn build_engine(args: &CliArgs) -> Result<OwnedEngine, AppError> {
    match args.pipeline {
        Pipeline::Autocrop => {
            let model_path = args.face_model.clone().ok_or(AppError::MissingArgument {
                arg: "--face-model".to_string(),
            })?;
            Ok(OwnedEngine::Autocrop(SsdFaceLocator::load(&model_path)?))
        }
        Pipeline::Matting => {
            let model_path = args
                .matting_model
                .clone()
                .ok_or(AppError::MissingArgument {
                    arg: "--matting-model".to_string(),
                })?;
            let cache = Arc::new(ModelCache::new(move || U2Net::load(&model_path)));
            if args.preload {
                cache.preload();
            }
            Ok(OwnedEngine::Matting(cache))
        }
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let params = build_params(&args)?;
    let owned = build_engine(&args)?;
    let engine = match &owned {
        OwnedEngine::Autocrop(locator) => PipelineEngine::Autocrop { locator },
        OwnedEngine::Matting(cache) => PipelineEngine::Matting {
            segmenter: cache.as_ref(),
        },
    };

    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        if let Some(output_dir) = &args.output_dir {
            std::fs::create_dir_all(output_dir)?;
        }

        info!("Starting batch processing from directory: {:?}", input_dir);
        let report = process_directory(&input_dir, &engine, &params, args.output_dir.as_deref())?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        match &args.output {
            Some(output) => process_file_to_path(&input, output, &engine, &params)?,
            None => process_file_in_place(&input, &engine, &params)?,
        }
        info!("Successfully processed: {:?}", input);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["batchcut"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn defaults_build_valid_params() {
        let params = build_params(&parse(&[])).unwrap();
        assert_eq!(params.target.width, 1350);
        assert_eq!(params.target.height, 1800);
        assert_eq!((params.dpi.x, params.dpi.y), (300, 300));
        assert_eq!(params.confidence, 0.5);
        assert!((params.cut_fraction - 0.7).abs() < 1e-9);
    }

    #[test]
    fn malformed_size_aborts_before_processing() {
        let err = build_params(&parse(&["--size", "wide"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidSize { .. }));
    }

    #[test]
    fn malformed_dpi_aborts_before_processing() {
        let err = build_params(&parse(&["--dpi", "thirty"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidDpi { .. }));
    }

    #[test]
    fn confidence_and_cut_percentage_ranges_are_enforced() {
        assert!(matches!(
            build_params(&parse(&["--confidence", "1.5"])).unwrap_err(),
            AppError::InvalidConfidence { .. }
        ));
        assert!(matches!(
            build_params(&parse(&["--cut-percentage", "0"])).unwrap_err(),
            AppError::InvalidCutPercentage { .. }
        ));
        assert!(matches!(
            build_params(&parse(&["--cut-percentage", "100"])).unwrap_err(),
            AppError::InvalidCutPercentage { .. }
        ));
    }

    #[test]
    fn missing_model_argument_is_reported() {
        let err = build_engine(&parse(&[])).unwrap_err();
        assert!(matches!(err, AppError::MissingArgument { .. }));
        let err = build_engine(&parse(&["--pipeline", "matting"])).unwrap_err();
        assert!(matches!(err, AppError::MissingArgument { .. }));
    }
}
