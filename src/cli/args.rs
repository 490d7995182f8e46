use clap::Parser;
use std::path::PathBuf;

use batchcut::types::Pipeline;

#[derive(Parser)]
#[command(name = "batchcut", version, about = "BATCHCUT CLI")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory, processed recursively (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode). Omit to overwrite the input in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory mirroring the input tree (batch mode). Omit to
    /// overwrite files in place.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Pipeline to run (autocrop or matting)
    #[arg(short = 'p', long, value_enum, default_value_t = Pipeline::Autocrop)]
    pub pipeline: Pipeline,

    /// Target size as WIDTHxHEIGHT
    #[arg(long, default_value = "1350x1800")]
    pub size: String,

    /// DPI pair as X,Y, embedded in the JPEG header
    #[arg(long, default_value = "300,300")]
    pub dpi: String,

    /// Minimum face detection confidence (0-1)
    #[arg(long, default_value_t = 0.5)]
    pub confidence: f32,

    /// Chin cut position as a percentage of the face box height (0-100)
    #[arg(long, default_value_t = 70.0)]
    pub cut_percentage: f64,

    /// Path to the SSD face detector ONNX graph (autocrop pipeline)
    #[arg(long)]
    pub face_model: Option<PathBuf>,

    /// Path to the U2-Net segmentation ONNX graph (matting pipeline)
    #[arg(long)]
    pub matting_model: Option<PathBuf>,

    /// Start loading the matting model in the background before enumerating files
    #[arg(long, default_value_t = false)]
    pub preload: bool,

    /// Batch mode: process a whole directory tree (implied by --input-dir)
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
