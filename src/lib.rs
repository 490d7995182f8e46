#![doc = r#"
BATCHCUT — a batch portrait cropping and background matting toolkit.

This crate turns folders of photographs into print-ready JPEGs through two
pipelines: face-aware automatic cropping (detect the face, cut at the chin,
fill and center-crop to the print size) and background matting (U2-Net
saliency segmentation composited over a white backdrop). It powers the
BATCHCUT CLI and can be embedded in your own Rust applications.

Requirements
------------
- ONNX graphs for the models you use: an SSD face detector for the autocrop
  pipeline and a U2-Net segmenter for the matting pipeline.
- Rust 2024 edition toolchain.

Add dependency
--------------
```toml
[dependencies]
batchcut = "0.1"
```

Quick start: crop one photo to a file
-------------------------------------
```rust,no_run
use std::path::Path;
use batchcut::{
    BatchParams, PipelineEngine, SsdFaceLocator, process_file_to_path,
};

fn main() -> batchcut::Result<()> {
    let locator = SsdFaceLocator::load(Path::new("/models/face_ssd.onnx"))?;
    let engine = PipelineEngine::Autocrop { locator: &locator };
    let params = BatchParams::default();

    process_file_to_path(
        Path::new("/photos/portrait.jpg"),
        Path::new("/out/portrait.jpg"),
        &engine,
        &params,
    )
}
```

Batch matting over a directory tree
-----------------------------------
```rust,no_run
use std::path::Path;
use std::sync::Arc;
use batchcut::{
    BatchParams, ModelCache, Pipeline, PipelineEngine, U2Net, process_directory,
};

fn main() -> batchcut::Result<()> {
    let cache = Arc::new(ModelCache::new(|| {
        U2Net::load(Path::new("/models/u2net.onnx"))
    }));
    cache.preload(); // loads in the background while files are enumerated
    let engine = PipelineEngine::Matting {
        segmenter: cache.as_ref(),
    };

    let params = BatchParams {
        pipeline: Pipeline::Matting,
        ..BatchParams::default()
    };

    let report = process_directory(
        Path::new("/photos"),
        &engine,
        &params,
        Some(Path::new("/out")), // None overwrites the sources in place
    )?;

    println!(
        "processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(())
}
```

Error handling
--------------
All public functions return `batchcut::Result<T>`; match on `batchcut::Error`
to handle specific cases, e.g. model loading or inference errors.

```rust,no_run
use std::path::Path;
use batchcut::{Error, SsdFaceLocator};

fn main() {
    match SsdFaceLocator::load(Path::new("/bad/path.onnx")) {
        Ok(_) => {}
        Err(Error::ModelLoad(e)) => eprintln!("model error: {e}"),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — enums and core types (e.g. `Pipeline`, `TargetSize`, `Dpi`).
- [`detect`] — face detection traits and the SSD implementation.
- [`model`] — segmentation traits, U2-Net, and lazy model caching.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod detect;
pub mod error;
pub mod io;
pub mod model;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::BatchParams;
pub use crate::error::{Error, Result};
pub use crate::types::{Dpi, Pipeline, TargetSize};

// Detection and segmentation
pub use crate::detect::{Detection, FaceLocator, ssd::SsdFaceLocator};
pub use crate::model::{ModelCache, SaliencyMap, Segmenter, U2Net};

// High-level API re-exports
pub use crate::api::{
    BatchReport, PipelineEngine, process_buffer, process_directory, process_file_in_place,
    process_file_to_buffer, process_file_to_path,
};
