//! End-to-end batch tests over real temporary directory trees, using mock
//! detection/segmentation backends so no ONNX graphs are required.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

use batchcut::{
    BatchParams, Detection, Dpi, FaceLocator, Pipeline, PipelineEngine, SaliencyMap, Segmenter,
    TargetSize, process_directory, process_file_to_path,
};

/// Detector that never finds a face; the crop pipeline falls back to
/// resizing the full frame.
struct NoFaces;

impl FaceLocator for NoFaces {
    fn locate(&self, _image: &RgbImage) -> batchcut::Result<Vec<Detection>> {
        Ok(Vec::new())
    }
}

/// Saliency high in a centered blob, zero at the borders.
struct CenterBlob;

impl Segmenter for CenterBlob {
    fn saliency_map(&self, _image: &RgbImage) -> batchcut::Result<SaliencyMap> {
        let side = 64u32;
        let center = side as f32 / 2.0;
        let radius = side as f32 / 4.0;
        let data = (0..side * side)
            .map(|i| {
                let x = (i % side) as f32 - center;
                let y = (i / side) as f32 - center;
                if (x * x + y * y).sqrt() < radius { 1.0 } else { 0.0 }
            })
            .collect();
        SaliencyMap::new(side, side, data)
    }
}

fn params(pipeline: Pipeline) -> BatchParams {
    BatchParams {
        pipeline,
        target: TargetSize {
            width: 90,
            height: 120,
        },
        dpi: Dpi { x: 300, y: 300 },
        confidence: 0.5,
        cut_fraction: 0.7,
    }
}

/// Lay out a small tree: three images in mixed formats and nesting, one
/// non-image file, one file with an image extension but garbage content.
fn populate_tree(root: &Path) {
    fs::create_dir_all(root.join("a/nested")).unwrap();
    RgbImage::from_pixel(200, 150, Rgb([120, 90, 60]))
        .save(root.join("a/one.jpg"))
        .unwrap();
    RgbImage::from_pixel(64, 64, Rgb([10, 200, 30]))
        .save(root.join("a/nested/two.png"))
        .unwrap();
    RgbImage::from_pixel(300, 400, Rgb([5, 5, 250]))
        .save(root.join("three.JPEG"))
        .unwrap();
    fs::write(root.join("notes.txt"), b"not an image").unwrap();
    fs::write(root.join("corrupt.jpg"), b"\xff\xd8definitely not jpeg data").unwrap();
}

fn assert_dims(path: &Path, width: u32, height: u32) {
    let img = image::open(path).unwrap();
    assert_eq!(img.width(), width, "{path:?}");
    assert_eq!(img.height(), height, "{path:?}");
}

#[test]
fn autocrop_batch_overwrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    populate_tree(root);
    let corrupt_before = fs::read(root.join("corrupt.jpg")).unwrap();

    let engine = PipelineEngine::Autocrop { locator: &NoFaces };
    let report = process_directory(root, &engine, &params(Pipeline::Autocrop), None).unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 1);

    for rel in ["a/one.jpg", "a/nested/two.png", "three.JPEG"] {
        assert_dims(&root.join(rel), 90, 120);
    }
    // A file that fails to decode is counted and left untouched.
    assert_eq!(fs::read(root.join("corrupt.jpg")).unwrap(), corrupt_before);
    assert_eq!(
        fs::read(root.join("notes.txt")).unwrap(),
        b"not an image".to_vec()
    );
}

#[test]
fn autocrop_batch_mirrors_into_output_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("in");
    let out = dir.path().join("out");
    fs::create_dir_all(&root).unwrap();
    populate_tree(&root);
    let source_before = fs::read(root.join("a/one.jpg")).unwrap();

    let engine = PipelineEngine::Autocrop { locator: &NoFaces };
    let report =
        process_directory(&root, &engine, &params(Pipeline::Autocrop), Some(&out)).unwrap();

    assert_eq!(report.processed, 3);
    for rel in ["a/one.jpg", "a/nested/two.png", "three.JPEG"] {
        assert_dims(&out.join(rel), 90, 120);
    }
    // Sources are untouched in mirrored mode.
    assert_eq!(fs::read(root.join("a/one.jpg")).unwrap(), source_before);
    assert!(!out.join("notes.txt").exists());
    assert!(!out.join("corrupt.jpg").exists());
}

#[test]
fn matting_batch_produces_white_backgrounds_at_target_size() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    RgbImage::from_pixel(160, 160, Rgb([0, 0, 0]))
        .save(root.join("subject.jpg"))
        .unwrap();

    let engine = PipelineEngine::Matting {
        segmenter: &CenterBlob,
    };
    let report = process_directory(root, &engine, &params(Pipeline::Matting), None).unwrap();
    assert_eq!(report.processed, 1);

    let result = image::open(root.join("subject.jpg")).unwrap().to_rgb8();
    assert_eq!(result.dimensions(), (90, 120));
    for (x, y) in [(0, 0), (89, 0), (0, 119), (89, 119)] {
        let p = result.get_pixel(x, y).0;
        assert!(p.iter().all(|&c| c >= 245), "corner ({x},{y}) was {p:?}");
    }
}

#[test]
fn single_file_export_leaves_the_source_alone() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    let output = dir.path().join("exported.jpg");
    RgbImage::from_pixel(400, 300, Rgb([80, 80, 80]))
        .save(&input)
        .unwrap();
    let input_before = fs::read(&input).unwrap();

    let engine = PipelineEngine::Autocrop { locator: &NoFaces };
    process_file_to_path(&input, &output, &engine, &params(Pipeline::Autocrop)).unwrap();

    assert_dims(&output, 90, 120);
    assert_eq!(fs::read(&input).unwrap(), input_before);
}

#[test]
fn invalid_params_abort_before_any_file_is_touched() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    populate_tree(root);
    let one_before = fs::read(root.join("a/one.jpg")).unwrap();

    let mut bad = params(Pipeline::Autocrop);
    bad.confidence = 2.0;
    let engine = PipelineEngine::Autocrop { locator: &NoFaces };
    assert!(process_directory(root, &engine, &bad, None).is_err());

    assert_eq!(fs::read(root.join("a/one.jpg")).unwrap(), one_before);
}
