#[allow(dead_code)]
mod common;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{GrayImage, Luma};
use tempfile::TempDir;

use tricolor_core::align::metric::SimilarityMetric;
use tricolor_core::error::TricolorError;
use tricolor_core::frame::{Displacement, Plate};
use tricolor_core::pipeline::config::{
    AlignmentMethod, FlatConfig, OutputConfig, OutputFormat, PipelineConfig, PyramidConfig,
};
use tricolor_core::pipeline::{
    process_batch, process_channels, process_plate, write_outputs, NoOpReporter, PipelineStage,
    ProgressReporter,
};

use common::{build_plate, noise_pattern, offset_channels};

fn test_config(output_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        alignment: AlignmentMethod::Flat(FlatConfig {
            window_radius: 6,
            metric: SimilarityMetric::EuclideanDistance,
        }),
        output: OutputConfig {
            dir: output_dir.to_path_buf(),
            format: OutputFormat::Png,
            ..OutputConfig::default()
        },
        ..PipelineConfig::default()
    }
}

fn sample_plate() -> Plate {
    let pattern = noise_pattern(30, 24, 17);
    let channels = offset_channels(&pattern, Displacement::new(2, 1), Displacement::new(-1, -3));
    build_plate(&channels, 1)
}

fn write_plate(plate: &Plate, path: &Path) {
    let img = GrayImage::from_fn(plate.width() as u32, plate.height() as u32, |x, y| {
        Luma([(plate.data[[y as usize, x as usize]] * 255.0).round() as u8])
    });
    img.save(path).unwrap();
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
    advanced: Mutex<Vec<usize>>,
    finished: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, _name: &str, stage: PipelineStage) {
        self.stages.lock().unwrap().push(stage);
    }

    fn advance(&self, plates_done: usize) {
        self.advanced.lock().unwrap().push(plates_done);
    }

    fn finish_plate(&self, name: &str) {
        self.finished.lock().unwrap().push(name.to_string());
    }
}

#[test]
fn test_process_channels_produces_every_variant() {
    let dir = TempDir::new().unwrap();
    let channels = sample_plate().split().unwrap();
    let reporter = RecordingReporter::default();

    let output = process_channels("sample", &channels, &test_config(dir.path()), &reporter).unwrap();

    assert_eq!(output.alignment.green, Displacement::new(-2, -1));
    assert_eq!(output.alignment.red, Displacement::new(1, 3));
    // rows 1..28, cols 3..23
    assert_eq!(output.composite.blue.dim(), (27, 20));

    let rgb = output.rgb_contrast.as_ref().unwrap();
    let lab = output.lab_contrast.as_ref().unwrap();
    assert_eq!(rgb.blue.dim(), output.composite.blue.dim());
    assert_eq!(lab.blue.dim(), output.composite.blue.dim());

    let cropped = output.cropped.as_ref().unwrap();
    assert!(cropped.height() <= lab.height());
    assert!(cropped.width() <= lab.width());

    let stages = reporter.stages.lock().unwrap();
    assert_eq!(
        *stages,
        vec![
            PipelineStage::Aligning,
            PipelineStage::Compositing,
            PipelineStage::Contrast,
            PipelineStage::Cropping,
        ]
    );
}

#[test]
fn test_disabled_post_processing() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.contrast.rgb = false;
    config.contrast.lab = false;
    config.auto_crop.enabled = false;

    let channels = sample_plate().split().unwrap();
    let output = process_channels("sample", &channels, &config, &NoOpReporter).unwrap();
    assert!(output.rgb_contrast.is_none());
    assert!(output.lab_contrast.is_none());
    assert!(output.cropped.is_none());

    let written = write_outputs(&output, &config.output).unwrap();
    assert_eq!(written, vec![dir.path().join("normal").join("sample.png")]);
    assert!(written[0].exists());
}

#[test]
fn test_process_plate_writes_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("emir.png");
    write_plate(&sample_plate(), &input);

    let out_dir = dir.path().join("results");
    let reporter = RecordingReporter::default();
    let summary = process_plate(&input, &test_config(&out_dir), &reporter).unwrap();

    assert_eq!(summary.alignment.green, Displacement::new(-2, -1));
    assert_eq!(summary.alignment.red, Displacement::new(1, 3));
    assert_eq!(summary.size, (27, 20));

    let expected: Vec<PathBuf> = ["normal", "rgb_contrast", "lab_contrast", "crop"]
        .iter()
        .map(|kind| out_dir.join(kind).join("emir.png"))
        .collect();
    assert_eq!(summary.written, expected);
    for path in &expected {
        assert!(path.exists(), "{} missing", path.display());
    }

    let normal = image::open(&expected[0]).unwrap();
    assert_eq!((normal.width(), normal.height()), (20, 27));

    let stages = reporter.stages.lock().unwrap();
    assert_eq!(stages.first(), Some(&PipelineStage::Reading));
    assert_eq!(stages.last(), Some(&PipelineStage::Writing));
    assert_eq!(*reporter.finished.lock().unwrap(), vec!["emir".to_string()]);
}

#[test]
fn test_batch_failures_are_independent() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    let missing = dir.path().join("missing.png");
    let other = dir.path().join("other.png");
    write_plate(&sample_plate(), &good);
    write_plate(&sample_plate(), &other);

    let reporter = RecordingReporter::default();
    let inputs = vec![good.clone(), missing.clone(), other.clone()];
    let reports = process_batch(&inputs, &test_config(&dir.path().join("out")), &reporter);

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].input, good);
    assert_eq!(reports[1].input, missing);
    assert_eq!(reports[2].input, other);
    assert!(reports[0].outcome.is_ok());
    assert!(reports[1].outcome.is_err());
    assert!(reports[2].outcome.is_ok());

    let mut advanced = reporter.advanced.lock().unwrap().clone();
    advanced.sort_unstable();
    assert_eq!(advanced, vec![1, 2, 3]);
    assert_eq!(reporter.finished.lock().unwrap().len(), 3);
}

#[test]
fn test_plate_too_small_for_pyramid_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tiny.png");
    write_plate(&sample_plate(), &input);

    let mut config = test_config(&dir.path().join("out"));
    config.alignment = AlignmentMethod::Pyramid(PyramidConfig {
        levels: 5,
        ..PyramidConfig::default()
    });
    let err = process_plate(&input, &config, &NoOpReporter).unwrap_err();
    assert!(matches!(
        err,
        TricolorError::ChannelTooSmall {
            height: 30,
            width: 24,
            levels: 5
        }
    ));
}
