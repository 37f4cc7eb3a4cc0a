use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::align::align_channels;
use crate::composite::compose;
use crate::consts::PARALLEL_PLATE_THRESHOLD;
use crate::error::{Result, TricolorError};
use crate::filters::border_crop::auto_crop;
use crate::filters::histogram::{equalize_lab, equalize_rgb};
use crate::frame::ColorFrame;
use crate::io::image_io::{load_plate, save_color_image_with_quality};

use super::config::{OutputConfig, PipelineConfig};
use super::types::{PipelineStage, PlateOutput, PlateReport, PlateSummary, ProgressReporter};

/// Align, composite and post-process the channels of one plate.
pub fn process_channels(
    name: &str,
    channels: &ColorFrame,
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<PlateOutput> {
    reporter.begin_stage(name, PipelineStage::Aligning);
    let alignment = align_channels(channels, &config.alignment)?;

    reporter.begin_stage(name, PipelineStage::Compositing);
    let composite = compose(channels, &alignment)?;

    reporter.begin_stage(name, PipelineStage::Contrast);
    let rgb_contrast = config.contrast.rgb.then(|| equalize_rgb(&composite));
    let lab_contrast = config.contrast.lab.then(|| equalize_lab(&composite));

    let cropped = if config.auto_crop.enabled {
        reporter.begin_stage(name, PipelineStage::Cropping);
        let source = lab_contrast.as_ref().unwrap_or(&composite);
        match auto_crop(source, &config.auto_crop) {
            Ok(cropped) => Some(cropped),
            Err(TricolorError::EmptyCrop) => {
                warn!(plate = name, "Auto crop found no content, skipping");
                None
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    Ok(PlateOutput {
        name: name.to_string(),
        alignment,
        composite,
        rgb_contrast,
        lab_contrast,
        cropped,
    })
}

/// Write every produced image below `config.dir`, one subdirectory per kind.
pub fn write_outputs(output: &PlateOutput, config: &OutputConfig) -> Result<Vec<PathBuf>> {
    let images = [
        ("normal", Some(&output.composite)),
        ("rgb_contrast", output.rgb_contrast.as_ref()),
        ("lab_contrast", output.lab_contrast.as_ref()),
        ("crop", output.cropped.as_ref()),
    ];

    let mut written = Vec::new();
    for (kind, image) in images {
        let Some(image) = image else { continue };
        let dir = config.dir.join(kind);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.{}", output.name, config.format.extension()));
        save_color_image_with_quality(image, &path, config.jpeg_quality)?;
        written.push(path);
    }

    Ok(written)
}

/// Load, process and save one plate.
pub fn process_plate(
    path: &Path,
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<PlateSummary> {
    let name = plate_name(path);

    reporter.begin_stage(&name, PipelineStage::Reading);
    let plate = load_plate(path)?;
    let channels = plate.split()?;
    info!(
        plate = %name,
        width = plate.width(),
        height = plate.height(),
        channel_height = channels.height(),
        "Plate loaded"
    );

    let output = process_channels(&name, &channels, config, reporter)?;

    reporter.begin_stage(&name, PipelineStage::Writing);
    let written = write_outputs(&output, &config.output)?;
    reporter.finish_plate(&name);

    Ok(PlateSummary {
        alignment: output.alignment,
        size: output.composite.blue.dim(),
        written,
    })
}

/// Process many plates. A failing plate does not stop the others; each
/// plate's outcome is reported in input order.
pub fn process_batch(
    paths: &[PathBuf],
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Vec<PlateReport> {
    let counter = AtomicUsize::new(0);
    let run_one = |path: &PathBuf| {
        let outcome = process_plate(path, config, reporter);
        if let Err(ref e) = outcome {
            warn!(plate = %path.display(), error = %e, "Plate failed");
            reporter.finish_plate(&plate_name(path));
        }
        reporter.advance(counter.fetch_add(1, Ordering::Relaxed) + 1);
        PlateReport {
            input: path.clone(),
            outcome,
        }
    };

    if paths.len() >= PARALLEL_PLATE_THRESHOLD {
        paths.par_iter().map(run_one).collect()
    } else {
        paths.iter().map(run_one).collect()
    }
}

fn plate_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plate".to_string())
}
