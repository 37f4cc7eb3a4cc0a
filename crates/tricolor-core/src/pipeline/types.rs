use std::path::PathBuf;

use crate::error::TricolorError;
use crate::frame::{AlignmentResult, ColorFrame};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    Aligning,
    Compositing,
    Contrast,
    Cropping,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading plate"),
            Self::Aligning => write!(f, "Aligning channels"),
            Self::Compositing => write!(f, "Compositing"),
            Self::Contrast => write!(f, "Equalizing contrast"),
            Self::Cropping => write!(f, "Cropping borders"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Every image produced for one plate.
#[derive(Clone, Debug)]
pub struct PlateOutput {
    /// File stem used to name the outputs.
    pub name: String,
    pub alignment: AlignmentResult,
    /// Registered and overlap-cropped R, G, B planes.
    pub composite: ColorFrame,
    pub rgb_contrast: Option<ColorFrame>,
    pub lab_contrast: Option<ColorFrame>,
    pub cropped: Option<ColorFrame>,
}

/// Outcome of one plate in a batch.
#[derive(Debug)]
pub struct PlateReport {
    pub input: PathBuf,
    pub outcome: Result<PlateSummary, TricolorError>,
}

/// What a successfully processed plate left behind.
#[derive(Clone, Debug)]
pub struct PlateSummary {
    pub alignment: AlignmentResult,
    /// `(height, width)` of the composite.
    pub size: (usize, usize),
    pub written: Vec<PathBuf>,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started for the plate called `name`.
    fn begin_stage(&self, _name: &str, _stage: PipelineStage) {}

    /// `plates_done` plates of the batch are finished.
    fn advance(&self, _plates_done: usize) {}

    /// The plate called `name` is finished, successfully or not.
    fn finish_plate(&self, _name: &str) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
