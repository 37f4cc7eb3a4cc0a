use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::align::metric::SimilarityMetric;
use crate::consts::{
    DEFAULT_FLAT_WINDOW_RADIUS, DEFAULT_JPEG_QUALITY, DEFAULT_PYRAMID_LEVELS,
    DEFAULT_PYRAMID_WINDOW_RADIUS,
};
use crate::filters::border_crop::AutoCropConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub alignment: AlignmentMethod,
    #[serde(default)]
    pub contrast: ContrastConfig,
    #[serde(default)]
    pub auto_crop: AutoCropConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alignment: AlignmentMethod::default(),
            contrast: ContrastConfig::default(),
            auto_crop: AutoCropConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Which aligner registers the green and red planes against blue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AlignmentMethod {
    /// One exhaustive search at full resolution.
    Flat(FlatConfig),
    /// Coarse-to-fine search over a resolution pyramid.
    Pyramid(PyramidConfig),
}

impl Default for AlignmentMethod {
    fn default() -> Self {
        Self::Pyramid(PyramidConfig::default())
    }
}

impl fmt::Display for AlignmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(c) => write!(f, "Flat (window \u{b1}{}, {})", c.window_radius, c.metric),
            Self::Pyramid(c) => write!(
                f,
                "Pyramid ({} levels, window \u{b1}{}, {})",
                c.levels, c.window_radius, c.metric
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatConfig {
    /// Candidates span `-window_radius..window_radius` on each axis.
    #[serde(default = "default_flat_window_radius")]
    pub window_radius: i32,
    #[serde(default = "default_flat_metric")]
    pub metric: SimilarityMetric,
}

fn default_flat_window_radius() -> i32 {
    DEFAULT_FLAT_WINDOW_RADIUS
}
fn default_flat_metric() -> SimilarityMetric {
    SimilarityMetric::EuclideanDistance
}

impl Default for FlatConfig {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_FLAT_WINDOW_RADIUS,
            metric: default_flat_metric(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PyramidConfig {
    /// Number of doubling steps from the coarsest level to full resolution.
    #[serde(default = "default_pyramid_levels")]
    pub levels: usize,
    /// Per-level window, `-window_radius..window_radius` on each axis.
    #[serde(default = "default_pyramid_window_radius")]
    pub window_radius: i32,
    #[serde(default)]
    pub metric: SimilarityMetric,
}

fn default_pyramid_levels() -> usize {
    DEFAULT_PYRAMID_LEVELS
}
fn default_pyramid_window_radius() -> i32 {
    DEFAULT_PYRAMID_WINDOW_RADIUS
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_PYRAMID_LEVELS,
            window_radius: DEFAULT_PYRAMID_WINDOW_RADIUS,
            metric: SimilarityMetric::NormalizedCrossCorrelation,
        }
    }
}

/// Histogram-equalized variants to produce next to the plain composite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Equalize R, G and B independently.
    #[serde(default = "default_true")]
    pub rgb: bool,
    /// Equalize L* in CIE L*a*b*, keeping chroma.
    #[serde(default = "default_true")]
    pub lab: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self { rgb: true, lab: true }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    Tiff,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Tiff => "tiff",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
            Self::Tiff => write!(f, "TIFF"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Results go to `normal/`, `rgb_contrast/`, `lab_contrast/` and `crop/`
    /// below this directory.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}
fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
