use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tricolor_core::align::metric::SimilarityMetric;
use tricolor_core::consts::{
    DEFAULT_FLAT_WINDOW_RADIUS, DEFAULT_JPEG_QUALITY, DEFAULT_PYRAMID_LEVELS,
    DEFAULT_PYRAMID_WINDOW_RADIUS,
};
use tricolor_core::filters::border_crop::AutoCropConfig;
use tricolor_core::pipeline::config::{
    AlignmentMethod, ContrastConfig, FlatConfig, OutputConfig, OutputFormat, PipelineConfig,
    PyramidConfig,
};
use tricolor_core::pipeline::{process_plate, ProgressReporter};

use crate::progress::StageReporter;
use crate::summary::{print_alignment_summary, print_pipeline_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// Single exhaustive search at full resolution
    Flat,
    /// Coarse-to-fine image pyramid
    Pyramid,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    /// Normalized cross-correlation
    Ncc,
    /// Euclidean (L2) distance
    L2,
}

impl From<MetricArg> for SimilarityMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Ncc => SimilarityMetric::NormalizedCrossCorrelation,
            MetricArg::L2 => SimilarityMetric::EuclideanDistance,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Jpeg,
    Png,
    Tiff,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

/// Options shared by `align` and `batch`.
#[derive(Args)]
pub struct PipelineOptions {
    /// Pipeline config file (TOML); replaces all other options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Alignment method
    #[arg(long, value_enum, default_value = "pyramid")]
    pub method: MethodArg,

    /// Similarity metric (default: l2 for flat, ncc for pyramid)
    #[arg(long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Search window half-width in pixels (default: 15 flat, 20 per pyramid level)
    #[arg(long)]
    pub window: Option<i32>,

    /// Number of pyramid levels
    #[arg(long, default_value_t = DEFAULT_PYRAMID_LEVELS)]
    pub levels: usize,

    /// Skip per-channel RGB histogram equalization
    #[arg(long)]
    pub no_rgb_contrast: bool,

    /// Skip L*a*b* lightness equalization
    #[arg(long)]
    pub no_lab_contrast: bool,

    /// Skip dark border cropping
    #[arg(long)]
    pub no_crop: bool,

    /// Output image format
    #[arg(long, value_enum, default_value = "jpeg")]
    pub format: FormatArg,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Output directory
    #[arg(short, long, default_value = "results")]
    pub output_dir: PathBuf,
}

impl PipelineOptions {
    pub fn to_config(&self) -> Result<PipelineConfig> {
        if let Some(ref config_path) = self.config {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            return toml::from_str(&contents).context("Invalid pipeline config");
        }

        let alignment = match self.method {
            MethodArg::Flat => AlignmentMethod::Flat(FlatConfig {
                window_radius: self.window.unwrap_or(DEFAULT_FLAT_WINDOW_RADIUS),
                metric: self
                    .metric
                    .map(Into::into)
                    .unwrap_or(SimilarityMetric::EuclideanDistance),
            }),
            MethodArg::Pyramid => AlignmentMethod::Pyramid(PyramidConfig {
                levels: self.levels,
                window_radius: self.window.unwrap_or(DEFAULT_PYRAMID_WINDOW_RADIUS),
                metric: self
                    .metric
                    .map(Into::into)
                    .unwrap_or(SimilarityMetric::NormalizedCrossCorrelation),
            }),
        };

        Ok(PipelineConfig {
            alignment,
            contrast: ContrastConfig {
                rgb: !self.no_rgb_contrast,
                lab: !self.no_lab_contrast,
            },
            auto_crop: AutoCropConfig {
                enabled: !self.no_crop,
                ..Default::default()
            },
            output: OutputConfig {
                dir: self.output_dir.clone(),
                format: self.format.into(),
                jpeg_quality: self.quality,
            },
        })
    }
}

#[derive(Args)]
pub struct AlignArgs {
    /// Input plate image (B, G, R exposures stacked top to bottom)
    pub file: PathBuf,

    #[command(flatten)]
    pub options: PipelineOptions,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let config = args.options.to_config()?;
    print_pipeline_summary(&config, 1);

    let reporter = StageReporter::new(1)?;
    let summary = process_plate(&args.file, &config, &reporter)
        .with_context(|| format!("Failed to process {}", args.file.display()))?;
    reporter.advance(1);
    reporter.finish();

    print_alignment_summary(&args.file, &summary);
    Ok(())
}
