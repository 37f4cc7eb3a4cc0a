/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum plate count to process a batch with plate-level Rayon parallelism.
pub const PARALLEL_PLATE_THRESHOLD: usize = 2;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Number of channels in a plate (B, G, R stacked top to bottom).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Interior padding is `dimension / PADDING_DIVISOR` on every side.
pub const PADDING_DIVISOR: usize = 5;

/// Default half-width of the flat exhaustive search window, in pixels.
pub const DEFAULT_FLAT_WINDOW_RADIUS: i32 = 15;

/// Default half-width of the per-level pyramid search window, in pixels.
pub const DEFAULT_PYRAMID_WINDOW_RADIUS: i32 = 20;

/// Default number of pyramid levels for coarse-to-fine alignment.
pub const DEFAULT_PYRAMID_LEVELS: usize = 4;

/// Number of histogram bins for per-channel RGB equalization.
pub const RGB_HISTOGRAM_BINS: usize = 256;

/// Number of histogram bins for L* equalization (one per integer L* in 0..=100).
pub const LAB_HISTOGRAM_BINS: usize = 101;

/// A pixel darker than this in any channel counts as border.
pub const DEFAULT_AUTOCROP_DARK_THRESHOLD: f32 = 0.15;

/// A row/column is cropped when at least this fraction of it is border.
pub const DEFAULT_AUTOCROP_BORDER_FRACTION: f32 = 0.8;

/// Default JPEG quality for saved results.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// CIE D65 reference white (X, Y, Z), Y normalized to 1.
pub const D65_WHITE: [f64; 3] = [0.950_47, 1.0, 1.088_83];
