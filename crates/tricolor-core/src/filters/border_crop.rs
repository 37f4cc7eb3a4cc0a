//! Removal of the dark plate borders left around a composite.

use ndarray::{Array2, Axis, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_AUTOCROP_BORDER_FRACTION, DEFAULT_AUTOCROP_DARK_THRESHOLD};
use crate::error::{Result, TricolorError};
use crate::frame::{Channel, ColorFrame};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoCropConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// A pixel is border when any channel is below this value.
    #[serde(default = "default_dark_threshold")]
    pub dark_threshold: f32,
    /// Rows/columns with at least this fraction of border pixels are removed.
    #[serde(default = "default_border_fraction")]
    pub border_fraction: f32,
}

fn default_true() -> bool {
    true
}
fn default_dark_threshold() -> f32 {
    DEFAULT_AUTOCROP_DARK_THRESHOLD
}
fn default_border_fraction() -> f32 {
    DEFAULT_AUTOCROP_BORDER_FRACTION
}

impl Default for AutoCropConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dark_threshold: DEFAULT_AUTOCROP_DARK_THRESHOLD,
            border_fraction: DEFAULT_AUTOCROP_BORDER_FRACTION,
        }
    }
}

/// Per-pixel mask: true where any channel is darker than `threshold`.
pub fn border_mask(color: &ColorFrame, threshold: f32) -> Array2<bool> {
    let mut mask = Array2::<bool>::from_elem(color.blue.dim(), false);
    Zip::from(&mut mask)
        .and(&color.red.data)
        .and(&color.green.data)
        .and(&color.blue.data)
        .for_each(|m, &r, &g, &b| {
            *m = r < threshold || g < threshold || b < threshold;
        });
    mask
}

/// Drop rows, then columns, that are mostly border.
///
/// A row is kept when its border count is below `floor(width * fraction)`;
/// a column is kept when its border count over all original rows is below
/// `floor(height * fraction)`.
pub fn auto_crop(color: &ColorFrame, config: &AutoCropConfig) -> Result<ColorFrame> {
    color.ensure_same_shape()?;
    let (h, w) = color.blue.dim();
    let mask = border_mask(color, config.dark_threshold);

    let row_limit = (w as f32 * config.border_fraction).floor() as usize;
    let col_limit = (h as f32 * config.border_fraction).floor() as usize;

    let keep_rows = kept_indices(&mask, Axis(0), row_limit);
    let keep_cols = kept_indices(&mask, Axis(1), col_limit);

    if keep_rows.is_empty() || keep_cols.is_empty() {
        return Err(TricolorError::EmptyCrop);
    }

    debug!(
        rows_removed = h - keep_rows.len(),
        cols_removed = w - keep_cols.len(),
        "Auto crop"
    );

    let crop = |channel: &Channel| {
        Channel::new(
            channel
                .data
                .select(Axis(0), &keep_rows)
                .select(Axis(1), &keep_cols),
        )
    };

    Ok(ColorFrame {
        red: crop(&color.red),
        green: crop(&color.green),
        blue: crop(&color.blue),
    })
}

/// Indices along `axis` whose border count is below `limit`.
fn kept_indices(mask: &Array2<bool>, axis: Axis, limit: usize) -> Vec<usize> {
    mask.axis_iter(axis)
        .enumerate()
        .filter(|(_, lane)| lane.iter().filter(|&&m| m).count() < limit)
        .map(|(i, _)| i)
        .collect()
}
