//! Coarse-to-fine pyramid alignment.
//!
//! The planes are first shrunk to `1 / 2^levels` of their size. Each level
//! then doubles the resolution, searches a small window, and rolls and crops
//! the planes by what it found, so the next level only has to recover the
//! residual. Per-level displacements are scaled back to full resolution and
//! summed.

use tracing::debug;

use crate::error::{Result, TricolorError};
use crate::filters::resize::resize_frame;
use crate::frame::{AlignmentResult, ColorFrame};
use crate::pipeline::config::PyramidConfig;

use super::metric::SimilarityMetric;
use super::search::{find_best_shift, interior_padding, SearchWindow};
use super::shift::shift_and_crop;

/// One resolution stage of the pyramid.
#[derive(Clone, Debug)]
pub struct PyramidLevel {
    /// 0 is the coarsest level.
    pub index: usize,
    pub channels: ColorFrame,
}

impl PyramidLevel {
    /// Double the resolution of `previous` to build level `index`.
    pub fn upsampled_from(previous: &ColorFrame, index: usize) -> Self {
        let channels = resize_frame(previous, previous.height() * 2, previous.width() * 2);
        Self { index, channels }
    }

    /// Search this level's interior for the best displacements.
    pub fn search(
        &self,
        window: &SearchWindow,
        metric: SimilarityMetric,
    ) -> Result<AlignmentResult> {
        let (pad_h, pad_w) = interior_padding(self.channels.height(), self.channels.width());
        find_best_shift(window, &self.channels, pad_h, pad_w, metric)
    }

    /// Roll green and red by `alignment` and crop to the overlap: the input
    /// of the next, finer level.
    pub fn propagate(&self, alignment: &AlignmentResult) -> Result<ColorFrame> {
        shift_and_crop(&self.channels, alignment)
    }
}

/// Align green and red to blue with the coarse-to-fine pyramid.
pub fn align_pyramid(channels: &ColorFrame, config: &PyramidConfig) -> Result<AlignmentResult> {
    let history = align_pyramid_levels(channels, config)?;
    Ok(aggregate_level_shifts(&history))
}

/// Run the pyramid and return each level's displacement, coarsest first,
/// in that level's own pixel units.
pub fn align_pyramid_levels(
    channels: &ColorFrame,
    config: &PyramidConfig,
) -> Result<Vec<AlignmentResult>> {
    let levels = config.levels;
    if levels == 0 {
        return Err(TricolorError::InvalidPyramidLevels(levels));
    }
    channels.ensure_same_shape()?;

    let (h, w) = (channels.height(), channels.width());
    let (base_h, base_w) = coarsest_size(h, w, levels);
    if base_h == 0 || base_w == 0 {
        return Err(TricolorError::ChannelTooSmall {
            height: h,
            width: w,
            levels,
        });
    }

    let window = SearchWindow::symmetric(config.window_radius);
    let mut current = resize_frame(channels, base_h, base_w);
    let mut history = Vec::with_capacity(levels);

    for index in 0..levels {
        let level = PyramidLevel::upsampled_from(&current, index);
        let alignment = level.search(&window, config.metric)?;
        debug!(
            level = index,
            height = level.channels.height(),
            width = level.channels.width(),
            green = %alignment.green,
            red = %alignment.red,
            "Pyramid level aligned"
        );
        current = level.propagate(&alignment)?;
        history.push(alignment);
    }

    Ok(history)
}

/// Scale level `i` of `levels` by `2^(levels - i - 1)` and sum.
pub fn aggregate_level_shifts(history: &[AlignmentResult]) -> AlignmentResult {
    let levels = history.len();
    history
        .iter()
        .enumerate()
        .fold(AlignmentResult::default(), |total, (i, shift)| {
            total + shift.scaled(1i32 << (levels - i - 1))
        })
}

fn coarsest_size(height: usize, width: usize, levels: usize) -> (usize, usize) {
    let shrink = |extent: usize| {
        u32::try_from(levels)
            .ok()
            .and_then(|bits| extent.checked_shr(bits))
            .unwrap_or(0)
    };
    (shrink(height), shrink(width))
}
