use tracing::debug;

use crate::error::Result;
use crate::frame::{AlignmentResult, ColorFrame};
use crate::pipeline::config::FlatConfig;

use super::search::{find_best_shift, interior_padding, SearchWindow};

/// Align green and red to blue with a single search at full resolution.
///
/// Only practical when the true displacement lies inside the window, i.e.
/// for small or already downsampled plates.
pub fn align_flat(channels: &ColorFrame, config: &FlatConfig) -> Result<AlignmentResult> {
    channels.ensure_same_shape()?;
    let (pad_h, pad_w) = interior_padding(channels.height(), channels.width());
    let window = SearchWindow::symmetric(config.window_radius);

    debug!(
        pad_h,
        pad_w,
        window_radius = config.window_radius,
        "Flat alignment"
    );

    find_best_shift(&window, channels, pad_h, pad_w, config.metric)
}
