use tracing::info;

use crate::error::Result;
use crate::frame::{AlignmentResult, ColorFrame};
use crate::pipeline::config::AlignmentMethod;

use super::{flat, pyramid};

/// Align green and red to blue using the configured method.
pub fn align_channels(
    channels: &ColorFrame,
    method: &AlignmentMethod,
) -> Result<AlignmentResult> {
    let alignment = match method {
        AlignmentMethod::Flat(config) => flat::align_flat(channels, config)?,
        AlignmentMethod::Pyramid(config) => pyramid::align_pyramid(channels, config)?,
    };

    info!(
        method = %method,
        green = %alignment.green,
        red = %alignment.red,
        "Channels aligned"
    );

    Ok(alignment)
}
