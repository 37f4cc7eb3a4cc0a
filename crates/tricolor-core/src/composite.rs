use tracing::debug;

use crate::align::shift::shift_and_crop;
use crate::error::Result;
use crate::frame::{AlignmentResult, ColorFrame};

/// Register the green and red planes onto blue and crop to the region all
/// three cover.
///
/// The crop is derived from the final displacements only: `max(dy, 0)` rows
/// are removed from the top and `-min(dy, 0)` from the bottom over both
/// planes, columns likewise, so no wrapped-around content survives.
pub fn compose(channels: &ColorFrame, alignment: &AlignmentResult) -> Result<ColorFrame> {
    let composite = shift_and_crop(channels, alignment)?;

    debug!(
        source_height = channels.height(),
        source_width = channels.width(),
        height = composite.height(),
        width = composite.width(),
        "Composited channels"
    );

    Ok(composite)
}
