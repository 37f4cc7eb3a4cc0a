use thiserror::Error;

#[derive(Error, Debug)]
pub enum TricolorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error(
        "Invalid padding {pad_h}x{pad_w} for {height}x{width} channel: \
         padding must be less than half of each dimension"
    )]
    InvalidPadding {
        pad_h: usize,
        pad_w: usize,
        height: usize,
        width: usize,
    },

    #[error("Channel shape mismatch: {expected_height}x{expected_width} vs {height}x{width}")]
    ShapeMismatch {
        expected_height: usize,
        expected_width: usize,
        height: usize,
        width: usize,
    },

    #[error("Empty search window")]
    EmptyWindow,

    #[error("Pyramid needs at least one level (got {0})")]
    InvalidPyramidLevels(usize),

    #[error("Channel {height}x{width} is too small for a {levels}-level pyramid")]
    ChannelTooSmall {
        height: usize,
        width: usize,
        levels: usize,
    },

    #[error("Shifts leave no overlap in a {height}x{width} channel")]
    EmptyOverlap { height: usize, width: usize },

    #[error("Plate with {rows} rows cannot be split into three channels")]
    PlateTooSmall { rows: usize },

    #[error("Auto crop removed the whole image")]
    EmptyCrop,
}

pub type Result<T> = std::result::Result<T, TricolorError>;
