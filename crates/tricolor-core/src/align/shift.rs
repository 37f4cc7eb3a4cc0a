use ndarray::{s, Array2};

use crate::error::{Result, TricolorError};
use crate::frame::{AlignmentResult, Channel, ColorFrame, Displacement};

/// Circularly translate a channel: content moves down by `dy` and right by
/// `dx`, and whatever leaves one edge re-enters at the opposite edge.
pub fn roll(channel: &Channel, shift: Displacement) -> Channel {
    Channel::new(roll_array(&channel.data, shift))
}

pub fn roll_array(data: &Array2<f32>, shift: Displacement) -> Array2<f32> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return data.clone();
    }

    let sy = (shift.dy as i64).rem_euclid(h as i64) as usize;
    let sx = (shift.dx as i64).rem_euclid(w as i64) as usize;

    let mut result = Array2::<f32>::zeros((h, w));
    result
        .slice_mut(s![sy.., sx..])
        .assign(&data.slice(s![..h - sy, ..w - sx]));
    result
        .slice_mut(s![sy.., ..sx])
        .assign(&data.slice(s![..h - sy, (w - sx)..]));
    result
        .slice_mut(s![..sy, sx..])
        .assign(&data.slice(s![(h - sy).., ..w - sx]));
    result
        .slice_mut(s![..sy, ..sx])
        .assign(&data.slice(s![(h - sy).., (w - sx)..]));
    result
}

/// Region shared by all three planes after green and red have been rolled.
///
/// Rows `top..bottom` and columns `left..right`, half-open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapWindow {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl OverlapWindow {
    /// Trim `max(dy_g, dy_r, 0)` rows from the top and `-min(dy_g, dy_r, 0)`
    /// from the bottom; columns likewise.
    pub fn from_alignment(
        alignment: &AlignmentResult,
        height: usize,
        width: usize,
    ) -> Result<Self> {
        let (g, r) = (alignment.green, alignment.red);
        let rows = overlap_span(g.dy, r.dy, height);
        let cols = overlap_span(g.dx, r.dx, width);

        match (rows, cols) {
            (Some((top, bottom)), Some((left, right))) => Ok(Self {
                top,
                bottom,
                left,
                right,
            }),
            _ => Err(TricolorError::EmptyOverlap { height, width }),
        }
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn crop(&self, channel: &Channel) -> Channel {
        Channel::new(
            channel
                .data
                .slice(s![self.top..self.bottom, self.left..self.right])
                .to_owned(),
        )
    }
}

fn overlap_span(a: i32, b: i32, extent: usize) -> Option<(usize, usize)> {
    let start = a.max(b).max(0) as i64;
    let end = extent as i64 + a.min(b).min(0) as i64;
    (start < end).then_some((start as usize, end as usize))
}

/// Roll green and red by their displacements, then crop all three planes
/// to the overlap window.
pub fn shift_and_crop(channels: &ColorFrame, alignment: &AlignmentResult) -> Result<ColorFrame> {
    channels.ensure_same_shape()?;
    let window = OverlapWindow::from_alignment(alignment, channels.height(), channels.width())?;

    let green = roll(&channels.green, alignment.green);
    let red = roll(&channels.red, alignment.red);

    Ok(ColorFrame {
        red: window.crop(&red),
        green: window.crop(&green),
        blue: window.crop(&channels.blue),
    })
}
