//! Antialiased bilinear resampling for the alignment pyramid.

use ndarray::Array2;

use crate::frame::{Channel, ColorFrame};

use super::gaussian_blur::gaussian_blur_array;

/// Resize a channel to `(height, width)`.
///
/// When an axis shrinks by a factor `f > 1`, that axis is first blurred with
/// `sigma = (f - 1) / 2` to suppress aliasing. Samples are then taken by
/// bilinear interpolation at pixel centers, with edges clamped.
pub fn resize(channel: &Channel, height: usize, width: usize) -> Channel {
    Channel::new(resize_array(&channel.data, height, width))
}

pub fn resize_array(data: &Array2<f32>, height: usize, width: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    if (h, w) == (height, width) {
        return data.clone();
    }
    if h == 0 || w == 0 || height == 0 || width == 0 {
        return Array2::zeros((height, width));
    }

    let scale_y = h as f64 / height as f64;
    let scale_x = w as f64 / width as f64;

    let sigma_y = antialias_sigma(scale_y);
    let sigma_x = antialias_sigma(scale_x);
    let smoothed;
    let source = if sigma_y > 0.0 || sigma_x > 0.0 {
        smoothed = gaussian_blur_array(data, sigma_y, sigma_x);
        &smoothed
    } else {
        data
    };

    let rows: Vec<(usize, usize, f32)> = (0..height)
        .map(|r| sample_position(r, scale_y, h))
        .collect();
    let cols: Vec<(usize, usize, f32)> = (0..width)
        .map(|c| sample_position(c, scale_x, w))
        .collect();

    Array2::from_shape_fn((height, width), |(r, c)| {
        let (r0, r1, fy) = rows[r];
        let (c0, c1, fx) = cols[c];
        let top = source[[r0, c0]] * (1.0 - fx) + source[[r0, c1]] * fx;
        let bottom = source[[r1, c0]] * (1.0 - fx) + source[[r1, c1]] * fx;
        top * (1.0 - fy) + bottom * fy
    })
}

/// Resize all three planes of a frame to the same shape.
pub fn resize_frame(frame: &ColorFrame, height: usize, width: usize) -> ColorFrame {
    ColorFrame {
        red: resize(&frame.red, height, width),
        green: resize(&frame.green, height, width),
        blue: resize(&frame.blue, height, width),
    }
}

fn antialias_sigma(scale: f64) -> f32 {
    ((scale - 1.0) / 2.0).max(0.0) as f32
}

/// Source neighbours and interpolation weight for output index `index`.
fn sample_position(index: usize, scale: f64, extent: usize) -> (usize, usize, f32) {
    let max = (extent - 1) as f64;
    let src = ((index as f64 + 0.5) * scale - 0.5).clamp(0.0, max);
    let lo = src.floor() as usize;
    let hi = (lo + 1).min(extent - 1);
    (lo, hi, (src - lo as f64) as f32)
}
