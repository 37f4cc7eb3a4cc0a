use ndarray::{concatenate, Array2, Axis};

use tricolor_core::align::shift::roll_array;
use tricolor_core::frame::{Channel, ColorFrame, Displacement, Plate};

/// Deterministic pseudo-random values in [0.1, 0.9] (xorshift).
pub fn noise_pattern(height: usize, width: usize, seed: u64) -> Array2<f32> {
    let mut state = seed.max(1);
    Array2::from_shape_fn((height, width), |_| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        0.1 + 0.8 * ((state >> 11) as f64 / (1u64 << 53) as f64) as f32
    })
}

/// Smooth, asymmetric pattern: a few Gaussian blobs kept away from the edges.
pub fn blob_pattern(height: usize, width: usize) -> Array2<f32> {
    let blobs = [
        (0.35, 0.30, 0.09, 0.8),
        (0.60, 0.65, 0.07, 0.6),
        (0.45, 0.55, 0.05, -0.3),
        (0.65, 0.35, 0.06, 0.5),
    ];
    let scale = height.min(width) as f32;
    Array2::from_shape_fn((height, width), |(r, c)| {
        let mut v = 0.1f32;
        for &(cy, cx, sigma, amp) in &blobs {
            let dy = r as f32 - cy * height as f32;
            let dx = c as f32 - cx * width as f32;
            let s = sigma * scale;
            v += amp * (-(dy * dy + dx * dx) / (2.0 * s * s)).exp();
        }
        v.clamp(0.0, 1.0)
    })
}

/// B is `pattern`; G and R are `pattern` rolled by the given offsets.
pub fn offset_channels(
    pattern: &Array2<f32>,
    green_offset: Displacement,
    red_offset: Displacement,
) -> ColorFrame {
    ColorFrame {
        red: Channel::new(roll_array(pattern, red_offset)),
        green: Channel::new(roll_array(pattern, green_offset)),
        blue: Channel::new(pattern.clone()),
    }
}

pub fn identical_channels(pattern: &Array2<f32>) -> ColorFrame {
    offset_channels(pattern, Displacement::ZERO, Displacement::ZERO)
}

/// Stack B, G, R vertically into a plate, plus `extra_rows` rows of zeros.
pub fn build_plate(channels: &ColorFrame, extra_rows: usize) -> Plate {
    let filler = Array2::<f32>::zeros((extra_rows, channels.width()));
    let data = concatenate(
        Axis(0),
        &[
            channels.blue.data.view(),
            channels.green.data.view(),
            channels.red.data.view(),
            filler.view(),
        ],
    )
    .expect("equal widths");
    Plate::new(data, 8)
}
