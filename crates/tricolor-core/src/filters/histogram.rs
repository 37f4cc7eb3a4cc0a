use ndarray::Array2;

use crate::color::lab::{lab_to_rgb, rgb_to_lab};
use crate::color::process::{map_pixels, process_color};
use crate::consts::{LAB_HISTOGRAM_BINS, RGB_HISTOGRAM_BINS};
use crate::frame::{Channel, ColorFrame};

/// Cumulative histogram of `values` over `[lo, hi]`, divided by `total`.
///
/// Values outside the range are not counted; `hi` falls in the last bin.
pub fn cumulative_histogram<'a>(
    values: impl IntoIterator<Item = &'a f32>,
    bins: usize,
    lo: f32,
    hi: f32,
    total: usize,
) -> Vec<f64> {
    let mut counts = vec![0usize; bins];
    let width = (hi - lo) / bins as f32;

    for &v in values {
        if !(lo..=hi).contains(&v) {
            continue;
        }
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    let total = total.max(1) as f64;
    let mut running = 0usize;
    counts
        .into_iter()
        .map(|count| {
            running += count;
            running as f64 / total
        })
        .collect()
}

/// Equalize one channel: each value `v` becomes `cdf[floor(v * 255)]`.
pub fn equalize_channel(channel: &Channel) -> Channel {
    let cdf = cumulative_histogram(
        channel.data.iter(),
        RGB_HISTOGRAM_BINS,
        0.0,
        1.0,
        channel.data.len(),
    );
    let top = RGB_HISTOGRAM_BINS - 1;
    let data = channel.data.mapv(|v| {
        let index = ((v.clamp(0.0, 1.0) * top as f32) as usize).min(top);
        cdf[index] as f32
    });
    Channel::new(data)
}

/// Histogram-equalize R, G and B independently.
pub fn equalize_rgb(color: &ColorFrame) -> ColorFrame {
    process_color(color, equalize_channel)
}

/// Histogram-equalize lightness only.
///
/// The image is converted to CIE L*a*b*, L* is remapped through its own
/// 101-bin cumulative histogram (`L' = cdf[floor(L)] * 100`), and the
/// result is converted back to sRGB with a* and b* unchanged.
pub fn equalize_lab(color: &ColorFrame) -> ColorFrame {
    let (h, w) = color.blue.dim();
    let lightness = Array2::from_shape_fn((h, w), |(r, c)| {
        let [l, _, _] = rgb_to_lab([
            color.red.data[[r, c]],
            color.green.data[[r, c]],
            color.blue.data[[r, c]],
        ]);
        l as f32
    });

    let cdf = cumulative_histogram(lightness.iter(), LAB_HISTOGRAM_BINS, 0.0, 100.0, h * w);
    let top = LAB_HISTOGRAM_BINS - 1;

    map_pixels(color, |rgb| {
        let [l, a, b] = rgb_to_lab(rgb);
        let index = (l.clamp(0.0, top as f64).floor() as usize).min(top);
        lab_to_rgb([cdf[index] * 100.0, a, b])
    })
}
