use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Channel;

/// Apply an isotropic Gaussian blur to a channel using separable 1D convolution.
pub fn gaussian_blur(channel: &Channel, sigma: f32) -> Channel {
    Channel::new(gaussian_blur_array(&channel.data, sigma, sigma))
}

/// Apply a Gaussian blur with independent vertical and horizontal sigmas.
///
/// An axis with `sigma <= 0` is left untouched. Edges are extended by
/// clamping to the nearest pixel.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma_y: f32, sigma_x: f32) -> Array2<f32> {
    let mut result = data.clone();
    if sigma_x > 0.0 {
        result = convolve_axis(&result, &make_gaussian_kernel(sigma_x), Axis(1));
    }
    if sigma_y > 0.0 {
        result = convolve_axis(&result, &make_gaussian_kernel(sigma_y), Axis(0));
    }
    result
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Convolve every lane along `axis` with `kernel`.
fn convolve_axis(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let mut result = Array2::<f32>::zeros(data.dim());
    let lanes = Zip::from(result.lanes_mut(axis)).and(data.lanes(axis));

    if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        lanes.par_for_each(|dst, src| convolve_lane(src, dst, kernel));
    } else {
        lanes.for_each(|dst, src| convolve_lane(src, dst, kernel));
    }

    result
}

fn convolve_lane(src: ArrayView1<f32>, mut dst: ArrayViewMut1<f32>, kernel: &[f32]) {
    let n = src.len() as isize;
    let radius = (kernel.len() / 2) as isize;

    for (i, out) in dst.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let j = (i as isize + ki as isize - radius).clamp(0, n - 1) as usize;
            sum += src[j] * kv;
        }
        *out = sum;
    }
}
