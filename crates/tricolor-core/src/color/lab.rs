//! sRGB <-> CIE L*a*b* conversion (D65 white point).

use crate::consts::D65_WHITE;

/// Linear sRGB to XYZ.
const XYZ_FROM_RGB: [[f64; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// XYZ to linear sRGB (inverse of `XYZ_FROM_RGB`).
const RGB_FROM_XYZ: [[f64; 3]; 3] = [
    [3.240481, -1.537152, -0.498536],
    [-0.969255, 1.875990, 0.041556],
    [0.055647, -0.204041, 1.057311],
];

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

/// Convert a gamma-encoded sRGB triple in [0, 1] to `[L*, a*, b*]`.
/// L* is in [0, 100].
pub fn rgb_to_lab(rgb: [f32; 3]) -> [f64; 3] {
    let linear = rgb.map(|c| srgb_to_linear(c as f64));
    let xyz = mat_mul(&XYZ_FROM_RGB, linear);

    let f = [0, 1, 2].map(|i| lab_f(xyz[i] / D65_WHITE[i]));
    [
        116.0 * f[1] - 16.0,
        500.0 * (f[0] - f[1]),
        200.0 * (f[1] - f[2]),
    ]
}

/// Convert `[L*, a*, b*]` back to sRGB, clamped to [0, 1].
pub fn lab_to_rgb(lab: [f64; 3]) -> [f32; 3] {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = (fy - lab[2] / 200.0).max(0.0);

    let f = [fx, fy, fz];
    let xyz = [0, 1, 2].map(|i| lab_f_inv(f[i]) * D65_WHITE[i]);
    let linear = mat_mul(&RGB_FROM_XYZ, xyz);

    linear.map(|c| linear_to_srgb(c).clamp(0.0, 1.0) as f32)
}

fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c > 0.0031308 {
        1.055 * c.max(0.0).powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA * t + LAB_OFFSET
    }
}

fn lab_f_inv(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > LAB_EPSILON {
        cubed
    } else {
        (f - LAB_OFFSET) / LAB_KAPPA
    }
}

fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}
