use std::fmt;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;

/// How two equally-shaped patches are compared during the shift search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMetric {
    /// Zero-mean normalized cross-correlation. Higher is better.
    #[default]
    NormalizedCrossCorrelation,
    /// L2 norm of the difference. Lower is better.
    EuclideanDistance,
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NormalizedCrossCorrelation => write!(f, "Normalized Cross-Correlation"),
            Self::EuclideanDistance => write!(f, "Euclidean Distance"),
        }
    }
}

impl SimilarityMetric {
    /// Score `a` against `b`. `None` means the score is undefined for this
    /// pair (a flat patch under NCC) and the candidate must not be selected.
    pub fn score(&self, a: ArrayView2<f32>, b: ArrayView2<f32>) -> Option<f64> {
        match self {
            Self::NormalizedCrossCorrelation => normalized_cross_correlation(a, b),
            Self::EuclideanDistance => Some(euclidean_distance(a, b)),
        }
    }

    /// Whether `candidate` strictly beats `best` under this metric's ordering.
    pub fn is_better(&self, candidate: f64, best: f64) -> bool {
        match self {
            Self::NormalizedCrossCorrelation => candidate > best,
            Self::EuclideanDistance => candidate < best,
        }
    }
}

/// Dot product of the mean-subtracted, unit-normalized patches, in [-1, 1].
///
/// Returns `None` when either patch has (numerically) zero variance.
pub fn normalized_cross_correlation(a: ArrayView2<f32>, b: ArrayView2<f32>) -> Option<f64> {
    debug_assert_eq!(a.dim(), b.dim());
    let n = a.len();
    if n == 0 {
        return None;
    }

    let mean_a = a.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let mean_b = b.iter().map(|&v| v as f64).sum::<f64>() / n as f64;

    let mut cross = 0.0f64;
    let mut energy_a = 0.0f64;
    let mut energy_b = 0.0f64;
    for (&va, &vb) in a.iter().zip(b.iter()) {
        let da = va as f64 - mean_a;
        let db = vb as f64 - mean_b;
        cross += da * db;
        energy_a += da * da;
        energy_b += db * db;
    }

    let norm_a = energy_a.sqrt();
    let norm_b = energy_b.sqrt();
    if norm_a < EPSILON || norm_b < EPSILON {
        return None;
    }

    Some(cross / (norm_a * norm_b))
}

/// Euclidean (L2) distance between the flattened patches.
pub fn euclidean_distance(a: ArrayView2<f32>, b: ArrayView2<f32>) -> f64 {
    debug_assert_eq!(a.dim(), b.dim());
    a.iter()
        .zip(b.iter())
        .map(|(&va, &vb)| {
            let d = va as f64 - vb as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
