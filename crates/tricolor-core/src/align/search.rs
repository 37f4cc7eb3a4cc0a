//! Exhaustive integer shift search.
//!
//! Compares the interior of the blue plane against the interior of the
//! green and red planes moved by every candidate displacement in a window.

use std::ops::Range;

use ndarray::{s, Array2, ArrayView2, CowArray, Ix2};
use tracing::{debug, warn};

use crate::consts::PADDING_DIVISOR;
use crate::error::{Result, TricolorError};
use crate::frame::{AlignmentResult, ColorFrame, Displacement};

use super::metric::SimilarityMetric;

/// Candidate displacements, as two half-open ranges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    pub dy: Range<i32>,
    pub dx: Range<i32>,
}

impl SearchWindow {
    pub fn new(dy: Range<i32>, dx: Range<i32>) -> Self {
        Self { dy, dx }
    }

    /// `-radius..radius` on both axes.
    pub fn symmetric(radius: i32) -> Self {
        Self::new(-radius..radius, -radius..radius)
    }

    pub fn is_empty(&self) -> bool {
        self.dy.is_empty() || self.dx.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dy.len() * self.dx.len()
    }

    /// Candidates in raster order: `dy` outer, `dx` inner.
    pub fn candidates(&self) -> impl Iterator<Item = Displacement> + '_ {
        self.dy
            .clone()
            .flat_map(move |dy| self.dx.clone().map(move |dx| Displacement::new(dy, dx)))
    }
}

/// Padding that trims the border fifth of each dimension.
pub fn interior_padding(height: usize, width: usize) -> (usize, usize) {
    (height / PADDING_DIVISOR, width / PADDING_DIVISOR)
}

/// Find the displacements that best align green and red to blue.
///
/// The interior of blue (`pad_h` rows and `pad_w` columns trimmed from every
/// side) is scored against the same-sized region of green and red whose
/// origin moves by each candidate `(i, j)`. Regions leaving the plane wrap
/// around, matching a circular shift of the whole plane. The returned
/// displacement is the negated winning candidate: the shift to apply to the
/// plane itself.
///
/// Exact score ties go to the candidate with the smaller `|dy| + |dx|`, then
/// to the first one in raster order.
pub fn find_best_shift(
    window: &SearchWindow,
    channels: &ColorFrame,
    pad_h: usize,
    pad_w: usize,
    metric: SimilarityMetric,
) -> Result<AlignmentResult> {
    channels.ensure_same_shape()?;
    if window.is_empty() {
        return Err(TricolorError::EmptyWindow);
    }

    let (h, w) = channels.blue.dim();
    if 2 * pad_h >= h || 2 * pad_w >= w {
        return Err(TricolorError::InvalidPadding {
            pad_h,
            pad_w,
            height: h,
            width: w,
        });
    }

    let reference = channels.blue.data.slice(s![pad_h..h - pad_h, pad_w..w - pad_w]);
    let mut green_best = BestCandidate::new(metric);
    let mut red_best = BestCandidate::new(metric);

    for candidate in window.candidates() {
        let green_patch = moved_interior(&channels.green.data, pad_h, pad_w, candidate);
        if let Some(score) = metric.score(reference, green_patch.view()) {
            green_best.offer(candidate, score);
        }

        let red_patch = moved_interior(&channels.red.data, pad_h, pad_w, candidate);
        if let Some(score) = metric.score(reference, red_patch.view()) {
            red_best.offer(candidate, score);
        }
    }

    debug!(
        height = h,
        width = w,
        candidates = window.len(),
        metric = %metric,
        green_score = ?green_best.score(),
        red_score = ?red_best.score(),
        "Shift search complete"
    );

    Ok(AlignmentResult::new(
        -green_best.finish("green"),
        -red_best.finish("red"),
    ))
}

/// Interior region of `data` with its origin moved by `offset`.
///
/// Borrowed when the moved region stays inside the plane, otherwise
/// gathered with wrap-around indexing.
fn moved_interior(
    data: &Array2<f32>,
    pad_h: usize,
    pad_w: usize,
    offset: Displacement,
) -> CowArray<'_, f32, Ix2> {
    let (h, w) = data.dim();
    let top = pad_h as i64 + offset.dy as i64;
    let left = pad_w as i64 + offset.dx as i64;
    let rows = h - 2 * pad_h;
    let cols = w - 2 * pad_w;

    let fits_rows = top >= 0 && top + rows as i64 <= h as i64;
    let fits_cols = left >= 0 && left + cols as i64 <= w as i64;
    if fits_rows && fits_cols {
        let (top, left) = (top as usize, left as usize);
        let view: ArrayView2<f32> = data.slice(s![top..top + rows, left..left + cols]);
        return CowArray::from(view);
    }

    let wrapped = Array2::from_shape_fn((rows, cols), |(r, c)| {
        let src_r = (top + r as i64).rem_euclid(h as i64) as usize;
        let src_c = (left + c as i64).rem_euclid(w as i64) as usize;
        data[[src_r, src_c]]
    });
    CowArray::from(wrapped)
}

/// Running best candidate under one metric.
struct BestCandidate {
    metric: SimilarityMetric,
    best: Option<(Displacement, f64)>,
}

impl BestCandidate {
    fn new(metric: SimilarityMetric) -> Self {
        Self { metric, best: None }
    }

    fn offer(&mut self, candidate: Displacement, score: f64) {
        if score.is_nan() {
            return;
        }
        let replace = match self.best {
            None => true,
            Some((current, best_score)) => {
                self.metric.is_better(score, best_score)
                    || (score == best_score && candidate.magnitude() < current.magnitude())
            }
        };
        if replace {
            self.best = Some((candidate, score));
        }
    }

    fn score(&self) -> Option<f64> {
        self.best.map(|(_, score)| score)
    }

    fn finish(self, plane: &str) -> Displacement {
        match self.best {
            Some((candidate, _)) => candidate,
            None => {
                warn!(plane, "No candidate had a defined score, assuming zero shift");
                Displacement::ZERO
            }
        }
    }
}
