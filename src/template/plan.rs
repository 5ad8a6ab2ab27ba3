//! Template plan precomputation for the six correlation metrics.
//!
//! Sums are accumulated in `u64` so squared-difference and cross-correlation
//! scores of `u8` data are exact before the final float conversion.

use crate::image::ImageView;
use crate::search::MatchMetric;
use crate::util::{CorrLocateError, CorrLocateResult};

/// Precomputed template pixels and moments.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    pixels: Vec<u64>,
    sum: u64,
    sum_sq: u64,
}

/// Per-placement sums of the image window under the template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowSums {
    /// Sum of `T * I` over the window.
    pub dot: u64,
    /// Sum of `I`.
    pub sum: u64,
    /// Sum of `I * I`.
    pub sum_sq: u64,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> CorrLocateResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(CorrLocateError::InvalidDimensions { width, height })?;

        let mut pixels = Vec::with_capacity(count);
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for y in 0..height {
            for &value in tpl.span(0, y, width) {
                let v = u64::from(value);
                pixels.push(v);
                sum += v;
                sum_sq += v * v;
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
            sum,
            sum_sq,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template pixels.
    pub fn count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the sum of template intensities.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Returns the sum of squared template intensities.
    pub fn sum_sq(&self) -> u64 {
        self.sum_sq
    }

    /// Returns the mean template intensity.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count() as f64
    }

    /// Returns true when every template pixel has the same value.
    pub fn is_flat(&self) -> bool {
        is_flat(self.sum, self.sum_sq, self.count())
    }

    /// Checks that the template fits inside `image` and returns the
    /// surface size `(W - w + 1, H - h + 1)`.
    pub fn surface_size(&self, image: ImageView<'_, u8>) -> CorrLocateResult<(usize, usize)> {
        if image.width() < self.width || image.height() < self.height {
            return Err(CorrLocateError::TemplateTooLarge {
                tpl_width: self.width,
                tpl_height: self.height,
                img_width: image.width(),
                img_height: image.height(),
            });
        }
        Ok((
            image.width() - self.width + 1,
            image.height() - self.height + 1,
        ))
    }

    /// Accumulates the window sums for the placement at `(x, y)`.
    ///
    /// The placement must lie inside the range given by `surface_size`.
    #[inline]
    pub fn window_sums(&self, image: ImageView<'_, u8>, x: usize, y: usize) -> WindowSums {
        let mut sums = WindowSums::default();
        for ty in 0..self.height {
            let row = image.span(x, y + ty, self.width);
            let tpl_row = &self.pixels[ty * self.width..(ty + 1) * self.width];
            for (&value, &t) in row.iter().zip(tpl_row) {
                let v = u64::from(value);
                sums.dot += t * v;
                sums.sum += v;
                sums.sum_sq += v * v;
            }
        }
        sums
    }

    /// Converts window sums into the raw score of `metric`.
    ///
    /// Normalized metrics whose denominator vanishes score `1` for
    /// squared difference (worst) and `0` for the correlations, except that
    /// a flat template over a flat window is a perfect `CCoeffNormed` match.
    pub fn score(&self, metric: MatchMetric, w: WindowSums) -> f32 {
        let n = self.count() as f64;
        let dot = w.dot as f64;
        let si = w.sum as f64;
        let si2 = w.sum_sq as f64;
        let st = self.sum as f64;
        let st2 = self.sum_sq as f64;

        let value = match metric {
            MatchMetric::SqDiff => st2 - 2.0 * dot + si2,
            MatchMetric::SqDiffNormed => normed(st2 - 2.0 * dot + si2, (st2 * si2).sqrt(), 1.0),
            MatchMetric::CCorr => dot,
            MatchMetric::CCorrNormed => normed(dot, (st2 * si2).sqrt(), 0.0),
            MatchMetric::CCoeff => dot - st * si / n,
            MatchMetric::CCoeffNormed
                if self.is_flat() && is_flat(w.sum, w.sum_sq, self.count()) =>
            {
                1.0
            }
            MatchMetric::CCoeffNormed => {
                let var_t = (st2 - st * st / n).max(0.0);
                let var_i = (si2 - si * si / n).max(0.0);
                normed(dot - st * si / n, (var_t * var_i).sqrt(), 0.0)
            }
        };
        value as f32
    }
}

/// Exact zero-variance test: `n * sum(v^2) == sum(v)^2` only for constant data.
fn is_flat(sum: u64, sum_sq: u64, count: usize) -> bool {
    (count as u128) * u128::from(sum_sq) == u128::from(sum) * u128::from(sum)
}

fn normed(num: f64, denom: f64, degenerate: f64) -> f64 {
    if denom > f64::EPSILON {
        num / denom
    } else {
        degenerate
    }
}
