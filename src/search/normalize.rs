//! Folding raw surface extremes into confidences.
//!
//! Unbounded metrics keep only the fractional part `x - floor(x)` of their raw
//! extremum, so their confidence always lies in `[0, 1)`; a negative raw
//! maximum folds upward rather than going below zero.
//! Large raw scores therefore lose their magnitude: an integer-valued
//! squared difference always folds to confidence 1. Existing callers rely on
//! this exact transform, so prefer the normalized metrics for new code.

use crate::candidate::Location;
use crate::kernel::Extremes;
use crate::search::MatchMetric;
use crate::util::math::{frac, frac_from_one};

/// Returns the confidence and placement of the better extremum for `metric`.
pub fn normalize(extremes: Extremes, metric: MatchMetric) -> (f32, Location) {
    match metric {
        MatchMetric::SqDiff | MatchMetric::SqDiffNormed => {
            (1.0 - frac_from_one(extremes.min_value), extremes.min_loc)
        }
        MatchMetric::CCorr | MatchMetric::CCoeff => {
            (frac(extremes.max_value), extremes.max_loc)
        }
        MatchMetric::CCorrNormed | MatchMetric::CCoeffNormed => {
            (extremes.max_value, extremes.max_loc)
        }
    }
}
