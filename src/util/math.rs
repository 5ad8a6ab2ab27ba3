//! Scalar helpers for score folding.

/// Returns `value - floor(value)`, always in `[0, 1)`.
///
/// Negative inputs fold upward: `-0.25` becomes `0.75`.
pub(crate) fn frac(value: f32) -> f32 {
    let rem = value.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    if rem >= 1.0 {
        0.0
    } else {
        rem
    }
}

/// Keeps only the fractional remainder once `value` reaches 1.
///
/// Values below 1 are returned unchanged.
pub(crate) fn frac_from_one(value: f32) -> f32 {
    if value >= 1.0 {
        value % 1.0
    } else {
        value
    }
}
