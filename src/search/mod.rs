//! Threshold-gated template location.
//!
//! [`Locator`] runs one correlation pass per search, folds the better
//! extremum into a confidence with [`normalize`], and accepts the placement
//! when the confidence reaches the configured threshold. Multi-match search
//! paints each accepted region of a private working copy with
//! [`suppress`] before searching again.

#[cfg(feature = "image-io")]
mod files;
mod locate;
pub(crate) mod normalize;
pub(crate) mod suppress;

pub use locate::Locator;
pub use normalize::normalize;
pub use suppress::{suppress, SUPPRESS_FILL};

use crate::util::{CorrLocateError, CorrLocateResult};

/// Similarity metric evaluated by the correlation primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchMetric {
    /// Sum of squared differences; 0 is a perfect match.
    SqDiff,
    /// Squared differences divided by `sqrt(sum T^2 * sum I^2)`.
    SqDiffNormed,
    /// Plain cross-correlation `sum T * I`.
    CCorr,
    /// Cross-correlation divided by `sqrt(sum T^2 * sum I^2)`.
    CCorrNormed,
    /// Correlation of mean-subtracted template and window.
    CCoeff,
    /// Zero-mean normalized cross-correlation in `[-1, 1]`.
    #[default]
    CCoeffNormed,
}

/// Which extremum of the surface marks the best placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

impl MatchMetric {
    /// All metrics in declaration order.
    pub const ALL: [MatchMetric; 6] = [
        MatchMetric::SqDiff,
        MatchMetric::SqDiffNormed,
        MatchMetric::CCorr,
        MatchMetric::CCorrNormed,
        MatchMetric::CCoeff,
        MatchMetric::CCoeffNormed,
    ];

    /// Returns the extremum that marks the best placement.
    pub fn best_extremum(self) -> Extremum {
        match self {
            MatchMetric::SqDiff | MatchMetric::SqDiffNormed => Extremum::Min,
            _ => Extremum::Max,
        }
    }

    /// Returns true for metrics whose raw scores are already bounded.
    pub fn is_normalized(self) -> bool {
        matches!(
            self,
            MatchMetric::SqDiffNormed | MatchMetric::CCorrNormed | MatchMetric::CCoeffNormed
        )
    }

    /// Stable snake_case name, used in logs and configs.
    pub fn name(self) -> &'static str {
        match self {
            MatchMetric::SqDiff => "sq_diff",
            MatchMetric::SqDiffNormed => "sq_diff_normed",
            MatchMetric::CCorr => "ccorr",
            MatchMetric::CCorrNormed => "ccorr_normed",
            MatchMetric::CCoeff => "ccoeff",
            MatchMetric::CCoeffNormed => "ccoeff_normed",
        }
    }

    /// Parses a name produced by [`MatchMetric::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Which threshold comparisons are reported as trace events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DebugMode {
    /// Report nothing.
    #[default]
    Off,
    /// Report every comparison, accepted or not.
    EachMatch,
    /// Report only comparisons that fell below the threshold.
    NotMatch,
}

/// Configuration for template location.
#[derive(Clone, Debug, PartialEq)]
pub struct LocateConfig {
    /// Metric passed to the correlator.
    pub metric: MatchMetric,
    /// Acceptance threshold; values above 1.0 are treated as 1.0.
    pub confidence: f32,
    /// Intensity painted over accepted regions during multi-match search.
    pub fill_value: u8,
    /// Upper bound on the number of multi-match results.
    pub max_matches: Option<usize>,
    /// Trace reporting of threshold comparisons.
    pub debug: DebugMode,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            metric: MatchMetric::default(),
            confidence: 0.95,
            fill_value: SUPPRESS_FILL,
            max_matches: None,
            debug: DebugMode::Off,
        }
    }
}

impl LocateConfig {
    /// Validates config parameters.
    pub fn validate(&self) -> CorrLocateResult<()> {
        if self.confidence.is_nan() {
            return Err(CorrLocateError::InvalidConfig {
                reason: "confidence must not be NaN",
            });
        }
        if self.max_matches == Some(0) {
            return Err(CorrLocateError::InvalidConfig {
                reason: "max_matches must be at least 1",
            });
        }
        Ok(())
    }

    /// Returns the threshold actually compared against.
    pub fn effective_confidence(&self) -> f32 {
        self.confidence.min(1.0)
    }
}
