//! Error types for corrlocate.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for corrlocate operations.
pub type CorrLocateResult<T> = std::result::Result<T, CorrLocateError>;

/// Matching stage an error was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStage {
    /// Computing the correlation surface and its extremes.
    Correlation,
    /// Folding the raw extremum into a confidence value.
    Normalization,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStage::Correlation => f.write_str("correlation"),
            MatchStage::Normalization => f.write_str("normalization"),
        }
    }
}

/// Errors that can occur when locating templates.
///
/// A template that is simply absent is not an error: the locators report it
/// as `Ok(None)` or an empty result.
#[derive(Debug, Error)]
pub enum CorrLocateError {
    /// Image dimensions are zero or overflow when multiplied.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the declared geometry requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// An owned buffer must hold exactly `width * height` pixels.
    #[error("buffer length mismatch: expected {expected} elements, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// Template does not fit inside the source image.
    #[error("template {tpl_width}x{tpl_height} does not fit in image {img_width}x{img_height}")]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// The correlation surface produced a NaN or infinite extremum.
    #[error("non-finite score {value}")]
    NonFiniteScore { value: f32 },
    /// Image decoding or encoding failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
    /// The temp store was used without a directory.
    #[error("temp store directory is not configured")]
    StoreNotConfigured,
    /// The temp store path exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
    /// Filesystem access failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An error annotated with the stage that produced it.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: MatchStage,
        #[source]
        source: Box<CorrLocateError>,
    },
}

impl CorrLocateError {
    /// Wraps the error with the stage it was raised in.
    pub fn in_stage(self, stage: MatchStage) -> Self {
        CorrLocateError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping stage annotations.
    pub fn root(&self) -> &CorrLocateError {
        match self {
            CorrLocateError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}
