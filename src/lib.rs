//! CorrLocate finds a small grayscale template inside a larger image.
//!
//! A [`Locator`] correlates the template against the source under one of six
//! [`MatchMetric`]s, folds the best extremum into a confidence and accepts it
//! against a threshold. Multi-match search repeats this over a working copy,
//! painting each accepted region before the next pass. Optional features add
//! a row-parallel correlator (`rayon`), file and byte entry points
//! (`image-io`) and tracing spans (`tracing`).

pub mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
pub mod store;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::candidate::{to_rects, Location, MatchRect, ScoredLocation};
pub use crate::image::{ImageView, OwnedImage};
pub use crate::kernel::scalar::ScalarCorrelator;
pub use crate::kernel::{Correlator, Extremes, Surface};
pub use crate::search::{DebugMode, Extremum, LocateConfig, Locator, MatchMetric};
pub use crate::store::{StoreConfig, TempStore};
pub use crate::util::{CorrLocateError, CorrLocateResult, MatchStage};

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::ParallelCorrelator;
