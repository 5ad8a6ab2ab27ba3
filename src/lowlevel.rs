//! Building blocks behind [`Locator`](crate::Locator).
//!
//! Useful for custom search loops: score folding, region suppression and the
//! per-placement statistics used by the bundled correlators.

pub use crate::search::{normalize, suppress, SUPPRESS_FILL};
pub use crate::store::{FilenameGenerator, SEQUENCE_WRAP};
pub use crate::template::{TemplatePlan, WindowSums};
