//! Match locations and their bounding rectangles.

pub(crate) mod rect;

pub use rect::{to_rects, MatchRect};

/// Top-left pixel of a match in source-image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    /// Column of the template's top-left corner.
    pub x: usize,
    /// Row of the template's top-left corner.
    pub y: usize,
}

impl Location {
    /// Creates a location from column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An accepted location together with the confidence that cleared the gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredLocation {
    /// Top-left of the match.
    pub location: Location,
    /// Normalized confidence, nominally in `[0, 1]`.
    pub confidence: f32,
}
