//! Bounding rectangles for accepted matches.

use crate::candidate::Location;

/// Axis-aligned region occupied by a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MatchRect {
    /// Left edge (inclusive).
    pub x: usize,
    /// Top edge (inclusive).
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl MatchRect {
    /// Builds the rectangle a `width x height` template covers at `location`.
    pub fn from_location(location: Location, width: usize, height: usize) -> Self {
        Self {
            x: location.x,
            y: location.y,
            width,
            height,
        }
    }

    /// Returns the top-left corner.
    pub fn min(&self) -> Location {
        Location::new(self.x, self.y)
    }

    /// Returns the bottom-right corner (exclusive).
    pub fn max(&self) -> Location {
        Location::new(self.right(), self.bottom())
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Returns true when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &MatchRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns true when `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Maps each location to its rectangle, preserving order and length.
pub fn to_rects(locations: &[Location], width: usize, height: usize) -> Vec<MatchRect> {
    locations
        .iter()
        .map(|&loc| MatchRect::from_location(loc, width, height))
        .collect()
}
