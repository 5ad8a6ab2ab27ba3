//! Region suppression between multi-match passes.

use crate::candidate::Location;
use crate::image::OwnedImage;

/// Saturated intensity painted over accepted regions.
pub const SUPPRESS_FILL: u8 = 255;

/// Paints the `width x height` region at `location` with `fill`.
///
/// Operates on a working copy owned by the caller; the region is clipped to
/// the buffer. Repeating the call leaves the buffer unchanged.
pub fn suppress(buffer: &mut OwnedImage, location: Location, width: usize, height: usize, fill: u8) {
    buffer.fill_rect(location.x, location.y, width, height, fill);
}

#[cfg(test)]
mod tests {
    use super::{suppress, SUPPRESS_FILL};
    use crate::candidate::{Location, MatchRect};
    use crate::image::OwnedImage;

    #[test]
    fn suppress_paints_only_the_region() {
        let mut img = OwnedImage::filled(8, 6, 10).unwrap();
        suppress(&mut img, Location::new(2, 1), 3, 2, SUPPRESS_FILL);

        let rect = MatchRect::from_location(Location::new(2, 1), 3, 2);
        for y in 0..6 {
            for x in 0..8 {
                let expected = if rect.contains(x, y) { SUPPRESS_FILL } else { 10 };
                assert_eq!(img.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn suppress_is_idempotent() {
        let data: Vec<u8> = (0u8..48).collect();
        let mut once = OwnedImage::new(data, 8, 6).unwrap();
        suppress(&mut once, Location::new(5, 4), 4, 4, SUPPRESS_FILL);
        let mut twice = once.clone();
        suppress(&mut twice, Location::new(5, 4), 4, 4, SUPPRESS_FILL);
        assert_eq!(once, twice);
    }
}
