//! Correlation primitives.
//!
//! A [`Correlator`] slides a template over an image and produces a score
//! [`Surface`] of size `(W - w + 1) x (H - h + 1)` for one [`MatchMetric`].
//! The locators only consume the surface's [`Extremes`].

use crate::candidate::Location;
use crate::search::MatchMetric;
use crate::util::{CorrLocateError, CorrLocateResult};
use crate::ImageView;

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Dense row-major grid of raw scores.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Surface {
    /// Wraps a row-major score buffer of exactly `width * height` values.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> CorrLocateResult<Self> {
        if width == 0 || height == 0 {
            return Err(CorrLocateError::InvalidDimensions { width, height });
        }
        if data.len() != width * height {
            return Err(CorrLocateError::BufferLengthMismatch {
                expected: width * height,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the number of placements along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of placements along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the scores in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the score of the placement at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Finds the smallest and largest scores and where they occur.
    ///
    /// Ties resolve to the first placement in row-major order.
    pub fn extremes(&self) -> Extremes {
        let first = self.data[0];
        let mut out = Extremes {
            min_value: first,
            max_value: first,
            min_loc: Location::new(0, 0),
            max_loc: Location::new(0, 0),
        };
        for (idx, &value) in self.data.iter().enumerate() {
            if value < out.min_value {
                out.min_value = value;
                out.min_loc = Location::new(idx % self.width, idx / self.width);
            }
            if value > out.max_value {
                out.max_value = value;
                out.max_loc = Location::new(idx % self.width, idx / self.width);
            }
        }
        out
    }
}

/// Global minimum and maximum of a correlation surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes {
    /// Smallest raw score.
    pub min_value: f32,
    /// Largest raw score.
    pub max_value: f32,
    /// Placement of the smallest score.
    pub min_loc: Location,
    /// Placement of the largest score.
    pub max_loc: Location,
}

/// Computes correlation surfaces between a template and an image.
pub trait Correlator {
    /// Scores every placement of `template` inside `image` under `metric`.
    fn correlate(
        &self,
        image: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
        metric: MatchMetric,
    ) -> CorrLocateResult<Surface>;

    /// Reduces the correlation surface to its extremes.
    fn extremes(
        &self,
        image: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
        metric: MatchMetric,
    ) -> CorrLocateResult<Extremes> {
        Ok(self.correlate(image, template, metric)?.extremes())
    }
}

impl<C: Correlator + ?Sized> Correlator for &C {
    fn correlate(
        &self,
        image: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
        metric: MatchMetric,
    ) -> CorrLocateResult<Surface> {
        (**self).correlate(image, template, metric)
    }
}

#[cfg(test)]
mod tests {
    use super::Surface;
    use crate::candidate::Location;

    #[test]
    fn extremes_prefer_first_occurrence() {
        let surface = Surface::new(vec![10.0, 7.0, 8.0, 1.0, 9.0, 15.0, 4.0, 1.0], 4, 2).unwrap();
        let ext = surface.extremes();
        assert_eq!(ext.max_value, 15.0);
        assert_eq!(ext.max_loc, Location::new(1, 1));
        assert_eq!(ext.min_value, 1.0);
        assert_eq!(ext.min_loc, Location::new(3, 0));
    }

    #[test]
    fn surface_rejects_mismatched_buffer() {
        assert!(Surface::new(vec![0.0; 5], 2, 3).is_err());
        assert!(Surface::new(Vec::new(), 0, 1).is_err());
    }
}
