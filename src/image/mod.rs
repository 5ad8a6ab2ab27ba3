//! Grayscale raster buffers.
//!
//! `ImageView` borrows a 1D buffer as a 2D grid with an explicit stride
//! (elements between row starts); the caller's pixels are only ever read
//! through it. `OwnedImage` is the contiguous, mutable counterpart used for
//! working copies that the multi-match search paints over.

use crate::util::{CorrLocateError, CorrLocateResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> CorrLocateResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> CorrLocateResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(CorrLocateError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns row `y` without its padding.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Returns `width` elements of row `y` starting at column `x`.
    ///
    /// Callers guarantee `x + width <= self.width()` and `y < self.height()`.
    #[inline]
    pub(crate) fn span(&self, x: usize, y: usize, width: usize) -> &'a [T] {
        let start = y * self.stride + x;
        &self.data[start..start + width]
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> CorrLocateResult<usize> {
    if width == 0 || height == 0 {
        return Err(CorrLocateError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(CorrLocateError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(CorrLocateError::InvalidDimensions { width, height })
}

/// Owned contiguous grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> CorrLocateResult<Self> {
        if width == 0 || height == 0 {
            return Err(CorrLocateError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(CorrLocateError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(CorrLocateError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(CorrLocateError::BufferLengthMismatch {
                expected: needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> CorrLocateResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(CorrLocateError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Copies a (possibly strided) view into a new contiguous image.
    pub fn from_view(view: ImageView<'_, u8>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            data.extend_from_slice(view.span(0, y, view.width()));
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the pixels.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Copies `patch` into this image with its top-left at `(x, y)`.
    ///
    /// Pixels falling outside the image are dropped.
    pub fn paste(&mut self, patch: ImageView<'_, u8>, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cols = patch.width().min(self.width - x);
        let rows = patch.height().min(self.height - y);
        for py in 0..rows {
            let start = (y + py) * self.width + x;
            self.data[start..start + cols].copy_from_slice(patch.span(0, py, cols));
        }
    }

    /// Sets every pixel of `[x, x + width) x [y, y + height)` to `value`.
    ///
    /// The rectangle is clipped to the image bounds.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let x1 = x.saturating_add(width).min(self.width);
        let y1 = y.saturating_add(height).min(self.height);
        for row in y..y1 {
            let base = row * self.width;
            self.data[base + x..base + x1].fill(value);
        }
    }
}
