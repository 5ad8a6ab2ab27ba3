//! Decoding and encoding through the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Every decoded raster is
//! converted to 8-bit luma before matching.

use crate::image::{ImageView, OwnedImage};
use crate::util::{CorrLocateError, CorrLocateResult};
use std::io::Cursor;
use std::path::Path;

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> CorrLocateResult<OwnedImage> {
    OwnedImage::new(img.as_raw().clone(), img.width() as usize, img.height() as usize)
}

/// Converts any dynamic image to an owned grayscale image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> CorrLocateResult<OwnedImage> {
    owned_from_gray_image(&img.to_luma8())
}

/// Loads an image from disk as grayscale.
///
/// The format is sniffed from the file contents, so stored files decode
/// regardless of their extension.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> CorrLocateResult<OwnedImage> {
    let path = path.as_ref();
    let io_err = |source| CorrLocateError::Io {
        path: path.to_path_buf(),
        source,
    };
    let img = image::ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|err| CorrLocateError::ImageIo {
            reason: format!("{}: {err}", path.display()),
        })?;
    owned_from_dynamic_image(&img)
}

/// Decodes an in-memory encoded image (PNG, JPEG) as grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> CorrLocateResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| CorrLocateError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Encodes a grayscale view as PNG bytes.
pub fn encode_png(view: ImageView<'_, u8>) -> CorrLocateResult<Vec<u8>> {
    let owned = OwnedImage::from_view(view);
    let gray = image::GrayImage::from_raw(
        owned.width() as u32,
        owned.height() as u32,
        owned.data().to_vec(),
    )
    .ok_or(CorrLocateError::InvalidDimensions {
        width: owned.width(),
        height: owned.height(),
    })?;

    let mut out = Vec::new();
    image::DynamicImage::ImageLuma8(gray)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|err| CorrLocateError::ImageIo {
            reason: err.to_string(),
        })?;
    Ok(out)
}
