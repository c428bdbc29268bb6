use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Color inversion for uploaded pictures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageService;

impl ImageService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decodes `bytes`, inverts every RGB channel and re-encodes as JPEG.
    ///
    /// Alpha is dropped before inverting since JPEG cannot carry it.
    ///
    /// # Errors
    ///
    /// [`ImageError::Decode`] when the input is not a supported image.
    pub fn invert(&self, bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
        let original = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
        debug!(
            width = original.width(),
            height = original.height(),
            "Inverting image"
        );

        let mut rgb = original.to_rgb8();
        image::imageops::invert(&mut rgb);

        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut out, ImageFormat::Jpeg)
            .map_err(ImageError::Encode)?;

        Ok(out.into_inner())
    }
}
