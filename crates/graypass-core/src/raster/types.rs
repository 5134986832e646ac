//! Core types for the raster container.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pixel::{Pixel, CHANNEL_MAX};

/// Bytes occupied by one pixel in the pixel block.
pub const BYTES_PER_PIXEL: usize = std::mem::size_of::<Pixel>();

/// Error types for raster loading and saving.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The source file could not be opened.
    #[error("Could not open image file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text header is missing a field or holds an unusable value.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The pixel block is shorter than the header promises.
    #[error("Truncated pixel data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Pixel buffer length doesn't match width * height.
    #[error("Invalid pixel data: expected {expected} pixels (width * height), got {actual}")]
    InvalidPixelCount { expected: usize, actual: usize },

    /// I/O error while reading an already opened source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The destination could not be created or written.
    #[error("Could not write image file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Header fields of a raster container, kept verbatim for round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHeader {
    /// Format tag from the first header line (e.g. "P6").
    pub format: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Maximum channel value (1-255).
    pub maxval: u8,
}

impl ImageHeader {
    /// Header for a binary RGB image with full 8-bit channels.
    pub fn rgb(width: u32, height: u32) -> Self {
        Self {
            format: "P6".to_string(),
            width,
            height,
            maxval: CHANNEL_MAX,
        }
    }

    /// Number of pixels described by the header, or `None` on overflow.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Size of the pixel block in bytes, or `None` on overflow.
    pub fn block_len(&self) -> Option<usize> {
        self.pixel_count()?.checked_mul(BYTES_PER_PIXEL)
    }
}

/// A loaded raster: header plus the row-major pixel sequence.
///
/// The pixel count always equals `width * height`; pixels can be changed in
/// place but never added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    header: ImageHeader,
    pixels: Vec<Pixel>,
}

impl RasterImage {
    /// Create a raster from a header and its pixels.
    pub fn new(header: ImageHeader, pixels: Vec<Pixel>) -> Result<Self, RasterError> {
        let expected = header.pixel_count().ok_or_else(|| {
            RasterError::MalformedHeader(format!(
                "dimensions {}x{} overflow",
                header.width, header.height
            ))
        })?;
        if pixels.len() != expected {
            return Err(RasterError::InvalidPixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { header, pixels })
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn format(&self) -> &str {
        &self.header.format
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn maxval(&self) -> u8 {
        self.header.maxval
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable access to the pixels; the slice length is fixed.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// The pixel block as raw bytes (R, G, B per pixel).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get the size of the pixel block in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * BYTES_PER_PIXEL
    }

    /// Check if this image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Split into header and pixels.
    pub fn into_parts(self) -> (ImageHeader, Vec<Pixel>) {
        (self.header, self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_image_creation() {
        let img = RasterImage::new(ImageHeader::rgb(4, 2), vec![Pixel::gray(9); 8]).unwrap();

        assert_eq!(img.format(), "P6");
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.maxval(), 255);
        assert_eq!(img.pixel_count(), 8);
        assert_eq!(img.byte_size(), 24);
        assert_eq!(img.as_bytes().len(), 24);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_raster_image_pixel_count_mismatch() {
        let result = RasterImage::new(ImageHeader::rgb(4, 2), vec![Pixel::gray(9); 7]);
        assert!(matches!(
            result,
            Err(RasterError::InvalidPixelCount {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_raster_image_empty() {
        let img = RasterImage::new(ImageHeader::rgb(0, 5), vec![]).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.byte_size(), 0);
    }

    #[test]
    fn test_header_block_len() {
        assert_eq!(ImageHeader::rgb(3, 2).block_len(), Some(18));
        assert_eq!(ImageHeader::rgb(0, 100).block_len(), Some(0));
    }

    #[test]
    fn test_raster_error_display() {
        let err = RasterError::MalformedHeader("missing width".to_string());
        assert_eq!(err.to_string(), "Malformed header: missing width");

        let err = RasterError::Truncated {
            expected: 12,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "Truncated pixel data: expected 12 bytes, got 5"
        );

        let err = RasterError::Open {
            path: PathBuf::from("missing.ppm"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Could not open image file missing.ppm: not found"
        );
    }
}
