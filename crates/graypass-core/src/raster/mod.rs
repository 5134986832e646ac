//! Binary raster container codec.
//!
//! This module provides functionality for:
//! - Loading a raster (text header + contiguous RGB pixel block)
//! - Saving a raster with its header reproduced exactly
//! - Deriving strategy-tagged output paths
//!
//! # Format
//!
//! ```text
//! <format tag>\n
//! <width> <height>\n
//! <maxval>\n
//! <width * height * 3 bytes of R, G, B>
//! ```
//!
//! Headers that are malformed or promise more pixel bytes than the source
//! holds are rejected instead of being read past.

mod read;
mod types;
mod write;

pub use read::{load, read_raster};
pub use types::{ImageHeader, RasterError, RasterImage, BYTES_PER_PIXEL};
pub use write::{output_path, save, write_raster};
