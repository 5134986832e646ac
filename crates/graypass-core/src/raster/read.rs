//! Raster loading.
//!
//! Header layout: a format tag line, then `width height maxval` as
//! whitespace-delimited decimal tokens, then exactly one whitespace byte
//! before the pixel block.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use super::{ImageHeader, RasterError, RasterImage};
use crate::pixel::{Pixel, CHANNEL_MAX};

/// Load a raster from a file.
///
/// # Errors
///
/// Returns `RasterError::Open` if the file cannot be opened, and the errors of
/// [`read_raster`] for its contents.
pub fn load(path: impl AsRef<Path>) -> Result<RasterImage, RasterError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RasterError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let image = read_raster(BufReader::new(file))?;
    log::debug!(
        "loaded {} ({}x{}, {} bytes)",
        path.display(),
        image.width(),
        image.height(),
        image.byte_size()
    );
    Ok(image)
}

/// Read a raster from any buffered reader.
///
/// # Errors
///
/// Returns `RasterError::MalformedHeader` for a missing or unusable header
/// field, `RasterError::Truncated` if the pixel block is shorter than
/// `3 * width * height` bytes, and `RasterError::Io` for read failures.
/// Bytes after the pixel block are ignored.
pub fn read_raster<R: BufRead>(mut reader: R) -> Result<RasterImage, RasterError> {
    let format = read_format_line(&mut reader)?;
    let width = read_header_value(&mut reader, "width")?;
    let height = read_header_value(&mut reader, "height")?;
    let maxval = read_header_value(&mut reader, "maxval")?;

    if maxval == 0 || maxval > CHANNEL_MAX as u32 {
        return Err(RasterError::MalformedHeader(format!(
            "maxval {} outside 1..={}",
            maxval, CHANNEL_MAX
        )));
    }

    let header = ImageHeader {
        format,
        width,
        height,
        maxval: maxval as u8,
    };
    let Some(expected) = header.block_len() else {
        return Err(RasterError::MalformedHeader(format!(
            "dimensions {}x{} overflow",
            width, height
        )));
    };

    // Grows only as far as the source has data, whatever the header claims.
    let mut block = Vec::new();
    reader.take(expected as u64).read_to_end(&mut block)?;
    if block.len() != expected {
        return Err(RasterError::Truncated {
            expected,
            actual: block.len(),
        });
    }

    let pixels: Vec<Pixel> = bytemuck::cast_slice(&block).to_vec();
    RasterImage::new(header, pixels)
}

/// Read the format tag line, dropping only the trailing newline.
fn read_format_line<R: BufRead>(reader: &mut R) -> Result<String, RasterError> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(RasterError::MalformedHeader(
            "missing format tag".to_string(),
        ));
    }
    if line.pop() != Some(b'\n') {
        return Err(RasterError::MalformedHeader(
            "header ends after format tag".to_string(),
        ));
    }
    String::from_utf8(line)
        .map_err(|_| RasterError::MalformedHeader("format tag is not valid UTF-8".to_string()))
}

/// Read one decimal header token and the single whitespace byte ending it.
fn read_header_value<R: BufRead>(reader: &mut R, name: &str) -> Result<u32, RasterError> {
    let mut byte = next_byte(reader)?;
    while matches!(byte, Some(b) if b.is_ascii_whitespace()) {
        byte = next_byte(reader)?;
    }

    let mut token = String::new();
    while let Some(b) = byte.filter(u8::is_ascii_digit) {
        token.push(b as char);
        byte = next_byte(reader)?;
    }

    if token.is_empty() {
        return Err(RasterError::MalformedHeader(format!("missing {}", name)));
    }
    match byte {
        Some(b) if b.is_ascii_whitespace() => {}
        Some(b) => {
            return Err(RasterError::MalformedHeader(format!(
                "unexpected byte 0x{:02x} after {}",
                b, name
            )))
        }
        None => {
            return Err(RasterError::MalformedHeader(format!(
                "header ends after {}",
                name
            )))
        }
    }

    token
        .parse()
        .map_err(|_| RasterError::MalformedHeader(format!("{} {} out of range", name, token)))
}

fn next_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = loop {
        match reader.fill_buf() {
            Ok(buf) => break buf.first().copied(),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    };
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}
