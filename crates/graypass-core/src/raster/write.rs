//! Raster saving and output naming.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{RasterError, RasterImage};

/// Save a raster to a file, replacing any existing file.
///
/// # Errors
///
/// Returns `RasterError::Write` if the file cannot be created, written or
/// flushed.
pub fn save(path: impl AsRef<Path>, image: &RasterImage) -> Result<(), RasterError> {
    let path = path.as_ref();
    let write_error = |source: io::Error| RasterError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    write_raster(BufWriter::new(file), image).map_err(write_error)?;
    log::debug!("saved {} ({} bytes)", path.display(), image.byte_size());
    Ok(())
}

/// Write a raster (header then pixel block) to any writer.
///
/// The header is emitted as `format\nwidth height\nmaxval\n`, so the newline
/// after maxval is the single separator the reader expects.
pub fn write_raster<W: Write>(mut writer: W, image: &RasterImage) -> io::Result<()> {
    let header = image.header();
    writeln!(
        writer,
        "{}\n{} {}\n{}",
        header.format, header.width, header.height, header.maxval
    )?;
    writer.write_all(image.as_bytes())?;
    writer.flush()
}

/// Derive a sibling output path: `<stem>_<suffix>.<ext>`.
///
/// Inputs without an extension produce `<stem>_<suffix>`.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push("_");
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
