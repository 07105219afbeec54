//! Byte-buffer and file entry points over the coders.
//!
//! Multi-format probing lives here: [`decode_any`] tries candidates in the
//! order given, logs and skips each failure, and reports a single
//! [`Error::InvalidImage`] only when nothing matched. No other path in the
//! crate swallows an error.

use super::coder::{Decode, Encode};
use crate::error::{Error, Result};
use crate::format::{DecodableFormat, EncodableFormat};
use crate::image::Image;
use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Inputs of this many bytes or more are refused before reaching a codec.
pub const MAX_INPUT_LEN: usize = i32::MAX as usize;

fn check_input_len(len: usize) -> Result<()> {
    if len >= MAX_INPUT_LEN {
        return Err(Error::InvalidImage(format!(
            "input of {len} bytes exceeds the codec limit"
        )));
    }
    Ok(())
}

/// Decode `bytes` as `format`.
pub fn decode(bytes: &[u8], format: DecodableFormat) -> Result<Image> {
    decode_with(bytes, &format)
}

pub(crate) fn decode_with<D: Decode + ?Sized>(bytes: &[u8], decoder: &D) -> Result<Image> {
    check_input_len(bytes.len())?;
    decoder.decode(bytes)
}

/// Try each format in order and return the first successful decode.
pub fn decode_any(bytes: &[u8], formats: &[DecodableFormat]) -> Result<Image> {
    decode_any_with(bytes, formats)
}

pub(crate) fn decode_any_with<D: Decode + Debug>(bytes: &[u8], decoders: &[D]) -> Result<Image> {
    check_input_len(bytes.len())?;
    for decoder in decoders {
        match decoder.decode(bytes) {
            Ok(image) => return Ok(image),
            Err(e) => log::debug!("{decoder:?} did not match: {e}"),
        }
    }
    Err(Error::InvalidImage(format!(
        "no matching decoder among {} candidates",
        decoders.len()
    )))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| Error::ErrorReadingFile(format!("{}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::ErrorReadingFile(format!("{}: {e}", path.display())))?;
    Ok(bytes)
}

/// Read `path` and decode it as `format`.
pub fn decode_file(path: &Path, format: DecodableFormat) -> Result<Image> {
    let bytes = read_file(path)?;
    decode(&bytes, format)
}

/// Probe order for `path`: the format its extension names, if any, then
/// `formats` without repeating it.
pub fn candidate_order(path: &Path, formats: &[DecodableFormat]) -> Vec<DecodableFormat> {
    let mut order: Vec<DecodableFormat> = DecodableFormat::from_path(path).into_iter().collect();
    for format in formats {
        if !order.contains(format) {
            order.push(*format);
        }
    }
    order
}

/// Read `path` and probe it, extension hint first.
pub fn decode_file_any(path: &Path, formats: &[DecodableFormat]) -> Result<Image> {
    let bytes = read_file(path)?;
    decode_any(&bytes, &candidate_order(path, formats))
}

/// Encode `image` as `format`.
pub fn encode(image: &mut Image, format: &EncodableFormat) -> Result<Vec<u8>> {
    let bytes = format.encode(image)?;
    if bytes.is_empty() {
        return Err(Error::InvalidFormat);
    }
    Ok(bytes)
}

/// Encode `image` and write it to `path`, returning the path written.
///
/// With `overwrite` off, an existing file is an error and is left untouched.
pub fn encode_file(
    image: &mut Image,
    path: &Path,
    format: &EncodableFormat,
    overwrite: bool,
) -> Result<PathBuf> {
    if !overwrite && path.exists() {
        return Err(Error::ErrorWritingFile(format!(
            "{} already exists",
            path.display()
        )));
    }
    let bytes = encode(image, format)?;

    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let file = options
        .open(path)
        .map_err(|e| Error::ErrorWritingFile(format!("{}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::ErrorWritingFile(format!("{}: {e}", path.display())))?;
    drop(writer);

    if !path.exists() {
        return Err(Error::ErrorWritingFile(format!(
            "{} missing after write",
            path.display()
        )));
    }
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path.to_path_buf())
}
