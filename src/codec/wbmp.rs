//! Wireless bitmap (WBMP type 0) codec.
//!
//! Layout: a multi-byte type field (always 0), one fixed-header byte, then
//! width and height as multi-byte integers, then one bit per pixel, rows
//! padded to a whole byte, most significant bit first.
//!
//! Multi-byte integers store 7 bits per byte, big-endian, with the high bit
//! set on every byte except the last.
//!
//! A set bit is white and a clear bit is black. When encoding, pixels equal
//! to the foreground color become black and everything else white.

use super::params::EncodingParameters;
use crate::color::NativeColor;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::image::Image;
use image::{Rgba, RgbaImage};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Read one multi-byte integer starting at `*pos`, advancing it.
fn read_varint(data: &[u8], pos: &mut usize) -> Result<u32> {
    let mut value: u32 = 0;
    for _ in 0..5 {
        let byte = *data.get(*pos).ok_or(Error::InvalidFormat)?;
        *pos += 1;
        value = value
            .checked_mul(128)
            .ok_or(Error::InvalidFormat)?
            | (byte & 0x7f) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(Error::InvalidFormat)
}

fn write_varint(out: &mut Vec<u8>, value: u32) {
    let mut groups = vec![(value & 0x7f) as u8];
    let mut rest = value >> 7;
    while rest > 0 {
        groups.push((rest & 0x7f) as u8 | 0x80);
        rest >>= 7;
    }
    out.extend(groups.iter().rev());
}

/// Parse the header, returning `(width, height, offset of pixel data)`.
fn parse_header(data: &[u8]) -> Result<(u32, u32, usize)> {
    let mut pos = 0;
    if read_varint(data, &mut pos)? != 0 {
        return Err(Error::InvalidFormat);
    }
    // Extension headers are not supported.
    if *data.get(pos).ok_or(Error::InvalidFormat)? != 0 {
        return Err(Error::InvalidFormat);
    }
    pos += 1;
    let width = read_varint(data, &mut pos)?;
    let height = read_varint(data, &mut pos)?;
    if width == 0 || height == 0 {
        return Err(Error::InvalidFormat);
    }
    Ok((width, height, pos))
}

pub(crate) fn decode(data: &[u8]) -> Result<Image> {
    let (width, height, offset) = parse_header(data)?;
    let stride = width.div_ceil(8) as usize;
    let needed = stride
        .checked_mul(height as usize)
        .ok_or(Error::InvalidFormat)?;
    let pixels = data
        .get(offset..)
        .and_then(|rest| rest.get(..needed))
        .ok_or_else(|| {
            log::debug!("WBMP data truncated: {width}x{height} needs {needed} bytes");
            Error::InvalidFormat
        })?;

    let mut bitmap = RgbaImage::new(width, height);
    for (y, row) in pixels.chunks_exact(stride).enumerate() {
        for x in 0..width {
            let bit = row[(x / 8) as usize] & (0x80 >> (x % 8));
            bitmap.put_pixel(x, y as u32, if bit != 0 { WHITE } else { BLACK });
        }
    }
    Image::from_bitmap(bitmap)
}

pub(crate) fn encode(image: &Image, params: EncodingParameters) -> Result<Vec<u8>> {
    let foreground = match params {
        EncodingParameters::Wbmp { foreground } => foreground,
        _ => NativeColor::new(0, 0, 0, 0),
    };
    let (width, height) = (image.width(), image.height());
    let stride = width.div_ceil(8) as usize;

    let mut out = Vec::with_capacity(8 + stride * height as usize);
    write_varint(&mut out, 0);
    out.push(0);
    write_varint(&mut out, width);
    write_varint(&mut out, height);

    for y in 0..height {
        let mut row = vec![0u8; stride];
        for x in 0..width {
            let pixel = image.native_pixel(Point::new(x as i32, y as i32))?;
            if pixel != foreground {
                row[(x / 8) as usize] |= 0x80 >> (x % 8);
            }
        }
        out.extend_from_slice(&row);
    }
    Ok(out)
}
