//! Container codecs backed by the `image` crate.
//!
//! ## Crate mapping
//!
//! | Format | Decode | Encode |
//! |---|---|---|
//! | BMP | `image` BMP decoder | `BmpEncoder` via `write_to` (RLE unavailable for true color) |
//! | GIF | first frame only | `GifEncoder` via `write_to` |
//! | JPEG | `image` JPEG decoder | `JpegEncoder::new_with_quality`, always RGB |
//! | PNG | `image` PNG decoder | `PngEncoder::new_with_quality`, compression level mapped below |
//! | TIFF | `image` TIFF decoder | `TiffEncoder` via `write_to` |
//! | TGA | `image` TGA decoder | (decode only) |
//! | WebP | `image` WebP decoder | lossless `WebPEncoder` via `write_to` |
//!
//! Every decoded image is converted to 8-bit RGBA. When the image's
//! save-alpha flag is off, encoders receive RGB and the alpha channel is
//! dropped.
//!
//! The `image` encoders never write interlaced PNG or progressive JPEG; the
//! interlace flag is carried on [`Image`] and logged when it cannot be met.

use super::params::{DEFAULT_JPEG_QUALITY, EncodingParameters, PngCompression};
use crate::error::{Error, Result};
use crate::format::DecodableFormat;
use crate::image::Image;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use std::io::Cursor;

/// The `image` crate format for `kind`, or `None` when the crate has no
/// codec for it.
fn image_format(kind: DecodableFormat) -> Option<ImageFormat> {
    match kind {
        DecodableFormat::Bmp => Some(ImageFormat::Bmp),
        DecodableFormat::Gif => Some(ImageFormat::Gif),
        DecodableFormat::Jpeg => Some(ImageFormat::Jpeg),
        DecodableFormat::Png => Some(ImageFormat::Png),
        DecodableFormat::Tiff => Some(ImageFormat::Tiff),
        DecodableFormat::Tga => Some(ImageFormat::Tga),
        DecodableFormat::WebP => Some(ImageFormat::WebP),
        DecodableFormat::Wbmp => None,
    }
}

fn unsupported(kind: DecodableFormat) -> Error {
    log::debug!("no image codec registered for {}", kind.name());
    Error::InvalidFormat
}

pub(crate) fn decode(bytes: &[u8], kind: DecodableFormat) -> Result<Image> {
    let format = image_format(kind).ok_or_else(|| unsupported(kind))?;
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        log::debug!("{} decoder rejected {} bytes: {e}", kind.name(), bytes.len());
        Error::InvalidFormat
    })?;
    Image::from_bitmap(decoded.into_rgba8())
}

pub(crate) fn encode(
    image: &Image,
    kind: DecodableFormat,
    params: EncodingParameters,
) -> Result<Vec<u8>> {
    let format = image_format(kind).ok_or_else(|| unsupported(kind))?;
    let pixels = if image.save_alpha() {
        DynamicImage::ImageRgba8(image.bitmap().clone())
    } else {
        DynamicImage::ImageRgba8(image.bitmap().clone()).into_rgb8().into()
    };

    let result = match (format, params) {
        (ImageFormat::Jpeg, params) => encode_jpeg(image, pixels, params),
        (ImageFormat::Png, EncodingParameters::Png { compression }) => {
            encode_png(image, &pixels, compression)
        }
        (ImageFormat::Png, _) => encode_png(image, &pixels, PngCompression::DEFAULT),
        (format, params) => {
            if let EncodingParameters::Bmp { rle: true } = params {
                log::debug!("RLE applies to palette bitmaps only; writing uncompressed BMP");
            }
            let mut cursor = Cursor::new(Vec::new());
            pixels.write_to(&mut cursor, format).map(|()| cursor.into_inner())
        }
    };

    let bytes = result.map_err(|e| {
        log::debug!("{} encoder failed: {e}", kind.name());
        Error::InvalidFormat
    })?;
    if bytes.is_empty() {
        return Err(Error::InvalidFormat);
    }
    Ok(bytes)
}

fn encode_jpeg(
    image: &Image,
    pixels: DynamicImage,
    params: EncodingParameters,
) -> image::ImageResult<Vec<u8>> {
    let quality = match params {
        EncodingParameters::Jpeg { quality } => quality.value(),
        _ => DEFAULT_JPEG_QUALITY,
    };
    if image.interlaced() {
        log::debug!("progressive JPEG requested; writing baseline");
    }
    let rgb = pixels.into_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

/// Map a zlib-style level onto the encoder's compression presets.
///
/// | Level | Preset |
/// |---|---|
/// | -1 | `Default` |
/// | 0-3 | `Fast` |
/// | 4-6 | `Default` |
/// | 7-9 | `Best` |
pub(crate) fn png_compression_type(compression: PngCompression) -> CompressionType {
    match compression.level() {
        0..=3 => CompressionType::Fast,
        7..=9 => CompressionType::Best,
        _ => CompressionType::Default,
    }
}

fn encode_png(
    image: &Image,
    pixels: &DynamicImage,
    compression: PngCompression,
) -> image::ImageResult<Vec<u8>> {
    if image.interlaced() {
        log::debug!("interlaced PNG requested; writing non-interlaced");
    }
    let color = match pixels {
        DynamicImage::ImageRgb8(_) => ExtendedColorType::Rgb8,
        _ => ExtendedColorType::Rgba8,
    };
    let mut out = Vec::new();
    PngEncoder::new_with_quality(
        &mut out,
        png_compression_type(compression),
        FilterType::Adaptive,
    )
    .write_image(pixels.as_bytes(), pixels.width(), pixels.height(), color)?;
    Ok(out)
}
