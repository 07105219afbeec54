//! Format descriptors.
//!
//! Two closed sets of variants:
//!
//! - [`DecodableFormat`]: every container the library can read. No parameters.
//! - [`EncodableFormat`]: every container the library can write, each variant
//!   carrying only its own knobs.
//!
//! Dispatch matches exhaustively on these enums, so adding a format is a
//! compile-checked change in [`codec`](crate::codec).
//!
//! ## Extension table
//!
//! | Format | Extensions |
//! |---|---|
//! | BMP | `bmp`, `dib` |
//! | GIF | `gif` |
//! | JPEG | `jpg`, `jpeg`, `jpe`, `jif`, `jfif`, `jfi` |
//! | PNG | `png` |
//! | TIFF | `tiff`, `tif` |
//! | TGA | `tga`, `icb`, `vda`, `vst` |
//! | WBMP | `wbmp` |
//! | WebP | `webp` |
//!
//! Lookup is case-insensitive.

use crate::codec::params::{EncodingParameters, PngCompression, Quality};
use crate::color::NativeColor;
use crate::image::Image;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A container format the library can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodableFormat {
    Bmp,
    Gif,
    Jpeg,
    Png,
    Tiff,
    Tga,
    Wbmp,
    WebP,
}

const EXTENSIONS: &[(&str, DecodableFormat)] = &[
    ("bmp", DecodableFormat::Bmp),
    ("dib", DecodableFormat::Bmp),
    ("gif", DecodableFormat::Gif),
    ("jpg", DecodableFormat::Jpeg),
    ("jpeg", DecodableFormat::Jpeg),
    ("jpe", DecodableFormat::Jpeg),
    ("jif", DecodableFormat::Jpeg),
    ("jfif", DecodableFormat::Jpeg),
    ("jfi", DecodableFormat::Jpeg),
    ("png", DecodableFormat::Png),
    ("tiff", DecodableFormat::Tiff),
    ("tif", DecodableFormat::Tiff),
    ("tga", DecodableFormat::Tga),
    ("icb", DecodableFormat::Tga),
    ("vda", DecodableFormat::Tga),
    ("vst", DecodableFormat::Tga),
    ("wbmp", DecodableFormat::Wbmp),
    ("webp", DecodableFormat::WebP),
];

impl DecodableFormat {
    /// Probe order for best-effort detection, most common first.
    ///
    /// TGA is absent: it has no signature, so almost any input would be
    /// accepted by its decoder.
    pub const ANY: [DecodableFormat; 7] = [
        DecodableFormat::Jpeg,
        DecodableFormat::Png,
        DecodableFormat::Gif,
        DecodableFormat::WebP,
        DecodableFormat::Tiff,
        DecodableFormat::Bmp,
        DecodableFormat::Wbmp,
    ];

    pub const ALL: [DecodableFormat; 8] = [
        DecodableFormat::Bmp,
        DecodableFormat::Gif,
        DecodableFormat::Jpeg,
        DecodableFormat::Png,
        DecodableFormat::Tiff,
        DecodableFormat::Tga,
        DecodableFormat::Wbmp,
        DecodableFormat::WebP,
    ];

    /// Look up a format by file extension (without the dot).
    ///
    /// Returns `None` for unknown extensions. That is not an error: callers
    /// fall back to probing every format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// All extensions that map to this format, canonical one first.
    pub fn extensions(self) -> impl Iterator<Item = &'static str> {
        EXTENSIONS
            .iter()
            .filter(move |(_, format)| *format == self)
            .map(|(ext, _)| *ext)
    }

    pub fn name(self) -> &'static str {
        match self {
            DecodableFormat::Bmp => "BMP",
            DecodableFormat::Gif => "GIF",
            DecodableFormat::Jpeg => "JPEG",
            DecodableFormat::Png => "PNG",
            DecodableFormat::Tiff => "TIFF",
            DecodableFormat::Tga => "TGA",
            DecodableFormat::Wbmp => "WBMP",
            DecodableFormat::WebP => "WebP",
        }
    }
}

/// A container format the library can encode, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodableFormat {
    /// `compression` requests RLE. The request is recorded and logged, but
    /// the output is always an uncompressed true-color bitmap.
    Bmp { compression: bool },
    Gif,
    /// `quality <= 0` leaves the encoder default. `progressive: None` leaves
    /// the image's interlace flag untouched.
    ///
    /// Output is always baseline: `progressive` (and the interlace flag)
    /// is stored on the image and logged, not honored by the encoder.
    Jpeg {
        quality: i32,
        progressive: Option<bool>,
    },
    /// `compression` is -1 (default), 0 (none), or 1-9; clamped at use.
    /// `alpha: None` leaves the image's save-alpha flag untouched.
    ///
    /// Output is never Adam7-interlaced, even when the image's interlace
    /// flag is set.
    Png { compression: i32, alpha: Option<bool> },
    Tiff,
    /// Pixels whose packed native color equals `foreground_index` are
    /// written as foreground; all others become background.
    Wbmp { foreground_index: u32 },
    WebP,
}

impl EncodableFormat {
    /// The encodable variant of `kind` with every parameter at its default.
    ///
    /// Returns `None` for formats that can only be decoded.
    pub fn defaults(kind: DecodableFormat) -> Option<Self> {
        Some(match kind {
            DecodableFormat::Bmp => EncodableFormat::Bmp { compression: false },
            DecodableFormat::Gif => EncodableFormat::Gif,
            DecodableFormat::Jpeg => EncodableFormat::Jpeg {
                quality: -1,
                progressive: None,
            },
            DecodableFormat::Png => EncodableFormat::Png {
                compression: -1,
                alpha: None,
            },
            DecodableFormat::Tiff => EncodableFormat::Tiff,
            DecodableFormat::Wbmp => EncodableFormat::Wbmp {
                foreground_index: NativeColor::new(0, 0, 0, 0).packed(),
            },
            DecodableFormat::WebP => EncodableFormat::WebP,
            DecodableFormat::Tga => return None,
        })
    }

    /// The container this variant writes.
    pub fn kind(&self) -> DecodableFormat {
        match self {
            EncodableFormat::Bmp { .. } => DecodableFormat::Bmp,
            EncodableFormat::Gif => DecodableFormat::Gif,
            EncodableFormat::Jpeg { .. } => DecodableFormat::Jpeg,
            EncodableFormat::Png { .. } => DecodableFormat::Png,
            EncodableFormat::Tiff => DecodableFormat::Tiff,
            EncodableFormat::Wbmp { .. } => DecodableFormat::Wbmp,
            EncodableFormat::WebP => DecodableFormat::WebP,
        }
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodableFormat::Bmp { .. } => "bmp",
            EncodableFormat::Gif => "gif",
            EncodableFormat::Jpeg { .. } => "jpg",
            EncodableFormat::Png { .. } => "png",
            EncodableFormat::Tiff => "tiff",
            EncodableFormat::Wbmp { .. } => "wbmp",
            EncodableFormat::WebP => "webp",
        }
    }

    pub fn encoding_parameters(&self) -> EncodingParameters {
        match *self {
            EncodableFormat::Bmp { compression } => EncodingParameters::Bmp { rle: compression },
            EncodableFormat::Jpeg { quality, .. } => EncodingParameters::Jpeg {
                quality: Quality::new(quality),
            },
            EncodableFormat::Png { compression, .. } => EncodingParameters::Png {
                compression: PngCompression::new(compression),
            },
            EncodableFormat::Wbmp { foreground_index } => EncodingParameters::Wbmp {
                foreground: NativeColor::from_packed(foreground_index),
            },
            EncodableFormat::Gif | EncodableFormat::Tiff | EncodableFormat::WebP => {
                EncodingParameters::None
            }
        }
    }

    /// Apply this format's explicit flags to `image` before encoding.
    ///
    /// `None` leaves the image's current setting untouched.
    pub fn prepare(&self, image: &mut Image) {
        match *self {
            EncodableFormat::Png {
                alpha: Some(alpha), ..
            } => image.set_save_alpha(alpha),
            EncodableFormat::Jpeg {
                progressive: Some(progressive),
                ..
            } => image.set_interlaced(progressive),
            _ => {}
        }
    }
}
