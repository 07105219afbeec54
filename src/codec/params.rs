//! Parameter types for encoders.
//!
//! These describe *what* an encoder should do. [`EncodableFormat`] carries
//! the caller's raw values; [`EncodableFormat::encoding_parameters`] turns
//! them into the normalized [`EncodingParameters`] the codecs consume.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG quality. Non-positive input means "encoder default".
//! - [`PngCompression`]: zlib level, clamped into `-1..=9` on construction.
//! - [`EncodingParameters`]: per-format parameter value handed to a codec.
//!
//! [`EncodableFormat`]: crate::format::EncodableFormat
//! [`EncodableFormat::encoding_parameters`]: crate::format::EncodableFormat::encoding_parameters

use crate::color::NativeColor;

/// Quality the JPEG encoder uses when the caller leaves it unset.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Quality setting for JPEG encoding (1-100, or encoder default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quality(Option<u8>);

impl Quality {
    /// `value <= 0` selects the encoder default; values above 100 clamp.
    pub fn new(value: i32) -> Self {
        if value <= 0 {
            Self(None)
        } else {
            Self(Some(value.min(100) as u8))
        }
    }

    pub fn is_default(self) -> bool {
        self.0.is_none()
    }

    /// Effective quality handed to the encoder.
    pub fn value(self) -> u8 {
        self.0.unwrap_or(DEFAULT_JPEG_QUALITY)
    }
}

/// PNG compression level: -1 default, 0 none, 1-9 zlib level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngCompression(i32);

impl PngCompression {
    pub const DEFAULT: PngCompression = PngCompression(-1);

    pub fn new(level: i32) -> Self {
        Self(level.clamp(-1, 9))
    }

    pub fn level(self) -> i32 {
        self.0
    }
}

impl Default for PngCompression {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Normalized codec parameters, one shape per format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingParameters {
    /// The format takes no parameters.
    None,
    Bmp { rle: bool },
    Jpeg { quality: Quality },
    Png { compression: PngCompression },
    /// Pixels whose packed value equals `foreground` become the foreground bit.
    Wbmp { foreground: NativeColor },
}
