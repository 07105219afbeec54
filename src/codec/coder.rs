//! The two coder capabilities and their implementations for the format
//! enums.
//!
//! [`Decode`] and [`Encode`] are separate traits: a format that can only be
//! read (TGA) has no way to reach an encoder, and a test double can
//! implement just the side it exercises.

use super::{raster, wbmp};
use crate::error::Result;
use crate::format::{DecodableFormat, EncodableFormat};
use crate::image::Image;

/// Turns bytes into an [`Image`].
pub trait Decode {
    fn decode(&self, bytes: &[u8]) -> Result<Image>;
}

/// Turns an [`Image`] into bytes.
///
/// Takes the image mutably because encoding first applies the format's
/// flags to it (see [`EncodableFormat::prepare`]).
pub trait Encode {
    fn encode(&self, image: &mut Image) -> Result<Vec<u8>>;
}

impl Decode for DecodableFormat {
    fn decode(&self, bytes: &[u8]) -> Result<Image> {
        match self {
            DecodableFormat::Wbmp => wbmp::decode(bytes),
            DecodableFormat::Bmp
            | DecodableFormat::Gif
            | DecodableFormat::Jpeg
            | DecodableFormat::Png
            | DecodableFormat::Tiff
            | DecodableFormat::Tga
            | DecodableFormat::WebP => raster::decode(bytes, *self),
        }
    }
}

impl Encode for EncodableFormat {
    fn encode(&self, image: &mut Image) -> Result<Vec<u8>> {
        self.prepare(image);
        let params = self.encoding_parameters();
        log::trace!(
            "encoding {}x{} as {} with {:?}",
            image.width(),
            image.height(),
            self.kind().name(),
            params
        );
        match self {
            EncodableFormat::Wbmp { .. } => wbmp::encode(image, params),
            EncodableFormat::Bmp { .. }
            | EncodableFormat::Gif
            | EncodableFormat::Jpeg { .. }
            | EncodableFormat::Png { .. }
            | EncodableFormat::Tiff
            | EncodableFormat::WebP => raster::encode(image, self.kind(), params),
        }
    }
}
