//! Convenience entry points on [`Image`] over [`codec`](crate::codec).

use crate::codec;
use crate::error::Result;
use crate::format::{DecodableFormat, EncodableFormat};
use crate::image::Image;
use std::path::{Path, PathBuf};

impl Image {
    pub fn from_bytes(bytes: &[u8], format: DecodableFormat) -> Result<Image> {
        codec::decode(bytes, format)
    }

    /// Probe every decodable format, most common first.
    pub fn from_bytes_any(bytes: &[u8]) -> Result<Image> {
        codec::decode_any(bytes, &DecodableFormat::ANY)
    }

    /// Probe `formats` in the order given.
    pub fn from_bytes_in(bytes: &[u8], formats: &[DecodableFormat]) -> Result<Image> {
        codec::decode_any(bytes, formats)
    }

    pub fn open(path: impl AsRef<Path>, format: DecodableFormat) -> Result<Image> {
        codec::decode_file(path.as_ref(), format)
    }

    /// Open `path`, trying the format its extension names before the rest.
    pub fn open_any(path: impl AsRef<Path>) -> Result<Image> {
        codec::decode_file_any(path.as_ref(), &DecodableFormat::ANY)
    }

    pub fn to_bytes(&mut self, format: &EncodableFormat) -> Result<Vec<u8>> {
        codec::encode(self, format)
    }

    pub fn write_to_file(
        &mut self,
        path: impl AsRef<Path>,
        format: &EncodableFormat,
        overwrite: bool,
    ) -> Result<PathBuf> {
        codec::encode_file(self, path.as_ref(), format, overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::error::Error;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn bytes_round_trip_with_probing() {
        let mut image = solid_image(3, 3, Color::RED);
        let bytes = image.to_bytes(&EncodableFormat::Gif).unwrap();
        let decoded = Image::from_bytes_any(&bytes).unwrap();
        assert_all_pixels(&decoded, Color::RED);
    }

    #[test]
    fn restricted_probe_list_can_miss() {
        let mut image = solid_image(3, 3, Color::RED);
        let bytes = image.to_bytes(&EncodableFormat::Gif).unwrap();
        assert!(matches!(
            Image::from_bytes_in(&bytes, &[DecodableFormat::Png, DecodableFormat::Bmp]),
            Err(Error::InvalidImage(_))
        ));
    }

    #[test]
    fn file_round_trip_with_extension_hint() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tile.bmp");
        let mut image = solid_image(4, 2, Color::GREEN);
        image
            .write_to_file(&path, &EncodableFormat::Bmp { compression: false }, false)
            .unwrap();

        let decoded = Image::open_any(&path).unwrap();
        assert_all_pixels(&decoded, Color::GREEN);
        let decoded = Image::open(&path, DecodableFormat::Bmp).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
    }
}
