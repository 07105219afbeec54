//! Error taxonomy shared by every subsystem.
//!
//! Each variant names the stage that failed. File, image, color, and
//! manipulation errors carry a human-readable reason; `InvalidFormat` is
//! raised when a codec refuses the data without saying why.
//!
//! Multi-format probing ([`decode_any`](crate::codec::decode_any)) is the
//! only place these errors are swallowed, and only to try the next format.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("codec rejected the data for this format")]
    InvalidFormat,
    #[error("error reading file: {0}")]
    ErrorReadingFile(String),
    #[error("error writing file: {0}")]
    ErrorWritingFile(String),
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("resizing failed: {0}")]
    ResizingFailed(String),
    #[error("cropping failed: {0}")]
    CroppingFailed(String),
    #[error("manipulation failed: {0}")]
    ManipulationFailed(String),
    #[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
    IndexOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// Result type for every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_part_of_the_message() {
        let err = Error::InvalidColor("length 5".into());
        assert_eq!(err.to_string(), "invalid color: length 5");

        let err = Error::ErrorWritingFile("out.png already exists".into());
        assert_eq!(err.to_string(), "error writing file: out.png already exists");
    }

    #[test]
    fn out_of_bounds_names_the_pixel_and_size() {
        let err = Error::IndexOutOfBounds {
            x: -1,
            y: 4,
            width: 3,
            height: 3,
        };
        assert_eq!(err.to_string(), "pixel (-1, 4) is outside a 3x3 image");
    }
}
