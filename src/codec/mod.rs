//! Format coding: routes a format selection to the codec that handles it.
//!
//! ## Layers
//!
//! | Module | Role |
//! |---|---|
//! | [`params`] | Normalized encoder parameters (quality, compression level, foreground) |
//! | `coder` | [`Decode`] / [`Encode`] traits and their impls for the format enums |
//! | `raster` | BMP, GIF, JPEG, PNG, TIFF, TGA, WebP through the `image` crate |
//! | `wbmp` | Wireless bitmap, written by hand (the `image` crate has no WBMP codec) |
//! | `dispatch` | Byte-buffer and file entry points, multi-format probing |
//!
//! Control flow for a decode:
//!
//! ```text
//! bytes ──► decode(bytes, format) ──► DecodableFormat::decode ──► raster | wbmp ──► Image
//! ```
//!
//! and for an encode:
//!
//! ```text
//! Image ──► encode(image, format) ──► prepare ──► encoding_parameters ──► raster | wbmp ──► bytes
//! ```

mod coder;
mod dispatch;
pub mod params;
mod raster;
mod wbmp;

pub use coder::{Decode, Encode};
pub use dispatch::{
    MAX_INPUT_LEN, candidate_order, decode, decode_any, decode_file, decode_file_any, encode,
    encode_file,
};
