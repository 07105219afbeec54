//! # rasterkit
//!
//! A raster-image library: create, decode, encode, and manipulate in-memory
//! bitmaps across BMP, GIF, JPEG, PNG, TIFF, TGA, WBMP, and WebP.
//!
//! # Architecture
//!
//! ```text
//! bytes / file ──► codec::decode ──► Image ──► resize, crop, draw, … ──► codec::encode ──► bytes / file
//! ```
//!
//! A [`DecodableFormat`] or [`EncodableFormat`] selects the codec. The codec
//! produces an [`Image`], which owns its bitmap outright. Every operation is
//! synchronous and either mutates the image in place or returns a new one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`color`] | Normalized RGBA [`Color`], native packed [`NativeColor`], hex parsing |
//! | [`format`] | Closed format enums, extension lookup, encoder parameter derivation |
//! | [`codec`] | Dispatch from a format to its codec, multi-format probing, file transport |
//! | [`image`](crate::image) | The pixel buffer: pixel access, resize, crop, flip, blur, filters, drawing |
//! | [`geometry`] | [`Point`], [`Size`], [`Rectangle`] |
//! | [`config`] | `rasterkit.toml` loading for encoder defaults and probe order |
//!
//! # Design Decisions
//!
//! ## Native Color Form
//!
//! Single-pixel access goes through a packed 32-bit color whose alpha is 7
//! bits and inverted: 0 is opaque, 127 is fully transparent. Bitmaps are
//! stored as straight 8-bit RGBA, and the two alpha scales convert exactly
//! in both directions, so reading back a pixel returns what was written.
//!
//! ## Sum Types for Formats
//!
//! Each encodable variant carries only its own knobs (`Jpeg { quality,
//! progressive }`, `Png { compression, alpha }`, …). Dispatch is an
//! exhaustive match, so adding a format is a compile-checked change.
//!
//! ## Codecs
//!
//! Everything but WBMP goes through the `image` crate. WBMP is a small
//! bilevel format the crate does not cover, so it is written by hand in
//! [`codec`]. Shrinking, nearest-neighbor scaling and blur use
//! `image::imageops`; enlarging uses an own Mitchell resampler, a kernel
//! the crate does not offer.

pub mod codec;
pub mod color;
pub mod config;
mod error;
pub mod format;
pub mod geometry;
pub mod image;
mod io;

pub use crate::image::{FlipMode, Image, Interpolation, PixelateMode};
pub use color::{Color, NativeColor};
pub use error::{Error, Result};
pub use format::{DecodableFormat, EncodableFormat};
pub use geometry::{Point, Rectangle, Size};

#[cfg(test)]
pub(crate) mod test_helpers;
