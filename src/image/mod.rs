//! Pixel buffer: an owned true-color bitmap plus its manipulation operations.
//!
//! [`Image`] is the single owner of its bitmap. It is deliberately not
//! `Clone`: ownership moves, and dropping the handle frees the pixels
//! exactly once. Operations come in two flavors:
//!
//! - in-place (`resize`, `crop`, `blur`, …) replace the owned bitmap, and
//!   the old one is dropped on the spot;
//! - non-destructive (`resized`, `cropped`, `blurred`, …) leave `self`
//!   untouched and return a new handle owning a fresh bitmap.
//!
//! Storage is straight 8-bit RGBA. Single-pixel access goes through the
//! native packed color ([`NativeColor`]), whose 7-bit alpha converts to and
//! from 8 bits exactly.
//!
//! The module is split into:
//! - **Calculations**: pure kernel-selection and aspect-ratio math
//! - **Resample**: premultiplied resize and blur, Mitchell resampler
//! - **Transform**: resize, crop, flip, blur
//! - **Filters**: pixelate, colorize, desaturate, merge
//! - **Draw**: flood fill, lines, ellipses, rectangles

mod calculations;
mod draw;
mod filters;
mod resample;
mod transform;

pub use calculations::{Interpolation, select_interpolation};
pub use filters::PixelateMode;
pub use transform::FlipMode;

use crate::color::{Color, NativeColor};
use crate::error::{Error, Result};
use crate::geometry::{Point, Size};
use image::{Pixel, Rgba, RgbaImage};

/// Largest RGBA byte count a bitmap may occupy (31-bit signed limit).
pub const MAX_BITMAP_BYTES: u64 = i32::MAX as u64;

/// An owned, mutable, decoded bitmap.
#[derive(Debug)]
pub struct Image {
    bitmap: RgbaImage,
    save_alpha: bool,
    interlaced: bool,
    alpha_blending: bool,
}

impl Image {
    /// Allocate a blank image filled with opaque black.
    pub fn new(size: Size) -> Result<Self> {
        check_dimensions(size)?;
        Ok(Self::wrap(RgbaImage::from_pixel(
            size.width,
            size.height,
            Rgba([0, 0, 0, 255]),
        )))
    }

    /// Take ownership of a bitmap produced by a codec or an operation.
    pub(crate) fn from_bitmap(bitmap: RgbaImage) -> Result<Self> {
        check_dimensions(Size::new(bitmap.width(), bitmap.height()))?;
        Ok(Self::wrap(bitmap))
    }

    fn wrap(bitmap: RgbaImage) -> Self {
        Self {
            bitmap,
            save_alpha: true,
            interlaced: false,
            alpha_blending: true,
        }
    }

    /// New handle over `bitmap` that inherits this image's flags.
    pub(crate) fn derive(&self, bitmap: RgbaImage) -> Self {
        Self {
            bitmap,
            save_alpha: self.save_alpha,
            interlaced: self.interlaced,
            alpha_blending: self.alpha_blending,
        }
    }

    /// Swap in a new bitmap, dropping the old one.
    pub(crate) fn replace_bitmap(&mut self, bitmap: RgbaImage) {
        self.bitmap = bitmap;
    }

    pub(crate) fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub(crate) fn bitmap_mut(&mut self) -> &mut RgbaImage {
        &mut self.bitmap
    }

    /// Current dimensions, always read from the live bitmap.
    pub fn size(&self) -> Size {
        Size::new(self.bitmap.width(), self.bitmap.height())
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Whether encoders keep the alpha channel. Defaults to `true`.
    pub fn save_alpha(&self) -> bool {
        self.save_alpha
    }

    pub fn set_save_alpha(&mut self, save_alpha: bool) {
        self.save_alpha = save_alpha;
    }

    /// Whether encoders should write interlaced/progressive output.
    pub fn interlaced(&self) -> bool {
        self.interlaced
    }

    pub fn set_interlaced(&mut self, interlaced: bool) {
        self.interlaced = interlaced;
    }

    /// Whether drawing primitives and merges composite over existing pixels
    /// instead of overwriting them. Defaults to `true`.
    pub fn alpha_blending(&self) -> bool {
        self.alpha_blending
    }

    pub fn set_alpha_blending(&mut self, alpha_blending: bool) {
        self.alpha_blending = alpha_blending;
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.bitmap.width()
            && (point.y as u32) < self.bitmap.height()
    }

    fn checked(&self, point: Point) -> Result<(u32, u32)> {
        if self.contains(point) {
            Ok((point.x as u32, point.y as u32))
        } else {
            Err(Error::IndexOutOfBounds {
                x: point.x,
                y: point.y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Read one pixel in packed native form.
    pub fn native_pixel(&self, point: Point) -> Result<NativeColor> {
        let (x, y) = self.checked(point)?;
        Ok(NativeColor::from_rgba8(self.bitmap.get_pixel(x, y).0))
    }

    /// Write one pixel from packed native form, overwriting what was there.
    pub fn set_native_pixel(&mut self, point: Point, native: NativeColor) -> Result<()> {
        let (x, y) = self.checked(point)?;
        self.bitmap.put_pixel(x, y, Rgba(native.to_rgba8()));
        Ok(())
    }

    pub fn get_pixel(&self, point: Point) -> Result<Color> {
        self.native_pixel(point).map(Color::from)
    }

    /// Overwrite one pixel. Never blends, regardless of [`Self::alpha_blending`].
    pub fn set_pixel(&mut self, point: Point, color: Color) -> Result<()> {
        self.set_native_pixel(point, color.to_native())
    }

    /// Paint one pixel with `ink`, blending when enabled. Out-of-bounds
    /// coordinates are clipped silently.
    pub(crate) fn paint(&mut self, x: i64, y: i64, ink: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if self.alpha_blending {
            self.bitmap.get_pixel_mut(x, y).blend(&ink);
        } else {
            self.bitmap.put_pixel(x, y, ink);
        }
    }
}

/// The 8-bit pixel a color is stored as, after native quantization.
pub(crate) fn ink(color: Color) -> Rgba<u8> {
    Rgba(color.to_native().to_rgba8())
}

fn check_dimensions(size: Size) -> Result<()> {
    if size.is_empty() {
        return Err(Error::InvalidImage(format!(
            "cannot allocate a {}x{} bitmap",
            size.width, size.height
        )));
    }
    if size.area().saturating_mul(4) > MAX_BITMAP_BYTES {
        return Err(Error::InvalidImage(format!(
            "{}x{} exceeds the maximum bitmap size",
            size.width, size.height
        )));
    }
    Ok(())
}
