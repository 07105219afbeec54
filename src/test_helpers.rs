//! Shared test utilities for the rasterkit test suite.
//!
//! Builders for solid-color images and pixel assertions that compare
//! through the native color form, so tests read in [`Color`] terms.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut image = solid_image(4, 4, Color::WHITE);
//! image.draw_line(Point::new(0, 0), Point::new(3, 0), Color::RED);
//! assert_eq!(count_pixels(&image, Color::RED), 4);
//! ```

use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::image::Image;

// =========================================================================
// Builders
// =========================================================================

/// A `width`×`height` image where every pixel is exactly `color`.
pub fn solid_image(width: u32, height: u32, color: Color) -> Image {
    let mut image = Image::new(Size::new(width, height)).unwrap();
    let native = color.to_native();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            image.set_native_pixel(Point::new(x, y), native).unwrap();
        }
    }
    image
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert every pixel stores `expected` after native quantization.
pub fn assert_all_pixels(image: &Image, expected: Color) {
    let native = expected.to_native();
    for y in 0..image.height() as i32 {
        for x in 0..image.width() as i32 {
            let actual = image.native_pixel(Point::new(x, y)).unwrap();
            assert_eq!(
                actual, native,
                "pixel ({x}, {y}) is {actual:?}, expected {native:?}"
            );
        }
    }
}

/// Number of pixels that store exactly `color`.
pub fn count_pixels(image: &Image, color: Color) -> usize {
    let native = color.to_native();
    let mut count = 0;
    for y in 0..image.height() as i32 {
        for x in 0..image.width() as i32 {
            if image.native_pixel(Point::new(x, y)).unwrap() == native {
                count += 1;
            }
        }
    }
    count
}
