//! Geometric transforms: resize, crop, flip, blur.
//!
//! Resize, crop, and blur come in pairs: `resized`/`resize`,
//! `cropped`/`crop`, `blurred`/`blur`. The first returns a new [`Image`];
//! the second replaces the bitmap in place.

use super::Image;
use super::calculations::{select_interpolation, size_for_height, size_for_width};
use super::resample::{gaussian_blur, resample};
use crate::error::{Error, Result};
use crate::geometry::{Rectangle, Size};
use image::imageops;

/// Axis to mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipMode {
    Horizontal,
    Vertical,
    Both,
}

impl Image {
    /// Scale to `size`. The kernel is chosen by [`select_interpolation`].
    pub fn resized(&self, size: Size, smoothing: bool) -> Result<Image> {
        if size.is_empty() {
            return Err(Error::ResizingFailed(format!(
                "cannot scale to {}x{}",
                size.width, size.height
            )));
        }
        if size.area().saturating_mul(4) > super::MAX_BITMAP_BYTES {
            return Err(Error::ResizingFailed(format!(
                "{}x{} exceeds the maximum bitmap size",
                size.width, size.height
            )));
        }
        let interpolation = select_interpolation(self.size(), size, smoothing);
        log::trace!(
            "resizing {}x{} to {}x{} with {:?}",
            self.width(),
            self.height(),
            size.width,
            size.height,
            interpolation
        );
        Ok(self.derive(resample(self.bitmap(), size, interpolation)))
    }

    pub fn resize(&mut self, size: Size, smoothing: bool) -> Result<()> {
        let resized = self.resized(size, smoothing)?;
        self.replace_bitmap(resized.bitmap);
        Ok(())
    }

    /// Scale to `width`, deriving the height from the current aspect ratio.
    pub fn resized_to_width(&self, width: u32, smoothing: bool) -> Result<Image> {
        self.resized(size_for_width(self.size(), width), smoothing)
    }

    pub fn resize_to_width(&mut self, width: u32, smoothing: bool) -> Result<()> {
        self.resize(size_for_width(self.size(), width), smoothing)
    }

    /// Scale to `height`, deriving the width from the current aspect ratio.
    pub fn resized_to_height(&self, height: u32, smoothing: bool) -> Result<Image> {
        self.resized(size_for_height(self.size(), height), smoothing)
    }

    pub fn resize_to_height(&mut self, height: u32, smoothing: bool) -> Result<()> {
        self.resize(size_for_height(self.size(), height), smoothing)
    }

    /// Copy out `rect`, which must be non-empty and lie inside the image.
    pub fn cropped(&self, rect: Rectangle) -> Result<Image> {
        if rect.size.is_empty() || !rect.fits_within(self.size()) {
            return Err(Error::CroppingFailed(format!(
                "rectangle {}x{} at ({}, {}) is not inside a {}x{} image",
                rect.size.width,
                rect.size.height,
                rect.origin.x,
                rect.origin.y,
                self.width(),
                self.height()
            )));
        }
        let view = imageops::crop_imm(
            self.bitmap(),
            rect.origin.x as u32,
            rect.origin.y as u32,
            rect.size.width,
            rect.size.height,
        );
        Ok(self.derive(view.to_image()))
    }

    pub fn crop(&mut self, rect: Rectangle) -> Result<()> {
        let cropped = self.cropped(rect)?;
        self.replace_bitmap(cropped.bitmap);
        Ok(())
    }

    pub fn flip(&mut self, mode: FlipMode) {
        let bitmap = self.bitmap_mut();
        match mode {
            FlipMode::Horizontal => imageops::flip_horizontal_in_place(bitmap),
            FlipMode::Vertical => imageops::flip_vertical_in_place(bitmap),
            FlipMode::Both => imageops::rotate180_in_place(bitmap),
        }
    }

    /// Gaussian blur with sigma `radius * 2 / 3`.
    pub fn blurred(&self, radius: u32) -> Result<Image> {
        self.blurred_with_sigma(sigma_for_radius(radius)?)
    }

    pub fn blur(&mut self, radius: u32) -> Result<()> {
        self.blur_with_sigma(sigma_for_radius(radius)?)
    }

    /// Gaussian blur with an explicit sigma. The kernel covers about three
    /// sigma on each side.
    pub fn blurred_with_sigma(&self, sigma: f32) -> Result<Image> {
        if !(sigma.is_normal() && sigma > 0.0 && sigma <= MAX_BLUR_SIGMA) {
            return Err(Error::ManipulationFailed(format!(
                "blur sigma must be in (0, {MAX_BLUR_SIGMA}], got {sigma}"
            )));
        }
        log::trace!("blurring {}x{} with sigma {sigma}", self.width(), self.height());
        Ok(self.derive(gaussian_blur(self.bitmap(), sigma)))
    }

    pub fn blur_with_sigma(&mut self, sigma: f32) -> Result<()> {
        let blurred = self.blurred_with_sigma(sigma)?;
        self.replace_bitmap(blurred.bitmap);
        Ok(())
    }
}

/// Largest accepted sigma, a kernel of about 67 000 taps.
const MAX_BLUR_SIGMA: f32 = 10_000.0;

fn sigma_for_radius(radius: u32) -> Result<f32> {
    if radius == 0 {
        return Err(Error::ManipulationFailed(
            "blur radius must be at least 1".into(),
        ));
    }
    Ok(radius as f32 * 2.0 / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Point;
    use crate::test_helpers::*;

    // =========================================================================
    // Resize
    // =========================================================================

    #[test]
    fn resized_returns_new_image_and_keeps_source() {
        let image = solid_image(100, 100, Color::RED);
        let smaller = image.resized(Size::new(50, 25), true).unwrap();
        assert_eq!(smaller.size(), Size::new(50, 25));
        assert_eq!(image.size(), Size::new(100, 100));
        assert_all_pixels(&smaller, Color::RED);
    }

    #[test]
    fn resize_in_place_replaces_bitmap() {
        let mut image = solid_image(10, 10, Color::BLUE);
        image.resize(Size::new(30, 20), true).unwrap();
        assert_eq!(image.size(), Size::new(30, 20));
        assert_all_pixels(&image, Color::BLUE);
    }

    #[test]
    fn resize_to_zero_fails() {
        let mut image = solid_image(10, 10, Color::BLUE);
        assert!(matches!(
            image.resized(Size::new(0, 10), true),
            Err(Error::ResizingFailed(_))
        ));
        assert!(matches!(
            image.resize(Size::new(10, 0), false),
            Err(Error::ResizingFailed(_))
        ));
        assert_eq!(image.size(), Size::new(10, 10));
    }

    #[test]
    fn resize_keeps_flags() {
        let mut image = solid_image(4, 4, Color::WHITE);
        image.set_save_alpha(false);
        image.set_interlaced(true);
        let resized = image.resized(Size::new(8, 8), false).unwrap();
        assert!(!resized.save_alpha());
        assert!(resized.interlaced());
    }

    #[test]
    fn resize_to_width_preserves_aspect() {
        let image = solid_image(80, 60, Color::GREEN);
        let resized = image.resized_to_width(40, true).unwrap();
        assert_eq!(resized.size(), Size::new(40, 30));
    }

    #[test]
    fn resize_to_height_preserves_aspect() {
        let mut image = solid_image(60, 80, Color::GREEN);
        image.resize_to_height(160, true).unwrap();
        assert_eq!(image.size(), Size::new(120, 160));
    }

    // =========================================================================
    // Crop
    // =========================================================================

    #[test]
    fn cropped_copies_region() {
        let mut image = solid_image(10, 10, Color::WHITE);
        image.set_pixel(Point::new(3, 4), Color::RED).unwrap();

        let cropped = image.cropped(Rectangle::from_xywh(3, 4, 2, 2)).unwrap();
        assert_eq!(cropped.size(), Size::new(2, 2));
        assert_eq!(cropped.get_pixel(Point::new(0, 0)).unwrap(), Color::RED);
        assert_eq!(cropped.get_pixel(Point::new(1, 1)).unwrap(), Color::WHITE);
    }

    #[test]
    fn crop_in_place() {
        let mut image = solid_image(10, 10, Color::WHITE);
        image.crop(Rectangle::from_xywh(0, 0, 10, 3)).unwrap();
        assert_eq!(image.size(), Size::new(10, 3));
    }

    #[test]
    fn crop_outside_bounds_fails() {
        let image = solid_image(10, 10, Color::WHITE);
        for rect in [
            Rectangle::from_xywh(5, 5, 6, 2),
            Rectangle::from_xywh(-1, 0, 2, 2),
            Rectangle::from_xywh(0, 0, 0, 5),
            Rectangle::from_xywh(20, 20, 1, 1),
        ] {
            assert!(
                matches!(image.cropped(rect), Err(Error::CroppingFailed(_))),
                "{rect:?}"
            );
        }
    }

    // =========================================================================
    // Flip
    // =========================================================================

    #[test]
    fn flip_modes() {
        let mut image = solid_image(3, 2, Color::WHITE);
        image.set_pixel(Point::new(0, 0), Color::RED).unwrap();

        image.flip(FlipMode::Horizontal);
        assert_eq!(image.get_pixel(Point::new(2, 0)).unwrap(), Color::RED);

        image.flip(FlipMode::Vertical);
        assert_eq!(image.get_pixel(Point::new(2, 1)).unwrap(), Color::RED);

        image.flip(FlipMode::Both);
        assert_eq!(image.get_pixel(Point::new(0, 0)).unwrap(), Color::RED);
    }

    // =========================================================================
    // Blur
    // =========================================================================

    #[test]
    fn blur_softens_an_edge() {
        let mut image = solid_image(9, 9, Color::BLACK);
        image.set_pixel(Point::new(4, 4), Color::WHITE).unwrap();
        let blurred = image.blurred(2).unwrap();
        assert!(blurred.get_pixel(Point::new(4, 4)).unwrap().red() < 1.0);
        assert!(blurred.get_pixel(Point::new(3, 4)).unwrap().red() > 0.0);
        // source untouched
        assert_eq!(image.get_pixel(Point::new(4, 4)).unwrap(), Color::WHITE);
    }

    #[test]
    fn blur_in_place_keeps_size() {
        let mut image = solid_image(7, 5, Color::RED);
        image.blur(3).unwrap();
        assert_eq!(image.size(), Size::new(7, 5));
        assert_all_pixels(&image, Color::RED);
    }

    #[test]
    fn blur_rejects_bad_parameters() {
        let mut image = solid_image(4, 4, Color::RED);
        assert!(matches!(image.blur(0), Err(Error::ManipulationFailed(_))));
        assert!(matches!(
            image.blurred_with_sigma(0.0),
            Err(Error::ManipulationFailed(_))
        ));
        assert!(matches!(
            image.blur_with_sigma(f32::NAN),
            Err(Error::ManipulationFailed(_))
        ));
        assert!(matches!(
            image.blur_with_sigma(-1.0),
            Err(Error::ManipulationFailed(_))
        ));
        // a radius this large would need a kernel longer than any bitmap
        assert!(matches!(image.blur(u32::MAX), Err(Error::ManipulationFailed(_))));
        assert_all_pixels(&image, Color::RED);
    }

    #[test]
    fn blur_with_sigma_widens_with_sigma() {
        let mut image = solid_image(15, 1, Color::BLACK);
        image.set_pixel(Point::new(7, 0), Color::WHITE).unwrap();
        let narrow = image.blurred_with_sigma(0.8).unwrap();
        let wide = image.blurred_with_sigma(2.5).unwrap();
        let at = |img: &Image, x| img.get_pixel(Point::new(x, 0)).unwrap().red();
        assert_eq!(at(&narrow, 4), 0.0);
        assert!(at(&wide, 4) > 0.0);
        assert!(at(&wide, 7) < at(&narrow, 7));
    }
}
