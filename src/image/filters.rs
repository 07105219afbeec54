//! Per-pixel filters and compositing.

use super::Image;
use crate::color::{Color, NativeColor};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rectangle};
use image::{Pixel, Rgba};

/// How [`Image::pixelate_with`] colors each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelateMode {
    /// Every pixel takes the block's top-left color.
    UpperLeft,
    /// Every pixel takes the block's mean color.
    #[default]
    Average,
}

impl Image {
    /// Replace each `block_size`×`block_size` block with its average color.
    pub fn pixelate(&mut self, block_size: u32) -> Result<()> {
        self.pixelate_with(block_size, PixelateMode::Average)
    }

    /// A block size of 1 leaves the image unchanged; 0 is rejected.
    pub fn pixelate_with(&mut self, block_size: u32, mode: PixelateMode) -> Result<()> {
        if block_size == 0 {
            return Err(Error::ManipulationFailed(
                "pixelate block size must be at least 1".into(),
            ));
        }
        if block_size == 1 {
            return Ok(());
        }
        let (width, height) = (self.width(), self.height());
        let bitmap = self.bitmap_mut();

        for by in (0..height).step_by(block_size as usize) {
            for bx in (0..width).step_by(block_size as usize) {
                let x_end = (bx + block_size).min(width);
                let y_end = (by + block_size).min(height);
                let fill = match mode {
                    PixelateMode::UpperLeft => *bitmap.get_pixel(bx, by),
                    PixelateMode::Average => {
                        let mut sum = [0u64; 4];
                        for y in by..y_end {
                            for x in bx..x_end {
                                for (acc, c) in sum.iter_mut().zip(bitmap.get_pixel(x, y).0) {
                                    *acc += c as u64;
                                }
                            }
                        }
                        let count = ((x_end - bx) * (y_end - by)) as u64;
                        Rgba(sum.map(|s| ((s + count / 2) / count) as u8))
                    }
                };
                for y in by..y_end {
                    for x in bx..x_end {
                        bitmap.put_pixel(x, y, fill);
                    }
                }
            }
        }
        Ok(())
    }

    /// Add `color`'s channels to every pixel, clamping each channel.
    ///
    /// Works on the native scale: red, green, and blue add `0..=255`, and
    /// alpha adds the color's inverted 7-bit alpha, so an opaque color
    /// leaves transparency unchanged.
    pub fn colorize(&mut self, color: Color) {
        let offset = color.to_native();
        self.map_native(|px| {
            NativeColor::new(
                px.red().saturating_add(offset.red()),
                px.green().saturating_add(offset.green()),
                px.blue().saturating_add(offset.blue()),
                (px.alpha() + offset.alpha()).min(NativeColor::MAX_ALPHA),
            )
        });
    }

    /// Convert to grayscale with Rec. 601 luma, keeping alpha.
    pub fn desaturate(&mut self) {
        self.map_native(|px| {
            let luma = (299 * px.red() as u32 + 587 * px.green() as u32 + 114 * px.blue() as u32)
                / 1000;
            let luma = luma as u8;
            NativeColor::new(luma, luma, luma, px.alpha())
        });
    }

    fn map_native(&mut self, f: impl Fn(NativeColor) -> NativeColor) {
        for px in self.bitmap_mut().pixels_mut() {
            *px = Rgba(f(NativeColor::from_rgba8(px.0)).to_rgba8());
        }
    }

    /// Composite `other` into this image over `region`.
    ///
    /// Copies at most `region.size` pixels from `other`'s top-left corner to
    /// `region.origin`, clipped to both images. Blends source-over when
    /// [`Image::alpha_blending`] is on, otherwise overwrites.
    pub fn merge(&mut self, other: &Image, region: Rectangle) {
        self.composite(other, region, |dst, src, blending| {
            if blending {
                dst.blend(&src);
            } else {
                *dst = src;
            }
        });
    }

    /// Composite all of `other` with its top-left corner at `origin`.
    pub fn merge_at(&mut self, other: &Image, origin: Point) {
        self.merge(other, Rectangle::new(origin, other.size()));
    }

    /// Mix `other`'s color into this image at `percent` (0..=100) strength.
    ///
    /// Alpha of the destination is kept.
    pub fn merge_with_opacity(&mut self, other: &Image, region: Rectangle, percent: u8) {
        let pct = percent.min(100) as u32;
        self.composite(other, region, |dst, src, _| {
            for c in 0..3 {
                let mixed = (src.0[c] as u32 * pct + dst.0[c] as u32 * (100 - pct) + 50) / 100;
                dst.0[c] = mixed as u8;
            }
        });
    }

    fn composite(
        &mut self,
        other: &Image,
        region: Rectangle,
        op: impl Fn(&mut Rgba<u8>, Rgba<u8>, bool),
    ) {
        let blending = self.alpha_blending();
        let (dst_w, dst_h) = (self.width() as i64, self.height() as i64);
        let copy_w = (region.size.width).min(other.width()) as i64;
        let copy_h = (region.size.height).min(other.height()) as i64;
        let (ox, oy) = (region.origin.x as i64, region.origin.y as i64);

        let src = other.bitmap();
        let dst = self.bitmap_mut();
        for sy in 0..copy_h {
            let dy = oy + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            for sx in 0..copy_w {
                let dx = ox + sx;
                if dx < 0 || dx >= dst_w {
                    continue;
                }
                let from = *src.get_pixel(sx as u32, sy as u32);
                op(dst.get_pixel_mut(dx as u32, dy as u32), from, blending);
            }
        }
    }
}
