//! Pure calculation functions for resize operations.
//!
//! All functions here are pure and testable without any pixels.

use crate::geometry::Size;

/// Resampling filter used by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    NearestNeighbor,
    /// Lanczos-windowed sinc (radius 3), used when shrinking.
    Sinc,
    /// Mitchell-Netravali cubic, used when enlarging.
    Mitchell,
}

/// Pick the interpolation kernel for a resize from `current` to `target`.
///
/// Only relative area matters:
/// - smoothing disabled → nearest neighbor
/// - smaller target area → sinc
/// - larger target area → Mitchell
/// - equal area → nearest neighbor
pub fn select_interpolation(current: Size, target: Size, smoothing: bool) -> Interpolation {
    if !smoothing {
        return Interpolation::NearestNeighbor;
    }
    match target.area().cmp(&current.area()) {
        std::cmp::Ordering::Less => Interpolation::Sinc,
        std::cmp::Ordering::Greater => Interpolation::Mitchell,
        std::cmp::Ordering::Equal => Interpolation::NearestNeighbor,
    }
}

/// Height that keeps the aspect ratio of `current` at the given width.
///
/// Never rounds a positive width down to a zero height.
pub fn size_for_width(current: Size, width: u32) -> Size {
    let height = scale_dimension(current.height, width, current.width);
    Size::new(width, if width > 0 { height.max(1) } else { 0 })
}

/// Width that keeps the aspect ratio of `current` at the given height.
pub fn size_for_height(current: Size, height: u32) -> Size {
    let width = scale_dimension(current.width, height, current.height);
    Size::new(if height > 0 { width.max(1) } else { 0 }, height)
}

fn scale_dimension(value: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (value as f64 * numerator as f64 / denominator as f64).round() as u32
}
