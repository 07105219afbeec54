//! Resampling and blur over premultiplied float planes.
//!
//! Shrinking (`Lanczos3`), nearest neighbor and Gaussian blur go through
//! `image::imageops`. The crate has no Mitchell filter, so enlarging runs
//! an own separable two-pass resampler with the Mitchell-Netravali kernel.
//!
//! Every filtered path works on a premultiplied [`Rgba32FImage`] with
//! channels in `0.0..=1.0`, so transparent pixels do not bleed their color
//! into opaque neighbors.

use super::calculations::Interpolation;
use crate::geometry::Size;
use image::imageops::{self, FilterType, GaussianBlurParameters};
use image::{Rgba, Rgba32FImage, RgbaImage};

/// Mitchell-Netravali cubic, radius 2.0, parameterized by `b` and `c`.
pub(crate) struct Mitchell {
    p0: f64,
    p2: f64,
    p3: f64,
    q0: f64,
    q1: f64,
    q2: f64,
    q3: f64,
}

impl Mitchell {
    const RADIUS: f64 = 2.0;

    pub fn new(b: f64, c: f64) -> Self {
        Self {
            p0: (6.0 - 2.0 * b) / 6.0,
            p2: (-18.0 + 12.0 * b + 6.0 * c) / 6.0,
            p3: (12.0 - 9.0 * b - 6.0 * c) / 6.0,
            q0: (8.0 * b + 24.0 * c) / 6.0,
            q1: (-12.0 * b - 48.0 * c) / 6.0,
            q2: (6.0 * b + 30.0 * c) / 6.0,
            q3: (-b - 6.0 * c) / 6.0,
        }
    }

    fn weight(&self, x: f64) -> f64 {
        let x = x.abs();
        if x < 1.0 {
            return self.p0 + x * x * (self.p2 + x * self.p3);
        }
        if x < Self::RADIUS {
            return self.q0 + x * (self.q1 + x * (self.q2 + x * self.q3));
        }
        0.0
    }
}

impl Default for Mitchell {
    /// b = c = 1/3, the recommended general-purpose setting.
    fn default() -> Self {
        Self::new(1.0 / 3.0, 1.0 / 3.0)
    }
}

/// Contribution of a contiguous run of source samples to one output sample.
struct Taps {
    start: usize,
    weights: Vec<f32>,
}

fn resample_taps(src_len: u32, dst_len: u32, kernel: &Mitchell) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;
    // Widen the kernel when shrinking so every source pixel contributes.
    let filter_scale = scale.max(1.0);
    let support = Mitchell::RADIUS * filter_scale;
    let last = src_len as usize - 1;

    (0..dst_len)
        .map(|i| {
            let center = (i as f64 + 0.5) * scale;
            let left = ((center - support).floor().max(0.0) as usize).min(last);
            let right = ((center + support).ceil() as usize).clamp(left + 1, src_len as usize);
            let mut weights: Vec<f32> = (left..right)
                .map(|j| kernel.weight((j as f64 + 0.5 - center) / filter_scale) as f32)
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() <= f32::EPSILON {
                return Taps {
                    start: (center as usize).min(last),
                    weights: vec![1.0],
                };
            }
            for w in &mut weights {
                *w /= sum;
            }
            Taps {
                start: left,
                weights,
            }
        })
        .collect()
}

fn premultiply(src: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(src.width(), src.height(), |x, y| {
        let Rgba([r, g, b, a]) = *src.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        let channel = |v: u8| v as f32 / 255.0 * alpha;
        Rgba([channel(r), channel(g), channel(b), alpha])
    })
}

fn unpremultiply(plane: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(plane.width(), plane.height(), |x, y| {
        let Rgba([r, g, b, a]) = *plane.get_pixel(x, y);
        let alpha = a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |v: f32| (v / alpha * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba([channel(r), channel(g), channel(b), (alpha * 255.0).round() as u8])
    })
}

fn convolve(tap: &Taps, sample: impl Fn(u32) -> Rgba<f32>) -> Rgba<f32> {
    let mut acc = [0f32; 4];
    for (k, w) in tap.weights.iter().enumerate() {
        let Rgba(px) = sample((tap.start + k) as u32);
        for c in 0..4 {
            acc[c] += px[c] * w;
        }
    }
    Rgba(acc)
}

fn mitchell(src: &RgbaImage, target: Size) -> RgbaImage {
    let kernel = Mitchell::default();
    let horizontal = resample_taps(src.width(), target.width, &kernel);
    let vertical = resample_taps(src.height(), target.height, &kernel);

    let plane = premultiply(src);
    let rows = Rgba32FImage::from_fn(target.width, src.height(), |x, y| {
        convolve(&horizontal[x as usize], |i| *plane.get_pixel(i, y))
    });
    let out = Rgba32FImage::from_fn(target.width, target.height, |x, y| {
        convolve(&vertical[y as usize], |i| *rows.get_pixel(x, i))
    });
    unpremultiply(&out)
}

/// Resample `src` to `target` (non-empty) with the given kernel.
pub(crate) fn resample(src: &RgbaImage, target: Size, interpolation: Interpolation) -> RgbaImage {
    match interpolation {
        Interpolation::NearestNeighbor => {
            imageops::resize(src, target.width, target.height, FilterType::Nearest)
        }
        Interpolation::Sinc => {
            let plane = premultiply(src);
            unpremultiply(&imageops::resize(
                &plane,
                target.width,
                target.height,
                FilterType::Lanczos3,
            ))
        }
        Interpolation::Mitchell => mitchell(src, target),
    }
}

/// Gaussian blur with standard deviation `sigma`; the kernel extent is
/// derived from it. `sigma` must be a positive normal float.
pub(crate) fn gaussian_blur(src: &RgbaImage, sigma: f32) -> RgbaImage {
    let plane = premultiply(src);
    unpremultiply(&imageops::blur_advanced(
        &plane,
        GaussianBlurParameters::new_from_sigma(sigma),
    ))
}
