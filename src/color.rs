//! Color model.
//!
//! [`Color`] holds four normalized channels, each clamped into `[0, 1]` on
//! every construction path. The bitmap stores pixels in the codec's native
//! packed form instead, modeled by [`NativeColor`]:
//!
//! ```text
//! bits 31..24   23..16   15..8   7..0
//!      alpha    red      green   blue
//! ```
//!
//! Red, green, and blue use the full `0..=255` range. Alpha is 7 bits and
//! inverted: `0` is fully opaque, `127` fully transparent. Conversions use
//! `native = 127 - round(alpha * 127)` and `alpha = 1 - native / 127`.
//!
//! ## Hex forms
//!
//! [`Color::from_hex`] accepts 3, 4, 6, or 8 hex digits with an optional
//! leading `#`. Short forms double every digit (`"feb"` → `"ffeebb"`), and a
//! 6-digit form gains a full-opacity `ff` byte, appended for RGBA order or
//! prepended for ARGB order. [`Color::to_hex`] always packs R, G, B, A from
//! the high byte down, whichever order was used to parse.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Normalized RGBA color. Channels are always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

fn clamp_component(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Color {
    pub const BLACK: Color = Color::opaque_const(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::opaque_const(1.0, 1.0, 1.0);
    pub const RED: Color = Color::opaque_const(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::opaque_const(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::opaque_const(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    const fn opaque_const(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_component(red),
            green: clamp_component(green),
            blue: clamp_component(blue),
            alpha: clamp_component(alpha),
        }
    }

    /// Fully opaque color.
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Convert to the codec's packed representation.
    pub fn to_native(&self) -> NativeColor {
        NativeColor::new(
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            NativeColor::MAX_ALPHA - (self.alpha * 127.0).round() as u8,
        )
    }

    /// Decode a packed native value.
    ///
    /// The alpha field is read from the whole high byte and scaled by 127,
    /// not 255. Out-of-range alpha bytes clamp to fully transparent.
    pub fn from_native(packed: u32) -> Self {
        let red = (packed >> 16) & 0xff;
        let green = (packed >> 8) & 0xff;
        let blue = packed & 0xff;
        let alpha = (packed >> 24) & 0xff;
        Self::new(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            1.0 - alpha as f64 / 127.0,
        )
    }

    /// Parse a hex color string.
    ///
    /// `leading_alpha` selects ARGB byte order instead of RGBA. It also
    /// decides where the implied `ff` goes for 3- and 6-digit forms.
    pub fn from_hex(hex: &str, leading_alpha: bool) -> Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(format!(
                "'{hex}' contains non-hexadecimal characters"
            )));
        }

        let mut expanded = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 | 8 => digits.to_string(),
            len => {
                return Err(Error::InvalidColor(format!(
                    "'{hex}' has {len} digits, expected 3, 4, 6, or 8"
                )));
            }
        };
        if expanded.len() == 6 {
            if leading_alpha {
                expanded.insert_str(0, "ff");
            } else {
                expanded.push_str("ff");
            }
        }

        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|e| Error::InvalidColor(format!("'{hex}': {e}")))?;
        let [b0, b1, b2, b3] = value.to_be_bytes();
        let (r, g, b, a) = if leading_alpha {
            (b1, b2, b3, b0)
        } else {
            (b0, b1, b2, b3)
        };
        Ok(Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        ))
    }

    /// Channel bytes packed high-to-low as R, G, B, A.
    pub fn to_hex(&self) -> u32 {
        u32::from_be_bytes([
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            to_byte(self.alpha),
        ])
    }

    /// Eight lowercase hex digits in RGBA order, without a leading `#`.
    pub fn to_hex_string(&self) -> String {
        format!("{:08x}", self.to_hex())
    }
}

fn to_byte(component: f64) -> u8 {
    (component * 255.0).round() as u8
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s, false)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex_string())
    }
}

impl From<NativeColor> for Color {
    fn from(native: NativeColor) -> Self {
        Self::from_native(native.packed())
    }
}

/// A pixel in the codec's packed true-color format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeColor(u32);

impl NativeColor {
    /// Fully transparent on the inverted 7-bit alpha scale.
    pub const MAX_ALPHA: u8 = 127;

    /// Pack channels. `alpha` is on the inverted 7-bit scale; values above
    /// [`Self::MAX_ALPHA`] saturate to fully transparent.
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(
            ((alpha.min(Self::MAX_ALPHA) as u32) << 24)
                | ((red as u32) << 16)
                | ((green as u32) << 8)
                | blue as u32,
        )
    }

    pub fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    pub fn packed(self) -> u32 {
        self.0
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Inverted alpha: 0 opaque, 127 transparent. An oversized alpha byte
    /// in a raw packed value reads as transparent.
    pub fn alpha(self) -> u8 {
        ((self.0 >> 24) as u8).min(Self::MAX_ALPHA)
    }

    /// Convert straight 8-bit RGBA (as stored by the bitmap) to packed form.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        let opacity = (a as f64 * 127.0 / 255.0).round() as u8;
        Self::new(r, g, b, Self::MAX_ALPHA - opacity)
    }

    /// Convert to straight 8-bit RGBA. Exact inverse of [`Self::from_rgba8`]
    /// for every 7-bit alpha value.
    pub fn to_rgba8(self) -> [u8; 4] {
        let opacity = (Self::MAX_ALPHA - self.alpha()) as f64;
        let a = (opacity * 255.0 / 127.0).round() as u8;
        [self.red(), self.green(), self.blue(), a]
    }
}
