//! Concrete colour primitives and the default RGBA colour type.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};

use crate::error::{Result, SwatchError};

/// The operations the resolution engine needs from a host colour type.
///
/// Symbolic colours never look inside a concrete colour. Composition only
/// ever blends two resolved values, overwrites alpha, or hands the value to a
/// caller-supplied transform.
pub trait ConcreteColour: Clone + Send + Sync + 'static {
    /// Blend as `self * ratio + other * (1 - ratio)`.
    ///
    /// Implementations clamp `ratio` to `[0, 1]`.
    fn blend(&self, ratio: f32, other: &Self) -> Self;

    /// Replace the alpha channel with `alpha`.
    fn with_alpha(&self, alpha: f32) -> Self;

    /// Deterministic textual rendering, used in literal descriptions.
    fn description(&self) -> String;

    /// Deterministic content hash, used to fingerprint literals.
    fn content_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.description().hash(&mut hasher);
        hasher.finish()
    }
}

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut nibbles = [0xF_u8; 4];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b, a] = nibbles.map(|n| n << 4 | n);
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let mut bytes = [0xFF_u8; 4];
                for (i, slot) in bytes.iter_mut().enumerate().take(hex.len() / 2) {
                    *slot = parse_hex_byte(&hex[i * 2..i * 2 + 2])?;
                }
                let [r, g, b, a] = bytes;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Increase lightness by `amount` of the remaining range (HSL).
    pub fn lighten(self, amount: f32) -> Self {
        self.adjust_hsl(|hsl| hsl.lightness = shift_unit(hsl.lightness, amount))
    }

    /// Reduce lightness by `amount` of the current value (HSL).
    pub fn darken(self, amount: f32) -> Self {
        self.adjust_hsl(|hsl| hsl.lightness = shift_unit(hsl.lightness, -amount))
    }

    /// Increase saturation by `amount` of the remaining range (HSL).
    pub fn saturate(self, amount: f32) -> Self {
        self.adjust_hsl(|hsl| hsl.saturation = shift_unit(hsl.saturation, amount))
    }

    /// Reduce saturation by `amount` of the current value (HSL).
    pub fn desaturate(self, amount: f32) -> Self {
        self.adjust_hsl(|hsl| hsl.saturation = shift_unit(hsl.saturation, -amount))
    }

    fn adjust_hsl(self, adjust: impl FnOnce(&mut Hsl)) -> Self {
        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );

        let mut hsl: Hsl = rgb.into_color();
        adjust(&mut hsl);

        let rgb_out: Srgb<f32> = hsl.into_color();
        Colour::new(
            (rgb_out.red * 255.0).round() as u8,
            (rgb_out.green * 255.0).round() as u8,
            (rgb_out.blue * 255.0).round() as u8,
            self.a,
        )
    }
}

/// Move a unit value toward 1.0 (positive delta) or 0.0 (negative delta),
/// relative to the distance left in that direction.
fn shift_unit(value: f32, delta: f32) -> f32 {
    let shifted = if delta > 0.0 {
        value + (1.0 - value) * delta
    } else {
        value + value * delta
    };
    shifted.clamp(0.0, 1.0)
}

impl ConcreteColour for Colour {
    fn blend(&self, ratio: f32, other: &Self) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        let inv = 1.0 - ratio;
        let mix = |a: u8, b: u8| ((a as f32 * ratio) + (b as f32 * inv)).round() as u8;

        Colour::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    fn with_alpha(&self, alpha: f32) -> Self {
        // u8 storage: out-of-range alpha saturates at the channel bounds
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Colour::new(self.r, self.g, self.b, a)
    }

    fn description(&self) -> String {
        self.to_string()
    }

    fn content_fingerprint(&self) -> u64 {
        u32::from_be_bytes(self.to_rgba()) as u64
    }
}

impl FromStr for Colour {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> SwatchError {
    SwatchError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| SwatchError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| SwatchError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
