//! Color model: RGB values, hex notation, gradients, and hue rotation.
//!
//! Every operation here is pure and returns a new value. Channel math is done
//! in f64 and truncated toward zero on the way back to integers, then clamped
//! to 0..=255. Truncation (not rounding) is deliberate: banner frames must be
//! bit-for-bit identical to the reference palette at fractional boundaries.

use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Transient hue/saturation/value triple.
///
/// `h` is in degrees, `s` and `v` in [0, 1]. Never stored; only used to
/// derive an [`Rgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).ok_or_else(|| format!("Invalid hex color '{}' (expected #RGB or #RRGGBB)", s))
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// HEX NOTATION
// ============================================================================

/// Parse `#RGB` or `#RRGGBB` (case-insensitive, surrounding whitespace ignored).
///
/// Shorthand nibbles are duplicated: `#abc` is `#aabbcc`. Anything else
/// (missing `#`, wrong length, non-hex digits) yields `None`.
pub fn parse_hex(s: &str) -> Option<Rgb> {
    let digits = s.trim().strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        }
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);
            Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

// ============================================================================
// GRADIENTS
// ============================================================================

/// Truncate toward zero, then clamp into a channel.
fn channel(x: f64) -> u8 {
    // `as i64` truncates toward zero; NaN becomes 0
    (x as i64).clamp(0, 255) as u8
}

/// Per-channel linear interpolation from `a` (t = 0) to `b` (t = 1).
///
/// `t` is clamped to [0, 1]. Results truncate, they do not round.
pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mix = |x: u8, y: u8| channel(x as f64 + (y as f64 - x as f64) * t);
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

// ============================================================================
// HSV
// ============================================================================

/// Convert to HSV. Black maps to exactly (0, 0, 0).
pub fn to_hsv(c: Rgb) -> Hsv {
    let r = c.r as f64 / 255.0;
    let g = c.g as f64 / 255.0;
    let b = c.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    if max == 0.0 {
        return Hsv { h: 0.0, s: 0.0, v: 0.0 };
    }

    let s = d / max;
    let h = if d == 0.0 {
        0.0
    } else if max == r {
        let h = (g - b) / d;
        if g < b { h + 6.0 } else { h }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsv { h: h * 60.0, s, v: max }
}

/// Convert from HSV. Hue is wrapped into [0, 360) first, so negative and
/// over-range hues are accepted.
pub fn from_hsv(hsv: Hsv) -> Rgb {
    let mut h = hsv.h % 360.0;
    if h < 0.0 {
        h += 360.0;
    }

    let c = hsv.v * hsv.s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = hsv.v - c;

    let (r1, g1, b1) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(
        channel((r1 + m) * 255.0),
        channel((g1 + m) * 255.0),
        channel((b1 + m) * 255.0),
    )
}

/// Rotate hue by `delta` degrees, preserving saturation and value.
pub fn rotate_hue(c: Rgb, delta: f64) -> Rgb {
    let hsv = to_hsv(c);
    from_hsv(Hsv { h: hsv.h + delta, ..hsv })
}

// ============================================================================
// TESTS
// ============================================================================
