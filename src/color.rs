//! RGB / HSL / hex conversions and the coarse color-name classifier.

use std::fmt;

use palette::Srgb;
use serde::Serialize;

/// One pixel or one generated color, 8 bits per channel.
pub type Rgb = Srgb<u8>;

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb_to_hsl(rgb.red, rgb.green, rgb.blue)
    }
}

/// Convert 8-bit RGB to HSL.
///
/// Achromatic input (`r == g == b`) yields hue 0 and saturation 0. When two
/// channels share the maximum, red wins over green and green over blue.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (sector * 60.0).rem_euclid(360.0),
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Piecewise channel value for hue offset `t` between the two chroma bounds.
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Convert HSL with every component in `[0, 1]` back to RGB in `[0, 1]`.
///
/// Zero saturation short-circuits to the gray `(l, l, l)`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

/// Round `[0, 1]` channels to the nearest 8-bit value.
pub fn unit_to_rgb((r, g, b): (f64, f64, f64)) -> Rgb {
    let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Srgb::new(channel(r), channel(g), channel(b))
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#rrggbb` or `rrggbb` (any case). Returns `None` for anything else.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Srgb::new(r, g, b))
}

/// Like [`hex_to_rgb`], but malformed input falls back to black.
pub fn hex_to_rgb_or_black(hex: &str) -> Rgb {
    hex_to_rgb(hex).unwrap_or_else(|| Srgb::new(0, 0, 0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ColorName {
    Black,
    White,
    #[serde(rename = "Light Gray")]
    LightGray,
    #[serde(rename = "Dark Gray")]
    DarkGray,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
}

impl ColorName {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::Black => "Black",
            ColorName::White => "White",
            ColorName::LightGray => "Light Gray",
            ColorName::DarkGray => "Dark Gray",
            ColorName::Red => "Red",
            ColorName::Orange => "Orange",
            ColorName::Yellow => "Yellow",
            ColorName::Green => "Green",
            ColorName::Cyan => "Cyan",
            ColorName::Blue => "Blue",
            ColorName::Purple => "Purple",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Bucket an HSL triple (degrees / percent) into a human-readable name.
///
/// Lightness is checked first, then saturation, then hue in 30-60 degree
/// bands with red wrapping around 0.
pub fn classify_color_name(h: f64, s: f64, l: f64) -> ColorName {
    if l < 20.0 {
        return ColorName::Black;
    }
    if l > 80.0 {
        return ColorName::White;
    }
    if s < 20.0 {
        return if l > 50.0 { ColorName::LightGray } else { ColorName::DarkGray };
    }

    match h.rem_euclid(360.0) {
        h if h < 30.0 => ColorName::Red,
        h if h < 60.0 => ColorName::Orange,
        h if h < 90.0 => ColorName::Yellow,
        h if h < 150.0 => ColorName::Green,
        h if h < 210.0 => ColorName::Cyan,
        h if h < 270.0 => ColorName::Blue,
        h if h < 330.0 => ColorName::Purple,
        _ => ColorName::Red,
    }
}
