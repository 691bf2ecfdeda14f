//! Pixel statistics to palette recommendation.
//!
//! The analysis is a fixed arithmetic heuristic:
//! 1. Convert every sample to HSL and average lightness and saturation.
//! 2. Average the hues (plain arithmetic mean, no wraparound handling) to get
//!    the undertone and the base hue.
//! 3. Pick a season type from undertone, brightness and saturation.
//! 4. Rotate the base hue in fixed steps to build two five-color palettes,
//!    jittering saturation and lightness inside fixed bands.

use std::fmt;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::color::{
    ColorName, Hsl, Rgb, classify_color_name, hex_to_rgb_or_black, hsl_to_rgb, rgb_to_hex,
    unit_to_rgb,
};
use crate::error::{AdvisorError, Result};

/// Number of colors in each generated palette.
pub const PALETTE_SIZE: usize = 5;

const SATURATION_BAND: std::ops::Range<f64> = 65.0..85.0;
const LIGHTNESS_BAND: std::ops::Range<f64> = 45.0..70.0;

const CLOTHING_CAPTIONS: [&str; PALETTE_SIZE] = [
    "Perfect for statement pieces and focal points",
    "Great for accessories and accent pieces",
    "Ideal for layering and combining outfits",
    "Excellent for seasonal transitions",
    "Works well for everyday basics",
];

const MAKEUP_CAPTIONS: [&str; PALETTE_SIZE] = [
    "Perfect for bold lip colors",
    "Ideal for eye shadows and liners",
    "Great for blush and cheek colors",
    "Suitable for highlighters and bronzers",
    "Works well for natural everyday looks",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Undertone {
    Warm,
    Cool,
}

impl Undertone {
    pub fn as_str(self) -> &'static str {
        match self {
            Undertone::Warm => "Warm",
            Undertone::Cool => "Cool",
        }
    }

    /// Degrees between neighbouring colors of a harmonized palette.
    fn hue_step(self) -> f64 {
        match self {
            Undertone::Warm => 30.0,
            Undertone::Cool => 45.0,
        }
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SeasonType {
    Spring,
    #[serde(rename = "Spring-Summer")]
    SpringSummer,
    Autumn,
    #[serde(rename = "Autumn-Winter")]
    AutumnWinter,
    Summer,
    Winter,
}

impl SeasonType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeasonType::Spring => "Spring",
            SeasonType::SpringSummer => "Spring-Summer",
            SeasonType::Autumn => "Autumn",
            SeasonType::AutumnWinter => "Autumn-Winter",
            SeasonType::Summer => "Summer",
            SeasonType::Winter => "Winter",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One recommended color.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorEntry {
    /// `#rrggbb`
    pub color: String,
    pub name: ColorName,
    pub description: &'static str,
}

/// Full analysis result handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub clothing: [ColorEntry; PALETTE_SIZE],
    pub makeup: [ColorEntry; PALETTE_SIZE],
    pub undertone: Undertone,
    pub season_type: SeasonType,
}

/// Aggregate HSL statistics over the sampled pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleStats {
    /// Mean lightness, percent.
    pub avg_brightness: f64,
    /// Mean saturation, percent.
    pub avg_saturation: f64,
    pub hues: Vec<f64>,
}

impl SampleStats {
    pub fn collect<I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = Rgb>,
    {
        let samples = samples.into_iter();
        let mut hues = Vec::with_capacity(samples.size_hint().0);
        let mut total_brightness = 0.0;
        let mut total_saturation = 0.0;

        for pixel in samples {
            let hsl = Hsl::from(pixel);
            total_brightness += hsl.l;
            total_saturation += hsl.s;
            hues.push(hsl.h);
        }

        if hues.is_empty() {
            return Err(AdvisorError::InsufficientData);
        }

        let n = hues.len() as f64;
        Ok(Self {
            avg_brightness: total_brightness / n,
            avg_saturation: total_saturation / n,
            hues,
        })
    }

    pub fn mean_hue(&self) -> f64 {
        mean_hue(&self.hues)
    }
}

/// Arithmetic mean of the hues. Hues on both sides of 0/360 average towards
/// 180 rather than 0.
fn mean_hue(hues: &[f64]) -> f64 {
    hues.iter().sum::<f64>() / hues.len() as f64
}

pub fn determine_undertone(hues: &[f64]) -> Undertone {
    if mean_hue(hues) < 180.0 {
        Undertone::Warm
    } else {
        Undertone::Cool
    }
}

pub fn determine_season_type(undertone: Undertone, brightness: f64, saturation: f64) -> SeasonType {
    let bright = brightness > 50.0;
    let saturated = saturation > 50.0;
    match (undertone, bright, saturated) {
        (Undertone::Warm, true, true) => SeasonType::Spring,
        (Undertone::Warm, false, true) => SeasonType::Autumn,
        (Undertone::Cool, true, true) => SeasonType::Summer,
        (Undertone::Cool, false, true) => SeasonType::Winter,
        (_, true, false) => SeasonType::SpringSummer,
        (_, false, false) => SeasonType::AutumnWinter,
    }
}

/// Five hex colors spaced around `base_hue` (degrees).
///
/// Saturation and lightness are drawn from `rng`, so repeated calls with the
/// same arguments differ unless the generator is seeded identically.
pub fn generate_harmonized_palette<R>(
    base_hue: f64,
    undertone: Undertone,
    rng: &mut R,
) -> [String; PALETTE_SIZE]
where
    R: Rng + ?Sized,
{
    let step = undertone.hue_step();
    std::array::from_fn(|i| {
        let hue = (base_hue + i as f64 * step).rem_euclid(360.0);
        let saturation = rng.random_range(SATURATION_BAND);
        let lightness = rng.random_range(LIGHTNESS_BAND);

        let rgb = unit_to_rgb(hsl_to_rgb(hue / 360.0, saturation / 100.0, lightness / 100.0));
        rgb_to_hex(rgb.red, rgb.green, rgb.blue)
    })
}

/// Name each color and pair it with the caption at the same position.
fn describe(
    colors: [String; PALETTE_SIZE],
    captions: &[&'static str; PALETTE_SIZE],
) -> [ColorEntry; PALETTE_SIZE] {
    std::array::from_fn(|i| {
        let hsl = Hsl::from(hex_to_rgb_or_black(&colors[i]));
        ColorEntry {
            color: colors[i].clone(),
            name: classify_color_name(hsl.h, hsl.s, hsl.l),
            description: captions[i],
        }
    })
}

/// Run the whole heuristic over a set of sampled pixels.
pub fn analyze_samples<I, R>(samples: I, rng: &mut R) -> Result<ColorPalette>
where
    I: IntoIterator<Item = Rgb>,
    R: Rng + ?Sized,
{
    let stats = SampleStats::collect(samples)?;
    let undertone = determine_undertone(&stats.hues);
    let season_type = determine_season_type(undertone, stats.avg_brightness, stats.avg_saturation);
    let base_hue = stats.mean_hue();

    debug!(
        samples = stats.hues.len(),
        avg_brightness = stats.avg_brightness,
        avg_saturation = stats.avg_saturation,
        base_hue,
        %undertone,
        %season_type,
        "computed sample statistics"
    );

    let clothing = generate_harmonized_palette(base_hue, undertone, rng);
    let makeup = generate_harmonized_palette((base_hue + 180.0).rem_euclid(360.0), undertone, rng);

    Ok(ColorPalette {
        clothing: describe(clothing, &CLOTHING_CAPTIONS),
        makeup: describe(makeup, &MAKEUP_CAPTIONS),
        undertone,
        season_type,
    })
}
