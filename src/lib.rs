use wasm_bindgen::prelude::*;
use js_sys::{Array, Object, Reflect};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod color;
pub mod error;
pub mod heuristic;
pub mod sampler;
pub mod session;

pub use color::{ColorName, Hsl, Rgb};
pub use error::{AdvisorError, Result};
pub use heuristic::{ColorEntry, ColorPalette, SeasonType, Undertone};
pub use sampler::SamplerLimits;
pub use session::AdvisorSession;

/// Knobs shared by the wasm and native entry points.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalysisOptions {
    /// Fixed seed for the palette jitter. `None` draws from the OS source.
    pub seed: Option<u64>,
    pub limits: SamplerLimits,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Analyze an uploaded photo.
///
/// Steps performed:
/// 1. Decode the JPEG/PNG bytes into an RGBA surface.
/// 2. Sample every 4th pixel.
/// 3. Average hue, saturation and lightness to classify undertone and season.
/// 4. Generate the clothing and makeup palettes around the mean hue.
pub fn analyze_bytes(input: &[u8], options: &AnalysisOptions) -> Result<ColorPalette> {
    let samples = sampler::sample_pixels(input, &options.limits)?;
    heuristic::analyze_samples(samples, &mut make_rng(options.seed))
}

// ------------------------------------------------------------
// JS conversion
// ------------------------------------------------------------

/// Results crossing the wasm boundary reject with a JS value.
type JsResult<T> = std::result::Result<T, JsValue>;

fn entries_to_js(entries: &[ColorEntry]) -> JsResult<Array> {
    let out = Array::new();
    for entry in entries {
        let obj = Object::new();
        Reflect::set(&obj, &JsValue::from_str("color"), &JsValue::from_str(&entry.color))?;
        Reflect::set(&obj, &JsValue::from_str("name"), &JsValue::from_str(entry.name.as_str()))?;
        Reflect::set(&obj, &JsValue::from_str("description"), &JsValue::from_str(entry.description))?;
        out.push(&obj);
    }
    Ok(out)
}

fn palette_to_js(palette: &ColorPalette) -> JsResult<Object> {
    let clothing = entries_to_js(&palette.clothing)?;
    let makeup = entries_to_js(&palette.makeup)?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("undertone"), &JsValue::from_str(palette.undertone.as_str()))?;
    Reflect::set(&result, &JsValue::from_str("seasonType"), &JsValue::from_str(palette.season_type.as_str()))?;
    Reflect::set(&result, &JsValue::from_str("clothing"), &clothing)?;
    Reflect::set(&result, &JsValue::from_str("makeup"), &makeup)?;
    Ok(result)
}

/// Analyze image bytes and return
/// `{ undertone, seasonType, clothing: [{ color, name, description }], makeup: [...] }`.
///
/// Failures reject with the user-facing error message.
#[wasm_bindgen]
pub fn analyze(input: Vec<u8>, seed: Option<u64>) -> JsResult<Object> {
    let options = AnalysisOptions {
        seed,
        ..AnalysisOptions::default()
    };
    let palette = analyze_bytes(&input, &options).map_err(|e| JsValue::from_str(&e.user_message()))?;
    palette_to_js(&palette)
}

/// Stateful wrapper for a page that shows one photo at a time.
#[wasm_bindgen]
pub struct Advisor {
    session: AdvisorSession,
}

#[wasm_bindgen]
impl Advisor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Advisor {
        Advisor {
            session: AdvisorSession::new(),
        }
    }

    /// Replace the current photo. Returns `false` when analysis failed; the
    /// message is then available from `error()`.
    pub fn load(&mut self, input: Vec<u8>, seed: Option<u64>) -> bool {
        self.session.load_image(input, &mut make_rng(seed)).is_some()
    }

    pub fn remove(&mut self) {
        self.session.remove_image();
    }

    #[wasm_bindgen(js_name = hasImage)]
    pub fn has_image(&self) -> bool {
        self.session.image().is_some()
    }

    /// The current palette object, or `undefined`.
    pub fn palette(&self) -> JsResult<JsValue> {
        match self.session.palette() {
            Some(palette) => Ok(palette_to_js(palette)?.into()),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn error(&self) -> Option<String> {
        self.session.error().map(str::to_owned)
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new()
    }
}

/// `#rrggbb` for an 8-bit RGB triple.
#[wasm_bindgen(js_name = rgbHex)]
pub fn rgb_hex(r: u8, g: u8, b: u8) -> String {
    color::rgb_to_hex(r, g, b)
}

/// Bucketed name for a hex color; malformed input is treated as black.
#[wasm_bindgen(js_name = colorName)]
pub fn color_name(hex: &str) -> String {
    let hsl = Hsl::from(color::hex_to_rgb_or_black(hex));
    color::classify_color_name(hsl.h, hsl.s, hsl.l).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn red_png() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn advisor_load_error_remove_cycle() {
        let mut advisor = Advisor::new();
        assert!(!advisor.has_image());
        assert_eq!(advisor.error(), None);

        assert!(advisor.load(red_png(), Some(1)));
        assert!(advisor.has_image());
        assert_eq!(advisor.error(), None);

        assert!(!advisor.load(b"not an image".to_vec(), Some(1)));
        assert!(advisor.has_image());
        assert!(advisor.error().unwrap().contains("JPEG or PNG"));

        advisor.remove();
        assert!(!advisor.has_image());
        assert_eq!(advisor.error(), None);
    }

    #[test]
    fn seeded_analysis_matches_advisor_session() {
        let options = AnalysisOptions {
            seed: Some(12),
            ..AnalysisOptions::default()
        };
        let direct = analyze_bytes(&red_png(), &options).unwrap();

        let mut advisor = Advisor::default();
        advisor.load(red_png(), Some(12));
        assert_eq!(advisor.session.palette(), Some(&direct));
        assert_eq!(direct.undertone, Undertone::Warm);
    }

    #[test]
    fn color_name_falls_back_to_black() {
        assert_eq!(color_name("#ff0000"), "Red");
        assert_eq!(color_name("zzz"), "Black");
        assert_eq!(rgb_hex(255, 0, 0), "#ff0000");
    }

    #[test]
    fn seeded_options_are_reproducible() {
        use rand::Rng;
        let a: u64 = make_rng(Some(4)).random();
        let b: u64 = make_rng(Some(4)).random();
        assert_eq!(a, b);
    }
}
