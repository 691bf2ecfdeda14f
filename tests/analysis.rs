//! End-to-end tests: encoded image bytes in, palette out.

use hue_advisor_wasm::color::hex_to_rgb;
use hue_advisor_wasm::{AdvisorError, AnalysisOptions, SamplerLimits, SeasonType, Undertone, analyze_bytes};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(img: RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(ImageBuffer::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255])))
}

fn seeded(seed: u64) -> AnalysisOptions {
    AnalysisOptions {
        seed: Some(seed),
        ..AnalysisOptions::default()
    }
}

#[test]
fn red_square_is_warm_with_full_palettes() {
    let palette = analyze_bytes(&solid(2, 2, [255, 0, 0]), &AnalysisOptions::default()).unwrap();

    assert_eq!(palette.undertone, Undertone::Warm);
    assert_eq!(palette.clothing.len(), 5);
    assert_eq!(palette.makeup.len(), 5);
    for entry in palette.clothing.iter().chain(palette.makeup.iter()) {
        assert!(entry.color.starts_with('#') && entry.color.len() == 7, "{}", entry.color);
        assert!(hex_to_rgb(&entry.color).is_some());
        assert!(!entry.name.as_str().is_empty());
        assert!(!entry.description.is_empty());
    }
}

#[test]
fn season_follows_brightness_and_saturation() {
    // light, muted, warm: hue 30, s ~33%, l ~70%
    let palette = analyze_bytes(&solid(4, 4, [204, 178, 153]), &seeded(1)).unwrap();
    assert_eq!(palette.undertone, Undertone::Warm);
    assert_eq!(palette.season_type, SeasonType::SpringSummer);

    // dark, saturated, cool: hue 240
    let palette = analyze_bytes(&solid(4, 4, [0, 0, 120]), &seeded(1)).unwrap();
    assert_eq!(palette.undertone, Undertone::Cool);
    assert_eq!(palette.season_type, SeasonType::Winter);

    // light, saturated, cool
    let palette = analyze_bytes(&solid(4, 4, [120, 120, 255]), &seeded(1)).unwrap();
    assert_eq!(palette.season_type, SeasonType::Summer);
}

#[test]
fn hue_mean_does_not_wrap() {
    // Rows alternate between ~350 and 20 degrees. Both are reds, but the plain
    // mean lands near 185, which classifies as Cool.
    let img = ImageBuffer::from_fn(8, 8, |_, y| {
        if y % 2 == 0 {
            Rgba([255, 0, 43, 255]) // ~350
        } else {
            Rgba([255, 85, 0, 255]) // 20
        }
    });
    let palette = analyze_bytes(&encode(img), &seeded(2)).unwrap();
    assert_eq!(palette.undertone, Undertone::Cool);
}

#[test]
fn same_seed_same_palette() {
    let bytes = solid(3, 5, [30, 140, 90]);
    let a = analyze_bytes(&bytes, &seeded(77)).unwrap();
    let b = analyze_bytes(&bytes, &seeded(77)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn corrupt_upload_reports_decode_error() {
    let mut bytes = solid(4, 4, [1, 2, 3]);
    bytes.truncate(20);
    let err = analyze_bytes(&bytes, &AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, AdvisorError::Decode { .. }), "{err:?}");
    assert!(!err.user_message().is_empty());
}

#[test]
fn huge_surface_reports_allocation_error() {
    let options = AnalysisOptions {
        seed: None,
        limits: SamplerLimits { max_alloc: 64 },
    };
    let err = analyze_bytes(&solid(32, 32, [9, 9, 9]), &options).unwrap_err();
    assert!(matches!(err, AdvisorError::SurfaceAllocation { .. }), "{err:?}");
}
