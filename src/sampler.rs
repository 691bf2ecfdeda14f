//! Decode an uploaded photo and pull a bounded set of pixel samples from it.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, Limits, RgbaImage};
use palette::Srgb;
use tracing::{debug, trace, warn};

use crate::color::Rgb;
use crate::error::{AdvisorError, Result};

/// Every n-th pixel of the RGBA buffer is sampled (16 bytes apart).
pub const SAMPLE_STRIDE: usize = 4;

const BYTES_PER_PIXEL: u64 = 4;

/// Upper bounds applied while decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerLimits {
    /// Largest decode allocation, in bytes, including the RGBA surface.
    pub max_alloc: u64,
}

impl Default for SamplerLimits {
    fn default() -> Self {
        Self {
            max_alloc: 512 * 1024 * 1024,
        }
    }
}

/// Scratch RGBA surface the image is drawn into. Dropping it releases the
/// pixel buffer, whichever way sampling ends.
struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    fn acquire(img: DynamicImage, limits: &SamplerLimits) -> Result<Self> {
        let (width, height) = img.dimensions();
        let bytes = (width as u64)
            .checked_mul(height as u64)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .filter(|&n| n <= limits.max_alloc)
            .ok_or(AdvisorError::SurfaceAllocation { width, height })?;

        trace!(width, height, bytes, "acquired image surface");
        Ok(Self {
            pixels: img.into_rgba8(),
        })
    }

    fn samples(&self) -> Result<Vec<Rgb>> {
        let (width, height) = self.pixels.dimensions();
        let raw = self.pixels.as_raw();
        let pixel_count = raw.len() / BYTES_PER_PIXEL as usize;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(pixel_count.div_ceil(SAMPLE_STRIDE))
            .map_err(|_| AdvisorError::SurfaceAllocation { width, height })?;

        // A canvas reports fully transparent pixels as (0, 0, 0, 0).
        samples.extend(raw.chunks_exact(4).step_by(SAMPLE_STRIDE).map(|px| {
            if px[3] == 0 {
                Srgb::new(0, 0, 0)
            } else {
                Srgb::new(px[0], px[1], px[2])
            }
        }));
        Ok(samples)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let (width, height) = self.pixels.dimensions();
        trace!(width, height, "released image surface");
    }
}

/// Sniff the format, accepting only what the upload area offers.
fn detect_format(input: &[u8]) -> Result<ImageFormat> {
    let format = image::guess_format(input).map_err(|e| AdvisorError::from_image(e, 0, 0))?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Png => Ok(format),
        other => {
            warn!(format = ?other, "rejected unsupported image format");
            Err(AdvisorError::decode(format!(
                "unsupported image format {other:?}, expected JPEG or PNG"
            )))
        }
    }
}

fn decode(input: &[u8], limits: &SamplerLimits) -> Result<DynamicImage> {
    let format = detect_format(input)?;

    let (width, height) = ImageReader::with_format(Cursor::new(input), format)
        .into_dimensions()
        .map_err(|e| AdvisorError::from_image(e, 0, 0))?;
    if width == 0 || height == 0 {
        return Err(AdvisorError::decode(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    let mut decode_limits = Limits::default();
    decode_limits.max_alloc = Some(limits.max_alloc);

    let mut reader = ImageReader::with_format(Cursor::new(input), format);
    reader.limits(decode_limits);
    reader
        .decode()
        .map_err(|e| AdvisorError::from_image(e, width, height))
}

/// Decode `input` (JPEG or PNG bytes) and return every 4th pixel as RGB.
pub fn sample_pixels(input: &[u8], limits: &SamplerLimits) -> Result<Vec<Rgb>> {
    let img = decode(input, limits)?;
    let surface = Surface::acquire(img, limits)?;
    let samples = surface.samples()?;
    debug!(
        width = surface.pixels.width(),
        height = surface.pixels.height(),
        samples = samples.len(),
        "sampled image"
    );
    Ok(samples)
}
