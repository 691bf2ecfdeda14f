//! Per-upload analysis state.

use rand::Rng;
use tracing::{debug, info};

use crate::heuristic::{ColorPalette, analyze_samples};
use crate::sampler::{SamplerLimits, sample_pixels};

/// The current image, its palette and the last error message.
///
/// A new upload fully replaces the previous result; nothing is merged.
#[derive(Debug, Default)]
pub struct AdvisorSession {
    image: Option<Vec<u8>>,
    palette: Option<ColorPalette>,
    error: Option<String>,
    limits: SamplerLimits,
}

impl AdvisorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SamplerLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Store `image` and analyze it. On failure the palette is cleared and the
    /// user-facing message is kept in [`error`](Self::error).
    pub fn load_image<R>(&mut self, image: Vec<u8>, rng: &mut R) -> Option<&ColorPalette>
    where
        R: Rng + ?Sized,
    {
        self.error = None;
        self.palette = None;

        let result = sample_pixels(&image, &self.limits).and_then(|samples| analyze_samples(samples, rng));
        self.image = Some(image);

        match result {
            Ok(palette) => {
                info!(undertone = %palette.undertone, season_type = %palette.season_type, "analysis complete");
                self.palette = Some(palette);
            }
            Err(err) => {
                debug!(error = %err, "analysis failed");
                self.error = Some(err.user_message());
            }
        }
        self.palette.as_ref()
    }

    pub fn remove_image(&mut self) {
        self.image = None;
        self.palette = None;
        self.error = None;
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn palette(&self) -> Option<&ColorPalette> {
        self.palette.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
