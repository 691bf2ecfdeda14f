//! Error types for image analysis.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// The uploaded bytes could not be decoded into a usable image.
    #[error("Unable to decode image: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// The RGBA surface for the decoded image could not be allocated.
    #[error("Unable to allocate a {width}x{height} image surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// Sampling produced no pixels to analyze.
    #[error("No pixel samples available for analysis")]
    InsufficientData,
}

impl AdvisorError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Maps an `image` error onto the matching variant. Limit violations mean
    /// the surface was too large to allocate; everything else is a decode
    /// failure.
    pub fn from_image(err: image::ImageError, width: u32, height: u32) -> Self {
        match err {
            image::ImageError::Limits(_) => Self::SurfaceAllocation { width, height },
            other => Self::Decode {
                message: other.to_string(),
                source: Some(other),
            },
        }
    }

    /// Every failure is reported to the user, who can retry with another upload.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Text suitable for display next to the upload area.
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::Decode { .. } => {
                "Failed to load image. Please upload a valid JPEG or PNG photo.".to_string()
            }
            AdvisorError::SurfaceAllocation { width, height } => format!(
                "The image is too large to analyze ({width}x{height}). Please try a smaller photo."
            ),
            AdvisorError::InsufficientData => {
                "No pixels could be read from the image. Please try a different photo.".to_string()
            }
        }
    }
}
