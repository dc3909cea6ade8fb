use super::constraints::CaptureConstraints;
use super::error::ConfigError;

/// Default JPEG quality for captured stills.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Configuration for a camera session.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfiguration {
    /// Fallback profile, tried only when the preferred profile is rejected.
    pub baseline: CaptureConstraints,

    /// JPEG quality for `capture_image` (default: 90). Valid values: 1..=100.
    pub jpeg_quality: u8,
}

impl CaptureConfiguration {
    pub fn with_baseline(baseline: CaptureConstraints) -> Self {
        Self {
            baseline,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.jpeg_quality));
        }
        self.baseline.validate()
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            baseline: CaptureConstraints::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
