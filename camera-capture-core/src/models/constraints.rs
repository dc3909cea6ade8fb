//! Capture constraint profiles.
//!
//! Serialized field names follow the W3C `MediaStreamConstraints`
//! dictionary, so a profile can be handed to `getUserMedia` as JSON and a
//! caller-supplied baseline can be read from the same shape.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Which way the camera faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    User,
    Environment,
    Left,
    Right,
}

/// A facing-mode constraint, either a bare value or an `ideal` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacingConstraint {
    Plain(FacingMode),
    Ideal { ideal: FacingMode },
}

/// A numeric constraint range. Unset bounds are omitted from the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstrainRange<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
}

impl<T> ConstrainRange<T> {
    pub fn ideal(value: T) -> Self {
        Self {
            min: None,
            ideal: Some(value),
            max: None,
        }
    }

    pub fn ideal_max(ideal: T, max: T) -> Self {
        Self {
            min: None,
            ideal: Some(ideal),
            max: Some(max),
        }
    }
}

/// Video track constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_mode: Option<FacingConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ConstrainRange<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<ConstrainRange<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<ConstrainRange<f64>>,
}

/// A named set of desired capture parameters submitted during acquisition.
///
/// `Default` is the baseline profile: rear camera with modest resolution
/// hints. `preferred()` is always attempted first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConstraints {
    pub video: VideoConstraints,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            video: VideoConstraints {
                facing_mode: Some(FacingConstraint::Plain(FacingMode::Environment)),
                width: Some(ConstrainRange::ideal(1024)),
                height: Some(ConstrainRange::ideal(768)),
                aspect_ratio: None,
            },
        }
    }
}

impl CaptureConstraints {
    /// Rear-facing, bounded to 1920x1080, 16:9.
    pub fn preferred() -> Self {
        Self {
            video: VideoConstraints {
                facing_mode: Some(FacingConstraint::Ideal {
                    ideal: FacingMode::Environment,
                }),
                width: Some(ConstrainRange::ideal_max(1280, 1920)),
                height: Some(ConstrainRange::ideal_max(720, 1080)),
                aspect_ratio: Some(ConstrainRange::ideal(16.0 / 9.0)),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let video = &self.video;
        if let Some(width) = &video.width {
            check_range("video.width", width, 0)?;
        }
        if let Some(height) = &video.height {
            check_range("video.height", height, 0)?;
        }
        if let Some(aspect) = &video.aspect_ratio {
            check_range("video.aspectRatio", aspect, 0.0)?;
        }
        Ok(())
    }

    /// JSON document in `MediaStreamConstraints` form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Every bound must be above `floor`, and `min <= ideal <= max`.
fn check_range<T: PartialOrd + Copy + Display>(
    field: &'static str,
    range: &ConstrainRange<T>,
    floor: T,
) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidConstraint { field, reason };

    for bound in [range.min, range.ideal, range.max].into_iter().flatten() {
        // NaN fails this comparison too.
        if !(bound > floor) {
            return Err(invalid(format!("{} must be greater than {}", bound, floor)));
        }
    }
    if let (Some(min), Some(max)) = (range.min, range.max) {
        if min > max {
            return Err(invalid(format!("min {} exceeds max {}", min, max)));
        }
    }
    if let (Some(ideal), Some(max)) = (range.ideal, range.max) {
        if ideal > max {
            return Err(invalid(format!("ideal {} exceeds max {}", ideal, max)));
        }
    }
    if let (Some(min), Some(ideal)) = (range.min, range.ideal) {
        if ideal < min {
            return Err(invalid(format!("ideal {} is below min {}", ideal, min)));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TorchSetting {
    torch: bool,
}

#[derive(Serialize)]
struct AdvancedTrackConstraints {
    advanced: [TorchSetting; 1],
}

/// Advanced track constraint document that switches the torch on or off.
pub fn torch_constraints(enabled: bool) -> Result<String, serde_json::Error> {
    serde_json::to_string(&AdvancedTrackConstraints {
        advanced: [TorchSetting { torch: enabled }],
    })
}
