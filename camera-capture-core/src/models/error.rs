use thiserror::Error;

/// Errors surfaced by a camera capture session.
///
/// This is a closed set: every platform rejection is folded into one of
/// these kinds so the presentation layer can render it without knowing
/// which browser or OS produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera is not supported in this browser")]
    Unsupported,

    #[error("camera access requires a secure (HTTPS) connection")]
    InsecureContext,

    #[error("camera permission denied, allow camera access and try again")]
    PermissionDenied,

    #[error("no camera found on this device")]
    DeviceNotFound,

    #[error("camera is not supported on this device")]
    DeviceUnsupported,

    #[error("camera is in use by another application")]
    DeviceBusy,

    #[error("failed to capture image: {0}")]
    CaptureFailed(String),

    #[error("camera is not active")]
    NotActive,

    #[error("{0}")]
    Unknown(String),
}

impl CaptureError {
    /// Map a raw platform rejection into the session taxonomy.
    ///
    /// Matching is on the rejection name (the DOMException name on the web).
    /// Legacy Chrome/Firefox names are folded into the same kinds.
    pub fn from_platform(err: &PlatformError) -> Self {
        match err.name.as_str() {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => Self::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" => Self::DeviceNotFound,
            "NotSupportedError" | "OverconstrainedError" | "ConstraintNotSatisfiedError" => {
                Self::DeviceUnsupported
            }
            "NotReadableError" | "TrackStartError" => Self::DeviceBusy,
            _ if err.message.trim().is_empty() => Self::Unknown("failed to access camera".into()),
            _ => Self::Unknown(err.message.clone()),
        }
    }

    /// Stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::InsecureContext => "insecure_context",
            Self::PermissionDenied => "permission_denied",
            Self::DeviceNotFound => "device_not_found",
            Self::DeviceUnsupported => "device_unsupported",
            Self::DeviceBusy => "device_busy",
            Self::CaptureFailed(_) => "capture_failed",
            Self::NotActive => "not_active",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A rejection reported by the platform media layer, before mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct PlatformError {
    pub name: String,
    pub message: String,
}

impl PlatformError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("jpeg quality must be within 1..=100, got {0}")]
    InvalidQuality(u8),

    #[error("invalid constraint `{field}`: {reason}")]
    InvalidConstraint { field: &'static str, reason: String },
}
