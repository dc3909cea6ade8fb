//! # camera-capture-core
//!
//! Platform-agnostic camera capture core library.
//!
//! Provides constraint negotiation, the capture session lifecycle, torch
//! control, and still-frame JPEG encoding. Platform backends (the browser's
//! `getUserMedia` in `camera-capture-web`) implement the `CameraBackend`,
//! `MediaStreamHandle` and `PreviewSurface` traits and plug into the generic
//! `CameraSession`.
//!
//! ## Architecture
//!
//! ```text
//! camera-capture-core (this crate)
//! ├── traits/       ← CameraBackend, MediaStreamHandle, PreviewSurface, SessionDelegate
//! ├── models/       ← CaptureError, SessionState, CaptureConstraints, CaptureConfiguration, frames
//! ├── processing/   ← JPEG encoding of a single preview frame
//! └── session/      ← CameraSession (state machine), StreamLease (guaranteed release)
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience.
pub use models::config::CaptureConfiguration;
pub use models::constraints::{
    torch_constraints, CaptureConstraints, ConstrainRange, FacingConstraint, FacingMode, VideoConstraints,
};
pub use models::error::{CaptureError, ConfigError, PlatformError};
pub use models::frame::{CapturedImage, VideoFrame};
pub use models::origin::is_potentially_trustworthy;
pub use models::snapshot::SessionSnapshot;
pub use models::state::SessionState;
pub use session::camera_session::CameraSession;
pub use traits::camera_backend::{CameraBackend, MediaStreamHandle};
pub use traits::preview_surface::PreviewSurface;
pub use traits::session_delegate::SessionDelegate;
