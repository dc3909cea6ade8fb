//! # camera-capture-web
//!
//! Browser backend for camera-capture-core.
//!
//! Provides:
//! - `WebCameraBackend`: camera acquisition via `navigator.mediaDevices.getUserMedia`
//! - `WebMediaStream`: torch control and track release on a `MediaStream`
//! - `VideoPreview`: `<video>` preview with `<canvas>` frame readback
//!
//! ## Platform Requirements
//! - `wasm32-unknown-unknown`, running on a page's main thread
//! - A secure context (HTTPS or loopback) for camera access
//!
//! ## Usage
//! ```ignore
//! use camera_capture_web::{VideoPreview, WebCameraBackend, WebCameraSession};
//!
//! let backend = WebCameraBackend::new()?;
//! let session = WebCameraSession::with_defaults(backend, VideoPreview::new(video_element));
//! session.start().await?;
//! let still = session.capture_image()?;
//! ```

#[cfg(target_arch = "wasm32")]
mod js_error;
#[cfg(target_arch = "wasm32")]
pub mod media_devices;
#[cfg(target_arch = "wasm32")]
pub mod media_stream;
#[cfg(target_arch = "wasm32")]
pub mod video_preview;

#[cfg(target_arch = "wasm32")]
pub use media_devices::WebCameraBackend;
#[cfg(target_arch = "wasm32")]
pub use media_stream::WebMediaStream;
#[cfg(target_arch = "wasm32")]
pub use video_preview::VideoPreview;

#[cfg(target_arch = "wasm32")]
pub type WebCameraSession = camera_capture_core::CameraSession<WebCameraBackend, VideoPreview>;
