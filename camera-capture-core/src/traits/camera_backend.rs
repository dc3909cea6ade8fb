use std::future::Future;

use crate::models::constraints::CaptureConstraints;
use crate::models::error::PlatformError;

/// Interface for a platform camera-access API.
///
/// Implemented by:
/// - `WebCameraBackend` (browser `navigator.mediaDevices`)
/// - test fakes in this crate
///
/// All calls happen on the UI thread, so no `Send` bound is required.
pub trait CameraBackend {
    type Stream: MediaStreamHandle;

    /// Whether the runtime exposes a camera-access API at all.
    fn is_supported(&self) -> bool;

    /// Whether the page runs in a secure context (HTTPS or loopback).
    fn is_secure_context(&self) -> bool;

    /// Request a live video stream satisfying `constraints`.
    ///
    /// Resolves once the platform grants or rejects access. There is no
    /// timeout; the session handles late resolution after a stop.
    fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> impl Future<Output = Result<Self::Stream, PlatformError>>;
}

/// A live hardware video stream.
///
/// Only the session that acquired it may toggle the torch or stop its tracks.
pub trait MediaStreamHandle {
    /// Best-effort probe of the first video track's torch capability.
    fn supports_torch(&self) -> bool;

    /// The torch setting currently applied to the track, if the platform reports it.
    fn torch_enabled(&self) -> Option<bool>;

    /// Apply an advanced constraint turning the torch on or off.
    fn set_torch(&self, enabled: bool) -> impl Future<Output = Result<(), PlatformError>>;

    /// Stop every track of the stream. Calling it again has no effect.
    fn stop_tracks(&self);
}
