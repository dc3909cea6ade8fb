use crate::models::error::CaptureError;
use crate::models::state::SessionState;

/// Event delegate for camera session notifications.
///
/// Called on the thread driving the session, after internal state has been
/// updated, so implementations may read `CameraSession::snapshot()`.
pub trait SessionDelegate {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: SessionState);

    /// Called when a new Error Record is set.
    fn on_error(&self, error: &CaptureError);

    /// Called when the torch flag or torch capability changes.
    fn on_torch_changed(&self, torch: bool, supports_torch: bool);
}
