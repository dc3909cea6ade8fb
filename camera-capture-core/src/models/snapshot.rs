use super::error::CaptureError;
use super::state::SessionState;

/// Point-in-time view of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub error: Option<CaptureError>,
    pub is_active: bool,
    pub is_supported: bool,
    pub torch: bool,
    pub supports_torch: bool,
}
