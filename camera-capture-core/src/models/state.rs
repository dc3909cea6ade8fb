use serde::Serialize;

/// Camera session state machine.
///
/// State transitions:
/// ```text
/// idle → starting → active → [stopping_torch_off] → stopped → idle
///           ↓
///         error ──stop──→ idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Starting,
    Active,
    StoppingTorchOff,
    Stopped,
    Error,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// States from which `start()` may begin a new acquisition.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Stopped | Self::Error)
    }
}
