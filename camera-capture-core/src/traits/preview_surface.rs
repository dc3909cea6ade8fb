use crate::models::error::PlatformError;
use crate::models::frame::VideoFrame;

/// The on-screen sink that renders the live stream.
///
/// The session attaches a stream once on acquisition and detaches it once on
/// teardown.
pub trait PreviewSurface<S> {
    fn attach(&self, stream: &S);

    fn detach(&self);

    /// Read back the currently displayed frame at its natural dimensions.
    ///
    /// `Ok(None)` means no live frame is available (nothing attached, or the
    /// video has no dimensions yet). `Err` is a render failure.
    fn current_frame(&self) -> Result<Option<VideoFrame>, PlatformError>;
}
