//! `<video>` preview surface with canvas readback.

use camera_capture_core::{PlatformError, PreviewSurface, VideoFrame};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

use crate::js_error::platform_error;
use crate::media_stream::WebMediaStream;

/// Renders the live stream into a `<video>` element.
pub struct VideoPreview {
    video: HtmlVideoElement,
}

impl VideoPreview {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl PreviewSurface<WebMediaStream> for VideoPreview {
    fn attach(&self, stream: &WebMediaStream) {
        self.video.set_src_object(Some(stream.media_stream()));
    }

    fn detach(&self) {
        self.video.set_src_object(None);
    }

    fn current_frame(&self) -> Result<Option<VideoFrame>, PlatformError> {
        if self.video.src_object().is_none() {
            return Ok(None);
        }
        // Zero until the first frame has been decoded.
        let (width, height) = (self.video.video_width(), self.video.video_height());
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let document = self
            .video
            .owner_document()
            .ok_or_else(|| PlatformError::new("InvalidStateError", "video element has no document"))?;
        let canvas = document
            .create_element("canvas")
            .map_err(platform_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| PlatformError::new("TypeError", "created element is not a canvas"))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .map_err(platform_error)?
            .ok_or_else(|| PlatformError::new("NotSupportedError", "canvas context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::new("TypeError", "canvas context not available"))?;

        context
            .draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(platform_error)?;
        let pixels = context
            .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
            .map_err(platform_error)?
            .data();

        VideoFrame::from_rgba(width, height, pixels.0)
            .map(Some)
            .ok_or_else(|| PlatformError::new("InvalidStateError", "canvas returned a truncated frame"))
    }
}
