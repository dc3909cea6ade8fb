//! `MediaStream` wrapper owned by a camera session.

use camera_capture_core::{torch_constraints, MediaStreamHandle, PlatformError};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamTrack, MediaTrackConstraints};

use crate::js_error::{json_to_js, platform_error, serialization_error};

/// A live camera stream.
///
/// The inner `MediaStream` is only reachable from this crate, so its tracks
/// can only be stopped or reconfigured through the session.
pub struct WebMediaStream {
    stream: MediaStream,
}

impl WebMediaStream {
    pub(crate) fn new(stream: MediaStream) -> Self {
        Self { stream }
    }

    pub(crate) fn media_stream(&self) -> &MediaStream {
        &self.stream
    }

    fn video_track(&self) -> Option<MediaStreamTrack> {
        self.stream.get_video_tracks().get(0).dyn_into::<MediaStreamTrack>().ok()
    }
}

impl MediaStreamHandle for WebMediaStream {
    fn supports_torch(&self) -> bool {
        // getCapabilities() is missing on older Firefox and Safari.
        self.video_track()
            .and_then(|track| call_method(&track, "getCapabilities"))
            .and_then(|caps| Reflect::get(&caps, &JsValue::from_str("torch")).ok())
            .is_some_and(|torch| torch.is_truthy())
    }

    fn torch_enabled(&self) -> Option<bool> {
        let settings = call_method(&self.video_track()?, "getSettings")?;
        Reflect::get(&settings, &JsValue::from_str("torch")).ok()?.as_bool()
    }

    async fn set_torch(&self, enabled: bool) -> Result<(), PlatformError> {
        let track = self
            .video_track()
            .ok_or_else(|| PlatformError::new("NotFoundError", "stream has no video track"))?;
        let json = torch_constraints(enabled).map_err(serialization_error)?;
        let constraints: MediaTrackConstraints = json_to_js(&json)?.unchecked_into();
        let promise = track
            .apply_constraints_with_constraints(&constraints)
            .map_err(platform_error)?;
        JsFuture::from(promise).await.map_err(platform_error)?;
        Ok(())
    }

    fn stop_tracks(&self) {
        stop_all_tracks(&self.stream);
    }
}

pub(crate) fn stop_all_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Call a zero-argument method if the object has it.
fn call_method(target: &JsValue, name: &str) -> Option<JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    method.call0(target).ok().filter(|value| value.is_object())
}
