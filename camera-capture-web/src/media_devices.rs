//! Camera acquisition through `navigator.mediaDevices`.

use camera_capture_core::{
    is_potentially_trustworthy, CameraBackend, CaptureConstraints, CaptureError, PlatformError,
};
use js_sys::Reflect;
use tokio::sync::oneshot;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{MediaDevices, MediaStream, MediaStreamConstraints, Window};

use crate::js_error::{json_to_js, platform_error, serialization_error};
use crate::media_stream::{stop_all_tracks, WebMediaStream};

/// `getUserMedia` camera backend for the current window.
pub struct WebCameraBackend {
    window: Window,
}

impl WebCameraBackend {
    /// Backend for the global `window`. Fails outside a browsing context.
    pub fn new() -> Result<Self, CaptureError> {
        web_sys::window()
            .map(Self::from_window)
            .ok_or(CaptureError::Unsupported)
    }

    pub fn from_window(window: Window) -> Self {
        Self { window }
    }

    fn media_devices(&self) -> Result<MediaDevices, PlatformError> {
        self.window.navigator().media_devices().map_err(platform_error)
    }
}

impl CameraBackend for WebCameraBackend {
    type Stream = WebMediaStream;

    fn is_supported(&self) -> bool {
        let navigator = self.window.navigator();
        let Ok(devices) = Reflect::get(&navigator, &JsValue::from_str("mediaDevices")) else {
            return false;
        };
        if !devices.is_object() {
            return false;
        }
        Reflect::has(&devices, &JsValue::from_str("getUserMedia")).unwrap_or(false)
    }

    fn is_secure_context(&self) -> bool {
        if self.window.is_secure_context() {
            return true;
        }
        let location = self.window.location();
        match (location.protocol(), location.hostname()) {
            (Ok(protocol), Ok(host)) => is_potentially_trustworthy(&protocol, &host),
            _ => false,
        }
    }

    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<WebMediaStream, PlatformError> {
        let json = constraints.to_json().map_err(serialization_error)?;
        let js_constraints: MediaStreamConstraints = json_to_js(&json)?.unchecked_into();
        let promise = self
            .media_devices()?
            .get_user_media_with_constraints(&js_constraints)
            .map_err(platform_error)?;

        // The promise cannot be cancelled. It is driven on its own task so a
        // stream granted after this future was dropped is still stopped.
        let (tx, rx) = oneshot::channel();
        spawn_local(async move {
            let outcome = match JsFuture::from(promise).await {
                Ok(value) => value.dyn_into::<MediaStream>().map_err(|_| {
                    PlatformError::new("TypeError", "getUserMedia resolved to a non-stream value")
                }),
                Err(err) => Err(platform_error(err)),
            };
            if let Err(Ok(orphan)) = tx.send(outcome) {
                log::info!("camera granted after acquisition was abandoned, stopping stream");
                stop_all_tracks(&orphan);
            }
        });

        let stream = rx
            .await
            .map_err(|_| PlatformError::new("AbortError", "acquisition task dropped"))??;
        Ok(WebMediaStream::new(stream))
    }
}
