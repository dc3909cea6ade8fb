//! Conversion of JavaScript rejections into `PlatformError`.

use camera_capture_core::PlatformError;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;

/// Read `name`/`message` off a rejection value.
///
/// `DOMException` is the common case; plain `Error` objects and thrown
/// strings are handled too.
pub(crate) fn platform_error(value: JsValue) -> PlatformError {
    if let Some(dom) = value.dyn_ref::<DomException>() {
        return PlatformError::new(dom.name(), dom.message());
    }
    let name = string_property(&value, "name").unwrap_or_else(|| "Error".into());
    let message = string_property(&value, "message")
        .or_else(|| value.as_string())
        .unwrap_or_default();
    PlatformError::new(name, message)
}

pub(crate) fn string_property(value: &JsValue, key: &str) -> Option<String> {
    if !value.is_object() {
        return None;
    }
    Reflect::get(value, &JsValue::from_str(key)).ok()?.as_string()
}

/// Parse a JSON document into a plain JS object.
pub(crate) fn json_to_js(json: &str) -> Result<JsValue, PlatformError> {
    js_sys::JSON::parse(json).map_err(platform_error)
}

pub(crate) fn serialization_error(err: impl std::fmt::Display) -> PlatformError {
    PlatformError::new("TypeError", err.to_string())
}
