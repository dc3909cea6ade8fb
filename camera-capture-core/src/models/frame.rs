use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// MIME type of every still produced by a session.
pub const CAPTURED_IMAGE_MIME: &str = "image/jpeg";

/// One decoded preview frame as tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl VideoFrame {
    /// Returns `None` when the buffer length does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected).then_some(Self { width, height, rgba })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// An encoded still image taken from exactly one preview frame.
///
/// A plain value: it holds no reference back to the session that produced it.
/// Serializes with the image inlined as a `data_url`, the form the invoice
/// upload expects.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub id: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub captured_at: String,
}

impl CapturedImage {
    pub fn new_jpeg(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            bytes,
            width,
            height,
            mime_type: CAPTURED_IMAGE_MIME.to_string(),
            captured_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl Serialize for CapturedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut image = serializer.serialize_struct("CapturedImage", 6)?;
        image.serialize_field("id", &self.id)?;
        image.serialize_field("width", &self.width)?;
        image.serialize_field("height", &self.height)?;
        image.serialize_field("mime_type", &self.mime_type)?;
        image.serialize_field("captured_at", &self.captured_at)?;
        image.serialize_field("data_url", &self.to_data_url())?;
        image.end()
    }
}
