//! Still-frame JPEG encoding.
//!
//! JPEG carries no alpha channel, so RGBA frames are flattened to RGB before
//! encoding.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::models::frame::VideoFrame;

/// Encode one frame as a baseline JPEG at `quality` (1..=100).
pub fn encode_jpeg(frame: &VideoFrame, quality: u8) -> Result<Vec<u8>, String> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(format!(
            "frame has no pixels ({}x{})",
            frame.width(),
            frame.height()
        ));
    }

    let rgba = RgbaImage::from_raw(frame.width(), frame.height(), frame.rgba().to_vec())
        .ok_or_else(|| "frame buffer does not match its dimensions".to_string())?;
    let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();

    let mut bytes = Vec::with_capacity(rgb.as_raw().len() / 8);
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| format!("jpeg encoding failed: {}", e))?;

    Ok(bytes)
}
