use crate::errors::{FrameError, RallyMediaResult};
use image::{ImageOutputFormat, RgbImage};

/// JPEG quality used for sampled frames.
pub(crate) const JPEG_QUALITY: u8 = 85;

/// Resize image helper, preserving aspect ratio within the bounding box.
pub(crate) fn resize_to_fit(image: RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = (image.width(), image.height());

    if width <= max_width && height <= max_height {
        return image;
    }

    let width_ratio = max_width as f32 / width as f32;
    let height_ratio = max_height as f32 / height as f32;
    let ratio = width_ratio.min(height_ratio);

    let new_width = (width as f32 * ratio) as u32;
    let new_height = (height as f32 * ratio) as u32;

    image::imageops::resize(
        &image,
        new_width,
        new_height,
        image::imageops::FilterType::Lanczos3,
    )
}

/// Encode as JPEG and wrap in a base64 data URI for JSON embedding.
pub(crate) fn encode_jpeg_base64(image: &RgbImage, quality: u8) -> RallyMediaResult<String> {
    use base64::{engine::general_purpose, Engine as _};

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    image
        .write_to(&mut cursor, ImageOutputFormat::Jpeg(quality))
        .map_err(|e| FrameError::new(format!("JPEG encoding failed: {}", e)))?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(&buffer)
    ))
}
