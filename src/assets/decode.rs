use anyhow::Context;

use crate::assets::PreparedImage;
use crate::foundation::error::CardResult;

/// Decode encoded image bytes (JPEG, PNG, ...) into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: &std::path::Path) -> CardResult<PreparedImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let image =
        decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(image)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
