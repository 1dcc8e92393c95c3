use anyhow::Context;
use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::core::CardRaster;
use crate::foundation::error::{CardError, CardResult};

/// Encode a card raster as PNG with a fixed compression setting.
///
/// Premultiplied rasters are converted to straight alpha first.
pub fn encode_png(raster: &CardRaster) -> CardResult<Vec<u8>> {
    if raster.data.len() != raster.width as usize * raster.height as usize * 4 {
        return Err(CardError::validation(
            "raster byte length must equal width*height*4",
        ));
    }

    let mut straight = raster.data.clone();
    if raster.premultiplied {
        crate::foundation::math::unpremultiply_rgba8_in_place(&mut straight);
    }

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, CompressionType::Default, FilterType::Adaptive)
        .write_image(
            &straight,
            raster.width,
            raster.height,
            image::ExtendedColorType::Rgba8,
        )
        .context("encode png")?;
    Ok(out)
}

/// Encode and write a card raster to `path`, creating parent directories.
pub fn write_png(raster: &CardRaster, path: &std::path::Path) -> CardResult<()> {
    let bytes = encode_png(raster)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
