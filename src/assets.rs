use std::sync::Arc;

use crate::foundation::error::{CardError, CardResult};

pub(crate) mod decode;
pub(crate) mod encode;

/// Decoded raster in premultiplied RGBA8 form. Shared read-only between renders.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("image dimensions must be > 0"));
        }
        if rgba8.len() != width as usize * height as usize * 4 {
            return Err(CardError::validation(
                "image byte length must equal width*height*4",
            ));
        }
        crate::foundation::math::premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8),
        })
    }

    /// Fill an image with a single straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> CardResult<Self> {
        Self::from_straight_rgba8(width, height, rgba.repeat(width as usize * height as usize))
    }
}
