use image::{ImageBuffer, Rgba, imageops};

use crate::assets::PreparedImage;
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

const ANALYSIS_MAX_SIDE: u32 = 200;
const DARK_BOTTOM_THRESHOLD: f64 = -10.0;
const SHIFT_GAIN: f64 = 2.5;
const MAX_UPWARD_SHIFT: f64 = -50.0;

/// Suggest a vertical shift (percent, negative = up) for an uncropped photo.
///
/// The photo is squeezed into at most 200x200 and the mean `(r+g+b)/3` of the
/// top half is compared with the bottom half. When `top - bottom` drops below
/// -10 the photo moves up by `2.5 * |diff|` percent, capped at 50.
#[tracing::instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn detect_vertical_shift(image: &PreparedImage) -> CardResult<f64> {
    let src = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_slice(),
    )
    .ok_or_else(|| CardError::validation("image buffer does not match its dimensions"))?;

    let w = image.width.min(ANALYSIS_MAX_SIDE);
    let h = image.height.min(ANALYSIS_MAX_SIDE);
    if w == 0 || h == 0 {
        return Ok(0.0);
    }

    // Resample premultiplied, then judge brightness on straight colors.
    let mut sample = if (w, h) == (image.width, image.height) {
        src.as_raw().to_vec()
    } else {
        imageops::resize(&src, w, h, imageops::FilterType::Triangle).into_raw()
    };
    unpremultiply_rgba8_in_place(&mut sample);
    let (top, bottom) = half_means(&sample, w, h);

    let shift = shift_for_means(top, bottom);
    tracing::debug!(top, bottom, shift, "brightness shift");
    Ok(shift)
}

/// Map half-image brightness means to a shift percentage.
pub fn shift_for_means(top_mean: f64, bottom_mean: f64) -> f64 {
    let diff = top_mean - bottom_mean;
    if diff < DARK_BOTTOM_THRESHOLD {
        (diff * SHIFT_GAIN).max(MAX_UPWARD_SHIFT)
    } else {
        0.0
    }
}

fn half_means(rgba: &[u8], width: u32, height: u32) -> (f64, f64) {
    let mid_y = (height / 2) as usize;
    let row_len = width as usize * 4;
    let (mut top_sum, mut top_count) = (0.0f64, 0u64);
    let (mut bottom_sum, mut bottom_count) = (0.0f64, 0u64);

    for (y, row) in rgba.chunks_exact(row_len).enumerate() {
        for px in row.chunks_exact(4) {
            let brightness = (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0;
            if y < mid_y {
                top_sum += brightness;
                top_count += 1;
            } else {
                bottom_sum += brightness;
                bottom_count += 1;
            }
        }
    }

    let mean = |sum: f64, count: u64| if count == 0 { 0.0 } else { sum / count as f64 };
    (mean(top_sum, top_count), mean(bottom_sum, bottom_count))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/shift.rs"]
mod tests;
