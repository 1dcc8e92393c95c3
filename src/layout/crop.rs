//! Fit geometry for placing a source photo into the card frame.
//!
//! Neither placement clamps against the source or the frame: a viewport may
//! travel past the photo edges, and whatever it uncovers stays transparent.

use crate::foundation::core::{Affine, Rect, Vec2};
use crate::foundation::error::{CardError, CardResult};

/// Smallest accepted zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest accepted zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Horizontal offset range, in percent of horizontal slack.
pub const MAX_OFFSET_X: f64 = 100.0;
/// Vertical offset range; magnitudes above 100 continue in percent of source height.
pub const MAX_OFFSET_Y: f64 = 200.0;

/// User-controlled viewport into a source photo, relative to a cover-fit baseline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropSpec {
    /// Magnification; values above 1 select a smaller source rectangle.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Horizontal pan in percent of the horizontal slack.
    #[serde(default)]
    pub offset_x: f64,
    /// Vertical pan in percent of the vertical slack (extended past ±100).
    #[serde(default)]
    pub offset_y: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for CropSpec {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl CropSpec {
    /// Reject values outside the supported ranges.
    pub fn validate(&self) -> CardResult<()> {
        if !self.zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(CardError::validation(format!(
                "crop zoom must be within [{MIN_ZOOM}, {MAX_ZOOM}], got {}",
                self.zoom
            )));
        }
        if !self.offset_x.is_finite() || self.offset_x.abs() > MAX_OFFSET_X {
            return Err(CardError::validation(format!(
                "crop offset_x must be within ±{MAX_OFFSET_X}, got {}",
                self.offset_x
            )));
        }
        if !self.offset_y.is_finite() || self.offset_y.abs() > MAX_OFFSET_Y {
            return Err(CardError::validation(format!(
                "crop offset_y must be within ±{MAX_OFFSET_Y}, got {}",
                self.offset_y
            )));
        }
        Ok(())
    }

    /// Clamp every field into its supported range; non-finite values reset to neutral.
    pub fn clamped(self) -> Self {
        fn clamp_or(v: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        }

        Self {
            zoom: clamp_or(self.zoom, MIN_ZOOM, MAX_ZOOM, 1.0),
            offset_x: clamp_or(self.offset_x, -MAX_OFFSET_X, MAX_OFFSET_X, 0.0),
            offset_y: clamp_or(self.offset_y, -MAX_OFFSET_Y, MAX_OFFSET_Y, 0.0),
        }
    }
}

/// Source-space rectangle selected for a cover draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRect {
    /// Left edge in source pixels (may be negative).
    pub sx: f64,
    /// Top edge in source pixels (may be negative).
    pub sy: f64,
    /// Width in source pixels.
    pub sw: f64,
    /// Height in source pixels.
    pub sh: f64,
}

impl SourceRect {
    /// As a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.sx, self.sy, self.sx + self.sw, self.sy + self.sh)
    }

    /// Transform mapping this rectangle onto `(0, 0, dst_w, dst_h)`.
    pub fn to_dest_affine(self, dst_w: f64, dst_h: f64) -> Affine {
        Affine::scale_non_uniform(dst_w / self.sw, dst_h / self.sh)
            * Affine::translate(Vec2::new(-self.sx, -self.sy))
    }
}

/// Destination-space placement of a whole source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestRect {
    /// Left edge in destination pixels.
    pub dx: f64,
    /// Top edge in destination pixels.
    pub dy: f64,
    /// Drawn width.
    pub dw: f64,
    /// Drawn height.
    pub dh: f64,
}

impl DestRect {
    /// Transform mapping source pixels `(0, 0, src_w, src_h)` onto this rectangle.
    pub fn to_affine(self, src_w: f64, src_h: f64) -> Affine {
        Affine::translate(Vec2::new(self.dx, self.dy))
            * Affine::scale_non_uniform(self.dw / src_w, self.dh / src_h)
    }
}

/// Select the source rectangle for a cover fit under `crop`.
pub fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, crop: &CropSpec) -> SourceRect {
    let iw = f64::from(src_w);
    let ih = f64::from(src_h);
    let target_ratio = f64::from(dst_w) / f64::from(dst_h);

    let (sw, sh) = if iw / ih > target_ratio {
        let sh = ih / crop.zoom;
        (sh * target_ratio, sh)
    } else {
        let sw = iw / crop.zoom;
        (sw, sw / target_ratio)
    };

    let extra_x = iw - sw;
    let extra_y = ih - sh;
    let sx = (iw - sw) / 2.0 + extra_x * crop.offset_x / 100.0;
    let sy = (ih - sh) / 2.0 + vertical_travel(extra_y, ih, crop.offset_y);

    SourceRect { sx, sy, sw, sh }
}

fn vertical_travel(extra_y: f64, ih: f64, offset_y: f64) -> f64 {
    if offset_y < -100.0 {
        -extra_y + ih * (offset_y + 100.0) / 100.0
    } else if offset_y > 100.0 {
        extra_y + ih * (offset_y - 100.0) / 100.0
    } else {
        extra_y * offset_y / 100.0
    }
}

/// Place a whole image inside `dst`, centered, then shift it vertically.
///
/// `shift_percent` is relative to the vertical letterbox space when there is
/// one, otherwise to the drawn image height.
pub fn contain_fit(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, shift_percent: f64) -> DestRect {
    let iw = f64::from(src_w);
    let ih = f64::from(src_h);
    let rw = f64::from(dst_w);
    let rh = f64::from(dst_h);
    let ir = iw / ih;

    let (dw, dh) = if ir > rw / rh {
        (rw, rw / ir)
    } else {
        (rh * ir, rh)
    };

    let dx = (rw - dw) / 2.0;
    let mut dy = (rh - dh) / 2.0;
    if rh > dh {
        dy += (rh - dh) * shift_percent / 100.0;
    } else {
        dy += dh * shift_percent / 100.0;
    }

    DestRect { dx, dy, dw, dh }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/crop.rs"]
mod tests;
