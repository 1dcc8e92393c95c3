//! Region redaction: pixelate or blur rectangles of a rendered surface in place.

use crate::effects::blur::blur_region;
use crate::foundation::error::CardResult;
use crate::render::surface::Surface;

const DEFAULT_STRENGTH: u32 = 50;
const MIN_PIXEL_BLOCK: u32 = 6;
const MAX_PIXEL_BLOCK: f64 = 60.0;
const MIN_BLUR_RADIUS: u32 = 2;
const MAX_BLUR_RADIUS: f64 = 25.0;

/// Redaction effect applied to a mask region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    /// Blocky nearest-neighbor mosaic.
    Pixelate,
    /// Gaussian blur of the isolated region.
    Blur,
}

/// A rectangle of the output frame to redact, in fractions of the frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaskRegion {
    /// Identifier, unique per photo.
    pub id: String,
    /// Effect to apply.
    pub kind: MaskKind,
    /// Left edge in `[0, 1]`.
    pub x: f64,
    /// Top edge in `[0, 1]`.
    pub y: f64,
    /// Width in `[0, 1]`; zero or negative makes the region inert.
    pub width: f64,
    /// Height in `[0, 1]`; zero or negative makes the region inert.
    pub height: f64,
    /// Effect strength, nominally `[10, 100]`.
    #[serde(default = "default_strength")]
    pub strength: u32,
}

fn default_strength() -> u32 {
    DEFAULT_STRENGTH
}

/// Integer pixel bounds of a region, half-open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column (inclusive).
    pub x0: u32,
    /// Top row (inclusive).
    pub y0: u32,
    /// Right column (exclusive).
    pub x1: u32,
    /// Bottom row (exclusive).
    pub y1: u32,
}

impl PixelRect {
    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

impl MaskRegion {
    /// Resolve fractional coordinates against a `width`x`height` surface.
    ///
    /// Returns `None` for inert regions: non-positive or non-finite size, or
    /// less than one pixel after clamping.
    pub fn to_pixels(&self, width: u32, height: u32) -> Option<PixelRect> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }

        let (fw, fh) = (f64::from(width), f64::from(height));
        let x = self.x.clamp(0.0, 1.0) * fw;
        let y = self.y.clamp(0.0, 1.0) * fh;
        let w = self.width.clamp(0.0, 1.0) * fw;
        let h = self.height.clamp(0.0, 1.0) * fh;
        if w < 1.0 || h < 1.0 {
            return None;
        }

        let x0 = (x.round() as u32).min(width);
        let y0 = (y.round() as u32).min(height);
        let x1 = ((x + w).round() as u32).min(width);
        let y1 = ((y + h).round() as u32).min(height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect { x0, y0, x1, y1 })
    }
}

/// Mosaic cell size for a pixelate strength.
pub fn pixel_block_size(strength: u32) -> u32 {
    let factor = f64::from(strength.min(100)) / 100.0;
    ((factor * MAX_PIXEL_BLOCK).round() as u32).max(MIN_PIXEL_BLOCK)
}

/// Blur radius (standard deviation, pixels) for a blur strength.
pub fn blur_radius(strength: u32) -> u32 {
    let factor = f64::from(strength.min(100)) / 100.0;
    ((factor * MAX_BLUR_RADIUS).round() as u32).max(MIN_BLUR_RADIUS)
}

/// Apply every region to `surface` in place. Regions are independent of each other.
pub fn apply_masks(surface: &mut Surface, regions: &[MaskRegion]) -> CardResult<()> {
    let (width, height) = (surface.width(), surface.height());
    for region in regions {
        let Some(rect) = region.to_pixels(width, height) else {
            tracing::debug!(id = %region.id, "skipping inert mask region");
            continue;
        };
        match region.kind {
            MaskKind::Pixelate => pixelate(surface, rect, region.strength),
            MaskKind::Blur => blur_region(surface, rect, region.strength),
        }
    }
    Ok(())
}

fn pixelate(surface: &mut Surface, rect: PixelRect, strength: u32) {
    let block = f64::from(pixel_block_size(strength));
    let (rw, rh) = (rect.width(), rect.height());
    let steps_x = ((f64::from(rw) / block).round() as u32).max(1);
    let steps_y = ((f64::from(rh) / block).round() as u32).max(1);

    let stride = surface.width() as usize * 4;
    let data = surface.data_mut();

    // Nearest-neighbor downsample: one sample at each cell center.
    let mut cells = Vec::with_capacity(steps_x as usize * steps_y as usize);
    for cy in 0..steps_y {
        let sy = rect.y0 + cell_center(cy, steps_y, rh);
        for cx in 0..steps_x {
            let sx = rect.x0 + cell_center(cx, steps_x, rw);
            let idx = sy as usize * stride + sx as usize * 4;
            cells.push([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        }
    }

    // Nearest-neighbor upsample back over the region.
    for py in 0..rh {
        let cy = (u64::from(py) * u64::from(steps_y) / u64::from(rh)) as usize;
        let row = (rect.y0 + py) as usize * stride;
        for px in 0..rw {
            let cx = (u64::from(px) * u64::from(steps_x) / u64::from(rw)) as usize;
            let idx = row + (rect.x0 + px) as usize * 4;
            data[idx..idx + 4].copy_from_slice(&cells[cy * steps_x as usize + cx]);
        }
    }
}

fn cell_center(cell: u32, steps: u32, span: u32) -> u32 {
    let c = ((2 * u64::from(cell) + 1) * u64::from(span)) / (2 * u64::from(steps));
    (c as u32).min(span - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mask.rs"]
mod tests;
