//! Gaussian blur of one mask region, isolated from the rest of the surface.

use crate::effects::mask::{PixelRect, blur_radius};
use crate::render::surface::Surface;

/// Normalized 1D gaussian taps for one blur strength.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RegionKernel {
    taps: Vec<f32>,
}

impl RegionKernel {
    /// Sigma is [`blur_radius`]; the taps reach `ceil(2 * sigma)` pixels each way.
    pub(crate) fn for_strength(strength: u32) -> Self {
        let sigma = blur_radius(strength) as f32;
        let reach = (2.0 * sigma).ceil() as i32;
        let two_sigma_sq = 2.0 * sigma * sigma;

        let mut taps: Vec<f32> = (-reach..=reach)
            .map(|d| (-((d * d) as f32) / two_sigma_sq).exp())
            .collect();
        let total: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= total;
        }
        Self { taps }
    }

    pub(crate) fn reach(&self) -> usize {
        self.taps.len() / 2
    }

    /// Smooth one row or column. Samples past either end repeat the end pixel.
    fn smooth(&self, line: &[[u8; 4]], out: &mut [[u8; 4]]) {
        let last = line.len() as isize - 1;
        let reach = self.reach() as isize;
        for (i, px) in out.iter_mut().enumerate() {
            let mut acc = [0.0f32; 4];
            for (k, &w) in self.taps.iter().enumerate() {
                let at = (i as isize + k as isize - reach).clamp(0, last) as usize;
                for (a, &c) in acc.iter_mut().zip(&line[at]) {
                    *a += w * f32::from(c);
                }
            }
            *px = acc.map(|v| v.round().clamp(0.0, 255.0) as u8);
        }
    }
}

/// Blur `rect` of `surface` in place.
///
/// The region is treated as a standalone image: nothing outside `rect` is
/// sampled or written, and its border pixels extend outward.
pub(crate) fn blur_region(surface: &mut Surface, rect: PixelRect, strength: u32) {
    let (rw, rh) = (rect.width() as usize, rect.height() as usize);
    if rw == 0 || rh == 0 {
        return;
    }
    let kernel = RegionKernel::for_strength(strength);

    let mut pixels: Vec<[u8; 4]> = surface
        .copy_rect(rect)
        .chunks_exact(4)
        .map(|p| [p[0], p[1], p[2], p[3]])
        .collect();

    let mut line = Vec::with_capacity(rw.max(rh));
    for row in pixels.chunks_exact_mut(rw) {
        line.clear();
        line.extend_from_slice(row);
        kernel.smooth(&line, row);
    }

    let mut column = vec![[0u8; 4]; rh];
    for x in 0..rw {
        line.clear();
        line.extend((0..rh).map(|y| pixels[y * rw + x]));
        kernel.smooth(&line, &mut column);
        for (y, px) in column.iter().enumerate() {
            pixels[y * rw + x] = *px;
        }
    }

    let bytes: Vec<u8> = pixels.into_iter().flatten().collect();
    surface.write_rect(rect, &bytes);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
