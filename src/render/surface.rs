use crate::effects::mask::PixelRect;
use crate::foundation::core::{Canvas, CardRaster, Rgba8Premul};
use crate::foundation::error::{CardError, CardResult};
use crate::render::composite::over_in_place;

/// Premultiplied RGBA8 drawing target owned by a single render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.rgba_len()],
        }
    }

    /// A surface cleared to `color`.
    pub fn filled(canvas: Canvas, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        Self {
            canvas,
            data: px.repeat(canvas.width as usize * canvas.height as usize),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Composite a same-sized premultiplied layer on top with `opacity`.
    pub fn composite_over(&mut self, layer: &[u8], opacity: f32) -> CardResult<()> {
        if layer.len() != self.data.len() {
            return Err(CardError::render(format!(
                "layer is {} bytes, surface is {}",
                layer.len(),
                self.data.len()
            )));
        }
        over_in_place(&mut self.data, layer, opacity)
    }

    /// Copy a rectangle out into a tightly packed buffer.
    pub(crate) fn copy_rect(&self, rect: PixelRect) -> Vec<u8> {
        let stride = self.canvas.width as usize * 4;
        let row_len = rect.width() as usize * 4;
        let mut out = Vec::with_capacity(row_len * rect.height() as usize);
        for y in rect.y0..rect.y1 {
            let start = y as usize * stride + rect.x0 as usize * 4;
            out.extend_from_slice(&self.data[start..start + row_len]);
        }
        out
    }

    /// Overwrite a rectangle with a tightly packed buffer from [`Surface::copy_rect`].
    pub(crate) fn write_rect(&mut self, rect: PixelRect, pixels: &[u8]) {
        let stride = self.canvas.width as usize * 4;
        let row_len = rect.width() as usize * 4;
        for (row, src) in (rect.y0..rect.y1).zip(pixels.chunks_exact(row_len)) {
            let start = row as usize * stride + rect.x0 as usize * 4;
            self.data[start..start + row_len].copy_from_slice(src);
        }
    }

    /// Finish the surface as a premultiplied raster.
    pub fn into_raster(self) -> CardRaster {
        CardRaster {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data,
            premultiplied: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
