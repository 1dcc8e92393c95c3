//! vello_cpu plumbing: offscreen layers, image paints and glyph drawing.

use std::sync::Arc;

use crate::assets::PreparedImage;
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{CardError, CardResult};
use crate::render::surface::Surface;
use crate::text::engine::{FontFace, TextBrushRgba8};

/// A transparent offscreen drawing pass the size of the target surface.
///
/// Everything drawn into a layer is rasterized once by [`Layer::composite_onto`]
/// and blended over the surface with source-over.
pub(crate) struct Layer {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Layer {
    pub(crate) fn new(canvas: Canvas) -> CardResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CardError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CardError::render("surface height exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(Self { ctx, width, height })
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Rasterize the layer and blend it over `surface`.
    pub(crate) fn composite_onto(mut self, surface: &mut Surface) -> CardResult<()> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        surface.composite_over(pixmap.data_as_u8_slice(), 1.0)
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: crate::foundation::core::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn color(r: u8, g: u8, b: u8, a: u8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

/// Fill a rounded rectangle in the current transform.
pub(crate) fn fill_rounded_rect(
    ctx: &mut vello_cpu::RenderContext,
    rect: crate::foundation::core::Rect,
    radius: f64,
) {
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let rr = kurbo::RoundedRect::from_rect(rect, radius);
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in kurbo::Shape::path_elements(&rr, 0.1) {
        p.push(el);
    }
    ctx.fill_path(&p);
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CardError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Sampling quality for an image drawn at `scale` destination pixels per
/// source pixel. Strong minification switches to cubic filtering.
pub(crate) fn quality_for_scale(scale: f64) -> vello_cpu::peniko::ImageQuality {
    if scale < 0.5 {
        vello_cpu::peniko::ImageQuality::High
    } else {
        vello_cpu::peniko::ImageQuality::Medium
    }
}

/// Image paint sampling `image` in its own pixel space, drawn at `scale`.
pub(crate) fn image_paint(image: &PreparedImage, scale: f64) -> CardResult<vello_cpu::Image> {
    let pixmap = image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler {
            quality: quality_for_scale(scale),
            ..vello_cpu::peniko::ImageSampler::default()
        },
    })
}

/// Draw a laid-out line with its top-left corner at `(x, y)`.
pub(crate) fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    face: &FontFace,
    x: f64,
    y: f64,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(color(brush.r, brush.g, brush.b, brush.a));

            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(face.draw_data())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
