use std::sync::Arc;

use crate::assets::PreparedImage;
use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::CardResult;
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::cpu::{
    affine_to_cpu, color, draw_layout, fill_rounded_rect, image_paint, rect_to_cpu,
};
use crate::render::options::RenderOptions;
use crate::text::engine::{FontSet, TextBrushRgba8, TextLayoutEngine};

pub const LABEL_FONT_SIZE: f32 = 36.0;
pub const LOGO_SIZE: f64 = 45.0;
const LOGO_GAP: f64 = 5.0;
const RIGHT_INSET: f64 = 30.0;
const TOP_INSET: f64 = 30.0;
const PILL_PAD_X: f64 = 10.0;
const PILL_PAD_Y: f64 = 6.0;
const PILL_MIN_CONTENT_HEIGHT: f64 = 40.0;
const PILL_RADIUS: f64 = 12.0;
const PILL_ALPHA: u8 = 89;
const LABEL_NUDGE_Y: f64 = 4.0;
const OUTLINE_WIDTH: f64 = 0.5;
const OUTLINE_ALPHA: u8 = 102;

/// Channels at or above this on all of r, g and b count as background.
pub const SILHOUETTE_THRESHOLD: u8 = 240;

/// Placement of the watermark pieces, anchored to the top-right corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatermarkBox {
    pub pill: Rect,
    pub logo: Option<Rect>,
    /// Top-left of the label layout.
    pub label_origin: (f64, f64),
}

impl WatermarkBox {
    pub fn new(canvas_width: u32, label_width: f64, has_logo: bool) -> Self {
        let logo_extent = if has_logo { LOGO_SIZE + LOGO_GAP } else { 0.0 };
        let total_width = logo_extent + label_width;
        let x = f64::from(canvas_width) - RIGHT_INSET - total_width;
        let y = TOP_INSET;

        let pill_height = LOGO_SIZE.max(PILL_MIN_CONTENT_HEIGHT) + PILL_PAD_Y * 2.0;
        let pill = Rect::new(
            x - PILL_PAD_X,
            y - PILL_PAD_Y,
            x - PILL_PAD_X + total_width + PILL_PAD_X * 2.0,
            y - PILL_PAD_Y + pill_height,
        );
        let logo = has_logo.then(|| Rect::new(x, y, x + LOGO_SIZE, y + LOGO_SIZE));

        Self {
            pill,
            logo,
            label_origin: (x + logo_extent, y + LABEL_NUDGE_Y),
        }
    }
}

/// Recolor `logo` to white, dropping near-white background pixels.
///
/// Pixels whose straight r, g and b are all at least [`SILHOUETTE_THRESHOLD`]
/// become transparent; every other pixel becomes white with its alpha kept.
pub fn white_silhouette(logo: &PreparedImage) -> PreparedImage {
    let mut straight = logo.rgba8_premul.as_ref().clone();
    unpremultiply_rgba8_in_place(&mut straight);

    for px in straight.chunks_exact_mut(4) {
        let background = px[..3].iter().all(|&c| c >= SILHOUETTE_THRESHOLD);
        let a = if background { 0 } else { px[3] };
        px.copy_from_slice(&[a, a, a, a]);
    }

    PreparedImage {
        width: logo.width,
        height: logo.height,
        rgba8_premul: Arc::new(straight),
    }
}

/// Draw the top-right brand pill: translucent rounded backdrop, optional logo
/// and the label.
pub(crate) fn draw_watermark(
    ctx: &mut vello_cpu::RenderContext,
    canvas_width: u32,
    options: &RenderOptions,
    logo: Option<&PreparedImage>,
    fonts: &FontSet,
    engine: &mut TextLayoutEngine,
) -> CardResult<WatermarkBox> {
    let logo = logo.filter(|_| options.use_logo);
    let face = fonts.bold_or_regular();
    let label = engine.layout_line(
        &options.watermark_label,
        face,
        LABEL_FONT_SIZE,
        TextBrushRgba8::WHITE,
    )?;
    let placement = WatermarkBox::new(canvas_width, f64::from(label.full_width()), logo.is_some());

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(0, 0, 0, PILL_ALPHA));
    fill_rounded_rect(ctx, placement.pill, PILL_RADIUS);

    ctx.push_opacity_layer(options.content_opacity());
    if let (Some(logo), Some(slot)) = (logo, placement.logo) {
        let drawn = if options.logo_white {
            white_silhouette(logo)
        } else {
            logo.clone()
        };
        let (w, h) = (f64::from(drawn.width), f64::from(drawn.height));
        let (scale_x, scale_y) = (slot.width() / w, slot.height() / h);
        let fit = Affine::translate((slot.x0, slot.y0)) * Affine::scale_non_uniform(scale_x, scale_y);
        ctx.set_transform(affine_to_cpu(fit));
        ctx.set_paint(image_paint(&drawn, scale_x.min(scale_y))?);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        if options.logo_white {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color(0, 0, 0, OUTLINE_ALPHA));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(OUTLINE_WIDTH));
            ctx.stroke_rect(&rect_to_cpu(slot));
        }
    }

    let (lx, ly) = placement.label_origin;
    draw_layout(ctx, &label, face, lx, ly);
    ctx.pop_layer();

    Ok(placement)
}

#[cfg(test)]
#[path = "../../tests/unit/render/watermark.rs"]
mod tests;
