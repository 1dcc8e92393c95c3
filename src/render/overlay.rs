use crate::foundation::core::Canvas;
use crate::foundation::error::CardResult;
use crate::layout::metrics::ReviewLayoutMetrics;
use crate::render::cpu::{color, draw_layout};
use crate::render::options::RenderOptions;
use crate::text::engine::{FontSet, TextBrushRgba8, TextLayoutEngine};

const BAND_ALPHA: u8 = 230;
const DIVIDER_ALPHA: u8 = 128;
const DIVIDER_GAP: f64 = 14.0;
const HEADER_DATE_GAP: f64 = 20.0;
const MIN_NAME_FONT_SIZE: u32 = 24;
const NAME_SHRINK_STEP: u32 = 2;
const MIN_BODY_OFFSET: f64 = 8.0;

/// Resolved positions of every caption band element. Origins are the
/// top-left corners of text layouts.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlan {
    pub band_top: f64,
    pub name_font_size: u32,
    pub name_origin: (f64, f64),
    pub date_origin: (f64, f64),
    pub divider_y: f64,
    pub body_origins: Vec<(f64, f64)>,
}

/// Lay out the caption band.
///
/// `header_width` measures the header text at a given bold size; the header
/// shrinks in 2px steps down to 24px until it fits beside the date.
pub fn plan_overlay(
    canvas: Canvas,
    m: &ReviewLayoutMetrics,
    date_width: f64,
    line_count: usize,
    mut header_width: impl FnMut(u32) -> CardResult<f64>,
) -> CardResult<OverlayPlan> {
    let width = f64::from(canvas.width);
    let overlay_h = f64::from(m.overlay_height);
    let pad_x = f64::from(m.padding_x);
    let pad_y = f64::from(m.padding_y);
    let band_top = f64::from(canvas.height) - overlay_h;
    let header_y = band_top + pad_y;

    let available_name = width - pad_x * 2.0 - date_width - HEADER_DATE_GAP;
    let mut name_size = m.name_font_size;
    while name_size > MIN_NAME_FONT_SIZE && header_width(name_size)? > available_name {
        name_size = name_size.saturating_sub(NAME_SHRINK_STEP);
    }

    let date_size = f64::from(m.date_font_size);
    let name_px = f64::from(name_size);
    let date_origin = (width - pad_x - date_width, header_y + (name_px - date_size));
    let divider_y = header_y + name_px.max(date_size) + DIVIDER_GAP;

    let line_height = f64::from(m.line_height.max(1));
    let available = overlay_h - (divider_y - band_top) - pad_y;
    let allowed = ((available / line_height).floor() as i64).max(1) as usize;
    let n = allowed.min(line_count);
    let total = if n > 0 {
        (n - 1) as f64 * line_height + f64::from(m.body_font_size)
    } else {
        0.0
    };
    let offset = ((available - total) / 2.0).max(MIN_BODY_OFFSET);
    let start_y = divider_y + offset;
    let body_origins = (0..n)
        .map(|i| (pad_x, start_y + i as f64 * line_height))
        .collect();

    Ok(OverlayPlan {
        band_top,
        name_font_size: name_size,
        name_origin: (pad_x, header_y),
        date_origin,
        divider_y,
        body_origins,
    })
}

/// Draw the bottom caption band: backdrop, header, divider and body lines.
pub(crate) fn draw_overlay(
    ctx: &mut vello_cpu::RenderContext,
    canvas: Canvas,
    m: &ReviewLayoutMetrics,
    lines: &[String],
    options: &RenderOptions,
    fonts: &FontSet,
    engine: &mut TextLayoutEngine,
) -> CardResult<OverlayPlan> {
    let header = options.header_text();
    let date = options.display_date();
    let bold = fonts.bold_or_regular();

    let date_layout = if date.is_empty() {
        None
    } else {
        Some(engine.layout_line(
            &date,
            &fonts.regular,
            m.date_font_size as f32,
            TextBrushRgba8::WHITE,
        )?)
    };
    let date_width = date_layout
        .as_ref()
        .map_or(0.0, |l| f64::from(l.full_width()));

    let plan = plan_overlay(canvas, m, date_width, lines.len(), |size| {
        Ok(f64::from(engine.measure(&header, bold, size as f32)?))
    })?;
    tracing::debug!(
        name_font_size = plan.name_font_size,
        body_lines = plan.body_origins.len(),
        "caption band"
    );

    let width = f64::from(canvas.width);
    let pad_x = f64::from(m.padding_x);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(0, 0, 0, BAND_ALPHA));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        plan.band_top,
        width,
        f64::from(canvas.height),
    ));

    if !header.is_empty() {
        let layout = engine.layout_line(
            &header,
            bold,
            plan.name_font_size as f32,
            TextBrushRgba8::WHITE,
        )?;
        draw_layout(ctx, &layout, bold, plan.name_origin.0, plan.name_origin.1);
    }
    if let Some(layout) = &date_layout {
        draw_layout(ctx, layout, &fonts.regular, plan.date_origin.0, plan.date_origin.1);
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(255, 255, 255, DIVIDER_ALPHA));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        pad_x,
        plan.divider_y - 0.5,
        width - pad_x,
        plan.divider_y + 0.5,
    ));

    for (line, &(x, y)) in lines.iter().zip(&plan.body_origins) {
        if line.is_empty() {
            continue;
        }
        let layout = engine.layout_line(
            line,
            &fonts.regular,
            m.body_font_size as f32,
            TextBrushRgba8::WHITE,
        )?;
        draw_layout(ctx, &layout, &fonts.regular, x, y);
    }

    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
