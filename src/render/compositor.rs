use crate::assets::PreparedImage;
use crate::effects::mask::{MaskRegion, apply_masks};
use crate::foundation::core::{Canvas, CardRaster, Rgba8Premul};
use crate::foundation::error::CardResult;
use crate::layout::crop::CropSpec;
use crate::layout::metrics::compute_metrics;
use crate::render::cpu::Layer;
use crate::render::options::RenderOptions;
use crate::render::overlay::draw_overlay;
use crate::render::photo::draw_photo;
use crate::render::surface::Surface;
use crate::render::watermark::draw_watermark;
use crate::text::engine::{FontSet, TextLayoutEngine};

/// Everything that varies between two cards of one batch.
#[derive(Clone, Copy, Debug)]
pub struct CardRequest<'a> {
    pub photo: &'a PreparedImage,
    /// Watermark logo; ignored unless `options.use_logo` is set.
    pub logo: Option<&'a PreparedImage>,
    /// Caption lines for this card; empty draws a header-only band.
    pub lines: &'a [String],
    pub options: &'a RenderOptions,
    /// Explicit crop; `None` selects the contain-fit path.
    pub crop: Option<&'a CropSpec>,
    pub masks: &'a [MaskRegion],
}

/// Render one 1080x1350 card.
///
/// Order: white background, photo, masks, watermark, caption band. Each call
/// owns its surface, so independent calls may run concurrently given one
/// engine per thread. Any failure aborts the whole card.
#[tracing::instrument(
    skip_all,
    fields(
        photo_w = req.photo.width,
        photo_h = req.photo.height,
        lines = req.lines.len(),
        masks = req.masks.len(),
    )
)]
pub fn render_card(
    req: &CardRequest<'_>,
    fonts: &FontSet,
    engine: &mut TextLayoutEngine,
) -> CardResult<CardRaster> {
    req.options.validate()?;
    if let Some(crop) = req.crop {
        crop.validate()?;
    }

    let canvas = Canvas::CARD;
    let mut surface = Surface::filled(canvas, Rgba8Premul::white());

    draw_photo(&mut surface, req.photo, req.crop)?;
    apply_masks(&mut surface, req.masks)?;

    let metrics = compute_metrics(req.options.override_body_font_size);
    let mut layer = Layer::new(canvas)?;
    if req.options.show_watermark {
        draw_watermark(
            layer.ctx(),
            canvas.width,
            req.options,
            req.logo,
            fonts,
            engine,
        )?;
    }
    draw_overlay(
        layer.ctx(),
        canvas,
        &metrics,
        req.lines,
        req.options,
        fonts,
        engine,
    )?;
    layer.composite_onto(&mut surface)?;

    Ok(surface.into_raster())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
