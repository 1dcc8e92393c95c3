use crate::foundation::core::CARD_WIDTH;
use crate::foundation::error::CardResult;
use crate::layout::metrics::{DEFAULT_BODY_FONT_SIZE, ReviewLayoutMetrics, compute_metrics};
use crate::text::measure::{AtSize, FontMetrics};
use crate::text::paginate::{Page, paginate};

/// Largest body size tried by [`fit_caption`].
pub const MAX_FIT_BODY_SIZE: u32 = 68;
/// Smallest body size tried by [`fit_caption`]; also the fallback.
pub const MIN_FIT_BODY_SIZE: u32 = 18;
const FIT_STEP: usize = 2;

/// Space between the header row and the divider, plus the divider's margin.
const HEADER_RESERVE_PX: u32 = 14 + 18;

/// Text box available to caption lines for a set of metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionBox {
    pub max_width_px: f32,
    pub max_lines: usize,
}

impl CaptionBox {
    pub fn for_metrics(m: &ReviewLayoutMetrics) -> Self {
        let reserved_top = m.padding_y + m.name_font_size.max(m.date_font_size) + HEADER_RESERVE_PX;
        let available =
            i64::from(m.overlay_height) - i64::from(reserved_top) - i64::from(m.padding_y);
        let max_lines = if m.line_height == 0 {
            1
        } else {
            available.div_euclid(i64::from(m.line_height)).max(1) as usize
        };
        Self {
            max_width_px: (CARD_WIDTH - 2 * m.padding_x) as f32,
            max_lines,
        }
    }
}

/// Chosen caption size and the pages it produces.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionFit {
    pub metrics: ReviewLayoutMetrics,
    pub caption_box: CaptionBox,
    pub pages: Vec<Page>,
}

/// Paginate `text`, picking the body font size.
///
/// Without `target_pages` the default size is used. With a target, sizes from
/// [`MAX_FIT_BODY_SIZE`] down to [`MIN_FIT_BODY_SIZE`] in 2px steps are tried
/// and the first whose page count does not exceed the target wins; if none
/// does, the smallest size is used anyway.
#[tracing::instrument(skip(text, font), fields(chars = text.chars().count()))]
pub fn fit_caption<F: FontMetrics + ?Sized>(
    text: &str,
    target_pages: Option<usize>,
    font: &mut F,
) -> CardResult<CaptionFit> {
    let Some(target) = target_pages else {
        return fit_at(text, DEFAULT_BODY_FONT_SIZE, font);
    };
    let target = target.max(1);

    for size in (MIN_FIT_BODY_SIZE..=MAX_FIT_BODY_SIZE).rev().step_by(FIT_STEP) {
        let fit = fit_at(text, size as f32, font)?;
        if fit.pages.len() <= target {
            tracing::debug!(body_font_size = size, pages = fit.pages.len(), "caption fits");
            return Ok(fit);
        }
    }

    tracing::debug!(
        body_font_size = MIN_FIT_BODY_SIZE,
        "caption exceeds target at every size"
    );
    fit_at(text, MIN_FIT_BODY_SIZE as f32, font)
}

/// Paginate `text` at one body font size.
pub fn fit_at<F: FontMetrics + ?Sized>(
    text: &str,
    body_font_size: f32,
    font: &mut F,
) -> CardResult<CaptionFit> {
    let metrics = compute_metrics(Some(body_font_size));
    let caption_box = CaptionBox::for_metrics(&metrics);
    let mut measure = AtSize::new(font, metrics.body_font_size as f32);
    let pages = paginate(
        text,
        caption_box.max_lines,
        caption_box.max_width_px,
        &mut measure,
    )?;
    Ok(CaptionFit {
        metrics,
        caption_box,
        pages,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/autofit.rs"]
mod tests;
