use crate::foundation::core::CARD_HEIGHT;

/// Body font size used when no override is supplied.
pub const DEFAULT_BODY_FONT_SIZE: f32 = 52.0;

const OVERLAY_FRACTION: f64 = 0.30;
const PADDING_X: u32 = 30;
const PADDING_Y: u32 = 22;
const BASE_NAME_FONT_SIZE: f32 = 56.0;
const DATE_FONT_RATIO: f32 = 0.6;
const LINE_HEIGHT_RATIO: f32 = 1.5;

/// Geometry of the caption band, derived from a body font size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewLayoutMetrics {
    /// Horizontal inset of header and body text.
    pub padding_x: u32,
    /// Vertical inset of the header from the band top.
    pub padding_y: u32,
    /// Starting header font size before shrink-to-fit.
    pub name_font_size: u32,
    /// Date font size.
    pub date_font_size: u32,
    /// Body font size.
    pub body_font_size: u32,
    /// Distance between body baselines.
    pub line_height: u32,
    /// Height of the caption band pinned to the bottom of the card.
    pub overlay_height: u32,
}

/// Compute caption band metrics.
///
/// A missing, non-finite or non-positive override falls back to
/// [`DEFAULT_BODY_FONT_SIZE`]. All sizes scale linearly with `body / 52`.
pub fn compute_metrics(body_font_size_override: Option<f32>) -> ReviewLayoutMetrics {
    let base_body = body_font_size_override
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(DEFAULT_BODY_FONT_SIZE);
    let scale = base_body / DEFAULT_BODY_FONT_SIZE;

    let overlay_height = (f64::from(CARD_HEIGHT) * OVERLAY_FRACTION).round() as u32;
    let name_font_size = round_px(BASE_NAME_FONT_SIZE * scale);
    let date_font_size = round_px(DEFAULT_BODY_FONT_SIZE * scale * DATE_FONT_RATIO);
    let body_font_size = round_px(base_body);
    let line_height = round_px(body_font_size as f32 * LINE_HEIGHT_RATIO);

    ReviewLayoutMetrics {
        padding_x: PADDING_X,
        padding_y: PADDING_Y,
        name_font_size,
        date_font_size,
        body_font_size,
        line_height,
        overlay_height,
    }
}

fn round_px(v: f32) -> u32 {
    v.round().max(0.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/layout/metrics.rs"]
mod tests;
