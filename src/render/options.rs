use crate::foundation::error::{CardError, CardResult};

/// Brand label drawn in the watermark pill.
pub const DEFAULT_WATERMARK_LABEL: &str = "간판의 품격";

const DEFAULT_WATERMARK_OPACITY: f32 = 0.8;
const MIN_CONTENT_OPACITY: f32 = 0.5;

/// Per-card text and watermark options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Store name, the first part of the caption header.
    pub store_name: String,
    /// Location appended to the header as `"{store} - {location}"` when non-empty.
    pub location: String,
    /// Visit date shown right-aligned in the header.
    pub date: String,
    /// Caption font family name, for logs and job files; faces come from the `FontSet`.
    pub font_family: String,
    /// Watermark content opacity in `[0, 1]`; drawing clamps it to `[0.5, 1]`.
    pub watermark_opacity: f32,
    pub show_watermark: bool,
    /// Draw the logo in the watermark when one is supplied.
    pub use_logo: bool,
    /// Convert the logo to a white silhouette before drawing.
    pub logo_white: bool,
    /// Caption body font size; `None` uses the default metrics.
    pub override_body_font_size: Option<f32>,
    pub watermark_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            location: String::new(),
            date: String::new(),
            font_family: String::new(),
            watermark_opacity: DEFAULT_WATERMARK_OPACITY,
            show_watermark: true,
            use_logo: true,
            logo_white: true,
            override_body_font_size: None,
            watermark_label: DEFAULT_WATERMARK_LABEL.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> CardResult<()> {
        if !self.watermark_opacity.is_finite() || !(0.0..=1.0).contains(&self.watermark_opacity) {
            return Err(CardError::validation(format!(
                "watermark_opacity must be within [0, 1], got {}",
                self.watermark_opacity
            )));
        }
        if let Some(size) = self.override_body_font_size
            && (!size.is_finite() || size <= 0.0)
        {
            return Err(CardError::validation(format!(
                "override_body_font_size must be finite and > 0, got {size}"
            )));
        }
        Ok(())
    }

    /// Header line: `"{store} - {location}"`, or the store alone.
    pub fn header_text(&self) -> String {
        let store = self.store_name.trim();
        let location = self.location.trim();
        if location.is_empty() {
            store.to_string()
        } else {
            format!("{store} - {location}")
        }
    }

    /// Date as displayed in the header.
    pub fn display_date(&self) -> String {
        normalize_date(self.date.trim())
    }

    /// Opacity applied to the watermark logo and label.
    pub fn content_opacity(&self) -> f32 {
        if self.watermark_opacity.is_finite() {
            self.watermark_opacity.clamp(MIN_CONTENT_OPACITY, 1.0)
        } else {
            1.0
        }
    }
}

/// Format a date typed as eight digits (`20250918`, `2025-09-18`) as
/// `2025.09.18`; anything else is returned unchanged.
pub fn normalize_date(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 8 {
        format!("{}.{}.{}", &digits[..4], &digits[4..6], &digits[6..])
    } else {
        input.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/options.rs"]
mod tests;
