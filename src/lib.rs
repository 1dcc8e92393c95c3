//! reviewcard renders 1080x1350 review cards: a user photo placed by cover or
//! contain fit, optional pixelate/blur redaction, a top-right brand watermark
//! and a bottom caption band holding one page of the review text.
//!
//! The pieces are usable on their own:
//!
//! - Paginate a review with [`paginate`] or pick a font size with [`fit_caption`]
//! - Render one card with [`render_card`], or a batch with [`render_cards`]
//! - Drive everything from a JSON [`CardJob`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod effects;
pub(crate) mod job;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod text;

pub use crate::foundation::core::{
    Affine, CARD_HEIGHT, CARD_WIDTH, Canvas, CardRaster, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::assets::PreparedImage;
pub use crate::assets::decode::{decode_image, load_image};
pub use crate::assets::encode::{encode_png, write_png};
pub use crate::effects::mask::{
    MaskKind, MaskRegion, PixelRect, apply_masks, blur_radius, pixel_block_size,
};
pub use crate::job::{CardJob, CardPlan, JobFonts, JobPhoto, output_file_name, plan_cards};
pub use crate::layout::crop::{
    CropSpec, DestRect, MAX_OFFSET_X, MAX_OFFSET_Y, MAX_ZOOM, MIN_ZOOM, SourceRect, contain_fit,
    cover_crop,
};
pub use crate::layout::metrics::{DEFAULT_BODY_FONT_SIZE, ReviewLayoutMetrics, compute_metrics};
pub use crate::layout::shift::{detect_vertical_shift, shift_for_means};
pub use crate::render::compositor::{CardRequest, render_card};
pub use crate::render::options::{DEFAULT_WATERMARK_LABEL, RenderOptions, normalize_date};
pub use crate::render::overlay::{OverlayPlan, plan_overlay};
pub use crate::render::photo::{PhotoPlacement, draw_photo};
pub use crate::render::pipeline::{RenderThreading, render_cards};
pub use crate::render::surface::Surface;
pub use crate::render::watermark::{WatermarkBox, white_silhouette};
pub use crate::text::autofit::{
    CaptionBox, CaptionFit, MAX_FIT_BODY_SIZE, MIN_FIT_BODY_SIZE, fit_at, fit_caption,
};
pub use crate::text::engine::{FaceMetrics, FontFace, FontSet, TextBrushRgba8, TextLayoutEngine};
pub use crate::text::measure::{AtSize, FontMetrics, TextMeasure};
pub use crate::text::paginate::{Page, paginate, wrap_paragraph};
