//! JSON job files: everything needed to render a batch of cards from disk.
//!
//! ```json
//! {
//!   "photos": [{ "path": "photos/a.jpg", "crop": { "zoom": 1.2 }, "masks": [] }],
//!   "logo": "logo.png",
//!   "fonts": { "regular": "fonts/Body.ttf", "bold": "fonts/Body-Bold.ttf" },
//!   "review": "리뷰 본문",
//!   "options": { "store_name": "가게", "location": "강남", "date": "20250918" },
//!   "auto_fit": true
//! }
//! ```
//!
//! Relative paths resolve against the job file's directory.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::PreparedImage;
use crate::assets::decode::load_image;
use crate::assets::encode::write_png;
use crate::effects::mask::MaskRegion;
use crate::foundation::error::{CardError, CardResult};
use crate::layout::crop::CropSpec;
use crate::render::compositor::CardRequest;
use crate::render::options::RenderOptions;
use crate::render::pipeline::{RenderThreading, render_cards};
use crate::text::autofit::{CaptionFit, fit_at, fit_caption};
use crate::text::engine::{FaceMetrics, FontFace, FontSet, TextLayoutEngine};
use crate::text::paginate::Page;

/// One photo of a job, with its optional crop and redaction regions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobPhoto {
    pub path: PathBuf,
    #[serde(default)]
    pub crop: Option<CropSpec>,
    #[serde(default)]
    pub masks: Vec<MaskRegion>,
}

/// Font files for the caption.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobFonts {
    pub regular: PathBuf,
    #[serde(default)]
    pub bold: Option<PathBuf>,
}

/// A batch of review cards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardJob {
    pub photos: Vec<JobPhoto>,
    #[serde(default)]
    pub logo: Option<PathBuf>,
    pub fonts: JobFonts,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub options: RenderOptions,
    /// Fit the caption to one page per photo instead of rendering every page
    /// on every photo.
    #[serde(default = "default_auto_fit")]
    pub auto_fit: bool,
    #[serde(default)]
    pub threading: RenderThreading,
}

fn default_auto_fit() -> bool {
    true
}

impl CardJob {
    /// Parse a job from JSON, resolving relative paths against `base_dir`.
    pub fn from_json_str(json: &str, base_dir: &Path) -> CardResult<Self> {
        let mut job: CardJob = serde_json::from_str(json)
            .map_err(|e| CardError::serde(format!("parse job JSON: {e}")))?;
        job.resolve_paths(base_dir);
        job.validate()?;
        Ok(job)
    }

    /// Read and parse a job file.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read job file '{}'", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&json, base_dir)
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };
        for photo in &mut self.photos {
            resolve(&mut photo.path);
        }
        if let Some(logo) = &mut self.logo {
            resolve(logo);
        }
        resolve(&mut self.fonts.regular);
        if let Some(bold) = &mut self.fonts.bold {
            resolve(bold);
        }
    }

    pub fn validate(&self) -> CardResult<()> {
        if self.photos.is_empty() {
            return Err(CardError::validation("job must list at least one photo"));
        }
        self.options.validate()?;
        for photo in &self.photos {
            if let Some(crop) = &photo.crop {
                crop.validate()?;
            }
        }
        Ok(())
    }

    pub fn load_fonts(&self) -> CardResult<FontSet> {
        let regular = FontFace::load(&self.fonts.regular)?;
        let bold = self.fonts.bold.as_deref().map(FontFace::load).transpose()?;
        Ok(FontSet::new(regular, bold))
    }

    /// Paginate the review.
    ///
    /// An explicit `override_body_font_size` is used as is; otherwise auto-fit
    /// targets one page per photo, and without auto-fit the default size applies.
    pub fn caption(&self, fonts: &FontSet, engine: &mut TextLayoutEngine) -> CardResult<CaptionFit> {
        let mut metrics = FaceMetrics::new(engine, &fonts.regular);
        if let Some(size) = self.options.override_body_font_size {
            return fit_at(&self.review, size, &mut metrics);
        }
        let target = self.auto_fit.then(|| self.photos.len().max(1));
        fit_caption(&self.review, target, &mut metrics)
    }

    /// Load every input, render all planned cards and write them to `out_dir`.
    ///
    /// Returns the written paths in output order.
    #[tracing::instrument(skip(self), fields(photos = self.photos.len()))]
    pub fn run(&self, out_dir: &Path) -> CardResult<Vec<PathBuf>> {
        let fonts = self.load_fonts()?;
        let mut engine = TextLayoutEngine::new();
        let fit = self.caption(&fonts, &mut engine)?;
        tracing::info!(
            body_font_size = fit.metrics.body_font_size,
            pages = fit.pages.len(),
            "caption paginated"
        );

        let photos = self
            .photos
            .iter()
            .map(|p| load_image(&p.path))
            .collect::<CardResult<Vec<PreparedImage>>>()?;
        let logo = match (&self.logo, self.options.use_logo) {
            (Some(path), true) => Some(load_image(path)?),
            _ => None,
        };

        let mut options = self.options.clone();
        options.override_body_font_size = Some(fit.metrics.body_font_size as f32);

        let plans = plan_cards(photos.len(), fit.pages.len(), self.auto_fit);
        let empty = Page::default();
        let requests: Vec<CardRequest<'_>> = plans
            .iter()
            .map(|plan| {
                let job_photo = &self.photos[plan.photo_index];
                let page = plan
                    .page_index
                    .and_then(|i| fit.pages.get(i))
                    .unwrap_or(&empty);
                CardRequest {
                    photo: &photos[plan.photo_index],
                    logo: logo.as_ref(),
                    lines: &page.lines,
                    options: &options,
                    crop: job_photo.crop.as_ref(),
                    masks: &job_photo.masks,
                }
            })
            .collect();

        let rasters = render_cards(&requests, &fonts, &self.threading)?;

        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
        let mut written = Vec::with_capacity(rasters.len());
        for (plan, raster) in plans.iter().zip(&rasters) {
            let path = out_dir.join(output_file_name(&self.options, plan.output_index));
            write_png(raster, &path)?;
            tracing::debug!(path = %path.display(), "wrote card");
            written.push(path);
        }
        Ok(written)
    }
}

/// Which photo and caption page make up one output card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardPlan {
    pub photo_index: usize,
    /// `None` renders a header-only caption band.
    pub page_index: Option<usize>,
    /// Position in the batch output, 0-based.
    pub output_index: usize,
}

/// Pair photos with caption pages.
///
/// With `auto_fit` photo *i* gets page *i*, or an empty caption once pages run
/// out. Otherwise every photo is rendered once per page, or once with an
/// empty caption when there are no pages.
pub fn plan_cards(photo_count: usize, page_count: usize, auto_fit: bool) -> Vec<CardPlan> {
    if auto_fit {
        return (0..photo_count)
            .map(|i| CardPlan {
                photo_index: i,
                page_index: (i < page_count).then_some(i),
                output_index: i,
            })
            .collect();
    }

    let slots = page_count.max(1);
    let mut plans = Vec::with_capacity(photo_count * slots);
    for photo_index in 0..photo_count {
        for slot in 0..slots {
            plans.push(CardPlan {
                photo_index,
                page_index: (slot < page_count).then_some(slot),
                output_index: plans.len(),
            });
        }
    }
    plans
}

/// `{location}_{store}_{date digits}_{n}.png`, with `n` 1-based.
///
/// Parts are trimmed and inner whitespace runs become `_`; empty parts fall
/// back to `location`, `store` and `date`.
pub fn output_file_name(options: &RenderOptions, output_index: usize) -> String {
    fn underscored(s: &str, fallback: &str) -> String {
        let joined = s.split_whitespace().collect::<Vec<_>>().join("_");
        if joined.is_empty() {
            fallback.to_string()
        } else {
            joined
        }
    }

    let location = underscored(&options.location, "location");
    let store = underscored(&options.store_name, "store");
    let digits: String = options.date.chars().filter(char::is_ascii_digit).collect();
    let date = if digits.is_empty() { "date".to_string() } else { digits };
    format!("{location}_{store}_{date}_{}.png", output_index + 1)
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
