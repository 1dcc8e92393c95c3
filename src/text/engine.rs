use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};
use crate::text::measure::FontMetrics;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    /// Opaque white, the caption color.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Font file bytes shared between layout (Parley) and drawing (vello_cpu).
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    draw: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Wrap raw TrueType/OpenType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> CardResult<Self> {
        if bytes.is_empty() {
            return Err(CardError::validation("font bytes must be non-empty"));
        }
        let draw =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            draw,
        })
    }

    /// Read a font file from disk.
    pub fn load(path: &Path) -> CardResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub(crate) fn draw_data(&self) -> &vello_cpu::peniko::FontData {
        &self.draw
    }

    fn key(&self) -> usize {
        Arc::as_ptr(&self.bytes) as usize
    }
}

/// Regular and bold faces of the caption font family.
#[derive(Clone, Debug)]
pub struct FontSet {
    /// Body text face.
    pub regular: FontFace,
    /// Header and watermark face; the regular face stands in when absent.
    pub bold: Option<FontFace>,
}

impl FontSet {
    pub fn new(regular: FontFace, bold: Option<FontFace>) -> Self {
        Self { regular, bold }
    }

    pub fn bold_or_regular(&self) -> &FontFace {
        self.bold.as_ref().unwrap_or(&self.regular)
    }
}

/// Stateful helper for building single-line Parley layouts from font faces.
///
/// One engine per thread; faces are registered with the font collection on
/// first use and their family names cached afterwards.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<usize, (Arc<Vec<u8>>, String)>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &FontFace) -> CardResult<String> {
        if let Some((_, name)) = self.families.get(&face.key()) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::validation("registered font family has no name"))?
            .to_string();

        self.families
            .insert(face.key(), (face.bytes.clone(), family_name.clone()));
        Ok(family_name)
    }

    /// Shape `text` as one unwrapped line.
    pub fn layout_line(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    /// Advance width of `text` as one line.
    pub fn measure(&mut self, text: &str, face: &FontFace, size_px: f32) -> CardResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, face, size_px, TextBrushRgba8::WHITE)?;
        Ok(layout.full_width())
    }
}

/// [`FontMetrics`] backed by a layout engine and one face.
pub struct FaceMetrics<'a> {
    engine: &'a mut TextLayoutEngine,
    face: &'a FontFace,
}

impl<'a> FaceMetrics<'a> {
    pub fn new(engine: &'a mut TextLayoutEngine, face: &'a FontFace) -> Self {
        Self { engine, face }
    }
}

impl FontMetrics for FaceMetrics<'_> {
    fn text_width(&mut self, text: &str, size_px: f32) -> CardResult<f32> {
        self.engine.measure(text, self.face, size_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
