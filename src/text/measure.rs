//! Width measurement seams used by the paginator and caption auto-fit.

use crate::foundation::error::CardResult;

/// Measures the advance width of a single unwrapped line, in pixels.
///
/// Closures `FnMut(&str) -> f32` implement this directly, which keeps
/// pagination testable without font files.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> CardResult<f32>;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn measure(&mut self, text: &str) -> CardResult<f32> {
        Ok(self(text))
    }
}

/// Measures body text at an arbitrary font size.
pub trait FontMetrics {
    fn text_width(&mut self, text: &str, size_px: f32) -> CardResult<f32>;
}

/// Pins a [`FontMetrics`] to one font size.
pub struct AtSize<'a, M: ?Sized> {
    metrics: &'a mut M,
    size_px: f32,
}

impl<'a, M: FontMetrics + ?Sized> AtSize<'a, M> {
    pub fn new(metrics: &'a mut M, size_px: f32) -> Self {
        Self { metrics, size_px }
    }
}

impl<M: FontMetrics + ?Sized> TextMeasure for AtSize<'_, M> {
    fn measure(&mut self, text: &str) -> CardResult<f32> {
        self.metrics.text_width(text, self.size_px)
    }
}
