//! Pixel-width line wrapping and page splitting for review captions.
//!
//! Author line breaks are hard paragraph boundaries. Within a paragraph lines
//! break preferentially after whitespace runs and sentence punctuation
//! (`。！？.!?,`); a run with no such opportunity is cut between characters.
//! Every step consumes at least one character, so wrapping always terminates.

use crate::foundation::error::{CardError, CardResult};
use crate::text::measure::TextMeasure;

/// Steps allowed beyond one per character before wrapping is declared stuck.
const STEP_GUARD_SLACK: usize = 1000;

/// One output image's worth of caption lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    /// Lines in display order, each already trimmed.
    pub lines: Vec<String>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Wrap `text` to `max_width_px` and chunk the lines into pages of at most
/// `max_lines_per_page`.
///
/// Blank input yields no pages, and no returned page is empty.
#[tracing::instrument(skip(text, measure), fields(chars = text.chars().count()))]
pub fn paginate<M: TextMeasure + ?Sized>(
    text: &str,
    max_lines_per_page: usize,
    max_width_px: f32,
    measure: &mut M,
) -> CardResult<Vec<Page>> {
    if max_lines_per_page == 0 {
        return Err(CardError::validation("max_lines_per_page must be > 0"));
    }
    if !max_width_px.is_finite() || max_width_px <= 0.0 {
        return Err(CardError::validation("max_width_px must be finite and > 0"));
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    for paragraph in normalized.trim().split('\n') {
        wrap_paragraph(paragraph.trim(), max_width_px, measure, &mut lines)?;
    }

    let pages: Vec<Page> = lines
        .chunks(max_lines_per_page)
        .map(|chunk| Page {
            lines: chunk.to_vec(),
        })
        .collect();
    tracing::debug!(lines = lines.len(), pages = pages.len(), "paginated caption");
    Ok(pages)
}

/// Greedy-wrap one paragraph, appending finished lines to `out`.
pub fn wrap_paragraph<M: TextMeasure + ?Sized>(
    paragraph: &str,
    max_width_px: f32,
    measure: &mut M,
    out: &mut Vec<String>,
) -> CardResult<()> {
    let guard = paragraph.chars().count() + STEP_GUARD_SLACK;
    let mut rest = paragraph;
    let mut steps = 0usize;

    while !rest.is_empty() {
        steps += 1;
        if steps > guard {
            return Err(CardError::layout(format!(
                "line wrapping made no progress after {guard} steps"
            )));
        }

        match next_break(rest, max_width_px, measure)? {
            Step::Rest => {
                push_trimmed(out, rest);
                break;
            }
            Step::Cut(end) => {
                push_trimmed(out, &rest[..end]);
                rest = rest[end..].trim_start();
            }
            Step::Stuck(end) => {
                // Not even one character fits: it gets a line of its own.
                push_trimmed(out, &rest[..end]);
                rest = rest[end..].trim_start();
            }
        }
    }
    Ok(())
}

enum Step {
    /// The whole remainder fits on one line.
    Rest,
    /// Break after this byte offset; always > 0.
    Cut(usize),
    /// The first character alone is too wide; it ends at this byte offset.
    Stuck(usize),
}

fn next_break<M: TextMeasure + ?Sized>(
    rest: &str,
    max_width_px: f32,
    measure: &mut M,
) -> CardResult<Step> {
    let mut fitted = 0usize;
    let mut last_break = None;

    for token in Tokens::new(rest) {
        if measure.measure(&rest[..token.end])? <= max_width_px {
            fitted = token.end;
            if token.breakable {
                last_break = Some(token.end);
            }
            continue;
        }

        if let Some(end) = last_break {
            return Ok(Step::Cut(end));
        }
        if fitted > 0 {
            return Ok(Step::Cut(fitted));
        }
        return hard_cut(rest, max_width_px, measure);
    }
    Ok(Step::Rest)
}

/// Longest character prefix of `rest` that fits, or `Stuck` with the first
/// character if none does.
fn hard_cut<M: TextMeasure + ?Sized>(
    rest: &str,
    max_width_px: f32,
    measure: &mut M,
) -> CardResult<Step> {
    let mut fitted = 0usize;
    for (idx, ch) in rest.char_indices() {
        let end = idx + ch.len_utf8();
        if measure.measure(&rest[..end])? > max_width_px {
            break;
        }
        fitted = end;
    }
    if fitted == 0 {
        let first = rest.chars().next().map_or(rest.len(), char::len_utf8);
        Ok(Step::Stuck(first))
    } else {
        Ok(Step::Cut(fitted))
    }
}

fn push_trimmed(out: &mut Vec<String>, line: &str) {
    let line = line.trim();
    if !line.is_empty() {
        out.push(line.to_string());
    }
}

fn is_break_punct(c: char) -> bool {
    matches!(c, '\u{3002}' | '\u{FF01}' | '\u{FF1F}' | '.' | '!' | '?' | ',')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token {
    end: usize,
    breakable: bool,
}

/// Splits text into words, whitespace runs and single punctuation marks.
/// Whitespace runs and punctuation are break opportunities.
struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;

        let len = if first.is_whitespace() {
            rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len())
        } else if is_break_punct(first) {
            first.len_utf8()
        } else {
            rest.find(|c: char| c.is_whitespace() || is_break_punct(c))
                .unwrap_or(rest.len())
        };

        self.pos += len;
        Some(Token {
            end: self.pos,
            breakable: first.is_whitespace() || is_break_punct(first),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/paginate.rs"]
mod tests;
