// ChatCut - core/render.rs
//
// Display construction: turn a message plus its overlay into a sequence of
// rendered spans the presentation layer can draw without re-deriving any
// edit semantics.
// Core layer: pure logic, codepoint-addressed throughout (never bytes).

use crate::core::model::{CharRange, EditOverlay, Message, RenderedSpan, SpanKind};
use crate::util::constants::MASK_GLYPH;

/// Build the rendered span sequence for one message.
///
/// Resolution order:
/// 1. Non-text kinds render as their fixed placeholder label; overlays do
///    not apply to them.
/// 2. Full redaction: one masked span, one mask glyph per codepoint of the
///    effective text — the count is visible, the content is not.
/// 3. Partial redaction: alternating plain/masked spans from the normalised
///    ranges. Ranges address the effective text, i.e. the substituted text
///    when a substitution is present (substitution first, then masking).
/// 4. Otherwise the effective text as one plain span, with an optional
///    highlighted sub-span for an active search query. Redaction wins over
///    highlighting.
pub fn render_text(
    message: &Message,
    overlay: Option<&EditOverlay>,
    query: Option<&str>,
) -> Vec<RenderedSpan> {
    if let Some(label) = message.kind.placeholder_label() {
        return vec![RenderedSpan::new(SpanKind::Placeholder, label)];
    }

    let text = overlay
        .and_then(|o| o.substitute_text.as_deref())
        .unwrap_or(&message.text);
    let chars: Vec<char> = text.chars().collect();

    if let Some(overlay) = overlay {
        if overlay.full_redaction {
            return vec![masked_span(chars.len())];
        }
        if !overlay.partial_redaction.is_empty() {
            return render_partial(&chars, &overlay.partial_redaction);
        }
    }

    match query {
        Some(q) if !q.is_empty() => render_highlighted(&chars, q),
        _ => vec![RenderedSpan::new(SpanKind::Plain, text)],
    }
}

/// One masked span of `count` mask glyphs.
fn masked_span(count: usize) -> RenderedSpan {
    RenderedSpan::new(SpanKind::Masked, MASK_GLYPH.to_string().repeat(count))
}

fn plain_span(chars: &[char]) -> RenderedSpan {
    RenderedSpan::new(SpanKind::Plain, chars.iter().collect::<String>())
}

/// Walk the codepoint sequence once, emitting alternating plain/masked
/// spans from the ranges sorted by start.
///
/// Tolerance rules: `end` is clamped to the text length, a range with
/// `start >= end` is a no-op, and overlapping ranges merge so that each
/// codepoint is masked at most once — the rendered codepoint count always
/// equals the text's codepoint count.
fn render_partial(chars: &[char], ranges: &[CharRange]) -> Vec<RenderedSpan> {
    let len = chars.len();
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.start);

    let mut spans = Vec::new();
    let mut pos = 0;
    for range in sorted {
        if range.is_degenerate() {
            continue;
        }
        let start = range.start.max(pos).min(len);
        let end = range.end.min(len);
        if end <= start {
            continue;
        }
        if pos < start {
            spans.push(plain_span(&chars[pos..start]));
        }
        spans.push(masked_span(end - start));
        pos = end;
    }
    if pos < len {
        spans.push(plain_span(&chars[pos..]));
    }
    if spans.is_empty() {
        // Every range was a no-op; fall back to the untouched text.
        spans.push(plain_span(chars));
    }
    spans
}

/// Plain text with the first case-insensitive occurrence of `query`
/// emphasised, or a single plain span when there is no hit.
fn render_highlighted(chars: &[char], query: &str) -> Vec<RenderedSpan> {
    match find_case_insensitive(chars, query) {
        Some((start, end)) => {
            let mut spans = Vec::new();
            if start > 0 {
                spans.push(plain_span(&chars[..start]));
            }
            spans.push(RenderedSpan::new(
                SpanKind::Highlight,
                chars[start..end].iter().collect::<String>(),
            ));
            if end < chars.len() {
                spans.push(plain_span(&chars[end..]));
            }
            spans
        }
        None => vec![plain_span(chars)],
    }
}

/// Simple one-to-one case fold; exact for ASCII and a no-op for scripts
/// without case (which covers chat exports in practice).
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Codepoint range of the first case-insensitive occurrence of `query`.
fn find_case_insensitive(chars: &[char], query: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = query.chars().map(fold_char).collect();
    if needle.is_empty() || needle.len() > chars.len() {
        return None;
    }
    let hay: Vec<char> = chars.iter().map(|&c| fold_char(c)).collect();
    hay.windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}
