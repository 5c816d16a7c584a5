use crate::browser::page::PageHandle;
use crate::error::GatewayError;
use crate::resolve::layout::{Layout, LayoutDetector};

/// A label/value lookup against the current page.
#[derive(Debug, Clone, Copy)]
pub struct FieldQuery<'a> {
    /// Titled section or panel scoping the label, when the page has one.
    pub section: Option<&'a str>,

    /// Human-readable label or header text identifying the field.
    pub label: &'a str,
}

impl<'a> FieldQuery<'a> {
    pub fn new(section: Option<&'a str>, label: &'a str) -> Self {
        FieldQuery { section, label }
    }
}

/// Outcome of resolving a [`FieldQuery`] to a concrete selector.
#[derive(Debug, Clone)]
pub struct FieldTarget {
    /// The layout convention whose strategy produced the selector.
    pub layout: Layout,

    /// Selector for the value element.
    pub selector: String,

    /// Whether the selector had at least one match at resolution time.
    /// `false` means no strategy matched and this is the final strategy's
    /// selector, returned so the caller's next wait fails with the driver's
    /// timeout instead of an error here.
    pub matched: bool,
}

/// Resolve a labelled field to a concrete selector across Gateway's layout
/// conventions.
///
/// Candidates are evaluated in [`Layout::ALL`] order, starting from the
/// layout the detector found for this page (earlier layouts were already
/// proven absent by their marker probe). The first candidate whose field
/// selector currently matches at least one element wins. This is a static
/// "count > 0 wins" choice made before any visibility or content check; it
/// is not "most specific", and duplicate labels or stale markup can make it
/// pick the wrong element.
pub fn resolve_field(
    page: &mut dyn PageHandle,
    detector: &mut LayoutDetector,
    query: FieldQuery<'_>,
) -> Result<FieldTarget, GatewayError> {
    let start = match detector.detect(page)? {
        Some(layout) => layout.index(),
        // No marker on this page: probe every field strategy anyway
        None => 0,
    };

    let mut last: Option<FieldTarget> = None;
    for layout in &Layout::ALL[start..] {
        let selector = layout.field_selector(query.section, query.label);
        if page.count(&selector)? > 0 {
            return Ok(FieldTarget {
                layout: *layout,
                selector,
                matched: true,
            });
        }
        last = Some(FieldTarget {
            layout: *layout,
            selector,
            matched: false,
        });
    }

    // Nothing matched: hand back the lowest-priority selector unmatched
    Ok(last.unwrap_or_else(|| {
        let layout = Layout::InlineSibling;
        FieldTarget {
            layout,
            selector: layout.field_selector(query.section, query.label),
            matched: false,
        }
    }))
}

/// Read the displayed text of a resolved field.
///
/// Cells render either a link or a plain value, so extraction prefers an
/// anchor-tag child, then a span-tag child, then the element's own text.
/// The result is normalized via [`normalize_display_text`]; `None` means no
/// non-empty text was found under any of the three.
pub fn read_field_text(
    page: &mut dyn PageHandle,
    target: &FieldTarget,
) -> Result<Option<String>, GatewayError> {
    let candidates = [
        format!("{} a", target.selector),
        format!("{} span", target.selector),
        target.selector.clone(),
    ];

    for selector in &candidates {
        if let Some(raw) = page.text(selector)? {
            let text = normalize_display_text(&raw);
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
    }

    Ok(None)
}

/// Resolve a labelled field and read its displayed text in one go.
pub fn read_field(
    page: &mut dyn PageHandle,
    detector: &mut LayoutDetector,
    query: FieldQuery<'_>,
) -> Result<Option<String>, GatewayError> {
    let target = resolve_field(page, detector, query)?;
    read_field_text(page, &target)
}

/// Normalize displayed text: collapse whitespace runs to a single space,
/// trim, and strip wrapping quote characters. Idempotent.
pub fn normalize_display_text(raw: &str) -> String {
    let mut text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    while let Some(inner) = strip_wrapping_quotes(&text) {
        text = inner.trim().to_string();
    }

    text
}

/// Strip one pair of wrapping quotes, straight or curly. `None` when the
/// string is not quote-wrapped.
fn strip_wrapping_quotes(s: &str) -> Option<&str> {
    const PAIRS: [(char, char); 4] = [
        ('"', '"'),
        ('\'', '\''),
        ('\u{201C}', '\u{201D}'),
        ('\u{2018}', '\u{2019}'),
    ];

    let first = s.chars().next()?;
    let last = s.chars().next_back()?;
    if s.chars().count() < 2 {
        return None;
    }

    for (open, close) in PAIRS {
        if first == open && last == close {
            return Some(&s[open.len_utf8()..s.len() - close.len_utf8()]);
        }
    }

    None
}
