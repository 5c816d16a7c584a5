use crate::browser::page::PageHandle;
use crate::error::GatewayError;

/// The page-layout conventions Gateway has shipped for rendering the same
/// logical label/value information. Probe order is part of the contract:
/// oldest convention first, matching the order field resolution falls back
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Legacy server-rendered summary table (label cell / value cell rows
    /// inside a captioned grid).
    SummaryGrid,

    /// Component-based detail panel with heading and label/value rows.
    DetailPanel,

    /// Bare form markup; the value element is the DOM sibling adjacent to
    /// its label.
    InlineSibling,
}

impl Layout {
    /// All layouts in probe order.
    pub const ALL: [Layout; 3] = [Layout::SummaryGrid, Layout::DetailPanel, Layout::InlineSibling];

    /// Page-level marker probed by [`LayoutDetector`] to decide which
    /// convention a freshly loaded page uses.
    pub fn marker_selector(&self) -> &'static str {
        match self {
            Layout::SummaryGrid => "table.summary-grid",
            Layout::DetailPanel => ".detail-panel",
            Layout::InlineSibling => ".form-field > label",
        }
    }

    /// Selector for the value element of a labelled field under this
    /// convention, optionally scoped to a titled section.
    pub fn field_selector(&self, section: Option<&str>, label: &str) -> String {
        match self {
            Layout::SummaryGrid => match section {
                Some(section) => format!(
                    "table.summary-grid:has(caption:has-text(\"{}\")) tr:has(td.label-cell:has-text(\"{}\")) td.value-cell",
                    section, label
                ),
                None => format!(
                    "table.summary-grid tr:has(td.label-cell:has-text(\"{}\")) td.value-cell",
                    label
                ),
            },
            Layout::DetailPanel => match section {
                Some(section) => format!(
                    ".detail-panel:has(.panel-heading:has-text(\"{}\")) .detail-row:has(.row-label:has-text(\"{}\")) .row-value",
                    section, label
                ),
                None => format!(
                    ".detail-panel .detail-row:has(.row-label:has-text(\"{}\")) .row-value",
                    label
                ),
            },
            // Sibling traversal: whatever element follows the label
            Layout::InlineSibling => {
                format!(".form-field > label:has-text(\"{}\") + *", label)
            }
        }
    }

    /// Position in the probe order.
    pub fn index(&self) -> usize {
        match self {
            Layout::SummaryGrid => 0,
            Layout::DetailPanel => 1,
            Layout::InlineSibling => 2,
        }
    }
}

/// Detects which layout convention the current page uses, once per page load.
///
/// Markers are probed in [`Layout::ALL`] order and the first with at least
/// one match wins — "first to exist", not "most specific". The result
/// (including "no marker found") is cached until [`LayoutDetector::reset`]
/// is called after a navigation, so field reads do not re-probe the page.
///
/// Known hazard, inherited from the fallback-chain behavior this replaces:
/// stale markup left over from an old layout can shadow the correct later
/// convention on a half-migrated page.
#[derive(Debug, Default)]
pub struct LayoutDetector {
    cached: Option<Option<Layout>>,
}

impl LayoutDetector {
    pub fn new() -> Self {
        LayoutDetector { cached: None }
    }

    /// Return the active layout, probing the page on the first call after a
    /// load and answering from cache afterwards.
    pub fn detect(&mut self, page: &mut dyn PageHandle) -> Result<Option<Layout>, GatewayError> {
        if let Some(cached) = self.cached {
            return Ok(cached);
        }

        let mut found = None;
        for layout in Layout::ALL {
            if page.count(layout.marker_selector())? > 0 {
                found = Some(layout);
                break;
            }
        }

        self.cached = Some(found);
        Ok(found)
    }

    /// Forget the cached layout. Call after every navigation.
    pub fn reset(&mut self) {
        self.cached = None;
    }

    /// Cached detection result, if any probe has run since the last reset.
    pub fn cached(&self) -> Option<Option<Layout>> {
        self.cached
    }
}
