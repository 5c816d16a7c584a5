use crate::browser::page::PageHandle;
use crate::cli::config::Environment;
use crate::error::GatewayError;
use crate::resolve::layout::LayoutDetector;
use crate::scenario::step::CheckResult;
use crate::store::keyed_store::ScenarioStore;

/// Capability bundle handed to every step's `run`.
///
/// Steps receive their collaborators by composition instead of inheriting a
/// pre-wired base class: the page handle, the scenario-scoped store, the
/// resolved environment, the per-page layout detector, and the sink for
/// check results all arrive through this one context.
pub struct StepContext<'a> {
    pub page: &'a mut dyn PageHandle,
    pub store: &'a mut ScenarioStore,
    pub env: &'a Environment,
    pub layout: &'a mut LayoutDetector,
    pub checks: &'a mut Vec<CheckResult>,
}

impl<'a> StepContext<'a> {
    /// Navigate and invalidate the cached layout for the new page.
    pub fn goto(&mut self, url: &str) -> Result<(), GatewayError> {
        self.page.navigate(url)?;
        self.layout.reset();
        Ok(())
    }

    /// Tell the layout detector the page content changed without a
    /// navigation (in-page section switch, tab switch).
    pub fn page_changed(&mut self) {
        self.layout.reset();
    }

    pub fn record_check(&mut self, check: CheckResult) {
        self.checks.push(check);
    }
}

/// Outcome of probing for an optional UI element.
///
/// Replaces a silent catch-and-ignore wrapper: `Absent` (the element is
/// legitimately not there) is separated from `Failed` (a genuine error), so
/// callers explicitly discard only the absent case. Use for optional form
/// fields and affordances only, never for anything whose absence should
/// fail the scenario.
#[derive(Debug)]
pub enum Probe<T> {
    Found(T),
    Absent,
    Failed(GatewayError),
}

impl<T> Probe<T> {
    /// Classify a driver result: a bounded-wait expiry means the element is
    /// absent, anything else is a real failure.
    pub fn from_result(result: Result<T, GatewayError>) -> Self {
        match result {
            Ok(value) => Probe::Found(value),
            Err(e) if e.is_timeout() => Probe::Absent,
            Err(e) => Probe::Failed(e),
        }
    }

    /// Collapse to a `Result`, keeping genuine errors loud. The caller
    /// drops the `None` (absent) case explicitly.
    pub fn into_result(self) -> Result<Option<T>, GatewayError> {
        match self {
            Probe::Found(value) => Ok(Some(value)),
            Probe::Absent => Ok(None),
            Probe::Failed(e) => Err(e),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Probe::Absent)
    }
}

/// Fill an input that may or may not be on the page.
pub fn probe_fill(
    page: &mut dyn PageHandle,
    selector: &str,
    value: &str,
) -> Probe<()> {
    match page.count(selector) {
        Ok(0) => Probe::Absent,
        Ok(_) => Probe::from_result(page.fill(selector, value)),
        Err(e) => Probe::Failed(e),
    }
}

/// Click an affordance that may or may not be on the page.
pub fn probe_click(page: &mut dyn PageHandle, selector: &str) -> Probe<()> {
    match page.count(selector) {
        Ok(0) => Probe::Absent,
        Ok(_) => Probe::from_result(page.click(selector)),
        Err(e) => Probe::Failed(e),
    }
}

/// Wait for a loading indicator to clear; an indicator that never appeared
/// (wait timing out) counts as absent, not a failure.
pub fn probe_wait_hidden(
    page: &mut dyn PageHandle,
    selector: &str,
    timeout_ms: u64,
) -> Probe<()> {
    Probe::from_result(page.wait_hidden(selector, timeout_ms))
}
