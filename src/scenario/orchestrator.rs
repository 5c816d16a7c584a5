use serde::{Deserialize, Serialize};

use crate::browser::page::{PageHandle, TabId};
use crate::cli::config::Environment;
use crate::error::GatewayError;
use crate::resolve::field::{read_field, FieldQuery};
use crate::resolve::layout::LayoutDetector;
use crate::scenario::context::StepContext;
use crate::scenario::step::{CheckResult, Step};
use crate::store::keyed_store::ScenarioStore;

/// Result of running a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Name of the scenario that was run
    pub name: String,

    /// Whether all steps and checks passed
    pub passed: bool,

    /// Number of steps that were executed
    pub steps_run: usize,

    /// All check results collected during the run
    pub checks: Vec<CheckResult>,

    /// Error message if the scenario aborted (not a check failure)
    pub error: Option<String>,
}

/// A named, ordered composition of independent steps.
///
/// `run` gives the steps a fresh scenario-scoped store and layout detector,
/// executes them serially against one page handle, and aborts at the first
/// failing step. Steps pass results forward through return values written to
/// the store; later steps read them back rather than re-deriving them.
pub struct Scenario {
    pub name: String,
    steps: Vec<Box<dyn Step>>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Scenario {
            name: name.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Run every step in order against the given page and environment.
    pub fn run(&self, page: &mut dyn PageHandle, env: &Environment) -> ScenarioResult {
        let mut store = ScenarioStore::new();
        let mut layout = LayoutDetector::new();
        let mut checks: Vec<CheckResult> = Vec::new();

        for (i, step) in self.steps.iter().enumerate() {
            let mut ctx = StepContext {
                page: &mut *page,
                store: &mut store,
                env,
                layout: &mut layout,
                checks: &mut checks,
            };

            if let Err(e) = step.run(&mut ctx) {
                return ScenarioResult {
                    name: self.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    checks,
                    error: Some(format!("Step '{}' failed: {}", step.name(), e)),
                };
            }
        }

        let passed = checks.iter().all(|c| c.passed);
        ScenarioResult {
            name: self.name.clone(),
            passed,
            steps_run: self.steps.len(),
            checks,
            error: None,
        }
    }
}

/// Trigger an action that may open a new browser tab or stay on the same
/// page.
///
/// The new-tab listener is armed *before* the click — listening afterwards
/// risks missing the event when the tab opens synchronously with the
/// trigger. When a tab appears within the timeout it becomes the active
/// target and its id is returned; when none does, the original page stays
/// active and the result is `None`, not an error.
pub fn launch_via(
    page: &mut dyn PageHandle,
    trigger_selector: &str,
    timeout_ms: u64,
) -> Result<Option<TabId>, GatewayError> {
    page.expect_new_tab()?;
    page.click(trigger_selector)?;

    match page.wait_new_tab(timeout_ms)? {
        Some(tab) => {
            page.switch_tab(tab)?;
            Ok(Some(tab))
        }
        None => Ok(None),
    }
}

/// Whether a stored expected value matches a freshly-read displayed value
/// after display normalization.
pub fn stored_matches_displayed(expected: &str, displayed_raw: &str) -> bool {
    crate::resolve::field::normalize_display_text(displayed_raw) == expected
}

/// Compare a value an earlier stage wrote to the store against the field
/// currently displayed on the active page.
///
/// The store is the single source of truth for the expected value; it is
/// never re-derived here. Produces a [`CheckResult`] either way; a missing
/// store key is an error (the earlier stage did not run or did not store).
pub fn verify_stored_field(
    page: &mut dyn PageHandle,
    layout: &mut LayoutDetector,
    store: &ScenarioStore,
    step_name: &str,
    key: &str,
    query: FieldQuery<'_>,
) -> Result<CheckResult, GatewayError> {
    let expected = store.require_str(key)?;
    let displayed = read_field(page, layout, query)?;

    let description = format!("'{}' matches displayed '{}'", key, query.label);
    Ok(match displayed {
        Some(actual) if actual == expected => CheckResult::passed(step_name, &description),
        Some(actual) => CheckResult::failed(step_name, &description, expected, &actual),
        None => CheckResult::failed(step_name, &description, expected, "(no text found)"),
    })
}
