use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::scenario::context::StepContext;

/// One stage of a business flow. Steps are independently constructed and
/// share state only through the injected [`StepContext`].
pub trait Step {
    /// Name shown in reports and failure messages.
    fn name(&self) -> &str;

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), GatewayError>;
}

/// Result of evaluating a single check during a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Step that recorded the check
    pub step: String,

    /// What was checked
    pub description: String,

    /// Whether the check passed
    pub passed: bool,

    /// Expected value (for debugging failed checks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// Actual value found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl CheckResult {
    pub fn passed(step: &str, description: &str) -> Self {
        CheckResult {
            step: step.to_string(),
            description: description.to_string(),
            passed: true,
            expected: None,
            actual: None,
        }
    }

    pub fn failed(step: &str, description: &str, expected: &str, actual: &str) -> Self {
        CheckResult {
            step: step.to_string(),
            description: description.to_string(),
            passed: false,
            expected: Some(expected.to_string()),
            actual: Some(actual.to_string()),
        }
    }
}
