use crate::error::GatewayError;
use crate::resolve::field::FieldQuery;
use crate::scenario::context::StepContext;
use crate::scenario::orchestrator::verify_stored_field;
use crate::scenario::step::Step;
use crate::scenario::steps::create_client::{CREATED_EMAIL_KEY, CREATED_FULL_NAME_KEY};
use crate::scenario::steps::fact_find::DISPLAYED_FULL_NAME_KEY;

/// One stored-vs-displayed comparison: the store key holding the expected
/// value and the labelled field to read it back from.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub key: String,
    pub section: Option<String>,
    pub label: String,
}

impl FieldCheck {
    pub fn new(key: &str, section: Option<&str>, label: &str) -> Self {
        FieldCheck {
            key: key.to_string(),
            section: section.map(|s| s.to_string()),
            label: label.to_string(),
        }
    }
}

/// Compares values stored by earlier stages against the fields the current
/// page displays. Every configured field is checked and recorded; the step
/// then fails hard on the first mismatch.
pub struct VerifyClientDetailsStep {
    fields: Vec<FieldCheck>,
}

impl VerifyClientDetailsStep {
    pub fn new(fields: Vec<FieldCheck>) -> Self {
        VerifyClientDetailsStep { fields }
    }

    /// Checks that the fact-find page displays the identity the client was
    /// created with.
    pub fn created_vs_fact_find() -> Self {
        Self::new(vec![
            FieldCheck::new(CREATED_FULL_NAME_KEY, Some("Personal Details"), "Full Name"),
            FieldCheck::new(CREATED_EMAIL_KEY, Some("Personal Details"), "Email Address"),
        ])
    }

    /// Checks that the planning app shows the same client the fact-find
    /// page displayed before the handoff.
    pub fn fact_find_vs_planning_app() -> Self {
        Self::new(vec![FieldCheck::new(
            DISPLAYED_FULL_NAME_KEY,
            None,
            "Client Name",
        )])
    }
}

impl Step for VerifyClientDetailsStep {
    fn name(&self) -> &str {
        "verify-client-details"
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), GatewayError> {
        let mut first_failure: Option<GatewayError> = None;

        for field in &self.fields {
            let query = FieldQuery::new(field.section.as_deref(), &field.label);
            let check = verify_stored_field(
                ctx.page,
                ctx.layout,
                ctx.store,
                "verify-client-details",
                &field.key,
                query,
            )?;

            if !check.passed && first_failure.is_none() {
                first_failure = Some(GatewayError::ValueMismatch {
                    field: field.label.clone(),
                    expected: check.expected.clone().unwrap_or_default(),
                    actual: check.actual.clone().unwrap_or_default(),
                });
            }

            ctx.record_check(check);
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
