use std::time::{SystemTime, UNIX_EPOCH};

use crate::alert::detector::AlertDetector;
use crate::error::GatewayError;
use crate::scenario::context::{probe_fill, StepContext};
use crate::scenario::step::{CheckResult, Step};

const CLIENT_FORM: &str = "#clientForm";
const FIRST_NAME_INPUT: &str = "#firstName";
const LAST_NAME_INPUT: &str = "#lastName";
const EMAIL_INPUT: &str = "#email";
const PHONE_INPUT: &str = "#phone";
const NOTES_INPUT: &str = "#notes";
const SAVE_BUTTON: &str = "button#saveClient";

/// Store keys written by [`CreateClientStep`] for later stages.
pub const CREATED_FULL_NAME_KEY: &str = "created.gatewayClient.fullName";
pub const CREATED_EMAIL_KEY: &str = "created.gatewayClient.email";

/// Test data for one Gateway client record. Phone and notes are optional in
/// the UI and may be absent from the form entirely in some environments.
#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl ClientRecord {
    /// Generate a unique record for this run, keyed off the wall clock so
    /// repeated runs against the same environment do not collide.
    pub fn generated() -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        ClientRecord {
            first_name: "Jane".into(),
            last_name: format!("Autotest{}", stamp % 1_000_000),
            email: format!("e2e.{}@example.test", stamp),
            phone: Some("07700 900123".into()),
            notes: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Creates a client through the new-client form, confirms the success
/// alert (whichever variant the environment renders), and records the
/// created identity in the store.
pub struct CreateClientStep {
    client: ClientRecord,
}

impl CreateClientStep {
    pub fn new(client: ClientRecord) -> Self {
        CreateClientStep { client }
    }

    pub fn generated() -> Self {
        Self::new(ClientRecord::generated())
    }
}

impl Step for CreateClientStep {
    fn name(&self) -> &str {
        "create-client"
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), GatewayError> {
        let url = format!("{}/clients/new", ctx.env.base_url.trim_end_matches('/'));
        let timeout = ctx.env.timeout_ms;

        ctx.goto(&url)?;
        ctx.page.wait_visible(CLIENT_FORM, timeout)?;

        ctx.page.fill(FIRST_NAME_INPUT, &self.client.first_name)?;
        ctx.page.fill(LAST_NAME_INPUT, &self.client.last_name)?;
        ctx.page.fill(EMAIL_INPUT, &self.client.email)?;

        // Phone and notes fields are optional affordances
        if let Some(phone) = &self.client.phone {
            probe_fill(ctx.page, PHONE_INPUT, phone).into_result()?;
        }
        if let Some(notes) = &self.client.notes {
            probe_fill(ctx.page, NOTES_INPUT, notes).into_result()?;
        }

        ctx.page.click(SAVE_BUTTON)?;

        let alert = AlertDetector::new().detect(ctx.page)?;
        let success = alert.is_success(ctx.page)?;
        let check = if success {
            CheckResult::passed("create-client", "success alert shown")
        } else {
            // Surface whatever the alert said in place of the missing icon
            let message = alert
                .read_message(ctx.page)?
                .unwrap_or_else(|| "none".to_string());
            CheckResult::failed("create-client", "success alert shown", "success icon", &message)
        };
        ctx.record_check(check);

        alert.confirm(ctx.page)?;
        alert.wait_dismissed(ctx.page, timeout)?;
        ctx.page_changed();

        ctx.store
            .set_value(CREATED_FULL_NAME_KEY, self.client.full_name());
        ctx.store
            .set_value(CREATED_EMAIL_KEY, self.client.email.clone());

        Ok(())
    }
}
