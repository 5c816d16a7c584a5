use crate::error::GatewayError;
use crate::resolve::field::{read_field_text, resolve_field, FieldQuery};
use crate::scenario::context::StepContext;
use crate::scenario::step::Step;
use crate::scenario::steps::create_client::CREATED_FULL_NAME_KEY;

const CLIENT_SEARCH_INPUT: &str = "#clientSearch";
const FIRST_RESULT_LINK: &str = ".search-results .client-row a";

const PERSONAL_DETAILS_SECTION: &str = "Personal Details";
const FULL_NAME_LABEL: &str = "Full Name";
const EMAIL_LABEL: &str = "Email Address";

/// Store keys written by [`OpenFactFindStep`] with the values the fact-find
/// page actually displays.
pub const DISPLAYED_FULL_NAME_KEY: &str = "displayed.kycClient.fullName";
pub const DISPLAYED_EMAIL_KEY: &str = "displayed.kycClient.email";

/// Opens the KYC fact-find for the client created earlier in the scenario
/// and records the personal details the page displays.
pub struct OpenFactFindStep;

impl Step for OpenFactFindStep {
    fn name(&self) -> &str {
        "open-fact-find"
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), GatewayError> {
        // The created client's name must have been stored by an earlier stage
        let client_name = ctx.store.require_str(CREATED_FULL_NAME_KEY)?.to_string();

        let url = format!("{}/kyc/fact-find", ctx.env.base_url.trim_end_matches('/'));
        let timeout = ctx.env.timeout_ms;

        ctx.goto(&url)?;
        ctx.page.wait_network_idle(timeout)?;

        ctx.page.fill(CLIENT_SEARCH_INPUT, &client_name)?;
        ctx.page.wait_visible(FIRST_RESULT_LINK, timeout)?;
        ctx.page.click(FIRST_RESULT_LINK)?;
        ctx.page_changed();

        let full_name = read_displayed(ctx, Some(PERSONAL_DETAILS_SECTION), FULL_NAME_LABEL)?;
        let email = read_displayed(ctx, Some(PERSONAL_DETAILS_SECTION), EMAIL_LABEL)?;

        ctx.store.set_value(DISPLAYED_FULL_NAME_KEY, full_name);
        ctx.store.set_value(DISPLAYED_EMAIL_KEY, email);

        Ok(())
    }
}

/// Read a displayed field, waiting on the resolved selector when resolution
/// found nothing yet. The wait fails with the driver's timeout when the
/// field never renders; a field that renders empty is stored as "".
fn read_displayed(
    ctx: &mut StepContext<'_>,
    section: Option<&str>,
    label: &str,
) -> Result<String, GatewayError> {
    let timeout = ctx.env.timeout_ms;
    let query = FieldQuery::new(section, label);

    let target = resolve_field(ctx.page, ctx.layout, query)?;
    if !target.matched {
        ctx.page.wait_visible(&target.selector, timeout)?;
    }

    Ok(read_field_text(ctx.page, &target)?.unwrap_or_default())
}
