use crate::error::GatewayError;
use crate::scenario::context::{probe_click, probe_wait_hidden, StepContext};
use crate::scenario::step::Step;

const USERNAME_INPUT: &str = "#username";
const PASSWORD_INPUT: &str = "#password";
const SIGN_IN_BUTTON: &str = "button[type=\"submit\"].sign-in";
const LOADING_OVERLAY: &str = ".loading-overlay";
const WELCOME_DISMISS: &str = ".welcome-banner button.dismiss";

const LOADING_WAIT_MS: u64 = 2000;

/// Signs into Gateway with the environment's credentials and lands on the
/// dashboard.
pub struct LoginStep;

impl Step for LoginStep {
    fn name(&self) -> &str {
        "login"
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), GatewayError> {
        let url = ctx.env.base_url.clone();
        let timeout = ctx.env.timeout_ms;

        ctx.goto(&url)?;
        ctx.page.wait_visible(USERNAME_INPUT, timeout)?;

        ctx.page.fill(USERNAME_INPUT, &ctx.env.username)?;
        ctx.page.fill(PASSWORD_INPUT, &ctx.env.password)?;
        ctx.page.click(SIGN_IN_BUTTON)?;

        ctx.page.wait_url_contains("/dashboard", timeout)?;
        ctx.page_changed();

        // The overlay may never appear on a fast login; that is fine
        probe_wait_hidden(ctx.page, LOADING_OVERLAY, LOADING_WAIT_MS).into_result()?;

        // First-login welcome banner is optional
        probe_click(ctx.page, WELCOME_DISMISS).into_result()?;

        Ok(())
    }
}
