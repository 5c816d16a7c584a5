use crate::error::GatewayError;
use crate::scenario::context::StepContext;
use crate::scenario::orchestrator::launch_via;
use crate::scenario::step::Step;

const LAUNCH_BUTTON: &str = "#launchPlanning a.launch-button";

/// Store key: whether the planning app opened in a new tab (`true`) or took
/// over the current page (`false`).
pub const PLANNING_NEW_TAB_KEY: &str = "session.planningApp.newTab";

/// Launches the external planning application from the fact-find page. The
/// app opens in a new tab in most environments but reuses the current page
/// in others; both outcomes are valid.
pub struct LaunchPlanningAppStep;

impl Step for LaunchPlanningAppStep {
    fn name(&self) -> &str {
        "launch-planning-app"
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), GatewayError> {
        let timeout = ctx.env.timeout_ms;

        let new_tab = launch_via(ctx.page, LAUNCH_BUTTON, timeout)?;
        ctx.store.set_value(PLANNING_NEW_TAB_KEY, new_tab.is_some());

        // Whichever target we ended up on, let the app settle before the
        // next stage reads from it
        ctx.page.wait_network_idle(timeout)?;
        ctx.page_changed();

        Ok(())
    }
}
