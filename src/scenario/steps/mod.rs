pub mod create_client;
pub mod fact_find;
pub mod launch_app;
pub mod login;
pub mod verify_details;

use crate::scenario::orchestrator::Scenario;

use self::create_client::CreateClientStep;
use self::fact_find::OpenFactFindStep;
use self::launch_app::LaunchPlanningAppStep;
use self::login::LoginStep;
use self::verify_details::VerifyClientDetailsStep;

/// All runnable scenarios, in execution order.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![client_onboarding(), planning_app_handoff()]
}

/// Create a client, open their KYC fact-find, and verify the fact-find
/// displays the identity the client was created with.
pub fn client_onboarding() -> Scenario {
    Scenario::new("client-onboarding")
        .step(LoginStep)
        .step(CreateClientStep::generated())
        .step(OpenFactFindStep)
        .step(VerifyClientDetailsStep::created_vs_fact_find())
}

/// Create a client, open their fact-find, launch the external planning app
/// (same page or new tab), and verify the client identity carried across.
pub fn planning_app_handoff() -> Scenario {
    Scenario::new("planning-app-handoff")
        .step(LoginStep)
        .step(CreateClientStep::generated())
        .step(OpenFactFindStep)
        .step(LaunchPlanningAppStep)
        .step(VerifyClientDetailsStep::fact_find_vs_planning_app())
}
