use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::error::GatewayError;
use crate::report::console::format_console_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::SuiteReport;
use crate::scenario::steps::builtin_scenarios;

// ============================================================================
// run subcommand
// ============================================================================

/// Run scenarios and return whether all passed.
///
/// Scenarios run serially against one browser session; there is no
/// cross-scenario parallelism by design, so a single session is enough and
/// the page is never contended.
pub fn cmd_run(
    config: &AppConfig,
    env_name: &str,
    scenario_filter: Option<&str>,
    format: &str,
    output: Option<&str>,
    verbose: u8,
) -> Result<bool, GatewayError> {
    let env = config.environment(env_name)?;

    let scenarios: Vec<_> = builtin_scenarios()
        .into_iter()
        .filter(|s| scenario_filter.is_none_or(|f| s.name == f))
        .collect();

    if scenarios.is_empty() {
        if let Some(filter) = scenario_filter {
            return Err(GatewayError::Config(format!(
                "No scenario named '{}'",
                filter
            )));
        }
        eprintln!("No scenarios to run");
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!(
            "Running {} scenario(s) against '{}' ({})...",
            scenarios.len(),
            env_name,
            env.base_url
        );
    }

    let mut session = BrowserSession::launch()?;
    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for scenario in &scenarios {
        if verbose > 0 {
            eprintln!("  Running: {}", scenario.name);
        }
        let result = scenario.run(&mut session, env);
        if verbose > 1 {
            eprintln!(
                "    {} ({} steps run)",
                if result.passed { "passed" } else { "FAILED" },
                result.steps_run
            );
        }
        results.push(result);
    }

    let duration = start.elapsed().as_millis();
    session.quit()?;

    let report = SuiteReport::from_results(&config.suite_name, results).with_duration(duration);
    let all_passed = report.all_passed();

    let output_content = match format {
        "junit" => generate_junit_xml(&report),
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &output_content).map_err(|e| {
                GatewayError::Config(format!("Cannot write report to '{}': {}", path, e))
            })?;
            if verbose > 0 {
                eprintln!("Report written to {}", path);
            }
        }
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list() {
    for scenario in builtin_scenarios() {
        println!("{} ({} steps)", scenario.name, scenario.step_count());
    }
}
