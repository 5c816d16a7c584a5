use crate::report::report_model::SuiteReport;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Suite: Gateway E2E ===
///
/// ✓ PASS  client-onboarding (4 steps, 3 checks)
/// ✗ FAIL  planning-app-handoff (5 steps, 1 checks)
///     [FAIL] verify-client-details: 'displayed.kycClient.fullName' matches displayed 'Client Name' (expected 'Jane Autotest42', actual 'Jane A.')
///
/// === Results: 1 passed, 1 failed (2 total) in 8.4s ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Suite: {} ===\n\n", report.suite_name));

    for result in &report.results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} checks)\n",
            marker,
            result.name,
            result.steps_run,
            result.checks.len()
        ));

        // Show error if the scenario aborted
        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        // Show failed checks
        if !result.passed {
            for check in &result.checks {
                if !check.passed {
                    let expected = check.expected.as_deref().unwrap_or("?");
                    let actual = check.actual.as_deref().unwrap_or("?");
                    out.push_str(&format!(
                        "    [FAIL] {}: {} (expected '{}', actual '{}')\n",
                        check.step, check.description, expected, actual
                    ));
                }
            }
        }
    }

    // Summary line
    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}
