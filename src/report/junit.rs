use crate::report::report_model::SuiteReport;

// ============================================================================
// JUnit XML reporter — standard CI integration format
// ============================================================================

/// Generate a JUnit XML report for CI systems (Jenkins, GitHub Actions,
/// GitLab CI).
///
/// Produces standard JUnit XML:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="..." tests="2" failures="1" time="8.412">
///   <testcase name="client-onboarding" classname="gateway-e2e" />
///   <testcase name="planning-app-handoff" classname="gateway-e2e">
///     <failure message="1 check(s) failed" type="CheckFailure">
///       verify-client-details: expected 'Jane Autotest42', actual 'Jane A.'
///     </failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &SuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.results {
        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"gateway-e2e\" />\n",
                escape_xml(&result.name)
            ));
        } else {
            let failed_checks: Vec<String> = result
                .checks
                .iter()
                .filter(|c| !c.passed)
                .map(|c| {
                    format!(
                        "{}: expected '{}', actual '{}'",
                        c.step,
                        c.expected.as_deref().unwrap_or("?"),
                        c.actual.as_deref().unwrap_or("?")
                    )
                })
                .collect();

            let failure_count = failed_checks.len();
            let error_detail = result
                .error
                .as_ref()
                .map(|e| format!("Error: {}", e))
                .unwrap_or_default();

            let mut body_parts = failed_checks;
            if !error_detail.is_empty() {
                body_parts.push(error_detail);
            }
            let failure_body = body_parts.join("\n");

            let failure_message = if failure_count > 0 {
                format!("{} check(s) failed", failure_count)
            } else {
                "execution error".to_string()
            };

            cases.push_str(&format!(
                "  <testcase name=\"{name}\" classname=\"gateway-e2e\">\n    <failure message=\"{message}\" type=\"CheckFailure\">{body}</failure>\n  </testcase>\n",
                name = escape_xml(&result.name),
                message = escape_xml(&failure_message),
                body = escape_xml(&failure_body),
            ));
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
