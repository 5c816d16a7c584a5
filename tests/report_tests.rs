use gateway_e2e::report::console::format_console_report;
use gateway_e2e::report::junit::{escape_xml, generate_junit_xml};
use gateway_e2e::report::report_model::SuiteReport;
use gateway_e2e::scenario::orchestrator::ScenarioResult;
use gateway_e2e::scenario::step::CheckResult;

fn passing_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        name: name.into(),
        passed: true,
        steps_run: 4,
        checks: vec![CheckResult::passed("create-client", "success alert shown")],
        error: None,
    }
}

fn failing_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        name: name.into(),
        passed: false,
        steps_run: 5,
        checks: vec![CheckResult::failed(
            "verify-client-details",
            "'created.gatewayClient.fullName' matches displayed 'Full Name'",
            "Jane Autotest42",
            "Jane A.",
        )],
        error: Some("Step 'verify-client-details' failed: Field 'Full Name' mismatch".into()),
    }
}

// =========================================================================
// Suite aggregation
// =========================================================================

#[test]
fn suite_report_counts_results() {
    let report = SuiteReport::from_results(
        "Gateway E2E",
        vec![passing_result("a"), failing_result("b"), passing_result("c")],
    );

    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.all_passed());

    let all_green = SuiteReport::from_results("Gateway E2E", vec![passing_result("a")]);
    assert!(all_green.all_passed());
}

// =========================================================================
// Console reporter
// =========================================================================

#[test]
fn console_report_shows_markers_and_failure_detail() {
    let report = SuiteReport::from_results(
        "Gateway E2E",
        vec![passing_result("client-onboarding"), failing_result("planning-app-handoff")],
    )
    .with_duration(8412);

    let out = format_console_report(&report);

    assert!(out.contains("=== Suite: Gateway E2E ==="));
    assert!(out.contains("\u{2713} PASS  client-onboarding"));
    assert!(out.contains("\u{2717} FAIL  planning-app-handoff"));
    assert!(out.contains("expected 'Jane Autotest42'"), "{}", out);
    assert!(out.contains("actual 'Jane A.'"), "{}", out);
    assert!(out.contains("[ERROR]"), "Abort errors are shown: {}", out);
    assert!(out.contains("1 passed, 1 failed (2 total) in 8.4s"), "{}", out);
}

// =========================================================================
// JUnit reporter
// =========================================================================

#[test]
fn junit_report_is_well_formed_for_pass_and_fail() {
    let report = SuiteReport::from_results(
        "Gateway E2E",
        vec![passing_result("client-onboarding"), failing_result("planning-app-handoff")],
    )
    .with_duration(8412);

    let xml = generate_junit_xml(&report);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<testsuite name=\"Gateway E2E\" tests=\"2\" failures=\"1\" time=\"8.412\">"));
    assert!(xml.contains("<testcase name=\"client-onboarding\" classname=\"gateway-e2e\" />"));
    assert!(xml.contains("<failure message=\"1 check(s) failed\" type=\"CheckFailure\">"));
    assert!(xml.contains("expected &apos;Jane Autotest42&apos;"), "{}", xml);
    assert!(xml.ends_with("</testsuite>\n"));
}

#[test]
fn xml_escaping_covers_all_special_characters() {
    assert_eq!(
        escape_xml("<a href=\"x\">Q&A 'quoted'</a>"),
        "&lt;a href=&quot;x&quot;&gt;Q&amp;A &apos;quoted&apos;&lt;/a&gt;"
    );
    assert_eq!(escape_xml("plain text"), "plain text");
}
