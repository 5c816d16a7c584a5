mod common;

use std::time::Instant;

use common::fake_page::{FakeElement, FakePage};
use gateway_e2e::alert::detector::{AlertDetector, AlertVariant};
use gateway_e2e::error::GatewayError;

const PROBE_MS: u64 = 40;

fn detector() -> AlertDetector {
    AlertDetector::new()
        .with_probe_timeout(PROBE_MS)
        .with_poll_interval(5)
}

// =========================================================================
// Detection priority order
// =========================================================================

#[test]
fn first_variant_detects_immediately() {
    let mut page = FakePage::new();
    page.add(
        AlertVariant::FrameworkDialog.locators().container,
        FakeElement::visible_empty(),
    );

    let start = Instant::now();
    let alert = detector().detect(&mut page).unwrap();
    let elapsed = start.elapsed().as_millis() as u64;

    assert_eq!(alert.variant, AlertVariant::FrameworkDialog);
    assert!(
        elapsed < PROBE_MS,
        "A visible first variant must not burn any probe budget, took {}ms",
        elapsed
    );
}

#[test]
fn earlier_variant_wins_when_two_are_present() {
    let mut page = FakePage::new();

    // Both the in-page notice and the legacy box expose their markers
    page.add(
        AlertVariant::InlineNotice.locators().container,
        FakeElement::visible_empty(),
    );
    page.add(
        AlertVariant::LegacyDialog.locators().title,
        FakeElement::visible_empty(),
    );
    page.add(
        AlertVariant::LegacyDialog.locators().confirm_button,
        FakeElement::visible_empty(),
    );

    let start = Instant::now();
    let alert = detector().detect(&mut page).unwrap();
    let elapsed = start.elapsed().as_millis() as u64;

    assert_eq!(
        alert.variant,
        AlertVariant::InlineNotice,
        "Lower probe index must win, never the later variant"
    );
    assert!(
        elapsed >= PROBE_MS,
        "The first variant's budget must be exhausted before the second is probed"
    );
    assert!(
        elapsed < PROBE_MS * 2 + 200,
        "Detection must land within the first two budgets, took {}ms",
        elapsed
    );
}

#[test]
fn legacy_variant_detected_by_either_racing_signal() {
    // Only the confirm button renders (heading markup differs per skin)
    let mut page = FakePage::new();
    page.add(
        AlertVariant::LegacyDialog.locators().confirm_button,
        FakeElement::visible_empty(),
    );

    let alert = detector().detect(&mut page).unwrap();
    assert_eq!(alert.variant, AlertVariant::LegacyDialog);

    // And heading alone works too
    let mut page = FakePage::new();
    page.add(
        AlertVariant::LegacyDialog.locators().title,
        FakeElement::visible_empty(),
    );

    let alert = detector().detect(&mut page).unwrap();
    assert_eq!(alert.variant, AlertVariant::LegacyDialog);
}

// =========================================================================
// Exhausted budget
// =========================================================================

#[test]
fn no_variant_fails_typed_within_the_cumulative_budget() {
    let mut page = FakePage::new();

    let start = Instant::now();
    let err = detector().detect(&mut page).unwrap_err();
    let elapsed = start.elapsed().as_millis() as u64;

    assert!(
        matches!(err, GatewayError::NoAlertDetected { waited_ms } if waited_ms == PROBE_MS * 3),
        "Expected NoAlertDetected carrying the full budget, got: {:?}",
        err
    );
    assert!(
        err.to_string().contains("No supported alert type detected"),
        "Message: {}",
        err
    );
    assert!(
        elapsed >= PROBE_MS * 3,
        "Failure cannot come earlier than the cumulative probe time, took {}ms",
        elapsed
    );
    assert!(
        elapsed <= PROBE_MS * 3 + 400,
        "Failure must come promptly after the budget expires, took {}ms",
        elapsed
    );
}

// =========================================================================
// Variant-agnostic workflow through the locator bundle
// =========================================================================

#[test]
fn each_variant_carries_its_own_locator_bundle() {
    let framework = AlertVariant::FrameworkDialog.locators();
    let notice = AlertVariant::InlineNotice.locators();
    let legacy = AlertVariant::LegacyDialog.locators();

    for bundle in [framework, notice, legacy] {
        let selectors = [
            bundle.container,
            bundle.success_icon,
            bundle.title,
            bundle.message,
            bundle.confirm_button,
        ];
        for selector in selectors {
            assert!(!selector.is_empty());
        }
        // Sub-locators are scoped under their variant's container
        for selector in &selectors[1..] {
            assert!(
                selector.starts_with(bundle.container),
                "Sub-locator '{}' should be scoped under '{}'",
                selector,
                bundle.container
            );
        }
    }

    assert_ne!(framework.container, notice.container);
    assert_ne!(notice.container, legacy.container);
}

#[test]
fn detected_alert_reads_and_confirms_through_its_bundle() {
    let mut page = FakePage::new();
    let locators = AlertVariant::InlineNotice.locators();

    page.add(locators.container, FakeElement::visible_empty());
    page.add(locators.success_icon, FakeElement::visible_empty());
    page.add(locators.title, FakeElement::visible_text("Success"));
    page.add(
        locators.message,
        FakeElement::visible_text("  Client   record created  "),
    );
    page.add(locators.confirm_button, FakeElement::visible_empty());

    let alert = detector().detect(&mut page).unwrap();

    assert!(alert.is_success(&mut page).unwrap());
    assert_eq!(alert.read_title(&mut page).unwrap().as_deref(), Some("Success"));
    assert_eq!(
        alert.read_message(&mut page).unwrap().as_deref(),
        Some("Client record created"),
        "Message text must be normalized"
    );

    alert.confirm(&mut page).unwrap();
    assert!(
        page.calls
            .contains(&format!("click {}", locators.confirm_button)),
        "Confirm must click this variant's confirm button"
    );
}
