use std::time::{Duration, Instant};

use crate::browser::page::PageHandle;
use crate::error::GatewayError;
use crate::resolve::field::normalize_display_text;

/// The mutually-exclusive alert implementations Gateway may render. Probe
/// order follows the rollout sequence of the deployments and is part of the
/// contract — do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    /// Library-standard modal dialog.
    FrameworkDialog,

    /// Custom in-page notice component.
    InlineNotice,

    /// Legacy alert box markup.
    LegacyDialog,
}

/// Fixed bundle of sub-locators selected by a detected variant. Everything
/// downstream of detection (assert, read, confirm, dismiss) is
/// variant-agnostic through this bundle.
#[derive(Debug, Clone, Copy)]
pub struct AlertLocators {
    pub container: &'static str,
    pub success_icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_button: &'static str,
}

const FRAMEWORK_DIALOG: AlertLocators = AlertLocators {
    container: ".modal-dialog",
    success_icon: ".modal-dialog .icon-success",
    title: ".modal-dialog .modal-title",
    message: ".modal-dialog .modal-body",
    confirm_button: ".modal-dialog button.btn-confirm",
};

const INLINE_NOTICE: AlertLocators = AlertLocators {
    container: ".gw-notice",
    success_icon: ".gw-notice .notice-icon--success",
    title: ".gw-notice .notice-title",
    message: ".gw-notice .notice-message",
    confirm_button: ".gw-notice button.notice-ok",
};

const LEGACY_DIALOG: AlertLocators = AlertLocators {
    container: "#legacyAlertBox",
    success_icon: "#legacyAlertBox img.success-icon",
    title: "#legacyAlertBox .alert-heading",
    message: "#legacyAlertBox .alert-text",
    confirm_button: "#legacyAlertBox input[type=\"button\"].alert-ok",
};

impl AlertVariant {
    pub fn locators(&self) -> &'static AlertLocators {
        match self {
            AlertVariant::FrameworkDialog => &FRAMEWORK_DIALOG,
            AlertVariant::InlineNotice => &INLINE_NOTICE,
            AlertVariant::LegacyDialog => &LEGACY_DIALOG,
        }
    }
}

/// An alert whose variant has been identified on the current page.
#[derive(Debug, Clone, Copy)]
pub struct DetectedAlert {
    pub variant: AlertVariant,
}

impl DetectedAlert {
    pub fn locators(&self) -> &'static AlertLocators {
        self.variant.locators()
    }

    /// Normalized title text, `None` when the title element has no text.
    pub fn read_title(&self, page: &mut dyn PageHandle) -> Result<Option<String>, GatewayError> {
        read_normalized(page, self.locators().title)
    }

    /// Normalized message text, `None` when the message element has no text.
    pub fn read_message(&self, page: &mut dyn PageHandle) -> Result<Option<String>, GatewayError> {
        read_normalized(page, self.locators().message)
    }

    /// Whether the success icon is currently shown.
    pub fn is_success(&self, page: &mut dyn PageHandle) -> Result<bool, GatewayError> {
        page.is_visible(self.locators().success_icon)
    }

    /// Click the confirm button.
    pub fn confirm(&self, page: &mut dyn PageHandle) -> Result<(), GatewayError> {
        page.click(self.locators().confirm_button)
    }

    /// Wait for the container to leave the page after confirmation.
    pub fn wait_dismissed(
        &self,
        page: &mut dyn PageHandle,
        timeout_ms: u64,
    ) -> Result<(), GatewayError> {
        page.wait_hidden(self.locators().container, timeout_ms)
    }
}

fn read_normalized(
    page: &mut dyn PageHandle,
    selector: &str,
) -> Result<Option<String>, GatewayError> {
    Ok(page
        .text(selector)?
        .map(|raw| normalize_display_text(&raw))
        .filter(|t| !t.is_empty()))
}

/// Probes for the alert variant currently displayed, without prior knowledge
/// of which one to expect.
///
/// The probe is sequential, not parallel: each variant is checked to
/// exhaustion of its bounded timeout before the next is tried, so worst-case
/// latency is the sum of the per-variant budgets and a partially-rendered
/// competing variant cannot produce a false positive. The legacy variant is
/// probed by racing two signals (heading and confirm button) inside one
/// shared budget, first to become visible wins.
#[derive(Debug, Clone, Copy)]
pub struct AlertDetector {
    probe_timeout_ms: u64,
    poll_interval_ms: u64,
}

impl AlertDetector {
    pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;

    pub fn new() -> Self {
        AlertDetector {
            probe_timeout_ms: Self::DEFAULT_PROBE_TIMEOUT_MS,
            poll_interval_ms: 100,
        }
    }

    /// Override the per-variant probe budget.
    pub fn with_probe_timeout(mut self, timeout_ms: u64) -> Self {
        self.probe_timeout_ms = timeout_ms;
        self
    }

    /// Override the poll interval used by the legacy two-signal race.
    pub fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Worst-case total probe time across all variants.
    pub fn budget_ms(&self) -> u64 {
        self.probe_timeout_ms * 3
    }

    /// Identify the alert currently displayed, or fail with
    /// [`GatewayError::NoAlertDetected`] once every variant's budget is
    /// exhausted.
    pub fn detect(&self, page: &mut dyn PageHandle) -> Result<DetectedAlert, GatewayError> {
        // Variants with a single container signal, in rollout order
        for variant in [AlertVariant::FrameworkDialog, AlertVariant::InlineNotice] {
            match page.wait_visible(variant.locators().container, self.probe_timeout_ms) {
                Ok(()) => return Ok(DetectedAlert { variant }),
                Err(e) if e.is_timeout() => continue,
                Err(e) => return Err(e),
            }
        }

        // Legacy markup renders its heading and button independently; race
        // both signals within one budget
        let legacy = AlertVariant::LegacyDialog.locators();
        if self.race_visible(page, &[legacy.title, legacy.confirm_button])? {
            return Ok(DetectedAlert {
                variant: AlertVariant::LegacyDialog,
            });
        }

        Err(GatewayError::NoAlertDetected {
            waited_ms: self.budget_ms(),
        })
    }

    /// Poll the given selectors until one is visible or the probe budget
    /// runs out. Returns whether any became visible.
    fn race_visible(
        &self,
        page: &mut dyn PageHandle,
        selectors: &[&str],
    ) -> Result<bool, GatewayError> {
        let deadline = Instant::now() + Duration::from_millis(self.probe_timeout_ms);

        loop {
            for selector in selectors {
                if page.is_visible(selector)? {
                    return Ok(true);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }

            let remaining = deadline - now;
            std::thread::sleep(remaining.min(Duration::from_millis(self.poll_interval_ms)));
        }
    }
}

impl Default for AlertDetector {
    fn default() -> Self {
        Self::new()
    }
}
