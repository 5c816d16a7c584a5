use crate::error::GatewayError;

/// Identifies a browser tab within a session. The driver assigns these when a
/// new tab is observed; `TabId(0)` is always the original page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u32);

impl TabId {
    pub const ORIGINAL: TabId = TabId(0);
}

/// The browser capability surface consumed by the rest of the suite.
///
/// Steps and helpers receive this as an injected bundle rather than
/// inheriting it, so the same flow code runs against the real Node-backed
/// [`crate::browser::session::BrowserSession`] or an in-memory fake in tests.
///
/// Every wait takes an explicit timeout in milliseconds and fails with the
/// driver's native [`GatewayError::WaitTimeout`] on expiry; there is no
/// unbounded wait on this surface.
pub trait PageHandle {
    /// Navigate the active tab to a URL.
    fn navigate(&mut self, url: &str) -> Result<(), GatewayError>;

    /// Current URL of the active tab.
    fn current_url(&mut self) -> Result<String, GatewayError>;

    /// Click the first element matching the selector.
    fn click(&mut self, selector: &str) -> Result<(), GatewayError>;

    /// Fill an input matching the selector.
    fn fill(&mut self, selector: &str, value: &str) -> Result<(), GatewayError>;

    /// Text content of the first match, `None` if nothing matches.
    fn text(&mut self, selector: &str) -> Result<Option<String>, GatewayError>;

    /// Number of elements currently matching the selector.
    fn count(&mut self, selector: &str) -> Result<u32, GatewayError>;

    /// Whether the first match is currently visible.
    fn is_visible(&mut self, selector: &str) -> Result<bool, GatewayError>;

    /// Wait for the selector to become visible.
    fn wait_visible(&mut self, selector: &str, timeout_ms: u64) -> Result<(), GatewayError>;

    /// Wait for the selector to be hidden or detached.
    fn wait_hidden(&mut self, selector: &str, timeout_ms: u64) -> Result<(), GatewayError>;

    /// Wait until the active tab's URL contains the fragment.
    fn wait_url_contains(&mut self, fragment: &str, timeout_ms: u64) -> Result<(), GatewayError>;

    /// Wait for network idleness on the active tab.
    fn wait_network_idle(&mut self, timeout_ms: u64) -> Result<(), GatewayError>;

    /// Arm the new-tab listener. Must be called before triggering any action
    /// that might spawn a tab; a tab opened while unarmed may be missed.
    fn expect_new_tab(&mut self) -> Result<(), GatewayError>;

    /// Wait for an armed new-tab event. Resolves to `None` (not an error)
    /// when no tab appears within the timeout.
    fn wait_new_tab(&mut self, timeout_ms: u64) -> Result<Option<TabId>, GatewayError>;

    /// Make the given tab the active target for subsequent operations.
    fn switch_tab(&mut self, tab: TabId) -> Result<(), GatewayError>;
}
