use std::collections::HashMap;
use std::time::Duration;

use gateway_e2e::browser::page::{PageHandle, TabId};
use gateway_e2e::error::GatewayError;

/// One synthetic DOM element, keyed by its exact selector string.
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub text: Option<String>,
    pub visible: bool,
    pub count: u32,
}

impl FakeElement {
    pub fn visible_text(text: &str) -> Self {
        FakeElement {
            text: Some(text.to_string()),
            visible: true,
            count: 1,
        }
    }

    pub fn visible_empty() -> Self {
        FakeElement {
            text: None,
            visible: true,
            count: 1,
        }
    }

    pub fn hidden() -> Self {
        FakeElement {
            text: None,
            visible: false,
            count: 1,
        }
    }
}

/// In-memory PageHandle standing in for the Node driver sidecar.
///
/// Selectors are matched exactly against the registered map, one map per
/// tab. Expired waits really sleep for their timeout before failing, so
/// elapsed-time assertions against probe budgets hold. Every operation is
/// appended to `calls` for order/count assertions.
pub struct FakePage {
    tabs: HashMap<TabId, HashMap<String, FakeElement>>,
    active: TabId,
    url: String,
    pub calls: Vec<String>,
    tab_armed: bool,
    spawn_on_click: Option<(String, TabId)>,
    spawned: Option<TabId>,
    url_on_click: HashMap<String, String>,
    hide_on_click: HashMap<String, String>,
}

impl FakePage {
    pub fn new() -> Self {
        let mut tabs = HashMap::new();
        tabs.insert(TabId::ORIGINAL, HashMap::new());
        FakePage {
            tabs,
            active: TabId::ORIGINAL,
            url: "about:blank".to_string(),
            calls: Vec::new(),
            tab_armed: false,
            spawn_on_click: None,
            spawned: None,
            url_on_click: HashMap::new(),
            hide_on_click: HashMap::new(),
        }
    }

    /// Register an element on the active tab.
    pub fn add(&mut self, selector: &str, element: FakeElement) -> &mut Self {
        self.tabs
            .entry(self.active)
            .or_default()
            .insert(selector.to_string(), element);
        self
    }

    /// Register an element on a specific tab (creating the tab if needed).
    pub fn add_on_tab(&mut self, tab: TabId, selector: &str, element: FakeElement) -> &mut Self {
        self.tabs
            .entry(tab)
            .or_default()
            .insert(selector.to_string(), element);
        self
    }

    /// Configure a click on `selector` to open a new tab — but only a click
    /// that happens while the listener is armed will be observed.
    pub fn spawn_tab_on_click(&mut self, selector: &str, tab: TabId) {
        self.spawn_on_click = Some((selector.to_string(), tab));
        self.tabs.entry(tab).or_default();
    }

    /// Configure a click on `selector` to change the page URL (a submit
    /// that navigates).
    pub fn url_on_click(&mut self, selector: &str, url: &str) {
        self.url_on_click
            .insert(selector.to_string(), url.to_string());
    }

    /// Configure a click on `selector` to hide another element (a confirm
    /// that dismisses its dialog).
    pub fn hide_on_click(&mut self, selector: &str, hides: &str) {
        self.hide_on_click
            .insert(selector.to_string(), hides.to_string());
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub fn active_tab(&self) -> TabId {
        self.active
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn element(&self, selector: &str) -> Option<&FakeElement> {
        self.tabs.get(&self.active)?.get(selector)
    }
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl PageHandle for FakePage {
    fn navigate(&mut self, url: &str) -> Result<(), GatewayError> {
        self.calls.push(format!("navigate {}", url));
        self.url = url.to_string();
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, GatewayError> {
        self.calls.push("current_url".into());
        Ok(self.url.clone())
    }

    fn click(&mut self, selector: &str) -> Result<(), GatewayError> {
        self.calls.push(format!("click {}", selector));
        if let Some((trigger, tab)) = &self.spawn_on_click {
            if trigger == selector && self.tab_armed {
                // Tab opens synchronously with the click; an unarmed
                // listener would have missed it
                self.spawned = Some(*tab);
            }
        }
        if let Some(url) = self.url_on_click.get(selector).cloned() {
            self.url = url;
        }
        if let Some(hides) = self.hide_on_click.get(selector).cloned() {
            if let Some(element) = self.tabs.entry(self.active).or_default().get_mut(&hides) {
                element.visible = false;
            }
        }
        Ok(())
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), GatewayError> {
        self.calls.push(format!("fill {}", selector));
        self.tabs
            .entry(self.active)
            .or_default()
            .insert(selector.to_string(), FakeElement::visible_text(value));
        Ok(())
    }

    fn text(&mut self, selector: &str) -> Result<Option<String>, GatewayError> {
        self.calls.push(format!("text {}", selector));
        Ok(self.element(selector).and_then(|e| e.text.clone()))
    }

    fn count(&mut self, selector: &str) -> Result<u32, GatewayError> {
        self.calls.push(format!("count {}", selector));
        Ok(self.element(selector).map(|e| e.count).unwrap_or(0))
    }

    fn is_visible(&mut self, selector: &str) -> Result<bool, GatewayError> {
        self.calls.push(format!("is_visible {}", selector));
        Ok(self.element(selector).map(|e| e.visible).unwrap_or(false))
    }

    fn wait_visible(&mut self, selector: &str, timeout_ms: u64) -> Result<(), GatewayError> {
        self.calls.push(format!("wait_visible {}", selector));
        if self.element(selector).map(|e| e.visible).unwrap_or(false) {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(timeout_ms));
        Err(GatewayError::WaitTimeout {
            what: format!("'{}' to become visible", selector),
            timeout_ms,
        })
    }

    fn wait_hidden(&mut self, selector: &str, timeout_ms: u64) -> Result<(), GatewayError> {
        self.calls.push(format!("wait_hidden {}", selector));
        if !self.element(selector).map(|e| e.visible).unwrap_or(false) {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(timeout_ms));
        Err(GatewayError::WaitTimeout {
            what: format!("'{}' to be hidden", selector),
            timeout_ms,
        })
    }

    fn wait_url_contains(&mut self, fragment: &str, timeout_ms: u64) -> Result<(), GatewayError> {
        self.calls.push(format!("wait_url {}", fragment));
        if self.url.contains(fragment) {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(timeout_ms));
        Err(GatewayError::WaitTimeout {
            what: format!("URL to contain '{}'", fragment),
            timeout_ms,
        })
    }

    fn wait_network_idle(&mut self, _timeout_ms: u64) -> Result<(), GatewayError> {
        self.calls.push("wait_idle".into());
        Ok(())
    }

    fn expect_new_tab(&mut self) -> Result<(), GatewayError> {
        self.calls.push("expect_new_tab".into());
        self.tab_armed = true;
        Ok(())
    }

    fn wait_new_tab(&mut self, timeout_ms: u64) -> Result<Option<TabId>, GatewayError> {
        self.calls.push("wait_new_tab".into());
        self.tab_armed = false;
        match self.spawned.take() {
            Some(tab) => Ok(Some(tab)),
            None => {
                std::thread::sleep(Duration::from_millis(timeout_ms));
                Ok(None)
            }
        }
    }

    fn switch_tab(&mut self, tab: TabId) -> Result<(), GatewayError> {
        self.calls.push(format!("switch_tab {}", tab.0));
        self.tabs.entry(tab).or_default();
        self.active = tab;
        Ok(())
    }
}
