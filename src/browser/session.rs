use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::browser::page::{PageHandle, TabId};
use crate::error::GatewayError;

const DRIVER_SCRIPT: &str = "driver/gateway_driver.js";

/// Request sent to gateway_driver.js over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DriverRequest {
    Navigate { url: String },
    CurrentUrl,
    Click { selector: String },
    Fill { selector: String, value: String },
    QueryText { selector: String },
    QueryCount { selector: String },
    QueryVisible { selector: String },
    WaitVisible { selector: String, timeout_ms: u64 },
    WaitHidden { selector: String, timeout_ms: u64 },
    WaitUrl { fragment: String, timeout_ms: u64 },
    WaitIdle { timeout_ms: u64 },
    ExpectTab,
    WaitTab { timeout_ms: u64 },
    SwitchTab { tab: u32 },
    Quit,
}

/// Response received from gateway_driver.js over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub timed_out: Option<bool>,
    #[serde(default)]
    pub tab: Option<u32>,
}

/// A persistent browser session backed by gateway_driver.js.
///
/// Launches a long-lived Node.js process that keeps a Chromium browser open.
/// Commands are sent as NDJSON over stdin, responses read from stdout. All
/// auto-waiting and retrying lives in the driver; this side only shuttles
/// requests and maps `timed_out` responses onto [`GatewayError::WaitTimeout`].
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
}

impl BrowserSession {
    /// Launch a new browser session by spawning gateway_driver.js.
    pub fn launch() -> Result<Self, GatewayError> {
        let mut child = Command::new("node")
            .arg(DRIVER_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GatewayError::SubprocessSpawn {
                script: DRIVER_SCRIPT.into(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            GatewayError::SessionIo("Failed to capture stdin of gateway_driver.js".into())
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            GatewayError::SessionIo("Failed to capture stdout of gateway_driver.js".into())
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| GatewayError::SessionIo(format!("Failed to read ready signal: {}", e)))?;

        let response: DriverResponse =
            serde_json::from_str(line.trim()).map_err(|e| GatewayError::JsonParse {
                context: "gateway_driver.js ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(GatewayError::SessionProtocol {
                command: "launch".into(),
                error: "Did not receive ready signal from gateway_driver.js".into(),
            });
        }

        Ok(BrowserSession { child, stdin, reader })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, GatewayError> {
        let json = serde_json::to_string(request).map_err(|e| GatewayError::JsonSerialize {
            context: "DriverRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json).map_err(|e| {
            GatewayError::SessionIo(format!("Failed to write to gateway_driver.js stdin: {}", e))
        })?;

        self.stdin.flush().map_err(|e| {
            GatewayError::SessionIo(format!("Failed to flush gateway_driver.js stdin: {}", e))
        })?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            GatewayError::SessionIo(format!("Failed to read from gateway_driver.js stdout: {}", e))
        })?;

        if line.trim().is_empty() {
            return Err(GatewayError::SessionIo(
                "Empty response from gateway_driver.js (process may have died)".into(),
            ));
        }

        let response: DriverResponse =
            serde_json::from_str(line.trim()).map_err(|e| GatewayError::JsonParse {
                context: "gateway_driver.js response".into(),
                source: e,
            })?;

        Ok(response)
    }

    /// Send a request and verify it succeeded.
    fn send_ok(
        &mut self,
        request: &DriverRequest,
        command_name: &str,
    ) -> Result<DriverResponse, GatewayError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(GatewayError::SessionProtocol {
                command: command_name.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Send a wait request; a `timed_out` response becomes the driver's
    /// native timeout error, surfaced untranslated to callers.
    fn send_wait(
        &mut self,
        request: &DriverRequest,
        command_name: &str,
        what: &str,
        timeout_ms: u64,
    ) -> Result<DriverResponse, GatewayError> {
        let response = self.send_ok(request, command_name)?;
        if response.timed_out == Some(true) {
            return Err(GatewayError::WaitTimeout {
                what: what.to_string(),
                timeout_ms,
            });
        }
        Ok(response)
    }

    /// Quit the browser session.
    pub fn quit(&mut self) -> Result<(), GatewayError> {
        // Best-effort quit, the process may already be gone
        let _ = self.send(&DriverRequest::Quit);
        let _ = self.child.wait();
        Ok(())
    }
}

impl PageHandle for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), GatewayError> {
        let request = DriverRequest::Navigate { url: url.to_string() };
        self.send_ok(&request, "navigate")?;
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, GatewayError> {
        let response = self.send_ok(&DriverRequest::CurrentUrl, "current_url")?;
        response.url.ok_or_else(|| GatewayError::SessionProtocol {
            command: "current_url".into(),
            error: "No URL in current_url response".into(),
        })
    }

    fn click(&mut self, selector: &str) -> Result<(), GatewayError> {
        let request = DriverRequest::Click { selector: selector.to_string() };
        self.send_ok(&request, "click")?;
        Ok(())
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), GatewayError> {
        let request = DriverRequest::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
        };
        self.send_ok(&request, "fill")?;
        Ok(())
    }

    fn text(&mut self, selector: &str) -> Result<Option<String>, GatewayError> {
        let request = DriverRequest::QueryText { selector: selector.to_string() };
        let response = self.send_ok(&request, "query_text")?;
        Ok(response.text)
    }

    fn count(&mut self, selector: &str) -> Result<u32, GatewayError> {
        let request = DriverRequest::QueryCount { selector: selector.to_string() };
        let response = self.send_ok(&request, "query_count")?;
        Ok(response.count.unwrap_or(0))
    }

    fn is_visible(&mut self, selector: &str) -> Result<bool, GatewayError> {
        let request = DriverRequest::QueryVisible { selector: selector.to_string() };
        let response = self.send_ok(&request, "query_visible")?;
        Ok(response.visible.unwrap_or(false))
    }

    fn wait_visible(&mut self, selector: &str, timeout_ms: u64) -> Result<(), GatewayError> {
        let request = DriverRequest::WaitVisible {
            selector: selector.to_string(),
            timeout_ms,
        };
        let what = format!("'{}' to become visible", selector);
        self.send_wait(&request, "wait_visible", &what, timeout_ms)?;
        Ok(())
    }

    fn wait_hidden(&mut self, selector: &str, timeout_ms: u64) -> Result<(), GatewayError> {
        let request = DriverRequest::WaitHidden {
            selector: selector.to_string(),
            timeout_ms,
        };
        let what = format!("'{}' to be hidden", selector);
        self.send_wait(&request, "wait_hidden", &what, timeout_ms)?;
        Ok(())
    }

    fn wait_url_contains(&mut self, fragment: &str, timeout_ms: u64) -> Result<(), GatewayError> {
        let request = DriverRequest::WaitUrl {
            fragment: fragment.to_string(),
            timeout_ms,
        };
        let what = format!("URL to contain '{}'", fragment);
        self.send_wait(&request, "wait_url", &what, timeout_ms)?;
        Ok(())
    }

    fn wait_network_idle(&mut self, timeout_ms: u64) -> Result<(), GatewayError> {
        let request = DriverRequest::WaitIdle { timeout_ms };
        self.send_wait(&request, "wait_idle", "network idle", timeout_ms)?;
        Ok(())
    }

    fn expect_new_tab(&mut self) -> Result<(), GatewayError> {
        self.send_ok(&DriverRequest::ExpectTab, "expect_tab")?;
        Ok(())
    }

    fn wait_new_tab(&mut self, timeout_ms: u64) -> Result<Option<TabId>, GatewayError> {
        let request = DriverRequest::WaitTab { timeout_ms };
        let response = self.send_ok(&request, "wait_tab")?;
        // No tab within the timeout is a normal outcome, not an error
        Ok(response.tab.map(TabId))
    }

    fn switch_tab(&mut self, tab: TabId) -> Result<(), GatewayError> {
        let request = DriverRequest::SwitchTab { tab: tab.0 };
        self.send_ok(&request, "switch_tab")?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = self.quit();
    }
}
