use std::fmt;

#[derive(Debug)]
pub enum GatewayError {
    /// Node.js driver sidecar failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// stdin/stdout plumbing to the driver sidecar failed
    SessionIo(String),

    /// Driver sidecar reported a command failure
    SessionProtocol { command: String, error: String },

    /// JSON parsing failed (driver response or config)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (request to the driver)
    JsonSerialize { context: String, source: serde_json::Error },

    /// A bounded wait expired before its condition held
    WaitTimeout { what: String, timeout_ms: u64 },

    /// A required value was never written to the scenario store
    MissingStoreValue { key: String },

    /// No supported alert variant became visible within the probe budget
    NoAlertDetected { waited_ms: u64 },

    /// Stored expected value and freshly-read UI value disagree
    ValueMismatch { field: String, expected: String, actual: String },

    /// Environment/config file problem
    Config(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            GatewayError::SessionIo(msg) => {
                write!(f, "Driver session I/O error: {}", msg)
            }
            GatewayError::SessionProtocol { command, error } => {
                write!(f, "Driver command '{}' failed: {}", command, error)
            }
            GatewayError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            GatewayError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            GatewayError::WaitTimeout { what, timeout_ms } => {
                write!(f, "Timed out after {}ms waiting for {}", timeout_ms, what)
            }
            GatewayError::MissingStoreValue { key } => {
                write!(f, "'{}' not found in scenario store", key)
            }
            GatewayError::NoAlertDetected { waited_ms } => {
                write!(f, "No supported alert type detected within {}ms", waited_ms)
            }
            GatewayError::ValueMismatch { field, expected, actual } => {
                write!(
                    f,
                    "Field '{}' mismatch: expected '{}', displayed '{}'",
                    field, expected, actual
                )
            }
            GatewayError::Config(msg) => {
                write!(f, "Config error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::SubprocessSpawn { source, .. } => Some(source),
            GatewayError::JsonParse { source, .. } => Some(source),
            GatewayError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GatewayError {
    /// Whether this error is a bounded-wait expiry (the driver's native
    /// timeout), as opposed to a genuine failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::WaitTimeout { .. })
    }
}
