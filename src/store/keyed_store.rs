use std::collections::HashMap;

use serde_json::Value;

use crate::error::GatewayError;

/// Scenario-scoped keyed store for passing values between independently
/// constructed steps.
///
/// Keys are dot-delimited strings namespaced by caller convention
/// (`"displayed.kycClient.fullName"`); the store enforces nothing beyond
/// non-emptiness being sensible. Values are type-erased
/// [`serde_json::Value`]s; callers coerce on read.
///
/// One store is created per scenario run by the orchestrator and injected
/// into every step through `StepContext`, so nothing leaks across scenarios.
/// `set_value` on an existing key overwrites silently (last-write-wins); no
/// history is kept.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    entries: HashMap<String, Value>,
}

impl ScenarioStore {
    pub fn new() -> Self {
        ScenarioStore {
            entries: HashMap::new(),
        }
    }

    /// Store a value under a dotted key, overwriting any existing entry.
    /// Never fails.
    pub fn set_value(&mut self, key: &str, value: impl Into<Value>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Soft read: `None` when the key was never set. The store carries no
    /// schema, so it cannot distinguish "never set" from "intentionally
    /// absent" — required-value errors belong at the call site, see
    /// [`ScenarioStore::require`].
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Soft read coerced to a string slice; `None` when absent or non-string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_str())
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Read a value that a later step depends on, naming the missing key in
    /// the error.
    pub fn require(&self, key: &str) -> Result<&Value, GatewayError> {
        self.entries
            .get(key)
            .ok_or_else(|| GatewayError::MissingStoreValue { key: key.to_string() })
    }

    /// Like [`ScenarioStore::require`] but coerced to a string slice. A
    /// present-but-non-string value also counts as missing.
    pub fn require_str(&self, key: &str) -> Result<&str, GatewayError> {
        self.get_str(key)
            .ok_or_else(|| GatewayError::MissingStoreValue { key: key.to_string() })
    }

    /// Reset to empty. Opt-in; the orchestrator never calls this because each
    /// scenario already gets a fresh store.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
