use std::collections::HashMap;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "gateway-e2e",
    version,
    about = "Browser end-to-end test suite for the Gateway web application"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: gateway-e2e.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against a configured environment
    Run {
        /// Environment name from the config file
        #[arg(long)]
        env: String,

        /// Run only the scenario with this name (default: all)
        #[arg(long)]
        scenario: Option<String>,

        /// Output format: console or junit
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout for console, report.xml for junit)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the built-in scenarios
    List,
}

// ============================================================================
// Config File Model (YAML)
// ============================================================================

/// A resolved target environment: everything a scenario needs to reach and
/// sign into one Gateway deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Environment {
    pub base_url: String,

    /// Default wait budget for this environment, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    pub username: String,
    pub password: String,
}

/// YAML config file: `gateway-e2e.yaml`, mapping environment names to
/// resolved records.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub environments: HashMap<String, Environment>,

    /// Suite name used in reports
    #[serde(default = "default_suite_name")]
    pub suite_name: String,
}

impl AppConfig {
    /// Look up an environment by name.
    pub fn environment(&self, name: &str) -> Result<&Environment, GatewayError> {
        self.environments.get(name).ok_or_else(|| {
            let mut known: Vec<&str> = self.environments.keys().map(|k| k.as_str()).collect();
            known.sort_unstable();
            GatewayError::Config(format!(
                "Unknown environment '{}' (configured: {})",
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            ))
        })
    }
}

// Serde default helpers
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_suite_name() -> String {
    "Gateway E2E".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Credentials live here, so unlike purely
/// cosmetic settings a missing or malformed file is an error, not a default.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, GatewayError> {
    let config_path = path.unwrap_or("gateway-e2e.yaml");
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        GatewayError::Config(format!("Cannot read config file '{}': {}", config_path, e))
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        GatewayError::Config(format!("Cannot parse config file '{}': {}", config_path, e))
    })
}
