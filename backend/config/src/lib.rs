//! `remitex-config` — runtime configuration from the environment.
//!
//! The whole configuration surface is environment variables (a `.env` file
//! is loaded by the binary before this runs): bind address, spool
//! directory, provider selection, and the provider API key. Defaults are
//! chosen so `remitex serve` works out of the box once `CEREBRAS_API_KEY`
//! is set.

use std::collections::HashMap;

use remitex_core::RemitexError;
use serde::Deserialize;

/// Remitex runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Directory uploads are spooled into for the duration of a request
    pub spool_dir: String,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
    /// Completion provider to route extractions to ("cerebras")
    pub provider: String,
    /// Model name sent with every completion request
    pub model: String,
    /// Cerebras API key
    pub cerebras_api_key: Option<String>,
    /// Override for the Cerebras API base URL
    pub cerebras_base_url: Option<String>,
    /// Log level
    pub log_level: String,
    /// Optional directory for rolling JSON log files
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            spool_dir: "spool".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
            provider: "cerebras".to_string(),
            model: "gpt-oss-120b".to_string(),
            cerebras_api_key: None,
            cerebras_base_url: None,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Load configuration from a provided variable map (useful for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let defaults = Config::default();
        Self {
            bind_address: lookup(vars, "REMITEX_BIND").unwrap_or(defaults.bind_address),
            port: lookup(vars, "REMITEX_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            spool_dir: lookup(vars, "REMITEX_SPOOL_DIR").unwrap_or(defaults.spool_dir),
            max_upload_bytes: lookup(vars, "REMITEX_MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            provider: lookup(vars, "REMITEX_PROVIDER").unwrap_or(defaults.provider),
            model: lookup(vars, "REMITEX_MODEL").unwrap_or(defaults.model),
            cerebras_api_key: lookup(vars, "CEREBRAS_API_KEY"),
            cerebras_base_url: lookup(vars, "CEREBRAS_BASE_URL"),
            log_level: lookup(vars, "RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: lookup(vars, "REMITEX_LOG_DIR"),
        }
    }

    /// Check that everything the `serve` command needs is present.
    ///
    /// A missing API key fails here, at startup, instead of surfacing as a
    /// failure on the first request.
    pub fn validate_for_serve(&self) -> Result<(), RemitexError> {
        match self.provider.as_str() {
            "cerebras" => {
                if self.cerebras_api_key.as_deref().unwrap_or("").is_empty() {
                    return Err(RemitexError::ConfigError(
                        "CEREBRAS_API_KEY is not set (required by provider \"cerebras\")".into(),
                    ));
                }
            }
            "mock" => {}
            other => {
                return Err(RemitexError::ConfigError(format!(
                    "unknown provider {other:?}"
                )));
            }
        }
        Ok(())
    }
}

fn lookup(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key).filter(|v| !v.is_empty()).cloned()
}
