//! Configuration types

use crate::client::{ClientRequestConfig, HttpModuleOptions};
use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

/// Top-level configuration file layout
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [clients.github]
/// base_url = "https://api.github.com"
/// enable_logging = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Logging settings
    pub logging: LoggingConfig,

    /// Client configurations keyed by service name
    pub clients: BTreeMap<String, ClientRequestConfig>,
}

impl ModuleConfig {
    /// Turn every configured client into registration options
    ///
    /// The map key becomes the service name, so each client is resolvable
    /// under its own token.
    pub fn into_options(self) -> Vec<HttpModuleOptions> {
        self.clients
            .into_iter()
            .map(|(name, config)| HttpModuleOptions::new(config).with_service_name(name))
            .collect()
    }
}
