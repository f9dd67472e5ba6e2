//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::ModuleConfig;
use crate::constants::{CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_FILENAME};
use crate::error::{Error, Result};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `ModuleConfig::default()`
    /// 2. TOML configuration file (explicit path, or `http-module.toml` in the working directory)
    /// 3. Environment variables with prefix (e.g., `HTTP_MODULE__CLIENTS__GITHUB__TIMEOUT_MS`)
    pub fn load(&self) -> Result<ModuleConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ModuleConfig::default()));

        match &self.config_path {
            Some(config_path) => {
                let found = config_path.exists();
                if found {
                    figment = figment.merge(Toml::file(config_path));
                }
                log_config_loaded(config_path, found);
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let config: ModuleConfig = figment
            .extract()
            .context("Failed to extract configuration")?;

        validate_module_config(&config)?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ModuleConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        let path = path.as_ref();
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let candidate = env::current_dir().ok()?.join(DEFAULT_CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }
}

/// Validate module configuration
///
/// Every client needs a non-empty name, a parseable base URL and a non-zero timeout.
pub fn validate_module_config(config: &ModuleConfig) -> Result<()> {
    crate::logging::parse_log_level(&config.logging.level)?;

    for (name, client) in &config.clients {
        if name.trim().is_empty() {
            return Err(Error::configuration("Client name cannot be empty"));
        }
        if let Some(base_url) = &client.base_url {
            reqwest::Url::parse(base_url)
                .config_context(format!("client '{name}' has an invalid base_url '{base_url}'"))?;
        }
        if client.timeout_ms == Some(0) {
            return Err(Error::configuration(format!(
                "client '{name}' timeout_ms cannot be 0"
            )));
        }
        if client.connect_timeout_ms == Some(0) {
            return Err(Error::configuration(format!(
                "client '{name}' connect_timeout_ms cannot be 0"
            )));
        }
    }
    Ok(())
}
