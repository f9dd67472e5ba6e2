//! Crate-wide constants
//!
//! Provider tokens, configuration locations and logging defaults.

// ============================================================================
// PROVIDER CONSTANTS
// ============================================================================

/// Token used when an `HttpService` is registered without a service name
pub const DEFAULT_SERVICE_NAME: &str = "HttpService";

/// Name carried by every descriptor produced by `HttpModule`
pub const HTTP_MODULE_NAME: &str = "HttpModule";

/// Name of the implicit module holding providers registered on the builder
pub const ROOT_MODULE_NAME: &str = "RootModule";

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "http-module.toml";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "HTTP_MODULE";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "HTTP_MODULE_LOG";

/// Prefix of the default request log line
pub const REQUEST_LOG_PREFIX: &str = "HTTP Request";

/// Prefix of the default response log line
pub const RESPONSE_LOG_PREFIX: &str = "HTTP Response";

/// Prefix of the default error log line
pub const ERROR_LOG_PREFIX: &str = "HTTP Error";
