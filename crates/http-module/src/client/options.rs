//! Client construction options

use super::interceptors::{ErrorHook, RequestHook, ResponseHook};
use super::logger::Logger;
use super::request::HttpRequest;
use super::response::HttpResponse;
use crate::constants::DEFAULT_SERVICE_NAME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client configuration plus interceptor settings
///
/// The plain fields configure the underlying `reqwest::Client` and can be
/// loaded from configuration files. The hooks only take effect when
/// `enable_logging` is set; each one replaces the matching built-in
/// logging interceptor.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRequestConfig {
    /// Prefix joined to relative request paths
    pub base_url: Option<String>,
    /// Total request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Maximum redirects to follow; `Some(0)` disables redirects
    pub max_redirects: Option<usize>,
    /// Skip TLS certificate validation
    pub accept_invalid_certs: bool,
    /// Turn 4xx/5xx responses into errors
    pub error_for_status: bool,
    /// Install the request/response/error interceptors
    pub enable_logging: bool,

    /// Replaces the default request interceptor
    #[serde(skip)]
    pub on_request: Option<RequestHook>,
    /// Replaces the default response interceptor
    #[serde(skip)]
    pub on_response: Option<ResponseHook>,
    /// Replaces the default error interceptor
    #[serde(skip)]
    pub on_error: Option<ErrorHook>,
}

impl fmt::Debug for ClientRequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRequestConfig")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("headers", &self.headers)
            .field("user_agent", &self.user_agent)
            .field("max_redirects", &self.max_redirects)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("error_for_status", &self.error_for_status)
            .field("enable_logging", &self.enable_logging)
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl ClientRequestConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(duration_millis(timeout));
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_millis(timeout));
        self
    }

    /// Add a default header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Limit the number of redirects followed
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = Some(max_redirects);
        self
    }

    /// Treat 4xx/5xx responses as errors
    pub fn with_error_for_status(mut self, enabled: bool) -> Self {
        self.error_for_status = enabled;
        self
    }

    /// Enable or disable the interceptors
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Replace the default request interceptor
    pub fn on_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(HttpRequest) -> HttpRequest + Send + Sync + 'static,
    {
        self.on_request = Some(Arc::new(hook));
        self
    }

    /// Replace the default response interceptor
    pub fn on_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(HttpResponse) -> HttpResponse + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(hook));
        self
    }

    /// Replace the default error interceptor
    ///
    /// The returned error is what the caller receives; the hook cannot turn
    /// a failure into a response.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(reqwest::Error) -> reqwest::Error + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Total request timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Connection timeout
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Options identifying one `HttpService` instance
#[derive(Clone, Default)]
pub struct HttpModuleOptions {
    /// Provider token; `HttpService` when unset
    pub service_name: Option<String>,
    /// Logger used by the interceptors; a `TracingLogger` when unset
    pub logger: Option<Arc<dyn Logger>>,
    /// Client configuration
    pub config: ClientRequestConfig,
}

impl fmt::Debug for HttpModuleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpModuleOptions")
            .field("service_name", &self.service_name)
            .field("logger", &self.logger.as_ref().map(|l| l.context()))
            .field("config", &self.config)
            .finish()
    }
}

impl HttpModuleOptions {
    /// Create options around a client configuration
    pub fn new(config: ClientRequestConfig) -> Self {
        Self {
            service_name: None,
            logger: None,
            config,
        }
    }

    /// Set the service name
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Token the service is registered under
    pub fn provider_name(&self) -> &str {
        self.service_name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME)
    }
}
