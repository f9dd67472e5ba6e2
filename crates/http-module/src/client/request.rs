//! Outgoing request types

use reqwest::Method;
use std::fmt;
use std::time::Duration;

/// Method, base URL and path of a request, as the caller supplied them
///
/// Displays as `<METHOD> <base_url><url>`, the form used by the default
/// request and response log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// HTTP method
    pub method: Method,
    /// Base URL in effect for the request
    pub base_url: Option<String>,
    /// Path (or absolute URL) passed to the verb method
    pub url: String,
}

impl RequestLine {
    /// URL the request is sent to
    ///
    /// Absolute URLs are used as is. Relative paths are appended to the base
    /// URL with exactly one `/` between them.
    pub fn full_url(&self) -> String {
        match &self.base_url {
            Some(base) if !is_absolute_url(&self.url) => combine_urls(base, &self.url),
            _ => self.url.clone(),
        }
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.method,
            self.base_url.as_deref().unwrap_or_default(),
            self.url
        )
    }
}

/// Request about to be sent, as seen by a request interceptor
#[derive(Debug)]
pub struct HttpRequest {
    /// Caller-facing view of the request
    pub line: RequestLine,
    /// The request handed to the HTTP client
    pub request: reqwest::Request,
}

/// Per-call overrides applied on top of the service configuration
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Base URL replacing the service's one for this call
    pub base_url: Option<String>,
    /// Extra headers sent with this call
    pub headers: Vec<(String, String)>,
    /// Query string parameters
    pub params: Vec<(String, String)>,
    /// Timeout for this call
    pub timeout: Option<Duration>,
    /// Basic credentials (username, password)
    pub basic_auth: Option<(String, Option<String>)>,
    /// Bearer token
    pub bearer_token: Option<String>,
}

impl RequestConfig {
    /// Create an empty override
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set basic credentials
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.basic_auth = Some((username.into(), password));
        self
    }

    /// Set a bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn combine_urls(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}
