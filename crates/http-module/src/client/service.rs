//! HTTP client service
//!
//! `HttpService` owns one `reqwest::Client` and one logger handle. Verb
//! methods forward to the client, run the interceptors when logging is
//! enabled, and hand back the client's own result: no retries, no error
//! translation.

use super::interceptors::Interceptors;
use super::logger::{Logger, TracingLogger};
use super::options::{ClientRequestConfig, HttpModuleOptions};
use super::request::{HttpRequest, RequestConfig, RequestLine};
use super::response::HttpResponse;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, redirect};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Body sent with a request
enum Payload<'a, D: ?Sized> {
    Empty,
    Json(&'a D),
    Form(&'a D),
}

impl<'a, D: ?Sized> Payload<'a, D> {
    fn json(data: Option<&'a D>) -> Self {
        data.map_or(Self::Empty, Self::Json)
    }

    fn form(data: Option<&'a D>) -> Self {
        data.map_or(Self::Empty, Self::Form)
    }
}

/// Injectable HTTP client
///
/// # Example
///
/// ```no_run
/// use http_module::client::{ClientRequestConfig, HttpModuleOptions, HttpService};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let service = HttpService::new(HttpModuleOptions::new(
///     ClientRequestConfig::new()
///         .with_base_url("https://api.example.com")
///         .with_logging(true),
/// ))?;
///
/// let response = service.get("/users", None).await?;
/// let users: serde_json::Value = response.json()?;
/// # Ok(())
/// # }
/// ```
pub struct HttpService {
    name: String,
    client: Client,
    base_url: Option<String>,
    error_for_status: bool,
    interceptors: Option<Interceptors>,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for HttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpService")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("error_for_status", &self.error_for_status)
            .field("logging_enabled", &self.interceptors.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpService {
    /// Build a service from its options
    ///
    /// Fails if the base URL does not parse, a default header is invalid, or
    /// the underlying client cannot be built. No request is sent.
    pub fn new(options: HttpModuleOptions) -> Result<Self> {
        let name = options.provider_name().to_string();
        let HttpModuleOptions { logger, config, .. } = options;

        let client = build_client(&config)?;
        let interceptors = Interceptors::from_config(&config);
        let logger = logger.unwrap_or_else(|| Arc::new(TracingLogger::new(name.clone())));

        debug!(
            service = %name,
            base_url = config.base_url.as_deref().unwrap_or_default(),
            logging = interceptors.is_some(),
            "HTTP service created"
        );

        Ok(Self {
            name,
            client,
            base_url: config.base_url,
            error_for_status: config.error_for_status,
            interceptors,
            logger,
        })
    }

    /// Name the service was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL applied to relative paths
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Whether the interceptors are installed
    pub fn logging_enabled(&self) -> bool {
        self.interceptors.is_some()
    }

    /// Logger used by the default interceptors
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// The underlying `reqwest` client
    ///
    /// Requests sent directly through it bypass the interceptors.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send a GET request
    pub async fn get(
        &self,
        url: &str,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send::<()>(Method::GET, url, Payload::Empty, config).await
    }

    /// Send a DELETE request
    pub async fn delete(
        &self,
        url: &str,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send::<()>(Method::DELETE, url, Payload::Empty, config).await
    }

    /// Send an OPTIONS request
    pub async fn options(
        &self,
        url: &str,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send::<()>(Method::OPTIONS, url, Payload::Empty, config).await
    }

    /// Send a POST request with a JSON body
    pub async fn post<D: Serialize + ?Sized>(
        &self,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::POST, url, Payload::json(data), config).await
    }

    /// Send a PUT request with a JSON body
    pub async fn put<D: Serialize + ?Sized>(
        &self,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::PUT, url, Payload::json(data), config).await
    }

    /// Send a PATCH request with a JSON body
    pub async fn patch<D: Serialize + ?Sized>(
        &self,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::PATCH, url, Payload::json(data), config).await
    }

    /// Send a POST request with a form-urlencoded body
    pub async fn post_form<D: Serialize + ?Sized>(
        &self,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::POST, url, Payload::form(data), config).await
    }

    /// Send a PUT request with a form-urlencoded body
    pub async fn put_form<D: Serialize + ?Sized>(
        &self,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::PUT, url, Payload::form(data), config).await
    }

    /// Send a PATCH request with a form-urlencoded body
    pub async fn patch_form<D: Serialize + ?Sized>(
        &self,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::PATCH, url, Payload::form(data), config).await
    }

    /// Send a request with any method and an optional JSON body
    pub async fn request<D: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        data: Option<&D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        self.send(method, url, Payload::json(data), config).await
    }

    async fn send<D: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        payload: Payload<'_, D>,
        config: Option<RequestConfig>,
    ) -> reqwest::Result<HttpResponse> {
        let config = config.unwrap_or_default();
        let line = RequestLine {
            method,
            base_url: config.base_url.clone().or_else(|| self.base_url.clone()),
            url: url.to_string(),
        };

        let outcome = match self.build_request(&line, payload, config) {
            Ok(request) => self.dispatch(HttpRequest { line, request }).await,
            Err(e) => Err(e),
        };

        match (outcome, &self.interceptors) {
            (Ok(response), Some(interceptors)) => {
                Ok(interceptors.response(self.logger.as_ref(), response))
            }
            (Err(error), Some(interceptors)) => {
                Err(interceptors.error(self.logger.as_ref(), error))
            }
            (outcome, None) => outcome,
        }
    }

    fn build_request<D: Serialize + ?Sized>(
        &self,
        line: &RequestLine,
        payload: Payload<'_, D>,
        config: RequestConfig,
    ) -> reqwest::Result<reqwest::Request> {
        let mut builder = self.client.request(line.method.clone(), line.full_url());

        for (name, value) in &config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !config.params.is_empty() {
            builder = builder.query(&config.params);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some((username, password)) = config.basic_auth {
            builder = builder.basic_auth(username, password);
        }
        if let Some(token) = config.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder = match payload {
            Payload::Empty => builder,
            Payload::Json(data) => builder.json(data),
            Payload::Form(data) => builder.form(data),
        };

        builder.build()
    }

    async fn dispatch(&self, request: HttpRequest) -> reqwest::Result<HttpResponse> {
        let HttpRequest { line, request } = match &self.interceptors {
            Some(interceptors) => interceptors.request(self.logger.as_ref(), request),
            None => request,
        };

        let response = self.client.execute(request).await?;
        let response = if self.error_for_status {
            response.error_for_status()?
        } else {
            response
        };

        HttpResponse::read(response, line).await
    }
}

/// Build the `reqwest` client described by `config`
fn build_client(config: &ClientRequestConfig) -> Result<Client> {
    if let Some(base_url) = &config.base_url {
        reqwest::Url::parse(base_url).map_err(|e| {
            Error::configuration_with_source(format!("Invalid base URL '{base_url}'"), e)
        })?;
    }

    let mut builder = Client::builder()
        .default_headers(default_headers(config)?)
        .danger_accept_invalid_certs(config.accept_invalid_certs);

    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }
    if let Some(max_redirects) = config.max_redirects {
        builder = builder.redirect(if max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(max_redirects)
        });
    }

    Ok(builder.build()?)
}

fn default_headers(config: &ClientRequestConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(config.headers.len());
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::configuration_with_source(format!("Invalid header name '{name}'"), e)
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::configuration_with_source(format!("Invalid value for header '{name}'"), e)
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
