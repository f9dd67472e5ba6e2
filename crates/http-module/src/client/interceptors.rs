//! Request, response and error interceptors
//!
//! When logging is enabled an `HttpService` runs one interceptor at each of
//! the three points below. Each point uses the caller's hook if one was
//! configured and the built-in logging behaviour otherwise.
//!
//! ```text
//! verb method ─► build request ─► [request] ─► send ─► read body ─► [response] ─► Ok
//!                     │                          │          │
//!                     └──────────────────────────┴──────────┴─────► [error] ─► Err
//! ```

use super::logger::Logger;
use super::options::ClientRequestConfig;
use super::request::HttpRequest;
use super::response::HttpResponse;
use crate::constants::{ERROR_LOG_PREFIX, REQUEST_LOG_PREFIX, RESPONSE_LOG_PREFIX};
use std::error::Error as StdError;
use std::sync::Arc;

/// Hook run before a request is sent
pub type RequestHook = Arc<dyn Fn(HttpRequest) -> HttpRequest + Send + Sync>;

/// Hook run after a successful response is read
pub type ResponseHook = Arc<dyn Fn(HttpResponse) -> HttpResponse + Send + Sync>;

/// Hook run when a request fails; its result is returned to the caller
pub type ErrorHook = Arc<dyn Fn(reqwest::Error) -> reqwest::Error + Send + Sync>;

/// Behaviour installed at one interception point
#[derive(Clone)]
pub(crate) enum Interceptor<H> {
    Logging,
    Custom(H),
}

impl<H: Clone> Interceptor<H> {
    fn from_hook(hook: Option<&H>) -> Self {
        hook.map_or(Self::Logging, |h| Self::Custom(h.clone()))
    }
}

/// The interceptor trio of one service
#[derive(Clone)]
pub(crate) struct Interceptors {
    request: Interceptor<RequestHook>,
    response: Interceptor<ResponseHook>,
    error: Interceptor<ErrorHook>,
}

impl Interceptors {
    /// Interceptors for `config`, or `None` when logging is disabled
    pub(crate) fn from_config(config: &ClientRequestConfig) -> Option<Self> {
        config.enable_logging.then(|| Self {
            request: Interceptor::from_hook(config.on_request.as_ref()),
            response: Interceptor::from_hook(config.on_response.as_ref()),
            error: Interceptor::from_hook(config.on_error.as_ref()),
        })
    }

    pub(crate) fn request(&self, logger: &dyn Logger, request: HttpRequest) -> HttpRequest {
        match &self.request {
            Interceptor::Logging => {
                logger.log(&format!("{REQUEST_LOG_PREFIX}: {}", request.line));
                request
            }
            Interceptor::Custom(hook) => hook(request),
        }
    }

    pub(crate) fn response(&self, logger: &dyn Logger, response: HttpResponse) -> HttpResponse {
        match &self.response {
            Interceptor::Logging => {
                logger.log(&format!(
                    "{RESPONSE_LOG_PREFIX}: {} {}",
                    response.status.as_u16(),
                    response.request
                ));
                response
            }
            Interceptor::Custom(hook) => hook(response),
        }
    }

    pub(crate) fn error(&self, logger: &dyn Logger, error: reqwest::Error) -> reqwest::Error {
        match &self.error {
            Interceptor::Logging => {
                let trace = error_trace(&error);
                logger.error(&format!("{ERROR_LOG_PREFIX}: {error}"), trace.as_deref());
                error
            }
            Interceptor::Custom(hook) => hook(error),
        }
    }
}

/// Render the source chain of an error, one cause per line
pub(crate) fn error_trace(error: &dyn StdError) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(format!("caused by: {cause}"));
        current = cause.source();
    }
    (!causes.is_empty()).then(|| causes.join("\n"))
}
