//! Client Service
//!
//! [`HttpService`] wraps one `reqwest::Client` and exposes the HTTP verbs.
//! With `enable_logging` set it installs request, response and error
//! interceptors that log through a [`Logger`].
//!
//! ## Contents
//!
//! - `HttpService` - verb methods over the underlying client
//! - `HttpModuleOptions` / `ClientRequestConfig` - construction options
//! - `RequestConfig` - per-call overrides
//! - `HttpRequest` / `HttpResponse` - values seen by interceptors and callers
//! - `Logger` / `TracingLogger` - logging capability and its default

pub mod interceptors;
pub mod logger;
pub mod options;
pub mod request;
pub mod response;
pub mod service;

pub use interceptors::{ErrorHook, RequestHook, ResponseHook};
pub use logger::{Logger, TracingLogger};
pub use options::{ClientRequestConfig, HttpModuleOptions};
pub use request::{HttpRequest, RequestConfig, RequestLine};
pub use response::HttpResponse;
pub use service::HttpService;
