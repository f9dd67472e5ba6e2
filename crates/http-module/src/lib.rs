//! # http-module
//!
//! Injectable HTTP client services with optional request/response logging.
//!
//! Configured [`HttpService`](client::HttpService) instances are registered
//! as named providers through [`HttpModule`](di::HttpModule) and resolved
//! from a [`Container`](di::Container). Everything on the wire is delegated to
//! `reqwest`; this crate adds the registration glue and the logging
//! interceptors.
//!
//! ## Module Categories
//!
//! ### Client Service
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `HttpService`, options, interceptors, logger handle |
//!
//! ### Registration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | `HttpModule` registration modes, providers, container |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`constants`] | Tokens, file names and log prefixes |
//!
//! ## Example
//!
//! ```no_run
//! use http_module::client::{ClientRequestConfig, HttpModuleOptions, HttpService};
//! use http_module::di::{ContainerBuilder, HttpModule};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let container = ContainerBuilder::new()
//!     .import(HttpModule::for_feature(
//!         HttpModuleOptions::new(
//!             ClientRequestConfig::new()
//!                 .with_base_url("https://api.github.com")
//!                 .with_logging(true),
//!         )
//!         .with_service_name("GithubHttp"),
//!     )?)
//!     .build()
//!     .await?;
//!
//! let github = container.get::<HttpService>("GithubHttp")?;
//! let response = github.get("/rate_limit", None).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod di;
pub mod error;
pub mod error_ext;
pub mod logging;

pub use client::{ClientRequestConfig, HttpModuleOptions, HttpService, RequestConfig};
pub use di::{Container, ContainerBuilder, HttpModule};
pub use error::{Error, Result};
pub use error_ext::ErrorContext;
