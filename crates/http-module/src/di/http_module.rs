//! Registration Module
//!
//! Turns client options into [`DynamicModule`] descriptors exposing
//! [`HttpService`] providers.
//!
//! | Mode | Function | Token | Scope |
//! |------|----------|-------|-------|
//! | single | [`HttpModule::for_feature`] | `service_name` or `HttpService` | exported |
//! | multiple | [`HttpModule::for_features`] | one per entry | all exported |
//! | global | [`HttpModule::for_root`] | `HttpService` | global |
//! | provider pair | [`HttpModule::for_feature_with_provider`] | `service_name` or `HttpService` | exported |
//! | async factory | [`HttpModule::for_feature_async`] | `service_name` or `HttpService` | exported |
//! | configuration | [`HttpModule::from_config`] | configured client names | all exported |
//!
//! Registration performs no network I/O. Synchronous modes construct their
//! services immediately; the async mode constructs its service while the
//! container is built.

use super::module::DynamicModule;
use super::provider::{Dependencies, Provider};
use crate::client::{HttpModuleOptions, HttpService};
use crate::config::ModuleConfig;
use crate::constants::{DEFAULT_SERVICE_NAME, HTTP_MODULE_NAME};
use crate::error::{BoxError, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Factory producing client options from injected dependencies
pub type OptionsFactory = Arc<
    dyn Fn(Dependencies) -> BoxFuture<'static, std::result::Result<HttpModuleOptions, BoxError>>
        + Send
        + Sync,
>;

/// Options for [`HttpModule::for_feature_async`]
#[derive(Clone)]
pub struct AsyncHttpModuleOptions {
    /// Provider token; `HttpService` when unset
    pub service_name: Option<String>,
    /// Modules whose exports the factory may inject
    pub imports: Vec<DynamicModule>,
    /// Tokens passed to the factory, in order
    pub inject: Vec<String>,
    /// Produces the client options
    pub use_factory: OptionsFactory,
}

impl fmt::Debug for AsyncHttpModuleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHttpModuleOptions")
            .field("service_name", &self.service_name)
            .field("imports", &self.imports.len())
            .field("inject", &self.inject)
            .finish_non_exhaustive()
    }
}

impl AsyncHttpModuleOptions {
    /// Create options around an async factory
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<HttpModuleOptions, BoxError>> + Send + 'static,
    {
        let use_factory: OptionsFactory = Arc::new(move |deps| factory(deps).boxed());
        Self {
            service_name: None,
            imports: Vec::new(),
            inject: Vec::new(),
            use_factory,
        }
    }

    /// Set the service name
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Import a module the factory depends on
    pub fn with_import(mut self, module: DynamicModule) -> Self {
        self.imports.push(module);
        self
    }

    /// Inject a token into the factory
    pub fn with_inject(mut self, token: impl Into<String>) -> Self {
        self.inject.push(token.into());
        self
    }
}

/// Registration functions for `HttpService` providers
#[derive(Debug, Clone, Copy)]
pub struct HttpModule;

impl HttpModule {
    /// Register one service under its service name
    pub fn for_feature(options: HttpModuleOptions) -> Result<DynamicModule> {
        let provider = Self::service_provider(options)?;
        Ok(DynamicModule::new(HTTP_MODULE_NAME).provide_and_export(provider))
    }

    /// Register one service per entry, each under its own service name
    pub fn for_features(options: Vec<HttpModuleOptions>) -> Result<DynamicModule> {
        options
            .into_iter()
            .try_fold(DynamicModule::new(HTTP_MODULE_NAME), |module, option| {
                Ok(module.provide_and_export(Self::service_provider(option)?))
            })
    }

    /// Register one global service under `HttpService`
    ///
    /// The service name still scopes the default logger, but the provider
    /// token is always `HttpService`.
    pub fn for_root(options: HttpModuleOptions) -> Result<DynamicModule> {
        let service = HttpService::new(options)?;
        debug!(token = DEFAULT_SERVICE_NAME, "Registered global HTTP service");
        Ok(DynamicModule::new(HTTP_MODULE_NAME)
            .with_global(true)
            .provide_and_export(Provider::value(DEFAULT_SERVICE_NAME, service)))
    }

    /// Register one service and also hand back its provider
    ///
    /// The provider can be added to another module directly.
    pub fn for_feature_with_provider(
        options: HttpModuleOptions,
    ) -> Result<(DynamicModule, Provider)> {
        let provider = Self::service_provider(options)?;
        let module = DynamicModule::new(HTTP_MODULE_NAME).provide_and_export(provider.clone());
        Ok((module, provider))
    }

    /// Register a service built from options produced asynchronously
    ///
    /// The factory runs once while the container is built. The service is
    /// always named after the provider token; any `service_name` on the
    /// produced options is replaced, so the default logger is scoped to it.
    pub fn for_feature_async(options: AsyncHttpModuleOptions) -> DynamicModule {
        let AsyncHttpModuleOptions {
            service_name,
            imports,
            inject,
            use_factory,
        } = options;
        let token = service_name.unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        let name = token.clone();

        let provider = Provider::factory(token, inject, move |deps| {
            let options = use_factory(deps);
            let name = name.clone();
            async move {
                let mut options = options.await?;
                options.service_name = Some(name);
                HttpService::new(options).map_err(BoxError::from)
            }
        });

        DynamicModule::new(HTTP_MODULE_NAME)
            .imports(imports)
            .provide_and_export(provider)
    }

    /// Register every client of a loaded configuration
    pub fn from_config(config: &ModuleConfig) -> Result<DynamicModule> {
        Self::for_features(config.clone().into_options())
    }

    fn service_provider(options: HttpModuleOptions) -> Result<Provider> {
        let token = options.provider_name().to_string();
        let service = HttpService::new(options)?;
        debug!(token = %token, "Registered HTTP service");
        Ok(Provider::value(token, service))
    }
}
