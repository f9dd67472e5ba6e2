//! Dependency Injection
//!
//! Name-keyed providers, module descriptors and the container that
//! resolves them, plus the `HttpModule` registration functions.
//!
//! ```text
//! HttpModule::for_feature(..) ─┐
//! HttpModule::for_root(..) ────┼─► DynamicModule ─► ContainerBuilder ─► Container
//! HttpModule::for_feature_async┘                                          │
//!                                                   get::<HttpService>(token)
//! ```

pub mod container;
pub mod http_module;
pub mod module;
pub mod provider;

pub use container::{Container, ContainerBuilder};
pub use http_module::{AsyncHttpModuleOptions, HttpModule, OptionsFactory};
pub use module::DynamicModule;
pub use provider::{Dependencies, Instance, Provider, ProviderKind};
