//! Configuration management
//!
//! Named client configurations loaded from TOML files and environment
//! variables through Figment.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{LoggingConfig, ModuleConfig};
