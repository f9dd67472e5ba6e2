//! Error handling types
//!
//! Construction, configuration and container errors. Request-time failures
//! are not represented here: verb methods hand back `reqwest::Error` as is.

use thiserror::Error;

/// Boxed error returned by provider factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for HTTP module registration
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The underlying HTTP client could not be built
    #[error("HTTP client error: {source}")]
    Client {
        /// The underlying reqwest error
        #[from]
        source: reqwest::Error,
    },

    /// No provider is visible under the requested token
    #[error("Provider not found: {token}")]
    ProviderNotFound {
        /// The token that was looked up
        token: String,
    },

    /// A provider exists but holds a different type
    #[error("Provider '{token}' is not of type {expected}")]
    TypeMismatch {
        /// The token that was looked up
        token: String,
        /// Name of the requested type
        expected: &'static str,
    },

    /// A factory injects a token that is not visible from its module
    #[error("Provider '{token}' depends on '{dependency}', which is not available in its module")]
    MissingDependency {
        /// The provider being resolved
        token: String,
        /// The dependency that could not be found
        dependency: String,
    },

    /// Factories that wait on each other and can never resolve
    #[error("Unresolvable provider dependencies: {}", tokens.join(", "))]
    UnresolvableDependencies {
        /// Tokens of the providers left unresolved
        tokens: Vec<String>,
    },

    /// A provider factory returned an error
    #[error("Factory for provider '{token}' failed: {source}")]
    FactoryFailed {
        /// The provider being resolved
        token: String,
        /// Error produced by the factory
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Create a configuration error without a source
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping a source error
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a provider-not-found error
    pub fn provider_not_found<S: Into<String>>(token: S) -> Self {
        Self::ProviderNotFound {
            token: token.into(),
        }
    }
}
