//! Logger handle used by the logging interceptors

use tracing::{error, info};

/// Logging capability injected into an [`HttpService`](super::HttpService)
///
/// Implementations must be `Send + Sync`; a handle is shared by every
/// request issued through the service that owns it.
pub trait Logger: Send + Sync {
    /// Record an informational message
    fn log(&self, message: &str);

    /// Record an error message together with its trace, if one is known
    fn error(&self, message: &str, trace: Option<&str>);

    /// Scope the logger reports under, if any
    fn context(&self) -> Option<&str> {
        None
    }
}

/// Default logger emitting `tracing` events tagged with a context name
#[derive(Debug, Clone)]
pub struct TracingLogger {
    context: String,
}

impl TracingLogger {
    /// Create a logger scoped to `context`
    pub fn new<S: Into<String>>(context: S) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        info!(context = %self.context, "{message}");
    }

    fn error(&self, message: &str, trace: Option<&str>) {
        error!(context = %self.context, trace = trace.unwrap_or_default(), "{message}");
    }

    fn context(&self) -> Option<&str> {
        Some(&self.context)
    }
}
