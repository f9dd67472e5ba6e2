//! Provider bindings
//!
//! A [`Provider`] binds a token to either a ready value or an async factory
//! that runs once when the container is built.

use crate::error::BoxError;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Type-erased provider instance
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased async factory
pub type FactoryFn =
    Arc<dyn Fn(Dependencies) -> BoxFuture<'static, Result<Instance, BoxError>> + Send + Sync>;

/// How a provider produces its instance
#[derive(Clone)]
pub enum ProviderKind {
    /// Instance supplied at registration time
    Value(Instance),
    /// Instance produced by a factory at container build
    Factory {
        /// Tokens resolved and passed to the factory, in order
        inject: Vec<String>,
        /// The factory itself
        factory: FactoryFn,
    },
}

/// Named binding resolvable by the container
#[derive(Clone)]
pub struct Provider {
    token: String,
    kind: ProviderKind,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Provider");
        debug.field("token", &self.token);
        match &self.kind {
            ProviderKind::Value(_) => debug.field("kind", &"value"),
            ProviderKind::Factory { inject, .. } => {
                debug.field("kind", &"factory").field("inject", inject)
            }
        };
        debug.finish()
    }
}

impl Provider {
    /// Bind a value
    pub fn value<T: Any + Send + Sync>(token: impl Into<String>, value: T) -> Self {
        Self::shared(token, Arc::new(value))
    }

    /// Bind an already shared value
    pub fn shared<T: Any + Send + Sync>(token: impl Into<String>, value: Arc<T>) -> Self {
        Self {
            token: token.into(),
            kind: ProviderKind::Value(value),
        }
    }

    /// Bind an async factory receiving the instances named in `inject`
    ///
    /// # Example
    ///
    /// ```
    /// use http_module::di::Provider;
    ///
    /// let provider = Provider::factory("greeting", vec!["name".into()], |deps| async move {
    ///     let name = deps.get::<String>("name").ok_or("name missing")?;
    ///     Ok::<_, http_module::error::BoxError>(format!("hello {name}"))
    /// });
    /// assert!(provider.is_factory());
    /// ```
    pub fn factory<T, F, Fut>(token: impl Into<String>, inject: Vec<String>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, BoxError>> + Send + 'static,
    {
        let factory: FactoryFn = Arc::new(move |deps| {
            let fut = factory(deps);
            async move { fut.await.map(|value| Arc::new(value) as Instance) }.boxed()
        });
        Self {
            token: token.into(),
            kind: ProviderKind::Factory { inject, factory },
        }
    }

    /// Token the provider is registered under
    pub fn token(&self) -> &str {
        &self.token
    }

    /// How the provider produces its instance
    pub fn kind(&self) -> &ProviderKind {
        &self.kind
    }

    /// Whether the instance comes from a factory
    pub fn is_factory(&self) -> bool {
        matches!(self.kind, ProviderKind::Factory { .. })
    }

    pub(crate) fn into_parts(self) -> (String, ProviderKind) {
        (self.token, self.kind)
    }

    /// The bound value, for value providers of type `T`
    pub fn instance<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match &self.kind {
            ProviderKind::Value(instance) => Arc::clone(instance).downcast::<T>().ok(),
            ProviderKind::Factory { .. } => None,
        }
    }
}

/// Resolved dependencies handed to a factory
#[derive(Clone, Default)]
pub struct Dependencies {
    entries: Vec<(String, Instance)>,
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(token, _)| token))
            .finish()
    }
}

impl Dependencies {
    pub(crate) fn new(entries: Vec<(String, Instance)>) -> Self {
        Self { entries }
    }

    /// Dependency injected under `token`, if it has type `T`
    pub fn get<T: Any + Send + Sync>(&self, token: &str) -> Option<Arc<T>> {
        self.entries
            .iter()
            .find(|(name, _)| name == token)
            .and_then(|(_, instance)| Arc::clone(instance).downcast::<T>().ok())
    }

    /// Dependency at position `index` of the inject list, if it has type `T`
    pub fn at<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
        self.entries
            .get(index)
            .and_then(|(_, instance)| Arc::clone(instance).downcast::<T>().ok())
    }

    /// Number of injected dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was injected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
