//! Module descriptors
//!
//! A [`DynamicModule`] groups providers, names the tokens it exports and
//! lists the modules it imports. Marking a module global makes its exports
//! visible everywhere in the container.

use super::provider::Provider;

/// Module descriptor consumed by [`ContainerBuilder::import`](super::ContainerBuilder::import)
#[derive(Debug, Clone)]
pub struct DynamicModule {
    name: String,
    global: bool,
    imports: Vec<DynamicModule>,
    providers: Vec<Provider>,
    exports: Vec<String>,
}

impl DynamicModule {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: false,
            imports: Vec::new(),
            providers: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// Mark the module global
    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Import another module
    pub fn import(mut self, module: DynamicModule) -> Self {
        self.imports.push(module);
        self
    }

    /// Import several modules
    pub fn imports(mut self, modules: impl IntoIterator<Item = DynamicModule>) -> Self {
        self.imports.extend(modules);
        self
    }

    /// Register a provider
    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Export a token
    pub fn export(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !self.exports.contains(&token) {
            self.exports.push(token);
        }
        self
    }

    /// Register a provider and export its token
    pub fn provide_and_export(self, provider: Provider) -> Self {
        let token = provider.token().to_string();
        self.provider(provider).export(token)
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the module is global
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Imported modules
    pub fn imported_modules(&self) -> &[DynamicModule] {
        &self.imports
    }

    /// Registered providers
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Exported tokens
    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Whether the module registers a provider under `token`
    pub fn provides(&self, token: &str) -> bool {
        self.providers.iter().any(|p| p.token() == token)
    }

    /// Whether the module exports `token`
    pub fn exports_token(&self, token: &str) -> bool {
        self.exports.iter().any(|t| t == token)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        String,
        bool,
        Vec<DynamicModule>,
        Vec<Provider>,
        Vec<String>,
    ) {
        (
            self.name,
            self.global,
            self.imports,
            self.providers,
            self.exports,
        )
    }
}
