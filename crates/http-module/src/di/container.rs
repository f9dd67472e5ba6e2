//! Provider container
//!
//! Composes module descriptors and resolves their providers once.
//!
//! ## Resolution
//!
//! ```text
//! ContainerBuilder::import(module)...
//!            │
//!            ▼
//! flatten module tree ──► value providers stored as-is
//!            │
//!            ▼
//! factories whose injected tokens are ready ──► run, store singleton
//!            │                 ▲
//!            └─────────────────┘  (until none pending)
//!            ▼
//!        Container::get::<T>(token)
//! ```
//!
//! ## Visibility
//!
//! A token is visible from a module when the module provides it, when one of
//! its direct imports exports it (re-exports are followed), or when a global
//! module exports it. Lookups on the built container start from the root
//! module, which holds the providers registered on the builder itself.

use super::module::DynamicModule;
use super::provider::{Dependencies, FactoryFn, Instance, Provider, ProviderKind};
use crate::constants::ROOT_MODULE_NAME;
use crate::error::{Error, Result};
use std::any::{Any, type_name};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

const ROOT: usize = 0;

#[derive(Debug)]
struct ModuleNode {
    name: String,
    imports: Vec<usize>,
    provided: HashSet<String>,
    exports: Vec<String>,
}

/// Flattened module tree
#[derive(Debug, Default)]
struct ModuleGraph {
    nodes: Vec<ModuleNode>,
    globals: Vec<usize>,
}

impl ModuleGraph {
    /// Add `module` and its imports, collecting providers by owning module
    fn flatten(&mut self, module: DynamicModule, providers: &mut Vec<(usize, Provider)>) -> usize {
        let (name, global, imports, module_providers, exports) = module.into_parts();
        let index = self.nodes.len();
        self.nodes.push(ModuleNode {
            name,
            imports: Vec::new(),
            provided: HashSet::new(),
            exports,
        });
        if global {
            self.globals.push(index);
        }

        let imports = imports
            .into_iter()
            .map(|import| self.flatten(import, providers))
            .collect();
        self.nodes[index].imports = imports;

        let mut own: Vec<Provider> = Vec::with_capacity(module_providers.len());
        for provider in module_providers {
            if let Some(existing) = own.iter_mut().find(|p| p.token() == provider.token()) {
                warn!(
                    module = %self.nodes[index].name,
                    token = provider.token(),
                    "Provider registered twice; the later registration wins"
                );
                *existing = provider;
            } else {
                own.push(provider);
            }
        }
        for provider in own {
            self.nodes[index]
                .provided
                .insert(provider.token().to_string());
            providers.push((index, provider));
        }

        index
    }

    /// Module owning the instance `token` resolves to, as seen from `from`
    fn locate(&self, from: usize, token: &str) -> Option<usize> {
        let node = &self.nodes[from];
        if node.provided.contains(token) {
            return Some(from);
        }
        node.imports
            .iter()
            .find_map(|&import| self.locate_export(import, token))
            .or_else(|| {
                self.globals
                    .iter()
                    .find_map(|&global| self.locate_export(global, token))
            })
    }

    fn locate_export(&self, module: usize, token: &str) -> Option<usize> {
        let node = &self.nodes[module];
        if !node.exports.iter().any(|t| t == token) {
            return None;
        }
        if node.provided.contains(token) {
            return Some(module);
        }
        node.imports
            .iter()
            .find_map(|&import| self.locate_export(import, token))
    }
}

struct PendingFactory {
    module: usize,
    token: String,
    dependencies: Vec<(String, usize)>,
    factory: FactoryFn,
}

/// Builder collecting modules and root-level providers
///
/// # Example
///
/// ```no_run
/// use http_module::client::{ClientRequestConfig, HttpModuleOptions, HttpService};
/// use http_module::constants::DEFAULT_SERVICE_NAME;
/// use http_module::di::{ContainerBuilder, HttpModule};
///
/// # async fn run() -> http_module::Result<()> {
/// let container = ContainerBuilder::new()
///     .import(HttpModule::for_root(HttpModuleOptions::new(
///         ClientRequestConfig::new().with_base_url("http://test.com"),
///     ))?)
///     .build()
///     .await?;
///
/// let http = container.get::<HttpService>(DEFAULT_SERVICE_NAME)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ContainerBuilder {
    root: DynamicModule,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            root: DynamicModule::new(ROOT_MODULE_NAME),
        }
    }

    /// Import a module into the root
    pub fn import(mut self, module: DynamicModule) -> Self {
        self.root = self.root.import(module);
        self
    }

    /// Register a provider on the root module
    pub fn provider(mut self, provider: Provider) -> Self {
        self.root = self.root.provider(provider);
        self
    }

    /// Resolve every provider and build the container
    ///
    /// Factories run once, after the tokens they inject are resolved. A
    /// failing factory fails the whole build.
    pub async fn build(self) -> Result<Container> {
        let mut graph = ModuleGraph::default();
        let mut providers = Vec::new();
        graph.flatten(self.root, &mut providers);

        let mut instances: HashMap<(usize, String), Instance> = HashMap::new();
        let mut pending = Vec::new();

        for (module, provider) in providers {
            let (token, kind) = provider.into_parts();
            match kind {
                ProviderKind::Value(instance) => {
                    instances.insert((module, token), instance);
                }
                ProviderKind::Factory { inject, factory } => {
                    let dependencies = inject
                        .into_iter()
                        .map(|dependency| match graph.locate(module, &dependency) {
                            Some(owner) => Ok((dependency, owner)),
                            None => Err(Error::MissingDependency {
                                token: token.clone(),
                                dependency,
                            }),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    pending.push(PendingFactory {
                        module,
                        token,
                        dependencies,
                        factory,
                    });
                }
            }
        }

        debug!(
            modules = graph.nodes.len(),
            values = instances.len(),
            factories = pending.len(),
            "Resolving providers"
        );

        while !pending.is_empty() {
            let (ready, waiting): (Vec<_>, Vec<_>) = pending.into_iter().partition(|p| {
                p.dependencies.iter().all(|(dependency, owner)| {
                    instances.contains_key(&(*owner, dependency.clone()))
                })
            });

            if ready.is_empty() {
                return Err(Error::UnresolvableDependencies {
                    tokens: waiting.into_iter().map(|p| p.token).collect(),
                });
            }

            for factory in ready {
                let dependencies = Dependencies::new(
                    factory
                        .dependencies
                        .iter()
                        .filter_map(|(dependency, owner)| {
                            instances
                                .get(&(*owner, dependency.clone()))
                                .map(|instance| (dependency.clone(), Arc::clone(instance)))
                        })
                        .collect(),
                );
                let instance = (factory.factory)(dependencies)
                    .await
                    .map_err(|source| Error::FactoryFailed {
                        token: factory.token.clone(),
                        source,
                    })?;
                debug!(
                    module = %graph.nodes[factory.module].name,
                    token = %factory.token,
                    "Factory provider resolved"
                );
                instances.insert((factory.module, factory.token), instance);
            }

            pending = waiting;
        }

        info!(
            "Built container with {} providers across {} modules",
            instances.len(),
            graph.nodes.len()
        );

        Ok(Container { graph, instances })
    }
}

/// Built container holding singleton provider instances
pub struct Container {
    graph: ModuleGraph,
    instances: HashMap<(usize, String), Instance>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("modules", &self.graph.nodes.len())
            .field("tokens", &self.tokens())
            .finish()
    }
}

impl Container {
    /// Start a new builder
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Resolve `token` from the root module as a `T`
    pub fn get<T: Any + Send + Sync>(&self, token: &str) -> Result<Arc<T>> {
        let instance = self
            .instance(token)
            .ok_or_else(|| Error::provider_not_found(token))?;
        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| Error::TypeMismatch {
                token: token.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Whether `token` is visible from the root module
    pub fn contains(&self, token: &str) -> bool {
        self.instance(token).is_some()
    }

    /// Tokens visible from the root module, sorted
    pub fn tokens(&self) -> Vec<&str> {
        self.graph
            .nodes
            .iter()
            .flat_map(|node| node.provided.iter())
            .map(String::as_str)
            .filter(|token| self.contains(token))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn instance(&self, token: &str) -> Option<&Instance> {
        let owner = self.graph.locate(ROOT, token)?;
        self.instances.get(&(owner, token.to_string()))
    }
}
