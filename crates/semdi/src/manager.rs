//! Component manager
//!
//! The facade over the instantiation pipeline. The builder phase collects
//! triples and module registrations; `build` finalizes the registry into
//! its frozen form and assembles the preprocessor chain and the
//! constructor pool. The built manager only reads.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use semdi_domain::{
    ConstructionStrategy, Error, InstantiationSettings, ModuleState, ResourceGraph, ResourceId,
    Result, Triple, TripleSource,
};
use semdi_engine::{ComponentRegistry, ConstructorPool, PreprocessorChain};

use crate::loader::GraphLoader;

/// Facade over registry, preprocessor chain and constructor pool
pub struct ComponentManager<S: ConstructionStrategy> {
    graph: Arc<ResourceGraph>,
    registry: Arc<ComponentRegistry>,
    pool: ConstructorPool<S::Instance>,
    strategy: Arc<S>,
    module_state: ModuleState,
}

impl<S: ConstructionStrategy + 'static> ComponentManager<S> {
    /// Start building a manager around a construction strategy
    pub fn builder(strategy: S) -> ComponentManagerBuilder<S> {
        ComponentManagerBuilder::new(strategy)
    }

    /// Instantiate the config resource with the given IRI
    ///
    /// # Errors
    /// `UnknownComponent` when the IRI names no resource in the graph;
    /// otherwise whatever the pipeline produces for the config.
    pub async fn instantiate(
        &self,
        config_iri: &str,
        settings: InstantiationSettings<S::Instance>,
    ) -> Result<S::Instance> {
        let config = self
            .graph
            .lookup(config_iri)
            .ok_or_else(|| Error::unknown_component(config_iri))?;
        self.pool.instantiate(config, Arc::new(settings)).await
    }

    /// Instantiate a config resource by id
    pub async fn instantiate_resource(
        &self,
        config: ResourceId,
        settings: InstantiationSettings<S::Instance>,
    ) -> Result<S::Instance> {
        self.pool.instantiate(config, Arc::new(settings)).await
    }

    /// Instantiate a component from a plain parameter map
    ///
    /// Builds a synthetic config typed with the component and carrying one
    /// literal value per entry, then runs the ordinary pipeline on it.
    ///
    /// # Errors
    /// `UnknownComponent` when the IRI is not a registered component.
    pub async fn instantiate_manually(
        &self,
        component_iri: &str,
        params: HashMap<String, String>,
        settings: InstantiationSettings<S::Instance>,
    ) -> Result<S::Instance> {
        if self.registry.component(component_iri).is_none() {
            return Err(Error::unknown_component(component_iri));
        }
        let config = self.graph.blank();
        self.graph.add_type(config, component_iri);
        for (parameter, value) in params {
            let literal = self.graph.literal(&value);
            self.graph.add_property(config, &parameter, literal);
        }
        self.pool.instantiate(config, Arc::new(settings)).await
    }

    /// The frozen component registry
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// The resource graph
    pub fn graph(&self) -> &Arc<ResourceGraph> {
        &self.graph
    }

    /// The construction strategy
    pub fn strategy(&self) -> &Arc<S> {
        &self.strategy
    }

    /// The discovered module state
    pub fn module_state(&self) -> &ModuleState {
        &self.module_state
    }
}

/// Builder phase of the component manager
pub struct ComponentManagerBuilder<S: ConstructionStrategy> {
    strategy: Arc<S>,
    loader: GraphLoader,
    module_state: ModuleState,
    module_iris: Vec<String>,
}

impl<S: ConstructionStrategy + 'static> ComponentManagerBuilder<S> {
    /// Create a builder around a construction strategy
    pub fn new(strategy: S) -> Self {
        Self {
            strategy: Arc::new(strategy),
            loader: GraphLoader::new(),
            module_state: ModuleState::new(),
            module_iris: Vec::new(),
        }
    }

    /// Use an already assembled graph instead of a fresh one
    pub fn with_graph(mut self, graph: Arc<ResourceGraph>) -> Self {
        self.loader = GraphLoader::with_graph(graph);
        self
    }

    /// Attach discovered module metadata
    pub fn with_module_state(mut self, module_state: ModuleState) -> Self {
        self.module_state = module_state;
        self
    }

    /// Import a batch of parsed triples
    pub fn with_triples<T: IntoIterator<Item = Triple>>(self, triples: T) -> Result<Self> {
        self.loader.import(triples)?;
        Ok(self)
    }

    /// Import from an asynchronous triple source
    pub async fn with_triple_source<T: TripleSource>(self, source: T) -> Result<Self> {
        self.loader.import_source(source).await?;
        Ok(self)
    }

    /// Register one module explicitly instead of auto-discovering all
    pub fn with_module<I: Into<String>>(mut self, module_iri: I) -> Self {
        self.module_iris.push(module_iri.into());
        self
    }

    /// Finalize registration and assemble the pipeline
    ///
    /// Auto-discovers every `Module`-typed resource unless modules were
    /// registered explicitly. After this the registry is frozen.
    pub fn build(self) -> Result<ComponentManager<S>> {
        let graph = self.loader.graph();
        let registry = Arc::new(ComponentRegistry::new(Arc::clone(&graph)));

        if self.module_iris.is_empty() {
            registry.register_modules_from_graph()?;
        } else {
            for iri in &self.module_iris {
                let module = graph
                    .lookup(iri)
                    .ok_or_else(|| Error::unknown_component(iri))?;
                registry.register_module(module)?;
            }
        }
        registry.finalize()?;

        let chain = PreprocessorChain::standard(Arc::clone(&graph), Arc::clone(&registry));
        let dyn_strategy: Arc<dyn ConstructionStrategy<Instance = S::Instance>> =
            self.strategy.clone();
        let pool = ConstructorPool::new(Arc::clone(&graph), chain, dyn_strategy);

        info!(
            components = registry.component_count(),
            modules = registry.module_count(),
            "component manager ready"
        );
        Ok(ComponentManager {
            graph,
            registry,
            pool,
            strategy: self.strategy,
            module_state: self.module_state,
        })
    }
}
