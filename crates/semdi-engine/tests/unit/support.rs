//! Shared fixtures for the engine test suite

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use semdi_domain::{vocab, ConstructionStrategy, ResourceGraph, ResourceId};
use semdi_engine::{ComponentRegistry, ConstructorPool, PreprocessorChain};
use semdi_strategies::ValueStrategy;

pub fn graph() -> Arc<ResourceGraph> {
    Arc::new(ResourceGraph::new())
}

/// A `Class`-typed component with a require name and declared parameters
pub fn component(
    graph: &ResourceGraph,
    iri: &str,
    require_name: &str,
    parameters: &[ResourceId],
) -> ResourceId {
    let component = graph.named(iri);
    graph.add_type(component, vocab::CLASS);
    let name = graph.literal(require_name);
    graph.set_property(component, vocab::REQUIRE_NAME, vec![name]);
    for &parameter in parameters {
        graph.add_property(component, vocab::PARAMETERS, parameter);
    }
    component
}

/// A `Module`-typed resource bundling components
pub fn module(graph: &ResourceGraph, iri: &str, components: &[ResourceId]) -> ResourceId {
    let module = graph.named(iri);
    graph.add_type(module, vocab::MODULE);
    for &component in components {
        graph.add_property(module, vocab::COMPONENTS, component);
    }
    module
}

/// A registry with one module registered and finalized
pub fn finalized_registry(
    graph: &Arc<ResourceGraph>,
    module: ResourceId,
) -> Arc<ComponentRegistry> {
    let registry = Arc::new(ComponentRegistry::new(Arc::clone(graph)));
    registry.register_module(module).unwrap();
    registry.finalize().unwrap();
    registry
}

/// A pool over the standard chain and a counting value strategy
pub fn value_pool(
    graph: &Arc<ResourceGraph>,
    registry: Arc<ComponentRegistry>,
) -> (ConstructorPool<Value>, Arc<ValueStrategy>) {
    let strategy = Arc::new(ValueStrategy::new());
    let chain = PreprocessorChain::standard(Arc::clone(graph), registry);
    let dyn_strategy: Arc<dyn ConstructionStrategy<Instance = Value>> = strategy.clone();
    let pool = ConstructorPool::new(Arc::clone(graph), chain, dyn_strategy);
    (pool, strategy)
}

/// A pool over an empty chain, for already-canonical configs
pub fn raw_pool(graph: &Arc<ResourceGraph>) -> (ConstructorPool<Value>, Arc<ValueStrategy>) {
    let strategy = Arc::new(ValueStrategy::new());
    let chain = PreprocessorChain::new(Arc::clone(graph));
    let dyn_strategy: Arc<dyn ConstructionStrategy<Instance = Value>> = strategy.clone();
    let pool = ConstructorPool::new(Arc::clone(graph), chain, dyn_strategy);
    (pool, strategy)
}

/// A canonical config with a require name and no arguments
pub fn raw_config(graph: &ResourceGraph, iri: &str, require_name: &str) -> ResourceId {
    let config = graph.named(iri);
    let name = graph.literal(require_name);
    graph.set_property(config, vocab::REQUIRE_NAME, vec![name]);
    config
}

/// A `fields`-object with one literal entry per `(key, value)` pair
pub fn fields_object(graph: &ResourceGraph, entries: &[(&str, ResourceId)]) -> ResourceId {
    let object = graph.blank();
    graph.add_type(object, vocab::OBJECT_MAPPING);
    let mut ids = Vec::new();
    for (key, value) in entries {
        let entry = graph.blank();
        let key = graph.literal(key);
        graph.set_property(entry, vocab::KEY, vec![key]);
        graph.set_property(entry, vocab::VALUE, vec![*value]);
        ids.push(entry);
    }
    graph.set_property(object, vocab::FIELDS, ids);
    object
}

/// Install an `arguments` list on a config
pub fn set_arguments(graph: &ResourceGraph, config: ResourceId, args: Vec<ResourceId>) {
    let list = graph.blank();
    graph.set_list(list, args);
    graph.set_property(config, vocab::ARGUMENTS, vec![list]);
}
