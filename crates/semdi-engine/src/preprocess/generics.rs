//! Generics preprocessor
//!
//! Validates `genericTypeInstances` on a config against the component's
//! declared `genericTypeParameters` and consumes them, so the component
//! preprocessors see a plain config. Type bindings carry no runtime
//! behavior for construction; arity mismatches are configuration errors.

use std::sync::Arc;

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result};

use crate::registry::ComponentRegistry;

use super::component::resolve_component;
use super::{ConfigPreprocessor, Transformed};

/// Evidence resolved by `can_handle`
pub struct GenericsHandle {
    instances: Vec<ResourceId>,
}

/// Validates and consumes generic type instantiations
pub struct GenericsPreprocessor {
    graph: Arc<ResourceGraph>,
    registry: Arc<ComponentRegistry>,
}

impl GenericsPreprocessor {
    /// Create the stage over a graph and a finalized registry
    pub fn new(graph: Arc<ResourceGraph>, registry: Arc<ComponentRegistry>) -> Self {
        Self { graph, registry }
    }

    fn values_or_list(&self, subject: ResourceId, property: &str) -> Vec<ResourceId> {
        match self.graph.property_first(subject, property) {
            Some(head) => self
                .graph
                .list(head)
                .unwrap_or_else(|| self.graph.property_values(subject, property)),
            None => Vec::new(),
        }
    }
}

impl ConfigPreprocessor for GenericsPreprocessor {
    type Handle = GenericsHandle;

    fn name(&self) -> &'static str {
        "generics"
    }

    fn can_handle(&self, config: ResourceId) -> Result<Option<Self::Handle>> {
        if !self
            .graph
            .has_property(config, vocab::GENERIC_TYPE_INSTANCES)
        {
            return Ok(None);
        }
        Ok(Some(GenericsHandle {
            instances: self.values_or_list(config, vocab::GENERIC_TYPE_INSTANCES),
        }))
    }

    fn transform(&self, config: ResourceId, handle: GenericsHandle) -> Result<Transformed> {
        let graph = &self.graph;
        if let Some(component) = resolve_component(graph, &self.registry, config)? {
            let declared = self.values_or_list(component, vocab::GENERIC_TYPE_PARAMETERS);
            if declared.len() != handle.instances.len() {
                return Err(Error::invalid_config(
                    graph.value(config),
                    vocab::GENERIC_TYPE_INSTANCES,
                    format!(
                        "binds {} generic type(s), component declares {}",
                        handle.instances.len(),
                        declared.len()
                    ),
                ));
            }
        }
        graph.clear_property(config, vocab::GENERIC_TYPE_INSTANCES);
        Ok(Transformed::continued(config))
    }
}
