//! Parameter-default preprocessor
//!
//! Copies declared parameter defaults onto configs that omit the
//! parameter, then lets the rest of the chain canonicalise the result.

use std::sync::Arc;

use tracing::trace;

use semdi_domain::{vocab, ResourceGraph, ResourceId, Result};

use crate::registry::ComponentRegistry;

use super::component::resolve_component;
use super::{ConfigPreprocessor, Transformed};

/// Evidence resolved by `can_handle`: `(parameter IRI, default values)`
pub struct DefaultsHandle {
    defaults: Vec<(String, Vec<ResourceId>)>,
}

/// Materialises declared parameter defaults on configs
pub struct ParameterDefaultsPreprocessor {
    graph: Arc<ResourceGraph>,
    registry: Arc<ComponentRegistry>,
}

impl ParameterDefaultsPreprocessor {
    /// Create the stage over a graph and a finalized registry
    pub fn new(graph: Arc<ResourceGraph>, registry: Arc<ComponentRegistry>) -> Self {
        Self { graph, registry }
    }
}

impl ConfigPreprocessor for ParameterDefaultsPreprocessor {
    type Handle = DefaultsHandle;

    fn name(&self) -> &'static str {
        "parameter-defaults"
    }

    fn can_handle(&self, config: ResourceId) -> Result<Option<Self::Handle>> {
        let graph = &self.graph;
        let Some(component) = resolve_component(graph, &self.registry, config)? else {
            return Ok(None);
        };

        let mut defaults = Vec::new();
        for parameter in graph.property_values(component, vocab::PARAMETERS) {
            let declared = graph.property_values(parameter, vocab::DEFAULT);
            if declared.is_empty() {
                continue;
            }
            let parameter_iri = graph.value(parameter);
            if !graph.has_property(config, &parameter_iri) {
                defaults.push((parameter_iri, declared));
            }
        }

        if defaults.is_empty() {
            return Ok(None);
        }
        Ok(Some(DefaultsHandle { defaults }))
    }

    fn transform(&self, config: ResourceId, handle: DefaultsHandle) -> Result<Transformed> {
        for (parameter_iri, values) in handle.defaults {
            trace!(
                config = %self.graph.value(config),
                parameter = %parameter_iri,
                "applying parameter default"
            );
            self.graph.set_property(config, &parameter_iri, values);
        }
        Ok(Transformed::continued(config))
    }
}
