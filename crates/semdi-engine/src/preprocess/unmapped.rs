//! Component-unmapped preprocessor
//!
//! Handles configs whose component declares no constructor mapping. The
//! argument layout falls back to a single keyed object: one entry per
//! declared parameter, in declaration order, keyed by the parameter IRI.

use std::sync::Arc;

use semdi_domain::{vocab, ResourceGraph, ResourceId, Result};

use crate::registry::ComponentRegistry;

use super::component::{bound_parameter_value, copy_require_target, resolve_component};
use super::{ConfigPreprocessor, Transformed};

/// Evidence resolved by `can_handle`
pub struct UnmappedHandle {
    component: ResourceId,
}

/// Rewrites mapping-less configs into canonical form
pub struct ComponentUnmappedPreprocessor {
    graph: Arc<ResourceGraph>,
    registry: Arc<ComponentRegistry>,
}

impl ComponentUnmappedPreprocessor {
    /// Create the stage over a graph and a finalized registry
    pub fn new(graph: Arc<ResourceGraph>, registry: Arc<ComponentRegistry>) -> Self {
        Self { graph, registry }
    }
}

impl ConfigPreprocessor for ComponentUnmappedPreprocessor {
    type Handle = UnmappedHandle;

    fn name(&self) -> &'static str {
        "component-unmapped"
    }

    fn can_handle(&self, config: ResourceId) -> Result<Option<Self::Handle>> {
        let Some(component) = resolve_component(&self.graph, &self.registry, config)? else {
            return Ok(None);
        };
        if self
            .graph
            .has_property(component, vocab::CONSTRUCTOR_ARGUMENTS)
        {
            return Ok(None);
        }
        Ok(Some(UnmappedHandle { component }))
    }

    fn transform(&self, config: ResourceId, handle: UnmappedHandle) -> Result<Transformed> {
        let graph = &self.graph;
        copy_require_target(graph, handle.component, config);

        let keyed = graph.blank();
        graph.add_type(keyed, vocab::OBJECT_MAPPING);
        let mut entries = Vec::new();
        for parameter in graph.property_values(handle.component, vocab::PARAMETERS) {
            let Some(value) = bound_parameter_value(graph, config, parameter) else {
                continue;
            };
            let entry = graph.blank();
            let key = graph.literal(&graph.value(parameter));
            graph.set_property(entry, vocab::KEY, vec![key]);
            graph.set_property(entry, vocab::VALUE, vec![value]);
            entries.push(entry);
        }
        graph.set_property(keyed, vocab::FIELDS, entries);

        let args_list = graph.blank();
        graph.set_list(args_list, vec![keyed]);
        graph.set_property(config, vocab::ARGUMENTS, vec![args_list]);
        Ok(Transformed::finished(config))
    }
}
