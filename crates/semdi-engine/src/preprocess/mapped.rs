//! Component-mapped preprocessor
//!
//! Handles configs whose types resolve to exactly one registered component
//! declaring `constructorArguments`. The declared mapping is walked and
//! every parameter reference is substituted with the config's actual
//! values, producing the positional/keyword argument layout the component
//! asked for: object mappings with `fields`, array mappings with
//! `elements`, collected key/value entries, and nested mapping objects.

use std::sync::Arc;

use tracing::trace;

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result, TermKind};

use crate::registry::ComponentRegistry;

use super::component::{bound_parameter_value, copy_require_target, resolve_component};
use super::{ConfigPreprocessor, Transformed};

/// Evidence resolved by `can_handle`
pub struct MappedHandle {
    component: ResourceId,
    arguments: ResourceId,
}

/// Rewrites component-mapped configs into canonical form
pub struct ComponentMappedPreprocessor {
    graph: Arc<ResourceGraph>,
    registry: Arc<ComponentRegistry>,
}

impl ComponentMappedPreprocessor {
    /// Create the stage over a graph and a finalized registry
    pub fn new(graph: Arc<ResourceGraph>, registry: Arc<ComponentRegistry>) -> Self {
        Self { graph, registry }
    }

    /// Walk one declared mapping node, substituting parameter references
    ///
    /// `None` means the node resolved to an unset parameter and the
    /// surrounding entry is omitted.
    fn apply_mapping(
        &self,
        config: ResourceId,
        component: ResourceId,
        node: ResourceId,
    ) -> Result<Option<ResourceId>> {
        let graph = &self.graph;
        if graph.has_property(node, vocab::FIELDS) {
            return self.apply_fields(config, component, node).map(Some);
        }
        if graph.has_property(node, vocab::ELEMENTS) {
            return self.apply_elements(config, component, node).map(Some);
        }
        self.mapping_value(config, component, node)
    }

    fn apply_fields(
        &self,
        config: ResourceId,
        component: ResourceId,
        node: ResourceId,
    ) -> Result<ResourceId> {
        let graph = &self.graph;
        let out = graph.blank();
        graph.add_type(out, vocab::OBJECT_MAPPING);

        let mut entries = Vec::new();
        for field in graph.property_values(node, vocab::FIELDS) {
            if let Some(collect) = graph.property_first(field, vocab::COLLECT_ENTRIES) {
                self.collect_entries(config, collect, &mut entries);
                continue;
            }

            let key = graph
                .property_first(field, vocab::FIELD_NAME)
                .ok_or_else(|| {
                    Error::malformed_mapping_key(graph.value(config), graph.value(field))
                })?;
            if graph.term(key) != TermKind::Literal {
                return Err(Error::malformed_mapping_key(
                    graph.value(config),
                    graph.value(key),
                ));
            }

            let source = graph
                .property_first(field, vocab::VALUE)
                .or_else(|| graph.property_first(field, vocab::ON_PARAMETER));
            let Some(source) = source else {
                continue;
            };
            let Some(resolved) = self.apply_mapping(config, component, source)? else {
                trace!(
                    config = %graph.value(config),
                    key = %graph.value(key),
                    "mapped field omitted: parameter unset"
                );
                continue;
            };

            let entry = graph.blank();
            graph.set_property(entry, vocab::KEY, vec![key]);
            graph.set_property(entry, vocab::VALUE, vec![resolved]);
            entries.push(entry);
        }

        graph.set_property(out, vocab::FIELDS, entries);
        Ok(out)
    }

    /// Expand a `collectEntries` field: every config value of the collected
    /// parameter contributes one entry, keyed by its `key` property
    fn collect_entries(
        &self,
        config: ResourceId,
        parameter: ResourceId,
        entries: &mut Vec<ResourceId>,
    ) {
        let graph = &self.graph;
        for collected in graph.property_values(config, &graph.value(parameter)) {
            let key = graph.property_first(collected, vocab::KEY);
            let value = graph.property_first(collected, vocab::VALUE);
            let (Some(key), Some(value)) = (key, value) else {
                continue;
            };
            let entry = graph.blank();
            graph.set_property(entry, vocab::KEY, vec![key]);
            graph.set_property(entry, vocab::VALUE, vec![value]);
            entries.push(entry);
        }
    }

    fn apply_elements(
        &self,
        config: ResourceId,
        component: ResourceId,
        node: ResourceId,
    ) -> Result<ResourceId> {
        let graph = &self.graph;
        let out = graph.blank();
        graph.add_type(out, vocab::ARRAY_MAPPING);

        let declared = match graph.property_first(node, vocab::ELEMENTS) {
            Some(head) => graph
                .list(head)
                .unwrap_or_else(|| graph.property_values(node, vocab::ELEMENTS)),
            None => Vec::new(),
        };

        let mut items = Vec::new();
        for element in declared {
            let source = graph.property_first(element, vocab::VALUE).unwrap_or(element);
            if let Some(resolved) = self.apply_mapping(config, component, source)? {
                items.push(resolved);
            }
        }
        graph.set_property(out, vocab::ELEMENTS, items);
        Ok(out)
    }

    fn mapping_value(
        &self,
        config: ResourceId,
        component: ResourceId,
        node: ResourceId,
    ) -> Result<Option<ResourceId>> {
        let graph = &self.graph;

        if let Some(parameter) = graph.property_first(node, vocab::ON_PARAMETER) {
            return Ok(bound_parameter_value(graph, config, parameter));
        }

        let parameters = graph.property_values(component, vocab::PARAMETERS);
        if graph.term(node) == TermKind::NamedNode && parameters.contains(&node) {
            return Ok(bound_parameter_value(graph, config, node));
        }

        if graph.has_property(node, vocab::FIELDS) || graph.has_property(node, vocab::ELEMENTS) {
            return self.apply_mapping(config, component, node);
        }

        Ok(Some(node))
    }
}

impl ConfigPreprocessor for ComponentMappedPreprocessor {
    type Handle = MappedHandle;

    fn name(&self) -> &'static str {
        "component-mapped"
    }

    fn can_handle(&self, config: ResourceId) -> Result<Option<Self::Handle>> {
        let Some(component) = resolve_component(&self.graph, &self.registry, config)? else {
            return Ok(None);
        };
        let Some(arguments) = self
            .graph
            .property_first(component, vocab::CONSTRUCTOR_ARGUMENTS)
        else {
            return Ok(None);
        };
        Ok(Some(MappedHandle {
            component,
            arguments,
        }))
    }

    fn transform(&self, config: ResourceId, handle: MappedHandle) -> Result<Transformed> {
        let graph = &self.graph;
        copy_require_target(graph, handle.component, config);

        let entries = graph.list(handle.arguments).ok_or_else(|| {
            Error::invalid_constructor_arguments(
                graph.value(handle.component),
                "constructorArguments must be an RDF list",
            )
        })?;

        let mut args = Vec::new();
        for entry in entries {
            if let Some(resolved) = self.apply_mapping(config, handle.component, entry)? {
                args.push(resolved);
            }
        }

        let args_list = graph.blank();
        graph.set_list(args_list, args);
        graph.set_property(config, vocab::ARGUMENTS, vec![args_list]);
        Ok(Transformed::finished(config))
    }
}
