//! Shared component-resolution helpers for the component preprocessors

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result};

use crate::registry::ComponentRegistry;

/// Resolve a config's declared types to exactly one registered component
///
/// Returns `None` when no declared type is registered, or when several are
/// but the config disambiguates itself with an explicit `requireName` or
/// `requireElement` (such configs pass through the chain untouched).
///
/// # Errors
/// `AmbiguousComponentTypes` when several declared types are registered and
/// the config carries no explicit require target.
pub(super) fn resolve_component(
    graph: &ResourceGraph,
    registry: &ComponentRegistry,
    config: ResourceId,
) -> Result<Option<ResourceId>> {
    let mut candidates: Vec<ResourceId> = Vec::new();
    for declared in graph.property_values(config, vocab::rdf::TYPE) {
        if let Some(component) = registry.component(&graph.value(declared)) {
            if !candidates.contains(&component) {
                candidates.push(component);
            }
        }
    }

    match candidates.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(*single)),
        several => {
            if graph.has_property(config, vocab::REQUIRE_NAME)
                || graph.has_property(config, vocab::REQUIRE_ELEMENT)
            {
                return Ok(None);
            }
            Err(Error::ambiguous_component_types(
                graph.value(config),
                several.iter().map(|c| graph.value(*c)).collect(),
            ))
        }
    }
}

/// Copy the require target of a component onto its config
///
/// Explicit values already on the config win over the component's.
pub(super) fn copy_require_target(
    graph: &ResourceGraph,
    component: ResourceId,
    config: ResourceId,
) {
    for property in [
        vocab::REQUIRE_NAME,
        vocab::REQUIRE_ELEMENT,
        vocab::REQUIRE_NO_CONSTRUCTOR,
    ] {
        if graph.has_property(config, property) {
            continue;
        }
        if let Some(value) = graph.property_first(component, property) {
            graph.set_property(config, property, vec![value]);
        }
    }
}

/// The config's value for a parameter, honoring the `unique` flag
///
/// `None` when the config carries no value. Multiple values are wrapped in
/// a fresh list resource so the constructor materialises them as a
/// sequence; a `unique` parameter collapses to its first value.
pub(super) fn bound_parameter_value(
    graph: &ResourceGraph,
    config: ResourceId,
    parameter: ResourceId,
) -> Option<ResourceId> {
    let values = graph.property_values(config, &graph.value(parameter));
    if values.is_empty() {
        return None;
    }
    let unique = graph
        .property_first(parameter, vocab::UNIQUE)
        .map(|u| graph.value(u) == "true")
        .unwrap_or(false);
    if unique || values.len() == 1 {
        return Some(values[0]);
    }
    let wrapper = graph.blank();
    graph.set_list(wrapper, values);
    Some(wrapper)
}
