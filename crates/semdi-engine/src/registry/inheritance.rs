//! Parameter and constructor-argument inheritance
//!
//! Runs once, inside `finalize`. Parameter inheritance appends each
//! transitively inherited parameter that is not already present by
//! identity; the visited set makes `inheritValues` cycles terminate
//! instead of recursing.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result};

/// Apply inheritance to every registered component
pub(super) fn apply(
    graph: &ResourceGraph,
    components: &HashMap<String, ResourceId>,
) -> Result<()> {
    for &component in components.values() {
        let mut visited = HashSet::new();
        inherit_parameters(graph, component, &mut visited)?;
    }
    for &component in components.values() {
        inherit_constructor_fields(graph, component)?;
    }
    Ok(())
}

/// Pull parameters of all `inheritValues` targets onto a component
///
/// Returns the component's full parameter list after inheritance.
fn inherit_parameters(
    graph: &ResourceGraph,
    component: ResourceId,
    visited: &mut HashSet<ResourceId>,
) -> Result<Vec<ResourceId>> {
    let mut parameters = graph.property_values(component, vocab::PARAMETERS);
    if !visited.insert(component) {
        return Ok(parameters);
    }

    for target in graph.property_values(component, vocab::INHERIT_VALUES) {
        let inherited = inherit_parameters(graph, target, visited)?;
        let mut appended = 0usize;
        for parameter in inherited {
            if !parameters.contains(&parameter) {
                graph.add_property(component, vocab::PARAMETERS, parameter);
                parameters.push(parameter);
                appended += 1;
            }
        }
        if appended > 0 {
            debug!(
                component = %graph.value(component),
                from = %graph.value(target),
                appended,
                "inherited parameters"
            );
        }
    }
    Ok(parameters)
}

/// Pull `fields` onto constructor-argument objects that inherit them
fn inherit_constructor_fields(graph: &ResourceGraph, component: ResourceId) -> Result<()> {
    let Some(arguments) = graph.property_first(component, vocab::CONSTRUCTOR_ARGUMENTS) else {
        return Ok(());
    };
    let Some(entries) = graph.list(arguments) else {
        return Err(Error::invalid_constructor_arguments(
            graph.value(component),
            "constructorArguments must be an RDF list",
        ));
    };
    for entry in entries {
        let mut visited = HashSet::new();
        inherit_object_fields(graph, entry, &mut visited)?;
    }
    Ok(())
}

fn inherit_object_fields(
    graph: &ResourceGraph,
    object: ResourceId,
    visited: &mut HashSet<ResourceId>,
) -> Result<()> {
    if !visited.insert(object) {
        return Ok(());
    }

    for target in graph.property_values(object, vocab::INHERIT_VALUES) {
        let inheriting_shape = graph.is_a(target, vocab::OBJECT_MAPPING)
            || graph.has_property(target, vocab::FIELDS)
            || graph.has_property(target, vocab::INHERIT_VALUES)
            || graph.has_property(target, vocab::ON_PARAMETER);
        if !inheriting_shape {
            return Err(Error::malformed_object_mapping(
                graph.value(target),
                "inheritance target is not an ObjectMapping and has no fields, inheritValues or onParameter",
            ));
        }

        inherit_object_fields(graph, target, visited)?;

        let existing = graph.property_values(object, vocab::FIELDS);
        for field in graph.property_values(target, vocab::FIELDS) {
            if !existing.contains(&field) {
                graph.add_property(object, vocab::FIELDS, field);
            }
        }
    }
    Ok(())
}
