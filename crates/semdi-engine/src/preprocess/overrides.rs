//! Override preprocessor
//!
//! Applies `Override` resources to the configs they target. Overrides are
//! indexed by their `overrideInstance` when the stage is built; each
//! override's `overrideSteps` list is applied in order. The stage rewrites
//! the config and lets the rest of the chain canonicalise it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result};

use super::{ConfigPreprocessor, Transformed};

/// Evidence resolved by `can_handle`
pub struct OverrideHandle {
    overrides: Vec<ResourceId>,
}

/// Applies override steps to their target configs
pub struct OverridePreprocessor {
    graph: Arc<ResourceGraph>,
    index: HashMap<ResourceId, Vec<ResourceId>>,
}

impl OverridePreprocessor {
    /// Index all `Override`-typed resources in the graph by target config
    pub fn from_graph(graph: Arc<ResourceGraph>) -> Self {
        let mut index: HashMap<ResourceId, Vec<ResourceId>> = HashMap::new();
        for overriding in graph.resources_of_type(vocab::OVERRIDE) {
            if let Some(target) = graph.property_first(overriding, vocab::OVERRIDE_INSTANCE) {
                index.entry(target).or_default().push(overriding);
            }
        }
        Self { graph, index }
    }

    fn apply_override(&self, config: ResourceId, overriding: ResourceId) -> Result<()> {
        let graph = &self.graph;
        let steps = match graph.property_first(overriding, vocab::OVERRIDE_STEPS) {
            Some(head) => graph.list(head).ok_or_else(|| {
                Error::malformed_override(
                    graph.value(overriding),
                    "overrideSteps must be an RDF list",
                )
            })?,
            None => Vec::new(),
        };
        for step in steps {
            self.apply_step(config, step)?;
        }
        debug!(
            config = %graph.value(config),
            overriding = %graph.value(overriding),
            "override applied"
        );
        Ok(())
    }

    fn apply_step(&self, config: ResourceId, step: ResourceId) -> Result<()> {
        let graph = &self.graph;
        let parameter = graph
            .property_first(step, vocab::OVERRIDE_PARAMETER)
            .ok_or_else(|| {
                Error::malformed_override(graph.value(step), "step lacks overrideParameter")
            })?;
        let parameter_iri = graph.value(parameter);
        let current = graph.property_values(config, &parameter_iri);
        let values = self.override_values(step);

        let updated = if graph.is_a(step, vocab::OVERRIDE_CLEAR) {
            Vec::new()
        } else if graph.is_a(step, vocab::OVERRIDE_LIST_INSERT_BEFORE) {
            self.insert_relative(config, step, &parameter_iri, current, values, 0)?
        } else if graph.is_a(step, vocab::OVERRIDE_LIST_INSERT_AFTER) {
            self.insert_relative(config, step, &parameter_iri, current, values, 1)?
        } else if graph.is_a(step, vocab::OVERRIDE_LIST_INSERT_AT) {
            self.insert_at(config, step, current, values)?
        } else if graph.is_a(step, vocab::OVERRIDE_LIST_REMOVE) {
            current
                .into_iter()
                .filter(|existing| !values.iter().any(|v| graph.same_value(*existing, *v)))
                .collect()
        } else {
            // Replace is the default step semantics
            values
        };

        graph.set_property(config, &parameter_iri, updated);
        Ok(())
    }

    /// The step's value(s); an RDF-list value splices its items in order
    fn override_values(&self, step: ResourceId) -> Vec<ResourceId> {
        let graph = &self.graph;
        match graph.property_first(step, vocab::OVERRIDE_VALUE) {
            Some(value) => graph.list(value).unwrap_or_else(|| vec![value]),
            None => Vec::new(),
        }
    }

    fn insert_relative(
        &self,
        config: ResourceId,
        step: ResourceId,
        parameter_iri: &str,
        mut current: Vec<ResourceId>,
        values: Vec<ResourceId>,
        offset: usize,
    ) -> Result<Vec<ResourceId>> {
        let graph = &self.graph;
        let target = graph
            .property_first(step, vocab::OVERRIDE_TARGET)
            .ok_or_else(|| {
                Error::malformed_override(graph.value(step), "list insert lacks overrideTarget")
            })?;
        let position = current
            .iter()
            .position(|existing| graph.same_value(*existing, target))
            .ok_or_else(|| Error::OverrideTargetNotFound {
                config: graph.value(config),
                parameter: parameter_iri.to_string(),
            })?;
        current.splice(position + offset..position + offset, values);
        Ok(current)
    }

    fn insert_at(
        &self,
        config: ResourceId,
        step: ResourceId,
        mut current: Vec<ResourceId>,
        values: Vec<ResourceId>,
    ) -> Result<Vec<ResourceId>> {
        let graph = &self.graph;
        let target = graph
            .property_first(step, vocab::OVERRIDE_TARGET)
            .ok_or_else(|| {
                Error::malformed_override(graph.value(step), "list insert lacks a target index")
            })?;
        let raw = graph.value(target);
        let index: i64 = raw.parse().map_err(|_| {
            Error::malformed_override(graph.value(step), format!("index '{raw}' is not an integer"))
        })?;
        if index < 0 || index as usize > current.len() {
            return Err(Error::OverrideIndexOutOfRange {
                config: graph.value(config),
                index,
                len: current.len(),
            });
        }
        current.splice(index as usize..index as usize, values);
        Ok(current)
    }
}

impl ConfigPreprocessor for OverridePreprocessor {
    type Handle = OverrideHandle;

    fn name(&self) -> &'static str {
        "override"
    }

    fn can_handle(&self, config: ResourceId) -> Result<Option<Self::Handle>> {
        Ok(self
            .index
            .get(&config)
            .map(|overrides| OverrideHandle {
                overrides: overrides.clone(),
            }))
    }

    fn transform(&self, config: ResourceId, handle: OverrideHandle) -> Result<Transformed> {
        for overriding in handle.overrides {
            self.apply_override(config, overriding)?;
        }
        Ok(Transformed::continued(config))
    }
}
