//! Config constructor
//!
//! Walks a canonical config and resolves every parameter value into a
//! strategy-neutral argument, recursing into the constructor pool for
//! references to other configs, then hands the resolved argument tree to
//! the construction strategy.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::trace;

use semdi_domain::{
    vocab, ConstructionStrategy, Error, InstanceRequest, InstantiationSettings, ResourceGraph,
    ResourceId, Result, TermKind,
};

use crate::pool::ConstructorPool;

/// Translates canonical configs into strategy calls
pub struct ConfigConstructor<I> {
    graph: Arc<ResourceGraph>,
    strategy: Arc<dyn ConstructionStrategy<Instance = I>>,
}

impl<I> ConfigConstructor<I>
where
    I: Clone + Send + Sync + 'static,
{
    /// Create a constructor over a graph and a strategy
    pub fn new(
        graph: Arc<ResourceGraph>,
        strategy: Arc<dyn ConstructionStrategy<Instance = I>>,
    ) -> Self {
        Self { graph, strategy }
    }

    /// Build the artifact for a canonical config
    ///
    /// Child configs referenced from the arguments are instantiated through
    /// the pool, in the order they are encountered during traversal.
    pub async fn create_instance(
        &self,
        pool: &ConstructorPool<I>,
        raw: ResourceId,
        settings: Arc<InstantiationSettings<I>>,
    ) -> Result<I> {
        let graph = &self.graph;
        let mut args = Vec::new();
        for argument in self.arguments(raw) {
            args.push(
                self.argument_value(pool, raw, argument, Arc::clone(&settings))
                    .await?,
            );
        }

        let require_name = graph
            .property_first(raw, vocab::REQUIRE_NAME)
            .map(|v| graph.value(v))
            .ok_or_else(|| {
                Error::invalid_config(graph.value(raw), vocab::REQUIRE_NAME, "is missing")
            })?;
        let require_element = graph
            .property_first(raw, vocab::REQUIRE_ELEMENT)
            .map(|v| graph.value(v));
        let require_no_constructor = graph
            .property_first(raw, vocab::REQUIRE_NO_CONSTRUCTOR)
            .map(|v| graph.value(v) == "true")
            .unwrap_or(false);

        trace!(
            config = %graph.value(raw),
            require_name = %require_name,
            args = args.len(),
            "dispatching to construction strategy"
        );
        self.strategy
            .create_instance(InstanceRequest {
                require_name,
                require_element,
                require_no_constructor,
                args,
                config_iri: graph.value(raw),
                settings,
            })
            .await
    }

    /// The canonical config's argument resources, in declared order
    fn arguments(&self, raw: ResourceId) -> Vec<ResourceId> {
        match self.graph.property_first(raw, vocab::ARGUMENTS) {
            Some(head) => self.graph.list(head).unwrap_or_else(|| vec![head]),
            None => Vec::new(),
        }
    }

    /// Resolve one argument value into a strategy artifact
    fn argument_value<'a>(
        &'a self,
        pool: &'a ConstructorPool<I>,
        raw: ResourceId,
        value: ResourceId,
        settings: Arc<InstantiationSettings<I>>,
    ) -> BoxFuture<'a, Result<I>> {
        async move {
            let graph = &self.graph;

            if graph.has_property(value, vocab::FIELDS) || graph.is_a(value, vocab::OBJECT_MAPPING)
            {
                let mut entries = Vec::new();
                for entry in graph.property_values(value, vocab::FIELDS) {
                    let Some(key) = graph.property_first(entry, vocab::KEY) else {
                        continue;
                    };
                    if graph.term(key) != TermKind::Literal {
                        return Err(Error::malformed_mapping_key(
                            graph.value(raw),
                            graph.value(key),
                        ));
                    }
                    // Entries lacking a value are skipped; required-parameter
                    // enforcement is the preprocessors' job.
                    let Some(entry_value) = graph.property_first(entry, vocab::VALUE) else {
                        continue;
                    };
                    let resolved = self
                        .argument_value(pool, raw, entry_value, Arc::clone(&settings))
                        .await?;
                    entries.push((graph.value(key), resolved));
                }
                return self.strategy.create_hash(entries);
            }

            if graph.has_property(value, vocab::ELEMENTS)
                || graph.is_a(value, vocab::ARRAY_MAPPING)
            {
                let mut items = Vec::new();
                for element in graph.property_values(value, vocab::ELEMENTS) {
                    items.push(
                        self.argument_value(pool, raw, element, Arc::clone(&settings))
                            .await?,
                    );
                }
                return self.strategy.create_array(items);
            }

            if let Some(members) = graph.list(value) {
                let mut items = Vec::new();
                for member in members {
                    items.push(
                        self.argument_value(pool, raw, member, Arc::clone(&settings))
                            .await?,
                    );
                }
                return self.strategy.create_array(items);
            }

            if graph.is_variable(value) {
                return self.strategy.resolve_variable(&graph.value(value), &settings);
            }

            if graph.term(value) == TermKind::Literal {
                return self
                    .strategy
                    .create_primitive(&graph.value(value), graph.datatype(value).as_deref());
            }

            // A named or blank node referencing another config
            pool.instantiate(value, settings).await
        }
        .boxed()
    }
}
