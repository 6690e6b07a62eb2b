//! Config preprocessor chain
//!
//! Rewrites a raw config resource into canonical form: `requireName`
//! present and Literal, all parameter values materialised, constructor
//! arguments laid out under `arguments`.
//!
//! The chain is an ordered list. The first stage whose `can_handle`
//! returns a handle acts on the config. Rewriting stages (overrides,
//! generics, parameter defaults) report `finished = false` and the chain
//! continues with the rewritten resource; canonicalising stages
//! (component-mapped, component-unmapped) report `finished = true` and
//! end the chain. When no stage matches, the config is used unchanged.
//! In every case the result is subjected to [`validate_raw_config`].

mod component;
mod defaults;
mod generics;
mod mapped;
mod overrides;
mod unmapped;

use std::sync::Arc;

use tracing::{debug, trace};

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result, TermKind};

use crate::registry::ComponentRegistry;

pub use defaults::ParameterDefaultsPreprocessor;
pub use generics::GenericsPreprocessor;
pub use mapped::ComponentMappedPreprocessor;
pub use overrides::OverridePreprocessor;
pub use unmapped::ComponentUnmappedPreprocessor;

/// Result of one preprocessor transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformed {
    /// The rewritten config, usually the same identity as the input
    pub resource: ResourceId,
    /// Whether the resource is fully canonical and the chain should stop
    pub finished: bool,
}

impl Transformed {
    /// A canonical result ending the chain
    pub fn finished(resource: ResourceId) -> Self {
        Self {
            resource,
            finished: true,
        }
    }

    /// A rewritten result the rest of the chain keeps processing
    pub fn continued(resource: ResourceId) -> Self {
        Self {
            resource,
            finished: false,
        }
    }
}

/// One stage of the preprocessor chain
///
/// `can_handle` is pure; `transform` may mutate the config in place and
/// returns the canonicalised (or rewritten) resource. The handle carries
/// whatever `can_handle` resolved so `transform` does not repeat the work.
pub trait ConfigPreprocessor: Send + Sync {
    /// Handler-specific evidence passed from `can_handle` to `transform`
    type Handle;

    /// Stage name for diagnostics
    fn name(&self) -> &'static str;

    /// Whether this stage applies to the config
    fn can_handle(&self, config: ResourceId) -> Result<Option<Self::Handle>>;

    /// Rewrite the config
    fn transform(&self, config: ResourceId, handle: Self::Handle) -> Result<Transformed>;
}

/// Object-safe adapter over [`ConfigPreprocessor`]
trait DynPreprocessor: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, config: ResourceId) -> Result<Option<Transformed>>;
}

impl<P: ConfigPreprocessor> DynPreprocessor for P {
    fn name(&self) -> &'static str {
        ConfigPreprocessor::name(self)
    }

    fn apply(&self, config: ResourceId) -> Result<Option<Transformed>> {
        match self.can_handle(config)? {
            Some(handle) => self.transform(config, handle).map(Some),
            None => Ok(None),
        }
    }
}

/// Ordered preprocessor chain
pub struct PreprocessorChain {
    graph: Arc<ResourceGraph>,
    stages: Vec<Box<dyn DynPreprocessor>>,
}

impl PreprocessorChain {
    /// Create an empty chain
    pub fn new(graph: Arc<ResourceGraph>) -> Self {
        Self {
            graph,
            stages: Vec::new(),
        }
    }

    /// The built-in chain in its default order:
    /// override → generics → parameter defaults → component-mapped →
    /// component-unmapped
    pub fn standard(graph: Arc<ResourceGraph>, registry: Arc<ComponentRegistry>) -> Self {
        Self::new(Arc::clone(&graph))
            .with_stage(OverridePreprocessor::from_graph(Arc::clone(&graph)))
            .with_stage(GenericsPreprocessor::new(
                Arc::clone(&graph),
                Arc::clone(&registry),
            ))
            .with_stage(ParameterDefaultsPreprocessor::new(
                Arc::clone(&graph),
                Arc::clone(&registry),
            ))
            .with_stage(ComponentMappedPreprocessor::new(
                Arc::clone(&graph),
                Arc::clone(&registry),
            ))
            .with_stage(ComponentUnmappedPreprocessor::new(graph, registry))
    }

    /// Append a stage
    pub fn with_stage<P: ConfigPreprocessor + 'static>(mut self, stage: P) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Canonicalise a config and validate the result
    ///
    /// # Returns
    /// The raw (canonical) config resource, usually the input identity
    pub fn preprocess(&self, config: ResourceId) -> Result<ResourceId> {
        let mut current = config;
        for stage in &self.stages {
            match stage.apply(current)? {
                Some(transformed) => {
                    trace!(
                        config = %self.graph.value(current),
                        stage = stage.name(),
                        finished = transformed.finished,
                        "preprocessor matched"
                    );
                    current = transformed.resource;
                    if transformed.finished {
                        break;
                    }
                }
                None => continue,
            }
        }
        validate_raw_config(&self.graph, current)?;
        debug!(config = %self.graph.value(current), "config canonicalised");
        Ok(current)
    }
}

/// Validate the canonical-config invariants
///
/// `requireName` required and Literal; `requireElement` and
/// `requireNoConstructor` absent or Literal.
pub fn validate_raw_config(graph: &ResourceGraph, config: ResourceId) -> Result<()> {
    require_literal(graph, config, vocab::REQUIRE_NAME, true)?;
    require_literal(graph, config, vocab::REQUIRE_ELEMENT, false)?;
    require_literal(graph, config, vocab::REQUIRE_NO_CONSTRUCTOR, false)?;
    Ok(())
}

fn require_literal(
    graph: &ResourceGraph,
    config: ResourceId,
    field: &str,
    required: bool,
) -> Result<()> {
    match graph.property_first(config, field) {
        None if required => Err(Error::invalid_config(
            graph.value(config),
            field,
            "is missing",
        )),
        None => Ok(()),
        Some(value) if graph.term(value) != TermKind::Literal => Err(Error::invalid_config(
            graph.value(config),
            field,
            format!("must be a literal, found {:?}", graph.term(value)),
        )),
        Some(_) => Ok(()),
    }
}
