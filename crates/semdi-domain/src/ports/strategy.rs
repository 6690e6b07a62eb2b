//! Construction Strategy Port
//!
//! The back end of the instantiation pipeline: turns resolved argument
//! trees into concrete artifacts. The engine stays strategy-neutral; a
//! strategy may build live runtime values or emit serialized source.
//!
//! All operations are total on well-typed inputs; failures surface through
//! the returned `Result` and are cached by the constructor pool in the
//! rejected state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::InstantiationSettings;

/// Terminal construction request passed to a strategy
///
/// Produced by the config constructor from a canonical config: the require
/// target, the fully resolved arguments in traversal order, and the config
/// identity under which the pool memoises the artifact.
#[derive(Debug, Clone)]
pub struct InstanceRequest<I> {
    /// Name of the package or module holding the constructor
    pub require_name: String,
    /// Export of the required package, when not the package itself
    pub require_element: Option<String>,
    /// Use the required element directly instead of invoking a constructor
    pub require_no_constructor: bool,
    /// Resolved constructor arguments, in traversal order
    pub args: Vec<I>,
    /// IRI or label of the config resource being constructed
    pub config_iri: String,
    /// Settings of the instantiation call chain
    pub settings: Arc<InstantiationSettings<I>>,
}

/// Construction Strategy Port
///
/// Implementations are thread-affine to the constructor pool that owns
/// them and are driven only through `Arc<dyn ConstructionStrategy>`.
///
/// # Example
///
/// ```ignore
/// let strategy: Arc<dyn ConstructionStrategy<Instance = Value>> =
///     Arc::new(ValueStrategy::new());
/// let undefined = strategy.create_undefined();
/// ```
#[async_trait]
pub trait ConstructionStrategy: Send + Sync {
    /// The artifact type this strategy produces
    type Instance: Clone + Send + Sync + 'static;

    /// Placeholder returned at blacklisted cycle points
    fn create_undefined(&self) -> Self::Instance;

    /// Resolve a variable against the caller-supplied bindings
    ///
    /// # Errors
    /// `UndefinedVariable` when the name has no binding
    fn resolve_variable(
        &self,
        name: &str,
        settings: &InstantiationSettings<Self::Instance>,
    ) -> Result<Self::Instance>;

    /// Materialise a literal from its lexical form and optional datatype
    fn create_primitive(&self, value: &str, datatype: Option<&str>) -> Result<Self::Instance>;

    /// Build an ordered sequence artifact
    fn create_array(&self, items: Vec<Self::Instance>) -> Result<Self::Instance>;

    /// Build a keyed map artifact from `(key, value)` entries
    fn create_hash(&self, entries: Vec<(String, Self::Instance)>) -> Result<Self::Instance>;

    /// Build the final artifact for a canonical config
    async fn create_instance(&self, request: InstanceRequest<Self::Instance>)
        -> Result<Self::Instance>;
}
