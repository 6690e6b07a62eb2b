//! Constructor pool
//!
//! Orchestrates the instantiation pipeline: memoises instances by config
//! id, short-circuits self-referential cycles through the blacklist,
//! resolves variables, and drives the preprocessor chain and the config
//! constructor.
//!
//! A cache slot moves `absent → pending(shared future) → resolved |
//! rejected` and never leaves a terminal state: a rejected construction
//! poisons its slot for the lifetime of the pool, and re-requests replay
//! the same error without re-running preprocessing. Slot reservation and
//! the memo check happen in one atomic map-entry operation, so for each
//! config id at most one construction ever runs, even when two callers
//! race between check and insert.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tracing::{debug, trace};

use semdi_domain::{
    ConstructionStrategy, InstantiationSettings, ResourceGraph, ResourceId, Result,
};

use crate::constructor::ConfigConstructor;
use crate::preprocess::PreprocessorChain;

type InstanceFuture<I> = Shared<BoxFuture<'static, Result<I>>>;

struct PoolInner<I: Clone + Send + Sync + 'static> {
    graph: Arc<ResourceGraph>,
    chain: PreprocessorChain,
    constructor: ConfigConstructor<I>,
    strategy: Arc<dyn ConstructionStrategy<Instance = I>>,
    cache: DashMap<ResourceId, InstanceFuture<I>>,
}

/// Memoising orchestrator of the instantiation pipeline
///
/// Cheap to clone; all clones share one instance cache.
pub struct ConstructorPool<I: Clone + Send + Sync + 'static> {
    inner: Arc<PoolInner<I>>,
}

impl<I: Clone + Send + Sync + 'static> Clone for ConstructorPool<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I> ConstructorPool<I>
where
    I: Clone + Send + Sync + 'static,
{
    /// Create a pool over a graph, a preprocessor chain and a strategy
    pub fn new(
        graph: Arc<ResourceGraph>,
        chain: PreprocessorChain,
        strategy: Arc<dyn ConstructionStrategy<Instance = I>>,
    ) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                constructor: ConfigConstructor::new(Arc::clone(&graph), Arc::clone(&strategy)),
                graph,
                chain,
                strategy,
                cache: DashMap::new(),
            }),
        }
    }

    /// Instantiate a config resource
    ///
    /// Blacklisted configs resolve immediately to the strategy's undefined
    /// placeholder; variables resolve against the settings; everything else
    /// is memoised by config id. Only the first call's settings
    /// canonicalise the config.
    pub async fn instantiate(
        &self,
        config: ResourceId,
        settings: Arc<InstantiationSettings<I>>,
    ) -> Result<I> {
        let inner = &self.inner;

        if settings.is_blacklisted(config) {
            trace!(config = %inner.graph.value(config), "cycle short-circuit");
            return Ok(inner.strategy.create_undefined());
        }

        if inner.graph.is_variable(config) {
            return inner
                .strategy
                .resolve_variable(&inner.graph.value(config), &settings);
        }

        let slot = match inner.cache.entry(config) {
            Entry::Occupied(entry) => {
                trace!(config = %inner.graph.value(config), "instance cache hit");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let pool = self.clone();
                let future = async move { pool.construct(config, settings).await }
                    .boxed()
                    .shared();
                entry.insert(future.clone());
                future
            }
        };
        slot.await
    }

    /// Canonicalise and construct; runs at most once per config id
    async fn construct(
        self,
        config: ResourceId,
        settings: Arc<InstantiationSettings<I>>,
    ) -> Result<I> {
        debug!(config = %self.inner.graph.value(config), "constructing instance");
        let raw = self.inner.chain.preprocess(config)?;
        let sub_settings = Arc::new(settings.child_with(config));
        self.inner
            .constructor
            .create_instance(&self, raw, sub_settings)
            .await
    }

    /// Number of cache slots, pending or terminal
    pub fn cached_count(&self) -> usize {
        self.inner.cache.len()
    }

    /// Whether a config has a cache slot
    pub fn is_cached(&self, config: ResourceId) -> bool {
        self.inner.cache.contains_key(&config)
    }

    /// The graph this pool constructs from
    pub fn graph(&self) -> &Arc<ResourceGraph> {
        &self.inner.graph
    }
}
