//! Ergonomic resource handle

use std::sync::Arc;

use super::graph::ResourceGraph;
use super::term::{ResourceId, TermKind};

/// A cheap `(graph, id)` handle for traversing resources
///
/// The engine works with bare [`ResourceId`]s; this handle exists for the
/// facade and for tests, where chained traversal reads better than id
/// plumbing.
#[derive(Clone)]
pub struct Resource {
    graph: Arc<ResourceGraph>,
    id: ResourceId,
}

impl Resource {
    /// Wrap an id in a handle
    pub fn new(graph: Arc<ResourceGraph>, id: ResourceId) -> Self {
        Self { graph, id }
    }

    /// Arena id of this resource
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Term kind of this resource
    pub fn term(&self) -> TermKind {
        self.graph.term(self.id)
    }

    /// Value string of this resource
    pub fn value(&self) -> String {
        self.graph.value(self.id)
    }

    /// Ordered values of a property
    pub fn property(&self, property: &str) -> Vec<Resource> {
        self.graph
            .property_values(self.id, property)
            .into_iter()
            .map(|id| Resource::new(Arc::clone(&self.graph), id))
            .collect()
    }

    /// First value of a property
    pub fn first(&self, property: &str) -> Option<Resource> {
        self.graph
            .property_first(self.id, property)
            .map(|id| Resource::new(Arc::clone(&self.graph), id))
    }

    /// Whether any declared `rdf:type` equals the given IRI
    pub fn is_a(&self, type_iri: &str) -> bool {
        self.graph.is_a(self.id, type_iri)
    }

    /// RDF-list items, when this resource is a list
    pub fn list(&self) -> Option<Vec<Resource>> {
        self.graph.list(self.id).map(|items| {
            items
                .into_iter()
                .map(|id| Resource::new(Arc::clone(&self.graph), id))
                .collect()
        })
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("id", &self.id)
            .field("term", &self.term())
            .field("value", &self.value())
            .finish()
    }
}
