//! Arena-backed resource graph

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use dashmap::DashMap;

use crate::vocab;

use super::term::{ResourceId, TermKind};

/// One resource in the arena
#[derive(Debug)]
struct Node {
    term: TermKind,
    value: String,
    datatype: Option<String>,
    properties: HashMap<String, Vec<ResourceId>>,
    list: Option<Vec<ResourceId>>,
}

impl Node {
    fn new(term: TermKind, value: String) -> Self {
        Self {
            term,
            value,
            datatype: None,
            properties: HashMap::new(),
            list: None,
        }
    }
}

/// Read-mostly projection of a parsed RDF graph
///
/// Nodes are addressable by IRI through the interning index and by
/// [`ResourceId`] from any property list. Property values are ordered and
/// non-empty; an empty replacement removes the property. Mutation is used
/// by the loader while assembling the graph, by the registry for module
/// back-references, and by preprocessors canonicalising a config on its
/// first visit.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    nodes: RwLock<Vec<Node>>,
    by_iri: DashMap<String, ResourceId>,
    blank_counter: AtomicU32,
}

impl ResourceGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resources in the arena
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the arena holds no resources
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Node>> {
        self.nodes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Node>> {
        self.nodes.write().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, node: Node) -> ResourceId {
        let mut nodes = self.write();
        let id = ResourceId::new(nodes.len());
        nodes.push(node);
        id
    }

    // Construction

    /// Intern a named node by IRI, creating it on first use
    pub fn named(&self, iri: &str) -> ResourceId {
        if let Some(existing) = self.by_iri.get(iri) {
            return *existing;
        }
        match self.by_iri.entry(iri.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(entry) => *entry.get(),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let id = self.push(Node::new(TermKind::NamedNode, iri.to_string()));
                entry.insert(id);
                id
            }
        }
    }

    /// Create a fresh blank node
    pub fn blank(&self) -> ResourceId {
        let n = self.blank_counter.fetch_add(1, Ordering::Relaxed);
        self.push(Node::new(TermKind::BlankNode, format!("b{n}")))
    }

    /// Create a blank node with a caller-supplied label (used by loaders)
    pub fn blank_labeled(&self, label: &str) -> ResourceId {
        self.push(Node::new(TermKind::BlankNode, label.to_string()))
    }

    /// Create a plain string literal
    pub fn literal(&self, value: &str) -> ResourceId {
        self.push(Node::new(TermKind::Literal, value.to_string()))
    }

    /// Create a literal with an explicit datatype IRI
    pub fn literal_typed(&self, value: &str, datatype: &str) -> ResourceId {
        let mut node = Node::new(TermKind::Literal, value.to_string());
        node.datatype = Some(datatype.to_string());
        self.push(node)
    }

    /// Create a variable resource
    pub fn variable(&self, name: &str) -> ResourceId {
        self.push(Node::new(TermKind::Variable, name.to_string()))
    }

    // Read view

    /// Term kind of a resource
    pub fn term(&self, id: ResourceId) -> TermKind {
        self.read()[id.index()].term
    }

    /// Value string of a resource: IRI, blank label, lexical form, or variable name
    pub fn value(&self, id: ResourceId) -> String {
        self.read()[id.index()].value.clone()
    }

    /// Datatype IRI of a literal, when declared
    pub fn datatype(&self, id: ResourceId) -> Option<String> {
        self.read()[id.index()].datatype.clone()
    }

    /// Look up a named node by IRI without creating it
    pub fn lookup(&self, iri: &str) -> Option<ResourceId> {
        self.by_iri.get(iri).map(|entry| *entry)
    }

    /// Ordered values of a property, empty when absent
    pub fn property_values(&self, id: ResourceId, property: &str) -> Vec<ResourceId> {
        self.read()[id.index()]
            .properties
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    /// First value of a property
    pub fn property_first(&self, id: ResourceId, property: &str) -> Option<ResourceId> {
        self.read()[id.index()]
            .properties
            .get(property)
            .and_then(|values| values.first().copied())
    }

    /// Whether a resource carries a property
    pub fn has_property(&self, id: ResourceId, property: &str) -> bool {
        self.read()[id.index()].properties.contains_key(property)
    }

    /// The RDF-list projection of a resource, when it is a list
    pub fn list(&self, id: ResourceId) -> Option<Vec<ResourceId>> {
        self.read()[id.index()].list.clone()
    }

    /// Whether any declared `rdf:type` of the resource equals the given IRI
    pub fn is_a(&self, id: ResourceId, type_iri: &str) -> bool {
        let nodes = self.read();
        match nodes[id.index()].properties.get(vocab::rdf::TYPE) {
            Some(types) => types
                .iter()
                .any(|t| nodes[t.index()].value == type_iri),
            None => false,
        }
    }

    /// Whether the resource is a variable, by term kind or declared type
    pub fn is_variable(&self, id: ResourceId) -> bool {
        self.term(id) == TermKind::Variable || self.is_a(id, vocab::VARIABLE)
    }

    /// All resources declaring the given `rdf:type`
    pub fn resources_of_type(&self, type_iri: &str) -> Vec<ResourceId> {
        let nodes = self.read();
        (0..nodes.len())
            .filter(|&i| {
                nodes[i]
                    .properties
                    .get(vocab::rdf::TYPE)
                    .map(|types| types.iter().any(|t| nodes[t.index()].value == type_iri))
                    .unwrap_or(false)
            })
            .map(ResourceId::new)
            .collect()
    }

    /// All resources carrying the given property
    pub fn resources_with_property(&self, property: &str) -> Vec<ResourceId> {
        let nodes = self.read();
        (0..nodes.len())
            .filter(|&i| nodes[i].properties.contains_key(property))
            .map(ResourceId::new)
            .collect()
    }

    /// Whether two resources denote the same value
    ///
    /// Identity for blank nodes; term, value and datatype equality otherwise,
    /// so a literal recreated by a loader still matches an override target.
    pub fn same_value(&self, a: ResourceId, b: ResourceId) -> bool {
        if a == b {
            return true;
        }
        let nodes = self.read();
        let (na, nb) = (&nodes[a.index()], &nodes[b.index()]);
        na.term != TermKind::BlankNode
            && na.term == nb.term
            && na.value == nb.value
            && na.datatype == nb.datatype
    }

    // Mutation

    /// Append a value to a property, preserving order
    pub fn add_property(&self, id: ResourceId, property: &str, value: ResourceId) {
        self.write()[id.index()]
            .properties
            .entry(property.to_string())
            .or_default()
            .push(value);
    }

    /// Replace a property's values; an empty list removes the property
    pub fn set_property(&self, id: ResourceId, property: &str, values: Vec<ResourceId>) {
        let mut nodes = self.write();
        if values.is_empty() {
            nodes[id.index()].properties.remove(property);
        } else {
            nodes[id.index()]
                .properties
                .insert(property.to_string(), values);
        }
    }

    /// Remove a property entirely
    pub fn clear_property(&self, id: ResourceId, property: &str) {
        self.write()[id.index()].properties.remove(property);
    }

    /// Declare an additional `rdf:type` on a resource
    pub fn add_type(&self, id: ResourceId, type_iri: &str) {
        let type_id = self.named(type_iri);
        self.add_property(id, vocab::rdf::TYPE, type_id);
    }

    /// Install or replace the RDF-list projection of a resource
    pub fn set_list(&self, id: ResourceId, items: Vec<ResourceId>) {
        self.write()[id.index()].list = Some(items);
    }
}
