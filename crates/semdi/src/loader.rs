//! Graph loader
//!
//! Assembles a [`ResourceGraph`] from parsed triples. Parsing RDF
//! serializations is the external parser's job; the loader folds its
//! output into the arena and converts `rdf:first`/`rdf:rest` chains into
//! list projections.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result, Term, Triple, TripleSource};

/// Folds parsed triples into a resource graph
#[derive(Default)]
pub struct GraphLoader {
    graph: Arc<ResourceGraph>,
    blanks: DashMap<String, ResourceId>,
}

impl GraphLoader {
    /// Create a loader over a fresh graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader appending to an existing graph
    pub fn with_graph(graph: Arc<ResourceGraph>) -> Self {
        Self {
            graph,
            blanks: DashMap::new(),
        }
    }

    /// The graph being assembled
    pub fn graph(&self) -> Arc<ResourceGraph> {
        Arc::clone(&self.graph)
    }

    /// Import a batch of triples and fold list chains
    pub fn import<T: IntoIterator<Item = Triple>>(&self, triples: T) -> Result<()> {
        let mut count = 0usize;
        for triple in triples {
            self.add_triple(triple)?;
            count += 1;
        }
        self.fold_lists();
        debug!(triples = count, resources = self.graph.len(), "imported triples");
        Ok(())
    }

    /// Import from an asynchronous triple source and fold list chains
    pub async fn import_source<S: TripleSource>(&self, mut source: S) -> Result<()> {
        while let Some(triple) = source.next_triple().await? {
            self.add_triple(triple)?;
        }
        self.fold_lists();
        Ok(())
    }

    /// Fold one triple into the graph
    pub fn add_triple(&self, triple: Triple) -> Result<()> {
        if matches!(triple.subject, Term::Literal { .. }) {
            return Err(Error::invalid_triple("subject must not be a literal"));
        }
        let Term::NamedNode(predicate) = &triple.predicate else {
            return Err(Error::invalid_triple("predicate must be a named node"));
        };
        let subject = self.term_id(&triple.subject);
        let object = self.term_id(&triple.object);
        self.graph.add_property(subject, predicate, object);
        Ok(())
    }

    fn term_id(&self, term: &Term) -> ResourceId {
        match term {
            Term::NamedNode(iri) => self.graph.named(iri),
            Term::BlankNode(label) => match self.blanks.entry(label.clone()) {
                dashmap::mapref::entry::Entry::Occupied(entry) => *entry.get(),
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let id = self.graph.blank_labeled(label);
                    entry.insert(id);
                    id
                }
            },
            Term::Literal { value, datatype } => match datatype {
                Some(datatype) => self.graph.literal_typed(value, datatype),
                None => self.graph.literal(value),
            },
        }
    }

    /// Convert `rdf:first`/`rdf:rest` chains into list projections
    ///
    /// Every list cell receives the projection of its tail, so properties
    /// may point anywhere into a chain. `rdf:nil` projects the empty list.
    fn fold_lists(&self) {
        for cell in self.graph.resources_with_property(vocab::rdf::FIRST) {
            let mut items = Vec::new();
            let mut seen = std::collections::HashSet::new();
            let mut current = cell;
            loop {
                if !seen.insert(current) {
                    break;
                }
                let Some(first) = self.graph.property_first(current, vocab::rdf::FIRST) else {
                    break;
                };
                items.push(first);
                match self.graph.property_first(current, vocab::rdf::REST) {
                    Some(rest) if self.graph.value(rest) != vocab::rdf::NIL => current = rest,
                    _ => break,
                }
            }
            self.graph.set_list(cell, items);
        }
        if let Some(nil) = self.graph.lookup(vocab::rdf::NIL) {
            self.graph.set_list(nil, Vec::new());
        }
    }
}
