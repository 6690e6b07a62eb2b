//! Triple Source Port
//!
//! Collaborator interface of the external RDF parser. The engine never
//! parses serializations; it consumes already-parsed triples and folds
//! them into a [`ResourceGraph`](crate::rdf::ResourceGraph).

use async_trait::async_trait;

use crate::error::Result;

/// One term of a parsed triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A node identified by an IRI
    NamedNode(String),
    /// A node identified by a document-local label
    BlankNode(String),
    /// A literal with a lexical form and optional datatype IRI
    Literal {
        /// The lexical form
        value: String,
        /// Datatype IRI, when not a plain string
        datatype: Option<String>,
    },
}

impl Term {
    /// Shorthand for a named node term
    pub fn named<S: Into<String>>(iri: S) -> Self {
        Self::NamedNode(iri.into())
    }

    /// Shorthand for a blank node term
    pub fn blank<S: Into<String>>(label: S) -> Self {
        Self::BlankNode(label.into())
    }

    /// Shorthand for a plain literal term
    pub fn literal<S: Into<String>>(value: S) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
        }
    }

    /// Shorthand for a typed literal term
    pub fn literal_typed<S: Into<String>, D: Into<String>>(value: S, datatype: D) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
        }
    }
}

/// One parsed RDF triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// Subject term: named or blank
    pub subject: Term,
    /// Predicate term: must be named
    pub predicate: Term,
    /// Object term
    pub object: Term,
}

impl Triple {
    /// Create a triple
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Asynchronous stream of parsed triples
///
/// Implemented by adapters over whatever serialization the external parser
/// supports; the engine depends only on the abstract graph.
#[async_trait]
pub trait TripleSource: Send {
    /// Pull the next triple, `None` at end of stream
    async fn next_triple(&mut self) -> Result<Option<Triple>>;
}

/// Blanket source over any sendable triple iterator
#[async_trait]
impl<T> TripleSource for T
where
    T: Iterator<Item = Triple> + Send,
{
    async fn next_triple(&mut self) -> Result<Option<Triple>> {
        Ok(self.next())
    }
}
