//! Term kinds and arena ids

use serde::{Deserialize, Serialize};

/// Kind of an RDF term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    /// A node identified by an IRI
    NamedNode,
    /// A node identified by a document-local label
    BlankNode,
    /// A literal with a lexical form and optional datatype
    Literal,
    /// A placeholder resolved at instantiation time
    Variable,
}

/// Dense arena id of a resource in a [`ResourceGraph`](super::ResourceGraph)
///
/// Ids are cheap to copy and hash; the constructor pool's blacklist and
/// instance cache are keyed by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Create an id from a raw arena index
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The arena index of this id
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
