//! RDF resource model
//!
//! A read-mostly projection of the parsed RDF graph. Resources live in an
//! arena keyed by dense integer ids; property maps store ids, never owning
//! pointers, so cyclic declarations stay cheap to represent and mutation
//! stays arena-bounded.

mod graph;
mod resource;
mod term;

pub use graph::ResourceGraph;
pub use resource::Resource;
pub use term::{ResourceId, TermKind};
