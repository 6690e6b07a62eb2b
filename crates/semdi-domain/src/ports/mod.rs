//! Ports (interfaces) consumed and exposed by the engine
//!
//! - [`ConstructionStrategy`]: construction back ends (runtime values,
//!   emitted source, ...)
//! - [`TripleSource`]: collaborator interface of the external RDF parser

mod strategy;
mod triples;

pub use strategy::{ConstructionStrategy, InstanceRequest};
pub use triples::{Term, Triple, TripleSource};
