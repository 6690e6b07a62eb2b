//! SemDI - Semantic Dependency Injection
//!
//! SemDI instantiates object graphs described as RDF resources: modules
//! declare components with typed parameters and constructor mappings,
//! configs reference components and carry parameter values, and a
//! pluggable construction strategy turns resolved argument trees into
//! concrete artifacts: live runtime values or emitted source.
//!
//! ## Usage
//!
//! ```ignore
//! use semdi::{ComponentManager, GraphLoader, InstantiationSettings};
//! use semdi_strategies::ValueStrategy;
//!
//! let manager = ComponentManager::builder(ValueStrategy::new())
//!     .with_triples(triples)?
//!     .build()?;
//!
//! let instance = manager
//!     .instantiate("ex:myLexer", InstantiationSettings::new())
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ semdi            manager · loader · logging             │
//! ├─────────────────────────────────────────────────────────┤
//! │ semdi-engine     registry · preprocessors · constructor │
//! │                  · constructor pool                     │
//! ├──────────────────────────────┬──────────────────────────┤
//! │ semdi-domain                 │ semdi-strategies         │
//! │ resource graph · vocabulary  │ ValueStrategy            │
//! │ errors · ports               │ SourceStrategy           │
//! └──────────────────────────────┴──────────────────────────┘
//! ```

pub mod loader;
pub mod logging;
pub mod manager;

pub use loader::GraphLoader;
pub use logging::{init_logging, LoggingConfig};
pub use manager::{ComponentManager, ComponentManagerBuilder};

pub use semdi_domain::{
    vocab, Error, InstantiationSettings, ModuleState, Resource, ResourceGraph, ResourceId, Result,
    Term, Triple,
};
pub use semdi_engine::{ComponentRegistry, ConstructorPool, PreprocessorChain};
pub use semdi_strategies::{SourceStrategy, ValueStrategy};
