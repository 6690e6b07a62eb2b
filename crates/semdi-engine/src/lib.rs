//! Engine Layer - SemDI
//!
//! This crate contains the instantiation pipeline of the SemDI semantic
//! dependency injection engine.
//!
//! ## Architecture
//!
//! An instantiation request flows through four stages:
//!
//! ```text
//! instantiate(config, settings)
//!   → pool: blacklist check / variable check / memo check
//!   → preprocessor chain: canonicalise the config (first handler wins)
//!   → constructor: resolve arguments (recursing into the pool for refs)
//!   → strategy: build the concrete artifact
//!   → pool: cache the shared future under the config id
//! ```
//!
//! - [`registry::ComponentRegistry`]: mutable-then-frozen component state
//! - [`preprocess::PreprocessorChain`]: config canonicalisation
//! - [`constructor::ConfigConstructor`]: argument tree resolution
//! - [`pool::ConstructorPool`]: memoisation, cycle short-circuit, orchestration

pub mod constructor;
pub mod pool;
pub mod preprocess;
pub mod registry;

pub use constructor::ConfigConstructor;
pub use pool::ConstructorPool;
pub use preprocess::{ConfigPreprocessor, PreprocessorChain, Transformed};
pub use registry::ComponentRegistry;
