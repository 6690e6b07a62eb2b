//! Construction Strategies - SemDI
//!
//! Back ends for the SemDI instantiation pipeline:
//!
//! - [`ValueStrategy`]: builds runtime `serde_json::Value` artifacts;
//!   the default for tests and in-process wiring
//! - [`SourceStrategy`]: emits CommonJS-style constructor source instead
//!   of live objects, for ahead-of-time serialization

mod source;
mod value;

pub use source::SourceStrategy;
pub use value::ValueStrategy;
