//! Module state

use std::collections::HashMap;
use std::path::PathBuf;

/// Read-only bundle of discovered module metadata
///
/// Collected by the (external) module discovery step and consumed by
/// construction strategies when resolving require names: import paths map
/// package names onto the filesystem, require-name overrides redirect a
/// declared require name to another package.
#[derive(Debug, Clone, Default)]
pub struct ModuleState {
    /// Filesystem roots of discovered modules
    pub import_paths: Vec<PathBuf>,
    /// Declared require name → replacement require name
    pub require_overrides: HashMap<String, String>,
}

impl ModuleState {
    /// Create an empty module state
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import path
    pub fn with_import_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.import_paths.push(path.into());
        self
    }

    /// Add a require-name override
    pub fn with_require_override<S: Into<String>, T: Into<String>>(
        mut self,
        from: S,
        to: T,
    ) -> Self {
        self.require_overrides.insert(from.into(), to.into());
        self
    }

    /// Resolve a require name through the override table
    pub fn resolve_require_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.require_overrides
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}
