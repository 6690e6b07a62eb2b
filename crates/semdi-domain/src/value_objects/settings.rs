//! Instantiation settings

use std::collections::{HashMap, HashSet};

use crate::rdf::ResourceId;

/// Options of one `instantiate` call chain
///
/// The blacklist is the set of config ids currently under construction on
/// the active call path; it breaks self-referential recursion. Variables
/// are the caller-supplied bindings for `Variable` resources, already in
/// the strategy's artifact type.
///
/// # Example
///
/// ```ignore
/// let settings = InstantiationSettings::new()
///     .with_variable("port", json!(8080))
///     .with_serializations(true);
/// ```
#[derive(Debug, Clone)]
pub struct InstantiationSettings<I> {
    /// Config ids on the active construction call path
    pub blacklist: HashSet<ResourceId>,
    /// Variable name → concrete value bindings
    pub variables: HashMap<String, I>,
    /// Instructs the strategy to emit source instead of live artifacts
    pub serializations: bool,
    /// Requests emitted source wrapped in a function accepting runtime variables
    pub as_function: bool,
}

impl<I> Default for InstantiationSettings<I> {
    fn default() -> Self {
        Self {
            blacklist: HashSet::new(),
            variables: HashMap::new(),
            serializations: false,
            as_function: false,
        }
    }
}

impl<I> InstantiationSettings<I> {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable
    pub fn with_variable<S: Into<String>>(mut self, name: S, value: I) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Replace all variable bindings
    pub fn with_variables(mut self, variables: HashMap<String, I>) -> Self {
        self.variables = variables;
        self
    }

    /// Request source emission
    pub fn with_serializations(mut self, serializations: bool) -> Self {
        self.serializations = serializations;
        self
    }

    /// Request function-wrapped source emission
    pub fn with_as_function(mut self, as_function: bool) -> Self {
        self.as_function = as_function;
        self
    }

    /// Whether a config is on the active construction call path
    pub fn is_blacklisted(&self, config: ResourceId) -> bool {
        self.blacklist.contains(&config)
    }
}

impl<I: Clone> InstantiationSettings<I> {
    /// Sub-settings for children of a config under construction
    ///
    /// Identical to `self` with the config added to the blacklist.
    pub fn child_with(&self, config: ResourceId) -> Self {
        let mut child = self.clone();
        child.blacklist.insert(config);
        child
    }
}
