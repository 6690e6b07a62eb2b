//! Error handling types
//!
//! All engine errors carry the IRI (or blank-node label) of the offending
//! resource so failures can be traced back to the declaration that caused
//! them. The enum derives `Clone`: rejected construction futures are cached
//! by the constructor pool and replayed to later callers.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SemDI engine
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A module declared a component that is not of a recognised component type
    #[error("invalid component '{iri}': not an AbstractClass, Class or ComponentInstance (declared types: {types:?})")]
    InvalidComponent {
        /// IRI of the rejected component resource
        iri: String,
        /// The types the resource actually declared
        types: Vec<String>,
    },

    /// Registration was attempted after the registry was finalized
    #[error("registry is frozen: {operation} is only valid before finalization")]
    RegistryFrozen {
        /// The operation that was rejected
        operation: String,
    },

    /// A component's `constructorArguments` value is not an RDF list
    #[error("invalid constructor arguments on '{component}': {reason}")]
    InvalidConstructorArguments {
        /// IRI of the component carrying the malformed declaration
        component: String,
        /// Description of the malformation
        reason: String,
    },

    /// A constructor-argument inheritance target lacks the required shape
    #[error("malformed object mapping reference '{resource}': {reason}")]
    MalformedObjectMapping {
        /// IRI or label of the malformed target
        resource: String,
        /// Description of the malformation
        reason: String,
    },

    /// A canonicalised config failed raw-config validation
    #[error("invalid config '{config}': field {field} {reason}")]
    InvalidConfig {
        /// IRI or label of the config resource
        config: String,
        /// The raw-config field that failed validation
        field: String,
        /// Why the field was rejected
        reason: String,
    },

    /// A config's types resolve to more than one registered component
    #[error("ambiguous component types on '{config}': {types:?} (declare an explicit requireName to disambiguate)")]
    AmbiguousComponentTypes {
        /// IRI or label of the config resource
        config: String,
        /// IRIs of all candidate components
        types: Vec<String>,
    },

    /// An IRI was used as a component but is not registered
    #[error("unknown component '{iri}'")]
    UnknownComponent {
        /// The unregistered IRI
        iri: String,
    },

    /// A variable resource has no binding in the caller-supplied variable map
    #[error("undefined variable '{name}'")]
    UndefinedVariable {
        /// Name of the unbound variable
        name: String,
    },

    /// A list-insert override step used an index outside the target list
    #[error("override index {index} out of range on '{config}' (list length {len})")]
    OverrideIndexOutOfRange {
        /// IRI or label of the overridden config
        config: String,
        /// The offending index as written
        index: i64,
        /// Length of the target value list
        len: usize,
    },

    /// A relative list-insert override step could not find its target value
    #[error("override target not found in parameter '{parameter}' of '{config}'")]
    OverrideTargetNotFound {
        /// IRI or label of the overridden config
        config: String,
        /// IRI of the parameter whose value list was searched
        parameter: String,
    },

    /// An override resource or step lacks the required shape
    #[error("malformed override '{resource}': {reason}")]
    MalformedOverride {
        /// IRI or label of the override resource
        resource: String,
        /// Description of the malformation
        reason: String,
    },

    /// A fields entry carries a non-literal key
    #[error("malformed mapping key '{key}' on '{config}': keys must be literals")]
    MalformedMappingKey {
        /// IRI or label of the config being constructed
        config: String,
        /// Value of the rejected key resource
        key: String,
    },

    /// A construction strategy failed to build an artifact
    #[error("construction of '{iri}' failed: {message}")]
    Construction {
        /// IRI or label of the config being constructed
        iri: String,
        /// Strategy-provided failure description
        message: String,
    },

    /// A triple could not be folded into the resource graph
    #[error("invalid triple: {reason}")]
    InvalidTriple {
        /// Description of the malformation
        reason: String,
    },

    /// Engine configuration error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },
}

impl Error {
    /// Create an invalid component error
    pub fn invalid_component<S: Into<String>>(iri: S, types: Vec<String>) -> Self {
        Self::InvalidComponent {
            iri: iri.into(),
            types,
        }
    }

    /// Create a frozen registry error
    pub fn registry_frozen<S: Into<String>>(operation: S) -> Self {
        Self::RegistryFrozen {
            operation: operation.into(),
        }
    }

    /// Create an invalid constructor arguments error
    pub fn invalid_constructor_arguments<S: Into<String>, R: Into<String>>(
        component: S,
        reason: R,
    ) -> Self {
        Self::InvalidConstructorArguments {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed object mapping error
    pub fn malformed_object_mapping<S: Into<String>, R: Into<String>>(
        resource: S,
        reason: R,
    ) -> Self {
        Self::MalformedObjectMapping {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config<S: Into<String>, F: Into<String>, R: Into<String>>(
        config: S,
        field: F,
        reason: R,
    ) -> Self {
        Self::InvalidConfig {
            config: config.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an ambiguous component types error
    pub fn ambiguous_component_types<S: Into<String>>(config: S, types: Vec<String>) -> Self {
        Self::AmbiguousComponentTypes {
            config: config.into(),
            types,
        }
    }

    /// Create an unknown component error
    pub fn unknown_component<S: Into<String>>(iri: S) -> Self {
        Self::UnknownComponent { iri: iri.into() }
    }

    /// Create an undefined variable error
    pub fn undefined_variable<S: Into<String>>(name: S) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    /// Create a malformed override error
    pub fn malformed_override<S: Into<String>, R: Into<String>>(resource: S, reason: R) -> Self {
        Self::MalformedOverride {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed mapping key error
    pub fn malformed_mapping_key<S: Into<String>, K: Into<String>>(config: S, key: K) -> Self {
        Self::MalformedMappingKey {
            config: config.into(),
            key: key.into(),
        }
    }

    /// Create a construction error
    pub fn construction<S: Into<String>, M: Into<String>>(iri: S, message: M) -> Self {
        Self::Construction {
            iri: iri.into(),
            message: message.into(),
        }
    }

    /// Create an invalid triple error
    pub fn invalid_triple<S: Into<String>>(reason: S) -> Self {
        Self::InvalidTriple {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
