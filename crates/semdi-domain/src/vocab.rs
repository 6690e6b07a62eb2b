//! Configuration vocabulary
//!
//! IRIs of the SemDI ontology terms used by module, component and config
//! declarations, plus the handful of `rdf:` and `xsd:` terms the engine
//! interprets directly. Authoring contexts must map at least the class and
//! property terms below.

/// Base IRI of the SemDI ontology
pub const NS: &str = "https://semdi.dev/ontology#";

// Classes

/// A module bundling component definitions
pub const MODULE: &str = "https://semdi.dev/ontology#Module";
/// An abstract component: instantiable only through subcomponents
pub const ABSTRACT_CLASS: &str = "https://semdi.dev/ontology#AbstractClass";
/// A concrete component constructed through its constructor
pub const CLASS: &str = "https://semdi.dev/ontology#Class";
/// A component resolving to an existing exported instance
pub const COMPONENT_INSTANCE: &str = "https://semdi.dev/ontology#ComponentInstance";
/// A placeholder resolved against caller-supplied bindings at instantiation time
pub const VARIABLE: &str = "https://semdi.dev/ontology#Variable";
/// A constructor-argument object producing keyed entries
pub const OBJECT_MAPPING: &str = "https://semdi.dev/ontology#ObjectMapping";
/// A constructor-argument object producing an ordered sequence
pub const ARRAY_MAPPING: &str = "https://semdi.dev/ontology#ArrayMapping";
/// A resource overriding parameter values of a config
pub const OVERRIDE: &str = "https://semdi.dev/ontology#Override";

// Override step classes

/// Insert values before the first occurrence of a target value
pub const OVERRIDE_LIST_INSERT_BEFORE: &str =
    "https://semdi.dev/ontology#OverrideListInsertBefore";
/// Insert values after the first occurrence of a target value
pub const OVERRIDE_LIST_INSERT_AFTER: &str = "https://semdi.dev/ontology#OverrideListInsertAfter";
/// Insert values at a 0-based index
pub const OVERRIDE_LIST_INSERT_AT: &str = "https://semdi.dev/ontology#OverrideListInsertAt";
/// Remove all occurrences of the given values
pub const OVERRIDE_LIST_REMOVE: &str = "https://semdi.dev/ontology#OverrideListRemove";
/// Replace the parameter's entire value list
pub const OVERRIDE_REPLACE: &str = "https://semdi.dev/ontology#OverrideReplace";
/// Remove the parameter entirely
pub const OVERRIDE_CLEAR: &str = "https://semdi.dev/ontology#OverrideClear";

// Properties

/// Module → contained component definitions
pub const COMPONENTS: &str = "https://semdi.dev/ontology#components";
/// Component → declared parameters, in declaration order
pub const PARAMETERS: &str = "https://semdi.dev/ontology#parameters";
/// Component → RDF list describing the constructor argument layout
pub const CONSTRUCTOR_ARGUMENTS: &str = "https://semdi.dev/ontology#constructorArguments";
/// Name of the package or module the strategy requires
pub const REQUIRE_NAME: &str = "https://semdi.dev/ontology#requireName";
/// Export of the required package holding the constructor
pub const REQUIRE_ELEMENT: &str = "https://semdi.dev/ontology#requireElement";
/// When "true", the required element is used without invoking a constructor
pub const REQUIRE_NO_CONSTRUCTOR: &str = "https://semdi.dev/ontology#requireNoConstructor";
/// Component or mapping object → targets to inherit parameters or fields from
pub const INHERIT_VALUES: &str = "https://semdi.dev/ontology#inheritValues";
/// Parameter → default value(s) applied when a config omits the parameter
pub const DEFAULT: &str = "https://semdi.dev/ontology#default";
/// Parameter → when "true", at most one value is passed through
pub const UNIQUE: &str = "https://semdi.dev/ontology#unique";
/// Parameter → expected range of values
pub const RANGE: &str = "https://semdi.dev/ontology#range";
/// Component → owning module back-reference, set at registration
pub const MODULE_PROP: &str = "https://semdi.dev/ontology#module";
/// Keyed entries of an object mapping or raw fields-object
pub const FIELDS: &str = "https://semdi.dev/ontology#fields";
/// Ordered items of an array mapping or raw elements-object
pub const ELEMENTS: &str = "https://semdi.dev/ontology#elements";
/// Literal key of a declared mapping field
pub const FIELD_NAME: &str = "https://semdi.dev/ontology#fieldName";
/// Key of a raw fields entry or of a collected entry
pub const KEY: &str = "https://semdi.dev/ontology#key";
/// Value of a mapping field, raw fields entry, or collected entry
pub const VALUE: &str = "https://semdi.dev/ontology#value";
/// Mapping field → parameter whose config values it forwards
pub const ON_PARAMETER: &str = "https://semdi.dev/ontology#onParameter";
/// Mapping field → parameter whose values are expanded into key/value entries
pub const COLLECT_ENTRIES: &str = "https://semdi.dev/ontology#collectEntries";
/// Canonical config → RDF list of resolved constructor arguments
pub const ARGUMENTS: &str = "https://semdi.dev/ontology#arguments";
/// Override → the config resource it rewrites
pub const OVERRIDE_INSTANCE: &str = "https://semdi.dev/ontology#overrideInstance";
/// Override → RDF list of override steps, applied in order
pub const OVERRIDE_STEPS: &str = "https://semdi.dev/ontology#overrideSteps";
/// Override step → the parameter whose value list is edited
pub const OVERRIDE_PARAMETER: &str = "https://semdi.dev/ontology#overrideParameter";
/// Override step → target value or index, step-type dependent
pub const OVERRIDE_TARGET: &str = "https://semdi.dev/ontology#overrideTarget";
/// Override step → value(s) inserted or removed; RDF lists are spliced
pub const OVERRIDE_VALUE: &str = "https://semdi.dev/ontology#overrideValue";
/// Component → declared generic type parameters
pub const GENERIC_TYPE_PARAMETERS: &str = "https://semdi.dev/ontology#genericTypeParameters";
/// Config → concrete bindings for the component's generic type parameters
pub const GENERIC_TYPE_INSTANCES: &str = "https://semdi.dev/ontology#genericTypeInstances";

/// `rdf:` namespace terms interpreted by the engine
pub mod rdf {
    /// `rdf:type`
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// `xsd:` datatypes the strategies materialise natively
pub mod xsd {
    /// `xsd:string`
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:boolean`
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    /// `xsd:integer`
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:double`
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:decimal`
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
}
