//! Source emission strategy

use async_trait::async_trait;

use semdi_domain::{
    vocab, ConstructionStrategy, Error, InstanceRequest, InstantiationSettings, ModuleState,
    Result,
};

/// Emits CommonJS-style constructor source instead of live objects
///
/// Artifacts are source expressions: constructing yields
/// `new (require("pkg").Element)(args...)`, or the bare required element
/// when `requireNoConstructor` is set. With `as_function` settings,
/// variables resolve to identifiers so the emitted source can be wrapped
/// in a function accepting runtime bindings; otherwise variables must be
/// bound to source fragments up front.
#[derive(Debug, Default)]
pub struct SourceStrategy {
    module_state: ModuleState,
}

impl SourceStrategy {
    /// Create a source strategy without module metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source strategy resolving require names through module state
    pub fn with_module_state(module_state: ModuleState) -> Self {
        Self { module_state }
    }

    /// Wrap emitted source in a function accepting runtime variables
    pub fn wrap_as_function(source: &str, variables: &[&str]) -> String {
        let params: Vec<String> = variables.iter().map(|v| identifier(v)).collect();
        format!(
            "module.exports = function({}) {{ return {source}; }};",
            params.join(", ")
        )
    }
}

/// Turn a variable name into a safe identifier
fn identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[async_trait]
impl ConstructionStrategy for SourceStrategy {
    type Instance = String;

    fn create_undefined(&self) -> String {
        "undefined".to_string()
    }

    fn resolve_variable(
        &self,
        name: &str,
        settings: &InstantiationSettings<String>,
    ) -> Result<String> {
        if settings.as_function {
            return Ok(identifier(name));
        }
        settings
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::undefined_variable(name))
    }

    fn create_primitive(&self, value: &str, datatype: Option<&str>) -> Result<String> {
        match datatype {
            Some(vocab::xsd::INTEGER)
            | Some(vocab::xsd::BOOLEAN)
            | Some(vocab::xsd::DOUBLE)
            | Some(vocab::xsd::DECIMAL) => Ok(value.to_string()),
            _ => serde_json::to_string(value)
                .map_err(|e| Error::construction(value, e.to_string())),
        }
    }

    fn create_array(&self, items: Vec<String>) -> Result<String> {
        Ok(format!("[{}]", items.join(", ")))
    }

    fn create_hash(&self, entries: Vec<(String, String)>) -> Result<String> {
        let body: Vec<String> = entries
            .into_iter()
            .map(|(key, value)| {
                let quoted =
                    serde_json::to_string(&key).unwrap_or_else(|_| format!("\"{key}\""));
                format!("{quoted}: {value}")
            })
            .collect();
        Ok(format!("{{ {} }}", body.join(", ")))
    }

    async fn create_instance(&self, request: InstanceRequest<String>) -> Result<String> {
        let name = self
            .module_state
            .resolve_require_name(&request.require_name);
        let quoted = serde_json::to_string(name)
            .map_err(|e| Error::construction(&request.config_iri, e.to_string()))?;
        let mut target = format!("require({quoted})");
        if let Some(element) = &request.require_element {
            target = format!("{target}.{element}");
        }
        if request.require_no_constructor {
            return Ok(target);
        }
        Ok(format!("new ({target})({})", request.args.join(", ")))
    }
}
