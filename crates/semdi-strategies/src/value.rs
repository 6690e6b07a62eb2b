//! Runtime value strategy

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use semdi_domain::{
    vocab, ConstructionStrategy, Error, InstanceRequest, InstantiationSettings, Result,
};

/// Direct runtime construction into JSON values
///
/// Each constructed instance is an object of the shape
/// `{"type": "<requireName>[.<requireElement>]", "args": [...]}`; literals
/// with `xsd` number and boolean datatypes materialise as native JSON
/// values. The construction counter makes memoisation observable in tests.
#[derive(Debug, Default)]
pub struct ValueStrategy {
    constructions: AtomicUsize,
}

impl ValueStrategy {
    /// Create a new value strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances built by `create_instance` so far
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConstructionStrategy for ValueStrategy {
    type Instance = Value;

    fn create_undefined(&self) -> Value {
        Value::Null
    }

    fn resolve_variable(
        &self,
        name: &str,
        settings: &InstantiationSettings<Value>,
    ) -> Result<Value> {
        settings
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::undefined_variable(name))
    }

    fn create_primitive(&self, value: &str, datatype: Option<&str>) -> Result<Value> {
        match datatype {
            Some(vocab::xsd::INTEGER) => {
                let parsed: i64 = value.parse().map_err(|_| {
                    Error::construction(value, "literal is not a valid integer")
                })?;
                Ok(json!(parsed))
            }
            Some(vocab::xsd::BOOLEAN) => match value {
                "true" => Ok(json!(true)),
                "false" => Ok(json!(false)),
                _ => Err(Error::construction(value, "literal is not a valid boolean")),
            },
            Some(vocab::xsd::DOUBLE) | Some(vocab::xsd::DECIMAL) => {
                let parsed: f64 = value.parse().map_err(|_| {
                    Error::construction(value, "literal is not a valid number")
                })?;
                Ok(json!(parsed))
            }
            _ => Ok(Value::String(value.to_string())),
        }
    }

    fn create_array(&self, items: Vec<Value>) -> Result<Value> {
        Ok(Value::Array(items))
    }

    fn create_hash(&self, entries: Vec<(String, Value)>) -> Result<Value> {
        Ok(Value::Object(entries.into_iter().collect::<Map<_, _>>()))
    }

    async fn create_instance(&self, request: InstanceRequest<Value>) -> Result<Value> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        let type_name = match &request.require_element {
            Some(element) => format!("{}.{element}", request.require_name),
            None => request.require_name.clone(),
        };
        let mut object = Map::new();
        object.insert("type".to_string(), json!(type_name));
        if request.require_no_constructor {
            object.insert("noConstructor".to_string(), json!(true));
        } else {
            object.insert("args".to_string(), Value::Array(request.args));
        }
        Ok(Value::Object(object))
    }
}
