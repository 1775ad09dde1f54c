//! Schema building helpers for tool descriptors.
//!
//! The gateway reads constants out of the parameter schema itself: a value
//! is pinned by giving its property a single-element `enum`.

use serde_json::{json, Value};

/// Builder for `"type": "object"` JSON schemas.
#[derive(Debug, Clone)]
pub struct SchemaGenerator {
    properties: Vec<(String, Value)>,
    required: Vec<String>,
    additional_properties: bool,
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            required: Vec::new(),
            additional_properties: true,
        }
    }
}

impl SchemaGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_property(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    /// Add a property and list it as required.
    pub fn require_property(mut self, name: impl Into<String>, schema: Value) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.push((name, schema));
        self
    }

    pub fn set_additional_properties(mut self, additional: bool) -> Self {
        self.additional_properties = additional;
        self
    }

    pub fn build(self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("type".into(), json!("object"));

        let mut properties = serde_json::Map::new();
        for (name, schema) in self.properties {
            properties.insert(name, schema);
        }
        map.insert("properties".into(), properties.into());

        if !self.required.is_empty() {
            map.insert("required".into(), self.required.into());
        }

        if !self.additional_properties {
            map.insert("additionalProperties".into(), json!(false));
        }

        map.into()
    }
}

/// A string property whose only allowed value is `value`.
pub fn pinned(value: impl Into<String>) -> Value {
    json!({
        "type": "string",
        "enum": [value.into()]
    })
}

/// An array of strings whose items may only be `value`.
pub fn pinned_array(value: impl Into<String>) -> Value {
    json!({
        "type": "array",
        "items": pinned(value)
    })
}

pub fn schema_from_type_name(type_name: &str) -> Value {
    match type_name {
        "string" => json!({"type": "string"}),
        "integer" => json!({"type": "integer"}),
        "number" => json!({"type": "number"}),
        "boolean" => json!({"type": "boolean"}),
        "array" => json!({"type": "array"}),
        _ => json!({"type": "object"}),
    }
}

/// Read back the pinned value of `schema`, if it is pinned.
pub fn pinned_value(schema: &Value) -> Option<&str> {
    match schema.get("enum")?.as_array()?.as_slice() {
        [only] => only.as_str(),
        _ => None,
    }
}
