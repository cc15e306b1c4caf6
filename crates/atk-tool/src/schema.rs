use atk_core::{Error, Result};
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Generates JSON schema from a Rust type
pub fn generate_schema<T: JsonSchema>() -> Value {
    let schema = schema_for!(T);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

/// Deserialize validated parameters into a tool's typed input.
///
/// Failures surface as `InvalidParams` for the named tool, same as the
/// engine's structural checks.
pub fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| Error::invalid_params(tool, e.to_string()))
}

/// Validate `params` against a tool's JSON schema, in place.
///
/// Checks that every required property is present and that present
/// properties match the schema's declared primitive type; declared `default`
/// values are filled in for absent properties. Validation is shallow —
/// nested shapes are checked when the implementation deserializes its typed
/// input, producing the same error kind.
pub fn validate_params(tool: &str, schema: &Value, params: &mut Value) -> Result<()> {
    let Some(schema_obj) = schema.as_object() else {
        // Tools without an object schema accept anything.
        return Ok(());
    };

    if params.is_null() {
        *params = Value::Object(Map::new());
    }
    let Some(obj) = params.as_object_mut() else {
        return Err(Error::invalid_params(
            tool,
            "parameters must be a JSON object",
        ));
    };

    let properties = schema_obj.get("properties").and_then(Value::as_object);

    if let Some(properties) = properties {
        for (key, prop) in properties {
            if !obj.contains_key(key) {
                if let Some(default) = prop.get("default") {
                    obj.insert(key.clone(), default.clone());
                }
            }
        }
    }

    if let Some(required) = schema_obj.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !obj.contains_key(key) {
                return Err(Error::invalid_params(
                    tool,
                    format!("missing required field `{}`", key),
                ));
            }
        }
    }

    if let Some(properties) = properties {
        for (key, value) in obj.iter() {
            let declared = properties
                .get(key)
                .and_then(|p| p.get("type"))
                .and_then(Value::as_str);
            if let Some(expected) = declared {
                if !type_matches(expected, value) {
                    return Err(Error::invalid_params(
                        tool,
                        format!("field `{}` expected type `{}`", key, expected),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

/// Tool schema builder for manual schema creation
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub type_: String,
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self {
            type_: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        type_: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), Value::String(type_.into()));
        prop.insert("description".to_string(), Value::String(description.into()));

        self.properties.insert(name.into(), Value::Object(prop));
        self
    }

    /// Declare a default value for a property; the engine fills it in when
    /// the caller omits the field
    pub fn default_value(mut self, name: &str, default: Value) -> Self {
        if let Some(Value::Object(prop)) = self.properties.get_mut(name) {
            prop.insert("default".to_string(), default);
        }
        self
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn build(self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String(self.type_));
        schema.insert("properties".to_string(), Value::Object(self.properties));
        schema.insert(
            "required".to_string(),
            Value::Array(self.required.into_iter().map(Value::String).collect()),
        );

        Value::Object(schema)
    }
}

impl Default for ToolSchema {
    fn default() -> Self {
        Self::new()
    }
}
