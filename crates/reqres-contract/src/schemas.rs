// crates/reqres-contract/src/schemas.rs
// ============================================================================
// Module: Contract Schemas
// Description: JSON Schema rendering for typed contracts.
// Purpose: Publish each contract as a draft 2020-12 schema document.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Renders [`Shape`] trees as JSON Schema so contracts can be shared with
//! external tooling. The rendered schema accepts the same documents as the
//! native matcher, except that `email` is emitted as a `format` annotation
//! which schema validators only assert when format checking is enabled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::registry::Contract;
use crate::shape::ObjectShape;
use crate::shape::Shape;
use crate::shape::StringFormat;

// ============================================================================
// SECTION: Public Schema Entrypoints
// ============================================================================

impl Contract {
    /// Returns the JSON Schema document for this contract.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        let mut schema = match shape_schema(self.root()) {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert(String::from("allOf"), Value::Array(vec![other]));
                map
            }
        };
        schema.insert(
            String::from("$schema"),
            Value::String(String::from("https://json-schema.org/draft/2020-12/schema")),
        );
        schema.insert(
            String::from("$id"),
            Value::String(format!("reqres://contract/schemas/{}.schema.json", self.name())),
        );
        schema.insert(String::from("title"), Value::String(format!("ReqRes {}", self.name())));
        Value::Object(schema)
    }
}

/// Renders a shape as a JSON Schema fragment.
#[must_use]
pub fn shape_schema(shape: &Shape) -> Value {
    match shape {
        Shape::Any => json!({}),
        Shape::Integer => json!({ "type": "integer" }),
        Shape::String(StringFormat::Plain) => json!({ "type": "string" }),
        Shape::String(StringFormat::NonEmpty) => json!({ "type": "string", "minLength": 1 }),
        Shape::String(StringFormat::Email) => json!({ "type": "string", "format": "email" }),
        Shape::Object(object) => object_schema(object),
        Shape::Array(items) => json!({ "type": "array", "items": shape_schema(items) }),
        Shape::AnyOf(alternatives) => {
            json!({ "anyOf": alternatives.iter().map(shape_schema).collect::<Vec<_>>() })
        }
    }
}

/// Renders an object shape with `properties` and `required`.
fn object_schema(object: &ObjectShape) -> Value {
    let mut properties = Map::new();
    for field in object.fields() {
        properties.insert(field.name.to_string(), shape_schema(&field.shape));
    }
    let required: Vec<Value> =
        object.required_names().map(|name| Value::String(name.to_string())).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}
