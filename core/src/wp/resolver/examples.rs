#![deny(missing_docs)]

//! # Example Synthesis
//!
//! Produces a representative value for a field definition.
//!
//! Precedence, first match wins:
//! 1. first enum value,
//! 2. declared default (falsy defaults included),
//! 3. a zero value for the resolved type, recursing into object properties,
//! 4. for strings, a placeholder chosen by field name, then by format.

use crate::wp::models::FieldDefinition;
use crate::wp::resolver::types::{resolve_type, JsonType};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};

/// Nested objects deeper than this synthesize as `{}`.
pub const MAX_EXAMPLE_DEPTH: usize = 10;

/// A literal example value stored in a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleLiteral {
    /// A string value.
    Text(&'static str),
    /// An integer value.
    Integer(i64),
}

impl ExampleLiteral {
    /// Converts to a JSON value.
    pub fn to_value(self) -> Value {
        match self {
            ExampleLiteral::Text(s) => Value::String(s.to_string()),
            ExampleLiteral::Integer(n) => json!(n),
        }
    }
}

/// Placeholders for string fields, keyed by field name.
pub const CONTEXTUAL_EXAMPLES: [(&str, ExampleLiteral); 10] = [
    ("status", ExampleLiteral::Text("publish")),
    ("title", ExampleLiteral::Text("Example Title")),
    ("name", ExampleLiteral::Text("Example Title")),
    ("content", ExampleLiteral::Text("Example content")),
    ("excerpt", ExampleLiteral::Text("Example excerpt")),
    ("description", ExampleLiteral::Text("Example description")),
    ("slug", ExampleLiteral::Text("example-slug")),
    ("password", ExampleLiteral::Text("")),
    ("email", ExampleLiteral::Text("user@example.com")),
    ("author", ExampleLiteral::Integer(1)),
];

/// Placeholders for string fields, keyed by `format`. `date-time` is handled
/// separately because it depends on the clock.
pub const FORMAT_EXAMPLES: [(&str, &str); 3] = [
    ("uri", "https://example.com"),
    ("url", "https://example.com"),
    ("email", "user@example.com"),
];

/// Synthesizes an example value for `field`, named `field_name`.
pub fn synthesize(field: &FieldDefinition, field_name: &str) -> Value {
    synthesize_at_depth(field, field_name, 0)
}

fn synthesize_at_depth(field: &FieldDefinition, field_name: &str, depth: usize) -> Value {
    if let Some(first) = field.enum_values.as_ref().and_then(|e| e.first()) {
        return first.clone();
    }

    if let Some(default) = &field.default {
        return default.clone();
    }

    match resolve_type(field) {
        JsonType::Integer => json!(0),
        JsonType::Number => json!(0.0),
        JsonType::Boolean => Value::Bool(false),
        JsonType::Array => Value::Array(Vec::new()),
        JsonType::Object => synthesize_object(field, depth),
        JsonType::String | JsonType::Other(_) => string_example(field, field_name),
    }
}

fn synthesize_object(field: &FieldDefinition, depth: usize) -> Value {
    if depth >= MAX_EXAMPLE_DEPTH {
        tracing::debug!(depth, "object example depth cap reached");
        return Value::Object(Map::new());
    }

    let mut object = Map::new();
    for (name, property) in &field.properties {
        object.insert(name.clone(), synthesize_at_depth(property, name, depth + 1));
    }
    Value::Object(object)
}

fn string_example(field: &FieldDefinition, field_name: &str) -> Value {
    if let Some((_, literal)) = CONTEXTUAL_EXAMPLES
        .iter()
        .find(|(name, _)| *name == field_name)
    {
        return literal.to_value();
    }

    match field.format.as_deref() {
        Some("date-time") => {
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Some(format) => FORMAT_EXAMPLES
            .iter()
            .find(|(name, _)| *name == format)
            .map(|(_, example)| Value::String(example.to_string()))
            .unwrap_or_else(|| Value::String(String::new())),
        None => Value::String(String::new()),
    }
}
