#![deny(missing_docs)]

//! # Type Normalization
//!
//! Maps WordPress pseudo-types (`date-time`, `email`, `mixed`, ...) onto the
//! JSON Schema primitives used for example synthesis, and deduplicates enum
//! lists.

use crate::wp::models::{EnumValues, FieldDefinition, SchemaType};
use std::fmt::Display;

/// Vendor type names that are rewritten before any type dispatch.
pub const TYPE_REPLACEMENTS: [(&str, &str); 10] = [
    ("date", "string"),
    ("date-time", "string"),
    ("email", "string"),
    ("hostname", "string"),
    ("ipv4", "string"),
    ("ipv6", "string"),
    ("uri", "string"),
    ("url", "string"),
    ("mixed", "string"),
    ("bool", "boolean"),
];

/// Canonical JSON types used for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonType {
    /// A string type.
    String,
    /// An integer type.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean type.
    Boolean,
    /// An array.
    Array,
    /// An object.
    Object,
    /// Any name outside the JSON Schema primitives.
    Other(String),
}

impl Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Integer => write!(f, "integer"),
            JsonType::Number => write!(f, "number"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::Array => write!(f, "array"),
            JsonType::Object => write!(f, "object"),
            JsonType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for JsonType {
    fn from(name: &str) -> Self {
        match name {
            "string" => JsonType::String,
            "integer" => JsonType::Integer,
            "number" => JsonType::Number,
            "boolean" => JsonType::Boolean,
            "array" => JsonType::Array,
            "object" => JsonType::Object,
            other => JsonType::Other(other.to_string()),
        }
    }
}

/// Rewrites a single type name through [`TYPE_REPLACEMENTS`].
pub fn normalize_type_name(raw: &str) -> &str {
    TYPE_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

/// Normalizes a declared type, element-wise for unions.
pub fn normalize_type(raw: &SchemaType) -> SchemaType {
    match raw {
        SchemaType::Single(name) => SchemaType::Single(normalize_type_name(name).to_string()),
        SchemaType::Union(names) => SchemaType::Union(
            names
                .iter()
                .map(|name| normalize_type_name(name).to_string())
                .collect(),
        ),
    }
}

/// Deduplicates an enum list, keeping first occurrences in order.
/// Non-list input is returned unchanged.
pub fn normalize_enum(values: &EnumValues) -> EnumValues {
    match values {
        EnumValues::List(items) => {
            let mut unique = Vec::with_capacity(items.len());
            for item in items {
                if !unique.contains(item) {
                    unique.push(item.clone());
                }
            }
            EnumValues::List(unique)
        }
        EnumValues::Scalar(value) => EnumValues::Scalar(value.clone()),
    }
}

/// Resolves the single type a field should be treated as.
///
/// Unions pick their first non-`null` member. A field without a type is an
/// object when it declares properties and a string otherwise.
pub fn resolve_type(field: &FieldDefinition) -> JsonType {
    match field.type_.as_ref().map(normalize_type) {
        Some(SchemaType::Single(name)) => JsonType::from(name.as_str()),
        Some(SchemaType::Union(names)) => names
            .iter()
            .find(|name| name.as_str() != "null")
            .map(|name| JsonType::from(name.as_str()))
            .unwrap_or(JsonType::String),
        None if !field.properties.is_empty() => JsonType::Object,
        None => JsonType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pseudo_types_become_primitives() {
        assert_eq!(
            normalize_type(&SchemaType::Single("date-time".into())),
            SchemaType::Single("string".into())
        );
        assert_eq!(
            normalize_type(&SchemaType::Union(vec!["date".into(), "bool".into()])),
            SchemaType::Union(vec!["string".into(), "boolean".into()])
        );
    }

    #[test]
    fn test_unmapped_types_pass_through() {
        for name in ["integer", "object", "array", "null", "weird"] {
            assert_eq!(normalize_type_name(name), name);
        }
    }

    #[test]
    fn test_replacement_table_targets() {
        for (from, to) in TYPE_REPLACEMENTS {
            assert_eq!(normalize_type_name(from), to);
            assert!(matches!(to, "string" | "boolean"));
        }
    }

    #[test]
    fn test_enum_dedup_is_set_equal() {
        let raw = EnumValues::List(vec![json!("a"), json!("b"), json!("a"), json!(1), json!(1)]);
        let EnumValues::List(unique) = normalize_enum(&raw) else {
            panic!("list should stay a list");
        };
        assert_eq!(unique.len(), 3);
        for expected in [json!("a"), json!("b"), json!(1)] {
            assert!(unique.contains(&expected));
        }
    }

    #[test]
    fn test_scalar_enum_unchanged() {
        let raw = EnumValues::Scalar(json!("solo"));
        assert_eq!(normalize_enum(&raw), raw);
    }

    #[test]
    fn test_resolve_type() {
        assert_eq!(resolve_type(&FieldDefinition::typed("email")), JsonType::String);
        assert_eq!(resolve_type(&FieldDefinition::typed("bool")), JsonType::Boolean);

        let nullable = FieldDefinition {
            type_: Some(SchemaType::Union(vec!["null".into(), "integer".into()])),
            ..FieldDefinition::default()
        };
        assert_eq!(resolve_type(&nullable), JsonType::Integer);

        let mut implicit_object = FieldDefinition::default();
        implicit_object
            .properties
            .insert("raw".into(), FieldDefinition::typed("string"));
        assert_eq!(resolve_type(&implicit_object), JsonType::Object);

        assert_eq!(resolve_type(&FieldDefinition::default()), JsonType::String);
    }
}
