#![deny(missing_docs)]

//! # WordPress REST Models
//!
//! Typed views over the loosely-structured metadata a `wp-json` index exposes.
//!
//! WordPress serializes PHP arrays, so the same logical field can arrive as a
//! JSON object, an empty JSON array, or a keyed object with sparse numeric keys.
//! Every optional member here is deserialized leniently: a malformed value
//! degrades to "absent" instead of failing the whole endpoint.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// HTTP methods a route may advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Methods that change server state and therefore carry a JSON body.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete
        )
    }

    /// Introspection-only methods never become requests.
    pub fn is_introspection(&self) -> bool {
        matches!(self, HttpMethod::Head | HttpMethod::Options)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(format!("Unsupported HTTP method: {}", other)),
        }
    }
}

/// A declared `type`, either a single name or a union list.
///
/// Values are raw vendor strings until passed through
/// [`normalize_type`](crate::wp::resolver::types::normalize_type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Union(Vec<String>),
}

/// A declared `enum`.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValues {
    /// A proper list of allowed values.
    List(Vec<Value>),
    /// A non-list value, kept as-is.
    Scalar(Value),
}

impl EnumValues {
    /// First allowed value, if any.
    pub fn first(&self) -> Option<&Value> {
        match self {
            EnumValues::List(values) => values.first(),
            EnumValues::Scalar(Value::Null) => None,
            EnumValues::Scalar(value) => Some(value),
        }
    }

    /// Values as a slice; a scalar is viewed as a single element.
    pub fn as_slice(&self) -> &[Value] {
        match self {
            EnumValues::List(values) => values,
            EnumValues::Scalar(Value::Null) => &[],
            EnumValues::Scalar(value) => std::slice::from_ref(value),
        }
    }
}

/// One argument or schema property.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Declared type (raw).
    #[serde(rename = "type", deserialize_with = "lenient_type")]
    pub type_: Option<SchemaType>,
    /// Format hint such as `date-time` or `uri`.
    #[serde(deserialize_with = "lenient_string")]
    pub format: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", deserialize_with = "lenient_enum")]
    pub enum_values: Option<EnumValues>,
    /// Declared default. `None` is "absent"; JSON `null` counts as absent.
    pub default: Option<Value>,
    /// Human readable description.
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Raw `required` flag, only a boolean `true` counts.
    pub required: Option<Value>,
    /// Raw `readonly` flag, only a boolean `true` counts.
    pub readonly: Option<Value>,
    /// Raw JSON Schema `readOnly` flag. Some plugins send both spellings.
    pub read_only: Option<Value>,
    /// Minimum string length.
    #[serde(deserialize_with = "lenient_u64")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(deserialize_with = "lenient_u64")]
    pub max_length: Option<u64>,
    /// Item schema of an array.
    #[serde(deserialize_with = "lenient_items")]
    pub items: Option<Box<FieldDefinition>>,
    /// Nested object properties.
    #[serde(deserialize_with = "lenient_fields")]
    pub properties: IndexMap<String, FieldDefinition>,
}

impl FieldDefinition {
    /// Creates a definition with only a type set.
    pub fn typed(type_name: &str) -> Self {
        Self {
            type_: Some(SchemaType::Single(type_name.to_string())),
            ..Self::default()
        }
    }

    /// True when the field is explicitly marked read-only.
    pub fn is_readonly(&self) -> bool {
        [&self.readonly, &self.read_only]
            .iter()
            .any(|flag| matches!(flag, Some(Value::Bool(true))))
    }

    /// True when the field carries at least one enum value.
    pub fn has_enum(&self) -> bool {
        self.enum_values
            .as_ref()
            .is_some_and(|values| values.first().is_some())
    }
}

/// The canonical field definitions of a resource (e.g. a post).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResourceSchema {
    /// Schema title, e.g. `post`.
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Properties by name.
    #[serde(deserialize_with = "lenient_fields")]
    pub properties: IndexMap<String, FieldDefinition>,
}

/// One (route, method) pairing ready for transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDefinition {
    /// Route pattern, e.g. `/wp/v2/posts/(?P<id>[\d]+)`.
    pub route: String,
    /// The method being transformed.
    pub method: HttpMethod,
    /// All methods the endpoint entry supports.
    pub methods: Vec<HttpMethod>,
    /// Arguments by name.
    pub args: IndexMap<String, FieldDefinition>,
    /// Owning resource schema.
    pub schema: Option<ResourceSchema>,
}

/// An entry of the index's `routes` map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteEntry {
    /// Owning namespace, e.g. `wp/v2`.
    #[serde(deserialize_with = "lenient_string")]
    pub namespace: Option<String>,
    /// Methods advertised for the route.
    pub methods: Vec<String>,
    /// Endpoint entries, kept raw so a malformed one can be skipped alone.
    pub endpoints: Vec<Value>,
    /// Inline schema, present when the index was fetched with `context=help`.
    pub schema: Option<Value>,
}

/// An element of a route's `endpoints` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EndpointEntry {
    /// Methods served by this endpoint.
    pub methods: Vec<String>,
    /// Arguments by name.
    #[serde(deserialize_with = "lenient_fields")]
    pub args: IndexMap<String, FieldDefinition>,
}

fn lenient_type<'de, D>(deserializer: D) -> Result<Option<SchemaType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(SchemaType::Single(s)),
        Value::Array(items) => {
            let names: Vec<String> = items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(SchemaType::Union(names))
            }
        }
        _ => None,
    })
}

fn lenient_enum<'de, D>(deserializer: D) -> Result<Option<EnumValues>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(items) => Some(EnumValues::List(items)),
        // PHP arrays with sparse keys serialize as objects.
        Value::Object(map) => Some(EnumValues::List(map.into_iter().map(|(_, v)| v).collect())),
        other => Some(EnumValues::Scalar(other)),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Box<FieldDefinition>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok().map(Box::new))
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<IndexMap<String, FieldDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        // `[]` is how PHP encodes an empty map.
        return Ok(IndexMap::new());
    };

    let mut fields = IndexMap::with_capacity(map.len());
    for (name, raw) in map {
        match serde_json::from_value::<FieldDefinition>(raw) {
            Ok(field) => {
                fields.insert(name, field);
            }
            Err(e) => tracing::debug!(field = %name, error = %e, "dropping malformed field definition"),
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("BREW".parse::<HttpMethod>().is_err());
        assert!(HttpMethod::Options.is_introspection());
        assert!(!HttpMethod::Get.is_mutating());
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_default_presence_is_explicit() {
        let zero: FieldDefinition =
            serde_json::from_value(json!({"type": "integer", "default": 0})).unwrap();
        assert_eq!(zero.default, Some(json!(0)));

        let falsy: FieldDefinition =
            serde_json::from_value(json!({"type": "boolean", "default": false})).unwrap();
        assert_eq!(falsy.default, Some(json!(false)));

        let absent: FieldDefinition = serde_json::from_value(json!({"type": "integer"})).unwrap();
        assert_eq!(absent.default, None);

        let null: FieldDefinition =
            serde_json::from_value(json!({"type": "integer", "default": null})).unwrap();
        assert_eq!(null.default, None);
    }

    #[test]
    fn test_type_shapes() {
        let single: FieldDefinition = serde_json::from_value(json!({"type": "string"})).unwrap();
        assert_eq!(single.type_, Some(SchemaType::Single("string".into())));

        let union: FieldDefinition =
            serde_json::from_value(json!({"type": ["string", "null"]})).unwrap();
        assert_eq!(
            union.type_,
            Some(SchemaType::Union(vec!["string".into(), "null".into()]))
        );

        let junk: FieldDefinition = serde_json::from_value(json!({"type": 42})).unwrap();
        assert_eq!(junk.type_, None);
    }

    #[test]
    fn test_php_shaped_values() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "type": "object",
            "properties": [],
            "enum": {"0": "a", "3": "b"}
        }))
        .unwrap();
        assert!(field.properties.is_empty());
        assert_eq!(
            field.enum_values,
            Some(EnumValues::List(vec![json!("a"), json!("b")]))
        );
    }

    #[test]
    fn test_malformed_property_is_dropped() {
        let schema: ResourceSchema = serde_json::from_value(json!({
            "title": "post",
            "properties": {
                "title": {"type": "string"},
                "broken": "not an object"
            }
        }))
        .unwrap();
        assert_eq!(schema.properties.len(), 1);
        assert!(schema.properties.contains_key("title"));
    }

    #[test]
    fn test_readonly_and_lengths() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "type": "string",
            "readonly": true,
            "minLength": 2,
            "maxLength": "10"
        }))
        .unwrap();
        assert!(field.is_readonly());
        assert_eq!(field.min_length, Some(2));
        assert_eq!(field.max_length, Some(10));

        let loose: FieldDefinition =
            serde_json::from_value(json!({"readonly": "yes"})).unwrap();
        assert!(!loose.is_readonly());
    }

    #[test]
    fn test_both_readonly_spellings() {
        let camel: FieldDefinition = serde_json::from_value(json!({"readOnly": true})).unwrap();
        assert!(camel.is_readonly());

        let both: FieldDefinition =
            serde_json::from_value(json!({"type": "string", "readonly": false, "readOnly": true}))
                .unwrap();
        assert!(both.is_readonly());
        assert_eq!(both.type_, Some(SchemaType::Single("string".into())));

        let schema: ResourceSchema = serde_json::from_value(json!({
            "properties": {"id": {"type": "integer", "readonly": true, "readOnly": true}}
        }))
        .unwrap();
        assert!(schema.properties["id"].is_readonly());
    }

    #[test]
    fn test_enum_accessors() {
        let list = EnumValues::List(vec![json!("publish"), json!("draft")]);
        assert_eq!(list.first(), Some(&json!("publish")));
        assert_eq!(list.as_slice().len(), 2);

        let scalar = EnumValues::Scalar(json!("only"));
        assert_eq!(scalar.first(), Some(&json!("only")));

        let empty = EnumValues::List(vec![]);
        assert_eq!(empty.first(), None);
    }
}
