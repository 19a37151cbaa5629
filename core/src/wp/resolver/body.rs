#![deny(missing_docs)]

//! # Body Composition
//!
//! Builds the example JSON body of a mutating request.
//!
//! Endpoint arguments are often incomplete compared to the resource schema, so
//! the body is merged in two passes: endpoint arguments first, then a fixed
//! allow-list of commonly writable resource properties.

use crate::wp::models::{FieldDefinition, HttpMethod, ResourceSchema};
use crate::wp::resolver::examples::synthesize;
use crate::wp::resolver::params::{classify, ParamLocation};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The argument WordPress reserves for response shaping on every method.
pub const CONTEXT_ARG: &str = "context";

/// Resource properties worth pulling into a body when the endpoint omits them.
pub const COMMON_WRITABLE_FIELDS: [&str; 9] = [
    "title",
    "content",
    "excerpt",
    "status",
    "author",
    "slug",
    "password",
    "name",
    "description",
];

/// Builds the example body map. Empty when nothing qualifies.
pub fn compose_body_map(
    args: &IndexMap<String, FieldDefinition>,
    resource_schema: Option<&ResourceSchema>,
    method: HttpMethod,
    path_params: &[String],
) -> Map<String, Value> {
    let mut body = Map::new();
    let is_path_param = |name: &str| path_params.iter().any(|p| p == name);

    // 1. Endpoint arguments
    for (name, field) in args {
        if name == CONTEXT_ARG || is_path_param(name.as_str()) || field.is_readonly() {
            continue;
        }
        if classify(method, name, path_params) == ParamLocation::Body {
            body.insert(name.clone(), synthesize(field, name));
        }
    }

    // 2. Allow-listed resource properties
    if let Some(schema) = resource_schema {
        for name in COMMON_WRITABLE_FIELDS {
            if body.contains_key(name) || is_path_param(name) {
                continue;
            }
            if let Some(field) = schema.properties.get(name) {
                if !field.is_readonly() {
                    body.insert(name.to_string(), synthesize(field, name));
                }
            }
        }
    }

    body
}

/// Returns the pretty-printed example body, or `None` when it would be empty.
pub fn compose_body(
    args: &IndexMap<String, FieldDefinition>,
    resource_schema: Option<&ResourceSchema>,
    method: HttpMethod,
    path_params: &[String],
) -> Option<String> {
    let body = compose_body_map(args, resource_schema, method, path_params);
    if body.is_empty() {
        return None;
    }
    serde_json::to_string_pretty(&Value::Object(body)).ok()
}
