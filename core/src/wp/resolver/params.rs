#![deny(missing_docs)]

//! # Parameter Placement
//!
//! Decides where an argument travels in the HTTP request.
//! Placement is driven by the method, not by the argument's metadata.

use crate::wp::models::{FieldDefinition, HttpMethod};
use serde_json::Value;

/// The location of a parameter in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into the URL path.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent in the JSON body.
    Body,
}

/// Classifies an argument.
///
/// 1. Names captured by the route are always `Path`.
/// 2. Everything else on a `GET` is `Query`.
/// 3. Everything else is `Body`.
pub fn classify(method: HttpMethod, param_name: &str, path_params: &[String]) -> ParamLocation {
    if path_params.iter().any(|p| p == param_name) {
        ParamLocation::Path
    } else if method == HttpMethod::Get {
        ParamLocation::Query
    } else {
        ParamLocation::Body
    }
}

/// Path parameters are always required; other fields only when they say so
/// with a real boolean.
pub fn is_required(field: &FieldDefinition, is_path_param: bool) -> bool {
    is_path_param || matches!(field.required, Some(Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const METHODS: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    #[test]
    fn test_path_params_win_for_every_method() {
        let path = vec!["id".to_string(), "parent".to_string()];
        for method in METHODS {
            assert_eq!(classify(method, "id", &path), ParamLocation::Path);
            assert_eq!(classify(method, "parent", &path), ParamLocation::Path);
        }
    }

    #[test]
    fn test_get_never_uses_body() {
        let path = vec!["id".to_string()];
        for name in ["title", "content", "page", "id"] {
            assert_ne!(classify(HttpMethod::Get, name, &path), ParamLocation::Body);
        }
        assert_eq!(classify(HttpMethod::Get, "search", &path), ParamLocation::Query);
    }

    #[test]
    fn test_other_methods_use_body() {
        for method in &METHODS[1..] {
            assert_eq!(classify(*method, "title", &[]), ParamLocation::Body);
        }
    }

    #[test]
    fn test_required_flag() {
        let mut field = FieldDefinition::typed("string");
        assert!(!is_required(&field, false));
        assert!(is_required(&field, true));

        field.required = Some(json!(true));
        assert!(is_required(&field, false));

        field.required = Some(json!("true"));
        assert!(!is_required(&field, false));

        field.required = Some(json!(false));
        assert!(is_required(&field, true));
    }
}
