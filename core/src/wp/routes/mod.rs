#![deny(missing_docs)]

//! # Routes Module
//!
//! Maps one (route, method) pair onto a fully populated request descriptor.
//!
//! - **pattern**: capture group scanning and URL rewriting.
//! - **naming**: resource tokens, route kinds and display names.
//!
//! The transformer performs no I/O and never fails: malformed or missing
//! fields degrade to empty values.

pub mod naming;
pub mod pattern;

use crate::collection::models::{
    new_uid, HttpRequest, ParamKind, RequestAuth, RequestBody, RequestDescriptor, RequestHeader,
    RequestParam, ASSERTION_SEPARATOR,
};
use crate::wp::models::{EndpointDefinition, FieldDefinition, HttpMethod, ResourceSchema};
use crate::wp::resolver::body::{compose_body, CONTEXT_ARG};
use crate::wp::resolver::params::{classify, is_required, ParamLocation};
use crate::wp::resolver::types::normalize_enum;
use naming::{display_name, resource_name, RouteKind};
use pattern::{path_param_names, to_path_template};
use serde_json::Value;

/// Environment variable every URL is rooted at.
pub const BASE_URL_VARIABLE: &str = "{{baseUrl}}";

/// Listing conveniences appended, disabled, to `GET` routes without an identifier:
/// (name, value, description).
pub const LISTING_PARAMS: [(&str, &str, &str); 6] = [
    ("page", "1", "Current page of the collection."),
    ("per_page", "10", "Maximum number of items to be returned in result set."),
    ("search", "", "Limit results to those matching a string."),
    ("orderby", "date", "Sort collection by attribute."),
    ("order", "desc", "Order sort attribute ascending or descending."),
    ("_embed", "true", "Embed linked resources in the response."),
];

/// Transforms one endpoint into a request descriptor.
///
/// `resource_schema` falls back to the schema carried by `endpoint`. The
/// endpoint's `route`, `method` and `methods` are context only; `route` and
/// `method` drive the transformation.
pub fn transform(
    route: &str,
    method: HttpMethod,
    endpoint: &EndpointDefinition,
    resource_schema: Option<&ResourceSchema>,
) -> RequestDescriptor {
    let resource_schema = resource_schema.or(endpoint.schema.as_ref());
    let resource = resource_name(route);
    let kind = RouteKind::of(route);
    let name = display_name(method, route, &resource, &kind);
    let path_params = path_param_names(route);

    // 1. Path parameters, in route order
    let mut params: Vec<RequestParam> = path_params
        .iter()
        .map(|param| {
            let description = endpoint
                .args
                .get(param)
                .map(describe)
                .unwrap_or_default();
            RequestParam {
                uid: new_uid(),
                name: param.clone(),
                value: String::new(),
                description,
                kind: ParamKind::Path,
                enabled: true,
                required: true,
            }
        })
        .collect();

    // 2. Query parameters, in argument order
    for (arg_name, field) in &endpoint.args {
        if arg_name == CONTEXT_ARG {
            continue;
        }
        if classify(method, arg_name, &path_params) == ParamLocation::Query {
            let required = is_required(field, false);
            params.push(RequestParam {
                uid: new_uid(),
                name: arg_name.clone(),
                value: default_text(field),
                description: describe(field),
                kind: ParamKind::Query,
                enabled: required,
                required,
            });
        }
    }

    // 3. Listing conveniences
    if method == HttpMethod::Get && !kind.has_identifier {
        for (param, value, description) in LISTING_PARAMS {
            if params.iter().any(|p| p.name == param) {
                continue;
            }
            params.push(RequestParam {
                uid: new_uid(),
                name: param.to_string(),
                value: value.to_string(),
                description: description.to_string(),
                kind: ParamKind::Query,
                enabled: false,
                required: false,
            });
        }
    }

    // 4. Body
    let mut headers = Vec::new();
    let body = if method.is_mutating() {
        headers.push(RequestHeader::new("Content-Type", "application/json"));
        match compose_body(&endpoint.args, resource_schema, method, &path_params) {
            Some(json) => RequestBody::Json { json },
            None => RequestBody::None,
        }
    } else {
        RequestBody::None
    };

    // 5. Assertions
    let assertions = default_assertions(method, &kind);
    let docs = render_docs(&params);

    RequestDescriptor {
        uid: new_uid(),
        name,
        seq: None,
        request: HttpRequest {
            url: format!("{}{}", BASE_URL_VARIABLE, to_path_template(route)),
            method,
            headers,
            params,
            body,
            auth: RequestAuth::inherit(),
            tests: assertions.join(ASSERTION_SEPARATOR),
            docs,
        },
    }
}

/// Default assertions for a request: a status check, plus an array check for
/// collection listings.
pub fn default_assertions(method: HttpMethod, kind: &RouteKind) -> Vec<String> {
    let status = if method == HttpMethod::Post { 201 } else { 200 };
    let mut assertions = vec![format!(
        "test(\"Status code is {status}\", function() {{\n  expect(res.getStatus()).to.equal({status});\n}});"
    )];

    if method == HttpMethod::Get && kind.is_collection && !kind.has_identifier {
        assertions.push(
            "test(\"Response body is an array\", function() {\n  expect(res.getBody()).to.be.an(\"array\");\n});"
                .to_string(),
        );
    }

    assertions
}

/// Renders a JSON default as parameter text. Strings are used verbatim.
fn default_text(field: &FieldDefinition) -> String {
    match &field.default {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Description augmented with enum and length constraints.
fn describe(field: &FieldDefinition) -> String {
    let mut description = field.description.clone().unwrap_or_default();

    let mut append = |extra: String| {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&extra);
    };

    if let Some(values) = field.enum_values.as_ref().map(normalize_enum) {
        let options: Vec<String> = values.as_slice().iter().map(value_text).collect();
        if !options.is_empty() {
            append(format!("(Options: {})", options.join(", ")));
        }
    }
    if let Some(min) = field.min_length {
        append(format!("(Min length: {})", min));
    }
    if let Some(max) = field.max_length {
        append(format!("(Max length: {})", max));
    }

    description
}

/// Markdown table of the request's parameters.
fn render_docs(params: &[RequestParam]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let mut docs = String::from("| Parameter | In | Required | Description |\n|---|---|---|---|\n");
    for param in params {
        let location = match param.kind {
            ParamKind::Path => "path",
            ParamKind::Query => "query",
        };
        docs.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            param.name,
            location,
            if param.required { "yes" } else { "no" },
            param.description.replace('|', "\\|").replace('\n', " ")
        ));
    }
    docs
}

/// Builds the endpoint definition for a route/method pair.
pub fn endpoint_definition(
    route: &str,
    method: HttpMethod,
    methods: Vec<HttpMethod>,
    args: indexmap::IndexMap<String, FieldDefinition>,
    schema: Option<ResourceSchema>,
) -> EndpointDefinition {
    EndpointDefinition {
        route: route.to_string(),
        method,
        methods,
        args,
        schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::models::ParamKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn endpoint(route: &str, method: HttpMethod, args: Value) -> EndpointDefinition {
        endpoint_definition(
            route,
            method,
            vec![method],
            serde_json::from_value(args).unwrap(),
            None,
        )
    }

    #[test]
    fn test_get_single_item() {
        let route = r"/wp/v2/posts/(?P<id>[\d]+)";
        let ep = endpoint(route, HttpMethod::Get, json!({}));
        let req = transform(route, HttpMethod::Get, &ep, None);

        assert_eq!(req.name, "Get posts by ID");
        assert_eq!(req.request.url, "{{baseUrl}}/wp/v2/posts/:id");
        assert_eq!(req.request.params.len(), 1);
        let id = &req.request.params[0];
        assert_eq!(id.name, "id");
        assert_eq!(id.kind, ParamKind::Path);
        assert!(id.required);
        assert!(id.enabled);
        assert_eq!(req.request.body, RequestBody::None);
        assert_eq!(req.assertions().len(), 1);
        assert!(req.assertions()[0].contains("to.equal(200)"));
        assert_eq!(req.request.auth, RequestAuth::inherit());
    }

    #[test]
    fn test_get_collection() {
        let route = "/wp/v2/posts";
        let ep = endpoint(route, HttpMethod::Get, json!({}));
        let req = transform(route, HttpMethod::Get, &ep, None);

        assert_eq!(req.name, "List posts");
        let names: Vec<&str> = req.request.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["page", "per_page", "search", "orderby", "order", "_embed"]);
        assert!(req.request.params.iter().all(|p| !p.enabled));
        assert!(req.request.params.iter().all(|p| p.kind == ParamKind::Query));

        let assertions = req.assertions();
        assert_eq!(assertions.len(), 2);
        assert!(assertions[0].contains("to.equal(200)"));
        assert!(assertions[1].contains("to.be.an(\"array\")"));
    }

    #[test]
    fn test_post_collection() {
        let route = "/wp/v2/posts";
        let ep = endpoint(
            route,
            HttpMethod::Post,
            json!({
                "title": {"type": "string"},
                "status": {"type": "string", "enum": ["publish", "draft"]}
            }),
        );
        let req = transform(route, HttpMethod::Post, &ep, None);

        assert_eq!(req.name, "Create posts");
        assert_eq!(req.request.headers.len(), 1);
        assert_eq!(req.request.headers[0].name, "Content-Type");
        assert_eq!(req.request.headers[0].value, "application/json");

        let RequestBody::Json { json } = &req.request.body else {
            panic!("expected json body");
        };
        let parsed: Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed["title"], "Example Title");
        assert_eq!(parsed["status"], "publish");

        assert!(req.request.params.is_empty());
        assert_eq!(req.assertions().len(), 1);
        assert!(req.assertions()[0].contains("to.equal(201)"));
    }

    #[test]
    fn test_query_params_follow_required_flag() {
        let route = "/wp/v2/search";
        let ep = endpoint(
            route,
            HttpMethod::Get,
            json!({
                "context": {"type": "string", "enum": ["view", "embed"]},
                "type": {
                    "type": "string",
                    "description": "Limit results to items of an object type.",
                    "enum": ["post", "term", "post"],
                    "default": "post"
                },
                "subtype": {"type": "array", "required": true},
                "search": {"type": "string", "minLength": 1, "maxLength": 50}
            }),
        );
        let req = transform(route, HttpMethod::Get, &ep, None);

        assert!(req.param("context", ParamKind::Query).is_none());

        let ty = req.param("type", ParamKind::Query).unwrap();
        assert!(!ty.enabled);
        assert_eq!(ty.value, "post");
        assert_eq!(
            ty.description,
            "Limit results to items of an object type. (Options: post, term)"
        );

        let subtype = req.param("subtype", ParamKind::Query).unwrap();
        assert!(subtype.enabled);
        assert!(subtype.required);

        // Declared `search` wins over the listing convenience.
        let searches: Vec<_> = req.request.params.iter().filter(|p| p.name == "search").collect();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].description, "(Min length: 1) (Max length: 50)");
    }

    #[test]
    fn test_no_duplicate_params() {
        let route = r"/wp/v2/posts/(?P<parent>[\d]+)/revisions";
        let ep = endpoint(
            route,
            HttpMethod::Get,
            json!({"parent": {"type": "integer", "description": "The ID for the parent."}, "page": {"type": "integer", "default": 1}}),
        );
        let req = transform(route, HttpMethod::Get, &ep, None);
        let mut seen = std::collections::HashSet::new();
        for p in &req.request.params {
            assert!(seen.insert((p.name.clone(), p.kind)), "duplicate {}", p.name);
        }
        let parent = req.param("parent", ParamKind::Path).unwrap();
        assert_eq!(parent.description, "The ID for the parent.");
        assert_eq!(req.name, "List posts revisions");
    }

    #[test]
    fn test_update_uses_schema() {
        let route = r"/wp/v2/pages/(?P<id>[\d]+)";
        let schema: ResourceSchema = serde_json::from_value(json!({
            "title": "page",
            "properties": {
                "title": {"type": "object", "properties": {"raw": {"type": "string"}}},
                "modified": {"type": "string", "format": "date-time", "readonly": true}
            }
        }))
        .unwrap();
        let ep = endpoint(route, HttpMethod::Patch, json!({"id": {"type": "integer"}}));
        let req = transform(route, HttpMethod::Patch, &ep, Some(&schema));

        assert_eq!(req.name, "Update pages");
        let RequestBody::Json { json } = &req.request.body else {
            panic!("expected json body");
        };
        let parsed: Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, json!({"title": {"raw": ""}}));
        assert!(req.assertions()[0].contains("to.equal(200)"));
    }

    #[test]
    fn test_endpoint_schema_is_fallback() {
        let route = r"/wp/v2/pages/(?P<id>[\d]+)";
        let schema: ResourceSchema = serde_json::from_value(json!({
            "properties": {"title": {"type": "object", "properties": {"raw": {"type": "string"}}}}
        }))
        .unwrap();
        let mut ep = endpoint(route, HttpMethod::Patch, json!({"id": {"type": "integer"}}));
        ep.schema = Some(schema);

        let req = transform(route, HttpMethod::Patch, &ep, None);
        let RequestBody::Json { json } = &req.request.body else {
            panic!("expected json body");
        };
        let parsed: Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, json!({"title": {"raw": ""}}));

        let explicit: ResourceSchema = serde_json::from_value(json!({
            "properties": {"slug": {"type": "string"}}
        }))
        .unwrap();
        let req = transform(route, HttpMethod::Patch, &ep, Some(&explicit));
        let RequestBody::Json { json } = &req.request.body else {
            panic!("expected json body");
        };
        let parsed: Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, json!({"slug": "example-slug"}));
    }

    #[test]
    fn test_delete_without_args_has_no_body() {
        let route = r"/wp/v2/tags/(?P<id>[\d]+)";
        let ep = endpoint(route, HttpMethod::Delete, json!({}));
        let req = transform(route, HttpMethod::Delete, &ep, None);
        assert_eq!(req.name, "Delete tags");
        assert_eq!(req.request.body.mode(), "none");
        assert_eq!(req.request.headers.len(), 1);
    }

    #[test]
    fn test_docs_table() {
        let route = r"/wp/v2/posts/(?P<id>[\d]+)";
        let ep = endpoint(route, HttpMethod::Get, json!({"id": {"description": "Unique | id"}}));
        let req = transform(route, HttpMethod::Get, &ep, None);
        assert!(req.request.docs.contains("| `id` | path | yes | Unique \\| id |"));
    }
}
