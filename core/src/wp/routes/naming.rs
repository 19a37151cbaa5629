#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Derives the resource token, structural kind and human readable name of a
//! route/method pair.

use crate::wp::models::HttpMethod;
use crate::wp::routes::pattern::{ends_with_capture_group, has_capture_group, to_wildcard_shape};
use regex::Regex;
use std::sync::OnceLock;

/// Resource token used when a route has no `<namespace>/v<n>/<resource>` shape.
pub const DEFAULT_RESOURCE: &str = "resource";

/// Known routes whose success response is a list, compared after every capture
/// group is replaced by `*`.
pub const COLLECTION_ENDPOINTS: [&str; 34] = [
    "/wp/v2/posts",
    "/wp/v2/pages",
    "/wp/v2/media",
    "/wp/v2/users",
    "/wp/v2/comments",
    "/wp/v2/categories",
    "/wp/v2/tags",
    "/wp/v2/taxonomies",
    "/wp/v2/types",
    "/wp/v2/statuses",
    "/wp/v2/search",
    "/wp/v2/blocks",
    "/wp/v2/block-types",
    "/wp/v2/block-patterns/patterns",
    "/wp/v2/block-patterns/categories",
    "/wp/v2/block-directory/search",
    "/wp/v2/pattern-directory/patterns",
    "/wp/v2/plugins",
    "/wp/v2/themes",
    "/wp/v2/sidebars",
    "/wp/v2/widgets",
    "/wp/v2/widget-types",
    "/wp/v2/menus",
    "/wp/v2/menu-items",
    "/wp/v2/menu-locations",
    "/wp/v2/navigation",
    "/wp/v2/templates",
    "/wp/v2/template-parts",
    "/wp/v2/font-families",
    "/wp/v2/font-collections",
    "/wp/v2/posts/*/revisions",
    "/wp/v2/pages/*/revisions",
    "/wp/v2/posts/*/autosaves",
    "/wp/v2/users/*/application-passwords",
];

/// Structural facts about a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteKind {
    /// The route contains at least one capture group.
    pub has_identifier: bool,
    /// The last segment is a capture group.
    pub ends_with_identifier: bool,
    /// The route addresses autosaves.
    pub is_autosave: bool,
    /// The route addresses revisions.
    pub is_revision: bool,
    /// The route is listed in [`COLLECTION_ENDPOINTS`].
    pub is_collection: bool,
}

impl RouteKind {
    /// Inspects a route pattern.
    pub fn of(route: &str) -> Self {
        let shape = to_wildcard_shape(route);
        let shape = shape.trim_end_matches('/');
        Self {
            has_identifier: has_capture_group(route),
            ends_with_identifier: ends_with_capture_group(route),
            is_autosave: route.contains("/autosaves"),
            is_revision: route.contains("/revisions"),
            is_collection: COLLECTION_ENDPOINTS.contains(&shape),
        }
    }
}

fn namespace_resource_re() -> &'static Regex {
    static NAMESPACE_RESOURCE_RE: OnceLock<Regex> = OnceLock::new();
    NAMESPACE_RESOURCE_RE
        .get_or_init(|| Regex::new(r"([^/]+/v\d+)/([^/?#(:]+)").expect("Invalid regex"))
}

/// Splits a route or URL into its `<name>/v<n>` namespace and the segment after it.
///
/// e.g. `{{baseUrl}}/wp/v2/posts/:id` -> `("wp/v2", "posts")`
pub fn namespace_and_resource(path: &str) -> Option<(String, String)> {
    namespace_resource_re()
        .captures(path)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// The resource token of a route, falling back to [`DEFAULT_RESOURCE`].
pub fn resource_name(route: &str) -> String {
    namespace_and_resource(route)
        .map(|(_, resource)| resource)
        .unwrap_or_else(|| DEFAULT_RESOURCE.to_string())
}

/// Derives the display name of a request.
///
/// e.g. `GET /wp/v2/posts/(?P<id>[\d]+)` -> `Get posts by ID`
pub fn display_name(method: HttpMethod, route: &str, resource: &str, kind: &RouteKind) -> String {
    let named = match method {
        HttpMethod::Get if kind.is_autosave && kind.ends_with_identifier => {
            Some(format!("Get {} autosave", resource))
        }
        HttpMethod::Get if kind.is_autosave => Some(format!("List {} autosaves", resource)),
        HttpMethod::Get if kind.is_revision && kind.ends_with_identifier => {
            Some(format!("Get {} revision", resource))
        }
        HttpMethod::Get if kind.is_revision => Some(format!("List {} revisions", resource)),
        HttpMethod::Get if kind.has_identifier => Some(format!("Get {} by ID", resource)),
        HttpMethod::Get if kind.is_collection => Some(format!("List {}", resource)),
        HttpMethod::Post if kind.is_autosave => Some(format!("Create {} autosave", resource)),
        HttpMethod::Post if !kind.has_identifier => Some(format!("Create {}", resource)),
        HttpMethod::Post if !kind.is_revision => Some(format!("Update {}", resource)),
        HttpMethod::Put | HttpMethod::Patch => Some(format!("Update {}", resource)),
        HttpMethod::Delete if kind.is_revision => Some(format!("Delete {} revision", resource)),
        HttpMethod::Delete if kind.has_identifier => Some(format!("Delete {}", resource)),
        _ => None,
    };

    named.unwrap_or_else(|| format!("{} {}", method, route))
}
