#![deny(missing_docs)]

//! # Folder Organization
//!
//! Groups a flat list of requests into `namespace -> resource` folders, e.g.
//! `wp/v2 -> posts`, preserving first-seen order at both levels.
//!
//! Requests whose URL has no `<name>/v<n>/<resource>` shape are collected into
//! a trailing [`UNGROUPED_FOLDER`] instead of being dropped.

use crate::collection::models::{CollectionItem, FolderNode, RequestDescriptor};
use crate::wp::routes::naming::namespace_and_resource;
use indexmap::IndexMap;

/// Root folder for requests outside any versioned namespace.
pub const UNGROUPED_FOLDER: &str = "Other";

/// Organizes requests into folders.
pub fn organize(descriptors: Vec<RequestDescriptor>) -> Vec<CollectionItem> {
    let mut namespaces: IndexMap<String, IndexMap<String, Vec<RequestDescriptor>>> =
        IndexMap::new();
    let mut ungrouped = Vec::new();

    for descriptor in descriptors {
        match namespace_and_resource(&descriptor.request.url) {
            Some((namespace, resource)) => namespaces
                .entry(namespace)
                .or_default()
                .entry(resource)
                .or_default()
                .push(descriptor),
            None => {
                tracing::debug!(url = %descriptor.request.url, "request outside any namespace");
                ungrouped.push(descriptor);
            }
        }
    }

    let mut items: Vec<CollectionItem> = namespaces
        .into_iter()
        .map(|(namespace, resources)| {
            let mut folder = FolderNode::new(namespace);
            folder.items = resources
                .into_iter()
                .map(|(resource, requests)| {
                    let mut child = FolderNode::new(resource);
                    child.items = requests.into_iter().map(CollectionItem::Request).collect();
                    CollectionItem::Folder(child)
                })
                .collect();
            CollectionItem::Folder(folder)
        })
        .collect();

    if !ungrouped.is_empty() {
        let mut other = FolderNode::new(UNGROUPED_FOLDER);
        other.items = ungrouped.into_iter().map(CollectionItem::Request).collect();
        items.push(CollectionItem::Folder(other));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wp::models::{EndpointDefinition, HttpMethod};
    use crate::wp::routes::transform;
    use pretty_assertions::assert_eq;

    fn request(route: &str, method: HttpMethod) -> RequestDescriptor {
        let endpoint = EndpointDefinition {
            route: route.to_string(),
            method,
            methods: vec![method],
            args: Default::default(),
            schema: None,
        };
        transform(route, method, &endpoint, None)
    }

    /// Renders the tree as `folder/folder/request` lines.
    fn outline(items: &[CollectionItem]) -> Vec<String> {
        let mut lines = Vec::new();
        for item in items {
            match item {
                CollectionItem::Folder(folder) => {
                    for line in outline(&folder.items) {
                        lines.push(format!("{}/{}", folder.name, line));
                    }
                }
                CollectionItem::Request(r) => lines.push(r.name.clone()),
            }
        }
        lines
    }

    #[test]
    fn test_two_level_grouping() {
        let items = organize(vec![
            request("/wp/v2/posts", HttpMethod::Get),
            request("/wp/v2/pages", HttpMethod::Get),
            request(r"/wp/v2/posts/(?P<id>[\d]+)", HttpMethod::Get),
            request("/wc/v3/orders", HttpMethod::Get),
        ]);

        assert_eq!(
            outline(&items),
            vec![
                "wp/v2/posts/List posts",
                "wp/v2/posts/Get posts by ID",
                "wp/v2/pages/List pages",
                "wc/v3/orders/GET /wc/v3/orders",
            ]
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name(), "wp/v2");
    }

    #[test]
    fn test_first_seen_order() {
        let posts_first = organize(vec![
            request("/wp/v2/posts", HttpMethod::Get),
            request("/wp/v2/pages", HttpMethod::Get),
        ]);
        let pages_first = organize(vec![
            request("/wp/v2/pages", HttpMethod::Get),
            request("/wp/v2/posts", HttpMethod::Get),
        ]);

        let children = |items: &[CollectionItem]| -> Vec<String> {
            let CollectionItem::Folder(ns) = &items[0] else {
                panic!("expected namespace folder");
            };
            assert_eq!(ns.name, "wp/v2");
            ns.items.iter().map(|i| i.name().to_string()).collect()
        };

        assert_eq!(children(&posts_first), vec!["posts", "pages"]);
        assert_eq!(children(&pages_first), vec!["pages", "posts"]);
    }

    #[test]
    fn test_unmatched_requests_are_kept() {
        let items = organize(vec![
            request("/", HttpMethod::Get),
            request("/wp/v2/posts", HttpMethod::Get),
            request("/oembed/1.0/embed", HttpMethod::Get),
        ]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name(), UNGROUPED_FOLDER);
        assert_eq!(
            outline(&items[1..]),
            vec!["Other/GET /", "Other/GET /oembed/1.0/embed"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(organize(Vec::new()).is_empty());
    }
}
