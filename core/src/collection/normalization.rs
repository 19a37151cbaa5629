#![deny(missing_docs)]

//! # Collection Normalization
//!
//! Post-processing applied to the JSON form of an assembled collection before
//! it is handed to persistence.
//!
//! The steps are format-specific, so they sit behind [`CollectionNormalizer`].
//! [`BrunoNormalizer`] implements them for Bruno collections:
//! - legacy `request.query` arrays become typed `params` entries,
//! - untyped multipart form parts are tagged as `text`,
//! - unsequenced requests get the lowest free 1-based sequence numbers,
//! - the document is checked against the collection schema.

use crate::collection::models::new_uid;
use crate::collection::validation::validate_collection;
use crate::error::AppResult;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Format-specific normalization and validation of a collection document.
pub trait CollectionNormalizer {
    /// Canonicalizes request shapes in every item, recursively.
    fn transform_items(&self, collection: &mut Value);

    /// Assigns sequence numbers to requests that lack one.
    fn hydrate_seq(&self, collection: &mut Value);

    /// Checks the document; the error carries a descriptive detail.
    fn validate(&self, collection: &Value) -> AppResult<()>;
}

/// Normalizer for Bruno collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrunoNormalizer;

impl CollectionNormalizer for BrunoNormalizer {
    fn transform_items(&self, collection: &mut Value) {
        if let Some(items) = collection.get_mut("items").and_then(Value::as_array_mut) {
            transform_item_list(items);
        }
    }

    fn hydrate_seq(&self, collection: &mut Value) {
        if let Some(items) = collection.get_mut("items").and_then(Value::as_array_mut) {
            hydrate_item_list(items);
        }
    }

    fn validate(&self, collection: &Value) -> AppResult<()> {
        validate_collection(collection)
    }
}

fn is_folder(item: &Value) -> bool {
    item.get("type").and_then(Value::as_str) == Some("folder")
}

fn transform_item_list(items: &mut [Value]) {
    for item in items.iter_mut() {
        if is_folder(item) {
            if let Some(children) = item.get_mut("items").and_then(Value::as_array_mut) {
                transform_item_list(children);
            }
            continue;
        }
        if let Some(request) = item.get_mut("request").and_then(Value::as_object_mut) {
            migrate_legacy_query(request);
            tag_multipart_parts(request);
        }
    }
}

/// Moves `request.query` entries into `request.params` as `type: "query"`.
fn migrate_legacy_query(request: &mut Map<String, Value>) {
    let Some(Value::Array(query)) = request.remove("query") else {
        return;
    };

    let params = request
        .entry("params")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(params) = params.as_array_mut() else {
        return;
    };

    for mut entry in query {
        let Some(object) = entry.as_object_mut() else {
            continue;
        };
        object.insert("type".to_string(), Value::String("query".to_string()));
        if !object.get("uid").is_some_and(Value::is_string) {
            object.insert("uid".to_string(), Value::String(new_uid()));
        }
        object
            .entry("value")
            .or_insert_with(|| Value::String(String::new()));
        object.entry("enabled").or_insert(Value::Bool(true));

        let name = object.get("name").cloned();
        let duplicate = params.iter().any(|p| {
            p.get("name") == name.as_ref() && p.get("type").and_then(Value::as_str) == Some("query")
        });
        if !duplicate {
            params.push(entry);
        }
    }
}

/// Multipart parts without a `type` are text parts.
fn tag_multipart_parts(request: &mut Map<String, Value>) {
    let parts = request
        .get_mut("body")
        .and_then(|body| body.get_mut("multipartForm"))
        .and_then(Value::as_array_mut);

    for part in parts.into_iter().flatten() {
        if let Some(object) = part.as_object_mut() {
            object
                .entry("type")
                .or_insert_with(|| Value::String("text".to_string()));
        }
    }
}

/// Unsequenced requests are numbered 1, 2, ... in sibling order. Folders and
/// numbers already taken by a sibling are skipped.
fn hydrate_item_list(items: &mut [Value]) {
    let mut taken: HashSet<u64> = items
        .iter()
        .filter(|item| !is_folder(item))
        .filter_map(|item| item.get("seq").and_then(Value::as_u64))
        .collect();
    let mut next = 1u64;

    for item in items.iter_mut() {
        if is_folder(item) {
            if let Some(children) = item.get_mut("items").and_then(Value::as_array_mut) {
                hydrate_item_list(children);
            }
            continue;
        }

        let Some(object) = item.as_object_mut() else {
            continue;
        };
        let unsequenced = object.get("seq").map_or(true, Value::is_null);
        if unsequenced {
            while taken.contains(&next) {
                next += 1;
            }
            object.insert("seq".to_string(), Value::from(next));
            taken.insert(next);
            next += 1;
        }
    }
}
