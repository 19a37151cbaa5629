#![deny(missing_docs)]

//! # Collection Assembly
//!
//! Wraps organized folders into a collection document with a generated
//! `Default` environment, then runs the format normalizer over it.

use crate::collection::models::{
    new_uid, BrunoConfig, CollectionDocument, CollectionItem, Environment, EnvironmentVariable,
    COLLECTION_VERSION,
};
use crate::collection::normalization::CollectionNormalizer;
use crate::error::{AppError, AppResult};

/// Name of the generated environment.
pub const DEFAULT_ENVIRONMENT: &str = "Default";

/// Builds the generated environment: `baseUrl` (filled), `username` and a
/// secret `password`.
pub fn default_environment(base_url: &str) -> Environment {
    Environment {
        uid: new_uid(),
        name: DEFAULT_ENVIRONMENT.to_string(),
        variables: vec![
            EnvironmentVariable::new("baseUrl", base_url, false),
            EnvironmentVariable::new("username", "", false),
            EnvironmentVariable::new("password", "", true),
        ],
    }
}

/// Assembles, normalizes and validates the collection document.
///
/// A validation failure surfaces as [`AppError::InvalidSchema`]; the
/// validator's detail is logged.
pub fn assemble<N: CollectionNormalizer + ?Sized>(
    name: &str,
    items: Vec<CollectionItem>,
    base_url: &str,
    normalizer: &N,
) -> AppResult<CollectionDocument> {
    let document = CollectionDocument {
        version: COLLECTION_VERSION.to_string(),
        uid: new_uid(),
        name: name.to_string(),
        items,
        environments: vec![default_environment(base_url)],
        bruno_config: BrunoConfig::new(name),
    };

    let mut value = serde_json::to_value(&document)?;
    normalizer.transform_items(&mut value);
    normalizer.hydrate_seq(&mut value);

    if let Err(e) = normalizer.validate(&value) {
        tracing::error!(error = %e, collection = %name, "collection failed schema validation");
        return Err(AppError::InvalidSchema);
    }

    let document: CollectionDocument = serde_json::from_value(value)?;
    tracing::info!(collection = %document.name, items = document.items.len(), "assembled collection");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::normalization::BrunoNormalizer;
    use crate::collection::organizer::organize;
    use crate::wp::models::{EndpointDefinition, HttpMethod};
    use crate::wp::routes::transform;
    use serde_json::Value;

    fn request(route: &str, method: HttpMethod) -> crate::collection::models::RequestDescriptor {
        let endpoint = EndpointDefinition {
            route: route.to_string(),
            method,
            methods: vec![method],
            args: Default::default(),
            schema: None,
        };
        transform(route, method, &endpoint, None)
    }

    #[test]
    fn test_assemble_environment_and_seq() {
        let items = organize(vec![
            request("/wp/v2/posts", HttpMethod::Get),
            request("/wp/v2/posts", HttpMethod::Post),
        ]);
        let doc = assemble("Demo", items, "https://demo.test/wp-json", &BrunoNormalizer).unwrap();

        assert_eq!(doc.version, "1");
        assert_eq!(doc.name, "Demo");
        assert_eq!(doc.bruno_config.name, "Demo");
        assert_eq!(doc.environments.len(), 1);

        let env = &doc.environments[0];
        assert_eq!(env.name, "Default");
        let vars: Vec<(&str, &str, bool)> = env
            .variables
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str(), v.secret))
            .collect();
        assert_eq!(
            vars,
            vec![
                ("baseUrl", "https://demo.test/wp-json", false),
                ("username", "", false),
                ("password", "", true),
            ]
        );

        let CollectionItem::Folder(ns) = &doc.items[0] else {
            panic!("expected folder");
        };
        assert_eq!(ns.seq, None);
        let CollectionItem::Folder(posts) = &ns.items[0] else {
            panic!("expected folder");
        };
        let seqs: Vec<Option<u32>> = posts
            .items
            .iter()
            .map(|item| match item {
                CollectionItem::Request(r) => r.seq,
                CollectionItem::Folder(_) => None,
            })
            .collect();
        assert_eq!(seqs, vec![Some(1), Some(2)]);
    }

    struct RejectingNormalizer;

    impl CollectionNormalizer for RejectingNormalizer {
        fn transform_items(&self, _collection: &mut Value) {}
        fn hydrate_seq(&self, _collection: &mut Value) {}
        fn validate(&self, _collection: &Value) -> AppResult<()> {
            Err(AppError::General("items[0]: broken".into()))
        }
    }

    #[test]
    fn test_validation_failure_is_generic() {
        let err = assemble("Demo", Vec::new(), "x", &RejectingNormalizer).unwrap_err();
        assert!(matches!(err, AppError::InvalidSchema));
        assert_eq!(err.to_string(), "invalid schema");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = assemble("", Vec::new(), "x", &BrunoNormalizer).unwrap_err();
        assert!(matches!(err, AppError::InvalidSchema));
    }
}
