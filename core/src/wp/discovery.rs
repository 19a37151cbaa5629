#![deny(missing_docs)]

//! # Route Discovery
//!
//! Walks a `wp-json` index and feeds every (route, method) pair through the
//! endpoint transformer.
//!
//! Where the index comes from is abstracted behind [`RouteSource`]; this crate
//! ships [`FileSource`] for saved index dumps, the CLI adds an HTTP source.
//!
//! A missing `routes` map is fatal. Anything malformed below it is logged and
//! skipped so one bad endpoint does not abort the batch.

use crate::collection::models::RequestDescriptor;
use crate::error::{AppError, AppResult};
use crate::wp::models::{EndpointEntry, HttpMethod, ResourceSchema, RouteEntry};
use crate::wp::routes::{endpoint_definition, transform};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the API index and per-route detail schemas.
pub trait RouteSource {
    /// Returns the raw index document (`GET /wp-json/`).
    fn index(&self) -> AppResult<Value>;

    /// Returns the detailed resource schema of a route.
    ///
    /// The default reads the schema inlined in the index entry.
    fn route_schema(&self, _route: &str, entry: &RouteEntry) -> AppResult<Option<ResourceSchema>> {
        Ok(entry.schema.as_ref().and_then(parse_schema))
    }
}

/// A [`RouteSource`] backed by a saved index document.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Reads the index from `path` on demand.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteSource for FileSource {
    fn index(&self) -> AppResult<Value> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            AppError::General(format!("Failed to read index {:?}: {}", self.path, e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// A [`RouteSource`] over an index already held in memory.
#[derive(Debug, Clone)]
pub struct ValueSource(pub Value);

impl RouteSource for ValueSource {
    fn index(&self) -> AppResult<Value> {
        Ok(self.0.clone())
    }
}

/// Site metadata from the index root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteInfo {
    /// Site title.
    pub name: Option<String>,
    /// Site tagline.
    pub description: Option<String>,
    /// Site URL (`url`, falling back to `home`).
    pub url: Option<String>,
}

impl SiteInfo {
    fn from_index(index: &Value) -> Self {
        let text = |key: &str| {
            index
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            name: text("name"),
            description: text("description"),
            url: text("url").or_else(|| text("home")),
        }
    }

    /// The `wp-json` API root for this site, if its URL is known.
    pub fn api_root(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(|url| format!("{}/wp-json", url.trim_end_matches('/')))
    }
}

/// Everything discovery produced.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Site metadata.
    pub site: SiteInfo,
    /// Requests in discovery order.
    pub requests: Vec<RequestDescriptor>,
}

/// Parses a raw schema value, logging and discarding malformed ones.
pub fn parse_schema(raw: &Value) -> Option<ResourceSchema> {
    match serde_json::from_value::<ResourceSchema>(raw.clone()) {
        Ok(schema) => Some(schema),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed resource schema");
            None
        }
    }
}

/// Discovers every route of `source` and transforms each (route, method) pair.
pub fn collect_requests<S: RouteSource + ?Sized>(source: &S) -> AppResult<Discovery> {
    let index = source.index()?;
    let site = SiteInfo::from_index(&index);

    let routes = index
        .get("routes")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::InputShape("API index has no 'routes' object".into()))?;

    tracing::info!(routes = routes.len(), "discovered routes");

    let mut requests = Vec::new();
    let mut seen: HashSet<(String, HttpMethod)> = HashSet::new();

    for (route, raw_entry) in routes {
        let entry = match serde_json::from_value::<RouteEntry>(raw_entry.clone()) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(route = %route, error = %e, "skipping malformed route");
                continue;
            }
        };

        let schema = match source.route_schema(route, &entry) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::warn!(route = %route, error = %e, "detail schema unavailable");
                entry.schema.as_ref().and_then(parse_schema)
            }
        };

        for raw_endpoint in &entry.endpoints {
            let endpoint = match serde_json::from_value::<EndpointEntry>(raw_endpoint.clone()) {
                Ok(endpoint) => endpoint,
                Err(e) => {
                    tracing::warn!(route = %route, error = %e, "skipping malformed endpoint");
                    continue;
                }
            };

            let methods: Vec<HttpMethod> = endpoint
                .methods
                .iter()
                .filter_map(|m| match m.parse::<HttpMethod>() {
                    Ok(method) => Some(method),
                    Err(e) => {
                        tracing::debug!(route = %route, error = %e, "skipping method");
                        None
                    }
                })
                .collect();

            for method in methods.iter().copied() {
                if method.is_introspection() {
                    continue;
                }
                if !seen.insert((route.clone(), method)) {
                    tracing::debug!(route = %route, %method, "duplicate endpoint");
                    continue;
                }

                let definition = endpoint_definition(
                    route,
                    method,
                    methods.clone(),
                    endpoint.args.clone(),
                    schema.clone(),
                );
                let request = transform(route, method, &definition, schema.as_ref());
                tracing::debug!(route = %route, %method, name = %request.name, "transformed endpoint");
                requests.push(request);
            }
        }
    }

    Ok(Discovery { site, requests })
}
