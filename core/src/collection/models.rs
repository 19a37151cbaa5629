#![deny(missing_docs)]

//! # Collection Models
//!
//! The Bruno collection document produced by the compiler.
//!
//! These structs serialize to the JSON shape Bruno imports: `version: "1"`,
//! `http-request` and `folder` items, and environments with typed variables.

use crate::wp::models::HttpMethod;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a Bruno uid.
pub const UID_LENGTH: usize = 21;

/// Collection format version.
pub const COLLECTION_VERSION: &str = "1";

/// Generates a random 21 character alphanumeric uid.
pub fn new_uid() -> String {
    let mut uid = Uuid::new_v4().simple().to_string();
    uid.truncate(UID_LENGTH);
    uid
}

/// A node in the collection tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollectionItem {
    /// A single request.
    #[serde(rename = "http-request")]
    Request(RequestDescriptor),
    /// A folder of items.
    #[serde(rename = "folder")]
    Folder(FolderNode),
}

impl CollectionItem {
    /// Display name of the item.
    pub fn name(&self) -> &str {
        match self {
            CollectionItem::Request(r) => &r.name,
            CollectionItem::Folder(f) => &f.name,
        }
    }
}

/// A folder grouping requests or other folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Unique identifier.
    pub uid: String,
    /// Human-readable name.
    pub name: String,
    /// Position among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u32>,
    /// Children in first-seen order.
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

impl FolderNode {
    /// Creates an empty folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: new_uid(),
            name: name.into(),
            seq: None,
            items: Vec::new(),
        }
    }
}

/// One fully specified API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Unique identifier.
    pub uid: String,
    /// Human-readable name, e.g. `Get posts by ID`.
    pub name: String,
    /// Position among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u32>,
    /// The HTTP request.
    pub request: HttpRequest,
}

impl RequestDescriptor {
    /// The default assertions, one test statement each.
    pub fn assertions(&self) -> Vec<&str> {
        self.request
            .tests
            .split(ASSERTION_SEPARATOR)
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    /// Looks up a parameter by name and kind.
    pub fn param(&self, name: &str, kind: ParamKind) -> Option<&RequestParam> {
        self.request
            .params
            .iter()
            .find(|p| p.name == name && p.kind == kind)
    }
}

/// Separator between assertions inside a request's test script.
pub const ASSERTION_SEPARATOR: &str = "\n\n";

/// The request part of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// URL template, e.g. `{{baseUrl}}/wp/v2/posts/:id`.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Headers.
    #[serde(default)]
    pub headers: Vec<RequestHeader>,
    /// Path and query parameters.
    #[serde(default)]
    pub params: Vec<RequestParam>,
    /// Body.
    pub body: RequestBody,
    /// Authentication mode.
    pub auth: RequestAuth,
    /// Test script made of the default assertions.
    #[serde(default)]
    pub tests: String,
    /// Markdown documentation.
    #[serde(default)]
    pub docs: String,
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestHeader {
    /// Unique identifier.
    pub uid: String,
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Whether the header is sent.
    pub enabled: bool,
}

impl RequestHeader {
    /// Creates an enabled header.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            uid: new_uid(),
            name: name.to_string(),
            value: value.to_string(),
            description: String::new(),
            enabled: true,
        }
    }
}

/// Where a parameter lives in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// `:name` path variable.
    Path,
    /// Query string entry.
    Query,
}

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParam {
    /// Unique identifier.
    pub uid: String,
    /// Parameter name.
    pub name: String,
    /// Default value.
    pub value: String,
    /// Description, including enum/length constraints.
    #[serde(default)]
    pub description: String,
    /// Location.
    #[serde(rename = "type")]
    pub kind: ParamKind,
    /// Whether the parameter is sent.
    pub enabled: bool,
    /// Whether the API requires it.
    #[serde(default)]
    pub required: bool,
}

/// Request body. Exactly one mode is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RequestBody {
    /// No body.
    None,
    /// JSON body with an example document.
    Json {
        /// Pretty-printed JSON text.
        json: String,
    },
}

impl RequestBody {
    /// Wire name of the mode.
    pub fn mode(&self) -> &'static str {
        match self {
            RequestBody::None => "none",
            RequestBody::Json { .. } => "json",
        }
    }
}

/// Authentication settings of a request or collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAuth {
    /// Mode.
    pub mode: AuthMode,
}

impl RequestAuth {
    /// Defer to the collection's authentication.
    pub fn inherit() -> Self {
        Self {
            mode: AuthMode::Inherit,
        }
    }
}

/// Supported authentication modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Use the parent's settings.
    Inherit,
    /// No authentication.
    None,
    /// HTTP basic authentication.
    Basic,
}

/// A named set of variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier.
    pub uid: String,
    /// Environment name.
    pub name: String,
    /// Variables in declaration order.
    pub variables: Vec<EnvironmentVariable>,
}

/// One environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    /// Unique identifier.
    pub uid: String,
    /// Variable name.
    pub name: String,
    /// Value.
    pub value: String,
    /// Variable type, always `text`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the variable is active.
    pub enabled: bool,
    /// Whether the value is kept out of the collection files.
    pub secret: bool,
}

impl EnvironmentVariable {
    /// Creates an enabled text variable.
    pub fn new(name: &str, value: &str, secret: bool) -> Self {
        Self {
            uid: new_uid(),
            name: name.to_string(),
            value: value.to_string(),
            kind: "text".to_string(),
            enabled: true,
            secret,
        }
    }
}

/// `bruno.json` settings embedded in the collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrunoConfig {
    /// Config version.
    pub version: String,
    /// Collection name.
    pub name: String,
    /// Always `collection`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Paths Bruno ignores when loading.
    pub ignore: Vec<String>,
}

impl BrunoConfig {
    /// Default configuration for a named collection.
    pub fn new(name: &str) -> Self {
        Self {
            version: COLLECTION_VERSION.to_string(),
            name: name.to_string(),
            kind: "collection".to_string(),
            ignore: vec!["node_modules".to_string(), ".git".to_string()],
        }
    }
}

/// The top-level collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDocument {
    /// Format version.
    pub version: String,
    /// Unique identifier.
    pub uid: String,
    /// Collection name.
    pub name: String,
    /// Root items.
    pub items: Vec<CollectionItem>,
    /// Environments.
    pub environments: Vec<Environment>,
    /// `bruno.json` settings.
    pub bruno_config: BrunoConfig,
}
