#![deny(missing_docs)]

//! # WordPress REST Module
//!
//! - **models**: typed, lenient views over index metadata.
//! - **resolver**: type normalization, parameter placement, example values, bodies.
//! - **routes**: the endpoint transformer.
//! - **discovery**: walking an index through a [`discovery::RouteSource`].

pub mod discovery;
pub mod models;
pub mod resolver;
pub mod routes;

pub use discovery::{collect_requests, Discovery, FileSource, RouteSource, SiteInfo, ValueSource};
pub use models::{
    EndpointDefinition, EnumValues, FieldDefinition, HttpMethod, ResourceSchema, RouteEntry,
    SchemaType,
};
pub use routes::transform;
