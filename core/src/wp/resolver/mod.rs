#![deny(missing_docs)]

//! # Resolver Module
//!
//! Turns raw field definitions into request pieces.
//!
//! - **types**: pseudo-type and enum normalization.
//! - **params**: path/query/body placement.
//! - **examples**: example value synthesis.
//! - **body**: JSON body composition.

pub mod body;
pub mod examples;
pub mod params;
pub mod types;

pub use body::{compose_body, COMMON_WRITABLE_FIELDS, CONTEXT_ARG};
pub use examples::synthesize;
pub use params::{classify, is_required, ParamLocation};
pub use types::{normalize_enum, normalize_type, resolve_type, JsonType};
