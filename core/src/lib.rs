#![deny(missing_docs)]

//! # WPC Core
//!
//! Compiles a WordPress REST API index into a Bruno request collection.
//!
//! The pipeline runs leaf-first: discovery walks the index, every
//! (route, method) pair is transformed into a request descriptor, the
//! descriptors are organized into folders, and the assembled document is
//! normalized and validated before persistence.

/// Shared error types.
pub mod error;

/// WordPress index models, resolvers and the endpoint transformer.
pub mod wp;

/// Collection models, organization, assembly and rendering.
pub mod collection;

pub use collection::{
    assemble, organize, BrunoNormalizer, CollectionDocument, CollectionItem, CollectionNormalizer,
    RequestDescriptor,
};
pub use error::{AppError, AppResult};
pub use wp::{collect_requests, transform, Discovery, FileSource, RouteSource, SiteInfo};
