#![deny(missing_docs)]

//! # Collection Module
//!
//! - **models**: the Bruno collection document.
//! - **organizer**: namespace and resource folders.
//! - **assembler**: environment generation plus normalization.
//! - **normalization**: format-specific post-processing behind a trait.
//! - **validation**: structural checks with JSON path reporting.
//! - **bru**: rendering to Bruno's on-disk text format.

pub mod assembler;
pub mod bru;
pub mod models;
pub mod normalization;
pub mod organizer;
pub mod validation;

pub use assembler::{assemble, default_environment, DEFAULT_ENVIRONMENT};
pub use models::{
    new_uid, BrunoConfig, CollectionDocument, CollectionItem, Environment, EnvironmentVariable,
    FolderNode, ParamKind, RequestBody, RequestDescriptor, RequestParam,
};
pub use normalization::{BrunoNormalizer, CollectionNormalizer};
pub use organizer::{organize, UNGROUPED_FOLDER};
pub use validation::validate_collection;
