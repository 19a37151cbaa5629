//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The discovered API index is missing a required top-level structure.
    #[from(ignore)]
    #[display("Input Error: {_0}")]
    InputShape(String),

    /// Transport failures raised by a network route source.
    #[from(ignore)]
    #[display("HTTP Error: {_0}")]
    Http(String),

    /// The assembled collection failed structural validation.
    /// The validator's detail is logged, not carried.
    #[from(ignore)]
    #[display("invalid schema")]
    InvalidSchema,

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
