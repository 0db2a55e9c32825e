//! Error handling for schemadict.
//!
//! Only failures that stop an operation are errors. Problems found in the
//! schema data itself (malformed rows, token collisions, dangling table
//! references) are collected as [`crate::schema::Diagnostic`]s instead.
//!
//! # Example
//!
//! ```rust,no_run
//! use schemadict::error::{Result, SourceError};
//!
//! fn require_schema(path: Option<&str>) -> Result<&str> {
//!     path.ok_or_else(|| SourceError::NoSchemaConfigured.into())
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, DictError, Result, SourceError};
