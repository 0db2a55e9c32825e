//! Schema dictionary library
//!
//! Builds a resolvable index over a data model schema (entities,
//! properties, tables, fields) and answers two kinds of editor queries:
//! what a word means (hover) and what may follow at a cursor (completion).
//!
//! # Modules
//!
//! - `schema`: Relation rows, the index builder, the published index
//! - `source`: Row sources (TSV directory, SQLite file, in-memory)
//! - `lookup`: Token resolution, context tokenizer, field listings
//! - `formatter`: Text and JSON output
//! - `config`: Configuration management
//! - `cli`: Command-line interface and argument parsing
//! - `repl`: Interactive shell
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```no_run
//! use schemadict::{SchemaStore, TokenResolver};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> schemadict::Result<()> {
//!     let store = SchemaStore::new();
//!     store.reload_path(Path::new("reference.sqlite")).await?;
//!
//!     let index = store.snapshot();
//!     if let Some(card) = TokenResolver::new(&index).resolve_card("patients") {
//!         println!("{}: {}", card.display_name, card.definition_text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod lookup;
pub mod repl;
pub mod schema;
pub mod source;

// Re-export commonly used types
pub use config::Config;
pub use error::{DictError, Result};
pub use formatter::Formatter;
pub use lookup::{Candidate, ContextTokenizer, Hover, TokenResolver};
pub use repl::ReplEngine;
pub use schema::{DefinitionCard, SchemaIndex, SchemaIndexBuilder, SchemaStore};
pub use source::{RowSource, SqliteSource, TsvDirectory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
