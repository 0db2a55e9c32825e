//! Schema model and index.
//!
//! Raw relation rows ([`SchemaRows`]) go into [`SchemaIndexBuilder`], which
//! produces an immutable [`SchemaIndex`] plus [`Diagnostic`]s. A
//! [`SchemaStore`] publishes the current index and swaps it on reload.

mod builder;
mod card;
mod diagnostic;
mod index;
mod row;
mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{BuildOutput, SchemaIndexBuilder};
pub use card::{CardKind, DefinitionCard, ExternalReference, ONTOLOGY_PURL_BASE, purl_for};
pub use diagnostic::{Diagnostic, Severity};
pub use index::{IndexStats, SchemaIndex};
pub use row::{Column, Relation, RelationTable, Row, SchemaRows};
pub use store::{ReloadReport, SchemaStore};
