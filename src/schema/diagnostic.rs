//! Data-integrity findings collected while building an index.
//!
//! None of these abort a build. They are logged as they are found and
//! returned to the caller alongside the index.

use std::fmt;

use serde::Serialize;

use super::card::CardKind;
use super::row::{Column, Relation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A problem in the schema data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The source has no such relation.
    MissingRelation { relation: Relation },

    /// The relation's header lacks a column the builder needs.
    MissingColumn { relation: Relation, column: Column },

    /// A record whose value count differs from its header. `row` is 1-based
    /// and counts data rows only.
    MalformedRow {
        relation: Relation,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A property reuses a machine token that already has a card; the
    /// property was dropped.
    TokenCollision { token: String, existing: CardKind },

    /// A table names an owning entity label that no entity carries.
    UnresolvedTableEntity { table: String, entity_label: String },

    /// A field names a table label that no table carries; the field was not
    /// added to any field list.
    DanglingTable { field: String, table_label: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::MissingRelation { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingRelation { relation } => {
                write!(f, "relation '{relation}' is missing from the schema source")
            }
            Diagnostic::MissingColumn { relation, column } => {
                write!(f, "relation '{relation}' has no '{column}' column; ignoring it")
            }
            Diagnostic::MalformedRow {
                relation,
                row,
                expected,
                found,
            } => write!(
                f,
                "{relation} row {row}: expected {expected} values, found {found}; skipped"
            ),
            Diagnostic::TokenCollision { token, existing } => write!(
                f,
                "property token '{token}' is already registered as {} {}; property dropped",
                if *existing == CardKind::Entity { "an" } else { "a" },
                existing.as_str()
            ),
            Diagnostic::UnresolvedTableEntity {
                table,
                entity_label,
            } => write!(
                f,
                "table '{table}' names unknown entity '{entity_label}'; no alias registered"
            ),
            Diagnostic::DanglingTable { field, table_label } => write!(
                f,
                "field '{field}' names unknown table '{table_label}'; skipped"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let missing = Diagnostic::MissingRelation {
            relation: Relation::Properties,
        };
        assert_eq!(missing.severity(), Severity::Info);

        let collision = Diagnostic::TokenCollision {
            token: "age".to_string(),
            existing: CardKind::Entity,
        };
        assert_eq!(collision.severity(), Severity::Warning);
        assert_eq!(
            collision.to_string(),
            "property token 'age' is already registered as an entity; property dropped"
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let diagnostic = Diagnostic::MalformedRow {
            relation: Relation::Fields,
            row: 3,
            expected: 8,
            found: 5,
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "malformed_row");
        assert_eq!(json["relation"], "fields");
        assert_eq!(json["found"], 5);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::DanglingTable {
            field: "f9".to_string(),
            table_label: "Ghost".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "field 'f9' names unknown table 'Ghost'; skipped"
        );
    }
}
