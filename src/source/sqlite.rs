//! SQLite schema files.
//!
//! Each relation lives in a table named `reference_<relation>`, e.g.
//! `reference_entities`. A missing table is a missing relation. Reads run
//! on the blocking pool.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::info;

use super::RowSource;
use crate::error::{DictError, Result, SourceError};
use crate::schema::{Relation, RelationTable};

/// A SQLite database holding the reference tables.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Table holding `relation`.
    pub fn table_name(relation: Relation) -> String {
        format!("reference_{}", relation.name())
    }

    /// Blocking read of one relation.
    fn read_relation(path: &Path, relation: Relation) -> Result<Option<RelationTable>> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let table_name = Self::table_name(relation);

        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table_name.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            info!(table = %table_name, "Table missing from SQLite schema");
            return Ok(None);
        }

        let mut stmt = conn.prepare(&format!("SELECT * FROM \"{table_name}\""))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();
        let mut table = RelationTable::new(columns);

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(width);
            for position in 0..width {
                record.push(value_text(row.get_ref(position)?));
            }
            table.push(record);
        }

        Ok(Some(table))
    }
}

/// Render a SQLite value as the text the index works with.
fn value_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(text) | ValueRef::Blob(text) => String::from_utf8_lossy(text).into_owned(),
    }
}

#[async_trait]
impl RowSource for SqliteSource {
    fn describe(&self) -> String {
        format!("SQLite file {}", self.path.display())
    }

    async fn fetch(&self, relation: Relation) -> Result<Option<RelationTable>> {
        let path = self.path.clone();
        let result = tokio::task::spawn_blocking(move || Self::read_relation(&path, relation))
            .await
            .map_err(|e| DictError::Generic(format!("SQLite reader task failed: {e}")))?;

        result.map_err(|e| match e {
            DictError::Sqlite(e) => SourceError::Unreadable {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
            .into(),
            other => other,
        })
    }
}
