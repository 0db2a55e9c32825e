//! Schema row sources.
//!
//! A [`RowSource`] hands the four reference relations to the index builder.
//! The core does not care where rows come from; this module provides:
//!
//! - [`TsvDirectory`]: a directory holding `entities.tsv`, `properties.tsv`,
//!   `tables.tsv` and `fields.tsv`
//! - [`SqliteSource`]: a SQLite file with `reference_<relation>` tables
//! - [`MemorySource`]: rows held in memory, for embedding and tests
//!
//! [`open_source`] picks TSV or SQLite from the kind of path it is given.

mod memory;
mod sqlite;
mod tsv;

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::schema::{Relation, RelationTable, SchemaRows};

pub use memory::MemorySource;
pub use sqlite::SqliteSource;
pub use tsv::TsvDirectory;

/// Supplies raw rows for the reference relations.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable description, used in logs and reports.
    fn describe(&self) -> String;

    /// Fetch one relation.
    ///
    /// # Returns
    /// * `Ok(None)` - The source has no such relation
    /// * `Ok(Some(table))` - Header and records in source order
    /// * `Err(_)` - The source itself could not be read
    async fn fetch(&self, relation: Relation) -> Result<Option<RelationTable>>;
}

/// Fetch all four relations from `source`.
///
/// Any error aborts; an all-missing result is reported as
/// [`SourceError::Empty`].
pub async fn fetch_all(source: &dyn RowSource) -> Result<SchemaRows> {
    let mut rows = SchemaRows::default();
    for relation in Relation::ALL {
        let table = source.fetch(relation).await?;
        debug!(
            %relation,
            rows = table.as_ref().map(RelationTable::len),
            "Fetched relation"
        );
        rows.set(relation, table);
    }

    if rows.is_empty() {
        return Err(SourceError::Empty(source.describe()).into());
    }
    Ok(rows)
}

/// Open a schema source: a regular file is read as SQLite, a directory as
/// a set of TSV files.
pub async fn open_source(path: &Path) -> Result<Box<dyn RowSource>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceError::NotFound(path.display().to_string()).into());
        }
        Err(e) => {
            return Err(SourceError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into());
        }
    };

    if metadata.is_dir() {
        debug!(path = %path.display(), "Loading table files from directory");
        Ok(Box::new(TsvDirectory::new(path)))
    } else {
        debug!(path = %path.display(), "Loading from SQLite file");
        Ok(Box::new(SqliteSource::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DictError;

    #[tokio::test]
    async fn test_open_source_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        match open_source(&missing).await {
            Err(DictError::Source(SourceError::NotFound(path))) => {
                assert!(path.ends_with("nope"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[tokio::test]
    async fn test_open_source_picks_by_path_kind() {
        let dir = tempfile::tempdir().unwrap();
        let source = open_source(dir.path()).await.unwrap();
        assert!(source.describe().starts_with("TSV directory"));

        let file = dir.path().join("schema.sqlite");
        std::fs::write(&file, b"").unwrap();
        let source = open_source(&file).await.unwrap();
        assert!(source.describe().starts_with("SQLite file"));
    }

    #[tokio::test]
    async fn test_tsv_and_sqlite_build_same_index() {
        use crate::schema::{SchemaIndexBuilder, fixtures};

        let rows = fixtures::sample_rows();
        let dir = tempfile::tempdir().unwrap();
        let tsv_dir = dir.path().join("tsv");
        std::fs::create_dir(&tsv_dir).unwrap();
        let db_path = dir.path().join("schema.sqlite");
        let conn = rusqlite::Connection::open(&db_path).unwrap();

        for relation in Relation::ALL {
            let table = rows.get(relation).unwrap();

            let mut text = table.columns.join("\t");
            for record in &table.records {
                text.push('\n');
                text.push_str(&record.join("\t"));
            }
            std::fs::write(tsv_dir.join(format!("{}.tsv", relation.name())), text).unwrap();

            let name = SqliteSource::table_name(relation);
            let columns: Vec<String> = table.columns.iter().map(|c| format!("\"{c}\" TEXT")).collect();
            conn.execute_batch(&format!("CREATE TABLE \"{name}\" ({});", columns.join(", ")))
                .unwrap();
            let placeholders = vec!["?"; table.columns.len()].join(", ");
            let insert = format!("INSERT INTO \"{name}\" VALUES ({placeholders})");
            for record in &table.records {
                conn.execute(&insert, rusqlite::params_from_iter(record.iter()))
                    .unwrap();
            }
        }
        drop(conn);

        let from_tsv = fetch_all(&TsvDirectory::new(&tsv_dir)).await.unwrap();
        let from_sqlite = fetch_all(&SqliteSource::new(&db_path)).await.unwrap();

        let expected = SchemaIndexBuilder::build(&rows).index;
        assert_eq!(SchemaIndexBuilder::build(&from_tsv).index, expected);
        assert_eq!(SchemaIndexBuilder::build(&from_sqlite).index, expected);
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_empty_source() {
        let source = MemorySource::new("nothing", SchemaRows::default());
        match fetch_all(&source).await {
            Err(DictError::Source(SourceError::Empty(name))) => assert_eq!(name, "nothing"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
