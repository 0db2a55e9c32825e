//! Tab-separated flat files, one per relation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::RowSource;
use crate::error::{Result, SourceError};
use crate::schema::{Relation, RelationTable};

/// A directory holding `<relation>.tsv` files. The first line of each file
/// is the header.
#[derive(Debug, Clone)]
pub struct TsvDirectory {
    dir: PathBuf,
}

impl TsvDirectory {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `relation`.
    pub fn file_for(&self, relation: Relation) -> PathBuf {
        self.dir.join(format!("{}.tsv", relation.name()))
    }

    /// Parse TSV contents. An empty file yields `None`.
    ///
    /// Records are kept as-is, including ones whose length differs from the
    /// header; the index builder decides what to do with those.
    pub fn parse(contents: &[u8]) -> Result<Option<RelationTable>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(contents);

        let mut table: Option<RelationTable> = None;
        for record in reader.byte_records() {
            let record = record?;
            let values: Vec<String> = record
                .iter()
                .map(|value| String::from_utf8_lossy(value).into_owned())
                .collect();

            match table.as_mut() {
                Some(table) => table.push(values),
                None => table = Some(RelationTable::new(values)),
            }
        }
        Ok(table)
    }
}

#[async_trait]
impl RowSource for TsvDirectory {
    fn describe(&self) -> String {
        format!("TSV directory {}", self.dir.display())
    }

    async fn fetch(&self, relation: Relation) -> Result<Option<RelationTable>> {
        let path = self.file_for(relation);
        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No file for relation");
                return Ok(None);
            }
            Err(e) => {
                return Err(SourceError::Unreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let table = Self::parse(&contents)?;
        if table.is_none() {
            debug!(path = %path.display(), "Relation file is empty");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fetch_all;

    #[test]
    fn test_parse_header_and_rows() {
        let contents = b"Name\tLabel\tTable\nf1\tField one\tThing\nf2\tField two\tThing\n";
        let table = TsvDirectory::parse(contents).unwrap().unwrap();
        assert_eq!(table.columns, vec!["Name", "Label", "Table"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1], vec!["f2", "Field two", "Thing"]);
    }

    #[test]
    fn test_parse_keeps_short_rows() {
        let contents = b"Name\tLabel\tTable\nf1\tField one\n";
        let table = TsvDirectory::parse(contents).unwrap().unwrap();
        assert_eq!(table.records[0].len(), 2);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(TsvDirectory::parse(b"").unwrap().is_none());
    }

    #[test]
    fn test_parse_keeps_empty_cells() {
        let contents = b"Name\tLabel\tDefinitional reference\tDefinition\nx\tX\t\tSomething.\n";
        let table = TsvDirectory::parse(contents).unwrap().unwrap();
        assert_eq!(table.records[0], vec!["x", "X", "", "Something."]);
    }

    #[tokio::test]
    async fn test_missing_file_is_missing_relation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("entities.tsv"),
            "Name\tLabel\tDefinitional reference\tDefinition\nperson\tPerson\t\tA human.\n",
        )
        .unwrap();

        let source = TsvDirectory::new(dir.path());
        let rows = fetch_all(&source).await.unwrap();
        assert_eq!(rows.entities.as_ref().map(RelationTable::len), Some(1));
        assert!(rows.properties.is_none());
        assert!(rows.tables.is_none());
        assert!(rows.fields.is_none());
    }
}
