use async_trait::async_trait;

use super::RowSource;
use crate::error::Result;
use crate::schema::{Relation, RelationTable, SchemaRows};

/// Rows held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    rows: SchemaRows,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, rows: SchemaRows) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

#[async_trait]
impl RowSource for MemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self, relation: Relation) -> Result<Option<RelationTable>> {
        Ok(self.rows.get(relation).cloned())
    }
}
