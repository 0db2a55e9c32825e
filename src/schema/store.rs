//! Publication of the current index.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{info, warn};

use super::builder::SchemaIndexBuilder;
use super::diagnostic::{Diagnostic, Severity};
use super::index::{IndexStats, SchemaIndex};
use crate::error::Result;
use crate::source::{RowSource, fetch_all, open_source};

/// What a successful reload produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadReport {
    /// Description of the source that was read
    pub source: String,

    /// Sizes of the published index
    pub stats: IndexStats,

    /// Data problems found during the build
    pub diagnostics: Vec<Diagnostic>,
}

impl ReloadReport {
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
            .count()
    }
}

/// Holds the published [`SchemaIndex`].
///
/// Readers take a [`snapshot`](Self::snapshot), which stays valid and
/// unchanged for as long as they hold it. A reload builds the next index
/// without touching the published one and swaps the pointer under the
/// write lock. Clones share the same published index.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    current: Arc<RwLock<Arc<SchemaIndex>>>,
}

impl SchemaStore {
    /// A store publishing the empty index.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(index: SchemaIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// The currently published index.
    pub fn snapshot(&self) -> Arc<SchemaIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the published index.
    pub fn publish(&self, index: SchemaIndex) {
        let next = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Rebuild the index from `source` and publish it.
    ///
    /// # Arguments
    /// * `source` - Where to read the four relations from
    ///
    /// # Returns
    /// * `Ok(ReloadReport)` - The new index is published
    /// * `Err(_)` - The source could not be read; the previous index stays
    pub async fn reload(&self, source: &dyn RowSource) -> Result<ReloadReport> {
        let description = source.describe();
        let rows = match fetch_all(source).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(source = %description, error = %e, "Reload failed; keeping current schema");
                return Err(e);
            }
        };

        let output = SchemaIndexBuilder::build(&rows);
        let stats = output.index.stats();
        self.publish(output.index);

        let report = ReloadReport {
            source: description,
            stats,
            diagnostics: output.diagnostics,
        };
        info!(
            source = %report.source,
            cards = stats.entity_cards + stats.property_cards,
            tables = stats.tables,
            warnings = report.warning_count(),
            "Schema reloaded"
        );
        Ok(report)
    }

    /// Open the source at `path` and reload from it.
    ///
    /// A path that cannot be opened fails the reload the same way an
    /// unreadable source does.
    pub async fn reload_path(&self, path: &Path) -> Result<ReloadReport> {
        let source = open_source(path).await?;
        self.reload(source.as_ref()).await
    }
}
