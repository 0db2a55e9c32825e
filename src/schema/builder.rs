//! Index construction.
//!
//! The build runs in strict dependency order; each stage reads only what
//! earlier stages produced:
//!
//! 1. cards (entities unconditionally, then properties whose token is free)
//! 2. label → token maps for entities and properties
//! 3. field aliases and table aliases (need stage 2)
//! 4. readable labels, merged fields → tables → entities → properties
//! 5. fields of each table (needs the table labels from stage 3)
//!
//! Bad data never aborts the build. Every problem becomes a [`Diagnostic`]
//! and the offending row or relation is skipped.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::card::{CardKind, DefinitionCard};
use super::diagnostic::Diagnostic;
use super::index::SchemaIndex;
use super::row::{Column, Relation, RelationTable, Row, SchemaRows};

/// Result of a build: the new index and what was wrong with the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub index: SchemaIndex,
    pub diagnostics: Vec<Diagnostic>,
}

/// Well-formed rows per relation; `None` for a missing or unusable relation.
#[derive(Debug, Default)]
struct DecodedRows {
    entities: Option<Vec<Row>>,
    properties: Option<Vec<Row>>,
    tables: Option<Vec<Row>>,
    fields: Option<Vec<Row>>,
}

impl DecodedRows {
    fn get(&self, relation: Relation) -> &[Row] {
        let rows = match relation {
            Relation::Entities => &self.entities,
            Relation::Properties => &self.properties,
            Relation::Tables => &self.tables,
            Relation::Fields => &self.fields,
        };
        rows.as_deref().unwrap_or(&[])
    }
}

/// Builds a [`SchemaIndex`] from raw relation rows.
///
/// The builder owns the index under construction; nothing is visible to
/// readers until [`SchemaIndexBuilder::build`] returns.
#[derive(Debug, Default)]
pub struct SchemaIndexBuilder {
    index: SchemaIndex,
    diagnostics: Vec<Diagnostic>,
}

impl SchemaIndexBuilder {
    /// Build an index from `rows`.
    ///
    /// # Arguments
    /// * `rows` - Raw relations; any of them may be missing
    ///
    /// # Returns
    /// * `BuildOutput` - The index plus collected diagnostics
    pub fn build(rows: &SchemaRows) -> BuildOutput {
        let mut builder = Self::default();
        let decoded = builder.decode(rows);

        builder.register_cards(&decoded);
        builder.register_label_tokens(&decoded);
        builder.register_aliases(&decoded);
        builder.register_readable_labels(&decoded);
        builder.register_fields_of_tables(&decoded);

        let stats = builder.index.stats();
        info!(
            cards = builder.index.card_count(),
            tables = stats.tables,
            fields = stats.fields,
            diagnostics = builder.diagnostics.len(),
            "Schema index built"
        );

        BuildOutput {
            index: builder.index,
            diagnostics: builder.diagnostics,
        }
    }

    fn decode(&mut self, rows: &SchemaRows) -> DecodedRows {
        DecodedRows {
            entities: self.decode_relation(Relation::Entities, rows.get(Relation::Entities)),
            properties: self.decode_relation(Relation::Properties, rows.get(Relation::Properties)),
            tables: self.decode_relation(Relation::Tables, rows.get(Relation::Tables)),
            fields: self.decode_relation(Relation::Fields, rows.get(Relation::Fields)),
        }
    }

    /// Check the header and drop malformed records.
    fn decode_relation(
        &mut self,
        relation: Relation,
        table: Option<&RelationTable>,
    ) -> Option<Vec<Row>> {
        let Some(table) = table else {
            info!(%relation, "Relation missing from schema source");
            self.diagnostics
                .push(Diagnostic::MissingRelation { relation });
            return None;
        };

        let layout: HashMap<Column, usize> = table.layout();
        if let Some(column) = relation
            .required_columns()
            .iter()
            .find(|column| !layout.contains_key(*column))
        {
            warn!(%relation, %column, "Relation lacks a required column");
            self.diagnostics.push(Diagnostic::MissingColumn {
                relation,
                column: *column,
            });
            return None;
        }

        let expected = table.columns.len();
        let mut decoded = Vec::with_capacity(table.len());
        for (position, record) in table.records.iter().enumerate() {
            if record.len() != expected {
                warn!(
                    %relation,
                    row = position + 1,
                    expected,
                    found = record.len(),
                    "Skipping malformed row"
                );
                self.diagnostics.push(Diagnostic::MalformedRow {
                    relation,
                    row: position + 1,
                    expected,
                    found: record.len(),
                });
                continue;
            }
            decoded.push(Row::from_record(&layout, record));
        }

        debug!(%relation, rows = decoded.len(), "Decoded relation");
        Some(decoded)
    }

    /// Stage 1: definition cards. Entities always win a token collision.
    fn register_cards(&mut self, rows: &DecodedRows) {
        for row in rows.get(Relation::Entities) {
            let card = DefinitionCard::from_row(row, CardKind::Entity);
            self.index
                .cards_by_token
                .insert(card.machine_token.clone(), card);
        }

        for row in rows.get(Relation::Properties) {
            let card = DefinitionCard::from_row(row, CardKind::Property);
            if let Some(existing) = self.index.cards_by_token.get(&card.machine_token) {
                warn!(
                    token = %card.machine_token,
                    existing = existing.kind.as_str(),
                    "Property token already registered; dropping property card"
                );
                self.diagnostics.push(Diagnostic::TokenCollision {
                    token: card.machine_token,
                    existing: existing.kind,
                });
                continue;
            }
            self.index
                .cards_by_token
                .insert(card.machine_token.clone(), card);
        }
    }

    /// Stage 2: label → machine token, per relation.
    fn register_label_tokens(&mut self, rows: &DecodedRows) {
        for row in rows.get(Relation::Entities) {
            self.index.entity_token_by_label.insert(
                row.get(Column::Label).to_string(),
                row.get(Column::Name).to_string(),
            );
        }

        for row in rows.get(Relation::Properties) {
            self.index.property_token_by_label.insert(
                row.get(Column::Label).to_string(),
                row.get(Column::Name).to_string(),
            );
        }
    }

    /// Stage 3: one-hop aliases for fields and tables.
    fn register_aliases(&mut self, rows: &DecodedRows) {
        for row in rows.get(Relation::Fields) {
            let field = row.get(Column::Name);
            let label = row.get(Column::Property);
            let token = self
                .index
                .property_token_for_label(label)
                .or_else(|| self.index.entity_token_for_label(label))
                .map(str::to_string);

            match token {
                Some(token) => {
                    self.index
                        .field_alias_to_token
                        .insert(field.to_string(), token);
                }
                None => debug!(field, property = label, "Field has no alias"),
            }
        }

        for row in rows.get(Relation::Tables) {
            let table = row.get(Column::Name);
            let entity_label = row.get(Column::Entity);

            let entity = self
                .index
                .entity_token_for_label(entity_label)
                .map(str::to_string);
            match entity {
                Some(entity) => {
                    self.index
                        .table_alias_to_entity_token
                        .insert(table.to_string(), entity);
                }
                None if entity_label.is_empty() => {
                    debug!(table, "Table declares no owning entity");
                }
                None => {
                    warn!(table, entity = entity_label, "Table names an unknown entity");
                    self.diagnostics.push(Diagnostic::UnresolvedTableEntity {
                        table: table.to_string(),
                        entity_label: entity_label.to_string(),
                    });
                }
            }

            self.index.table_token_by_label.insert(
                row.get(Column::Label).to_string(),
                table.to_string(),
            );
        }
    }

    /// Stage 4: readable labels. Later relations overwrite earlier ones.
    fn register_readable_labels(&mut self, rows: &DecodedRows) {
        for relation in [
            Relation::Fields,
            Relation::Tables,
            Relation::Entities,
            Relation::Properties,
        ] {
            for row in rows.get(relation) {
                self.index.readable_label_by_token.insert(
                    row.get(Column::Name).to_string(),
                    row.get(Column::Label).to_string(),
                );
            }
        }
    }

    /// Stage 5: fields of each table, in field row order.
    fn register_fields_of_tables(&mut self, rows: &DecodedRows) {
        for row in rows.get(Relation::Tables) {
            self.index
                .fields_of_table
                .insert(row.get(Column::Name).to_string(), Vec::new());
        }

        for row in rows.get(Relation::Fields) {
            let field = row.get(Column::Name);
            let table_label = row.get(Column::Table);

            let Some(table) = self.index.table_token_by_label.get(table_label) else {
                warn!(field, table = table_label, "Field names an unknown table; skipping");
                self.diagnostics.push(Diagnostic::DanglingTable {
                    field: field.to_string(),
                    table_label: table_label.to_string(),
                });
                continue;
            };

            self.index
                .fields_of_table
                .entry(table.clone())
                .or_default()
                .push(field.to_string());
        }
    }
}
