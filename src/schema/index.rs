//! The resolved schema index.
//!
//! A [`SchemaIndex`] is an immutable snapshot. It is only ever produced by
//! [`super::SchemaIndexBuilder`] and replaced wholesale on reload; there is
//! no way to mutate a published index.

use indexmap::IndexMap;
use serde::Serialize;

use super::card::{CardKind, DefinitionCard};

/// Resolved maps for one schema.
///
/// All maps keep insertion (source row) order so that anything enumerated
/// from them is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    pub(crate) cards_by_token: IndexMap<String, DefinitionCard>,
    pub(crate) entity_token_by_label: IndexMap<String, String>,
    pub(crate) property_token_by_label: IndexMap<String, String>,
    pub(crate) field_alias_to_token: IndexMap<String, String>,
    pub(crate) table_token_by_label: IndexMap<String, String>,
    pub(crate) table_alias_to_entity_token: IndexMap<String, String>,
    pub(crate) readable_label_by_token: IndexMap<String, String>,
    pub(crate) fields_of_table: IndexMap<String, Vec<String>>,
}

/// Sizes of each map, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub entity_cards: usize,
    pub property_cards: usize,
    pub entity_labels: usize,
    pub property_labels: usize,
    pub field_aliases: usize,
    pub table_labels: usize,
    pub table_aliases: usize,
    pub readable_labels: usize,
    pub tables: usize,
    pub fields: usize,
}

impl SchemaIndex {
    /// An index with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cards_by_token.is_empty() && self.fields_of_table.is_empty()
    }

    /// Card registered directly under a machine token.
    pub fn card(&self, token: &str) -> Option<&DefinitionCard> {
        self.cards_by_token.get(token)
    }

    /// All cards: entities in row order, then properties in row order.
    pub fn cards(&self) -> impl Iterator<Item = &DefinitionCard> {
        self.cards_by_token.values()
    }

    pub fn card_count(&self) -> usize {
        self.cards_by_token.len()
    }

    pub fn entity_token_for_label(&self, label: &str) -> Option<&str> {
        self.entity_token_by_label.get(label).map(String::as_str)
    }

    pub fn property_token_for_label(&self, label: &str) -> Option<&str> {
        self.property_token_by_label.get(label).map(String::as_str)
    }

    /// Entity/property token a field name stands for.
    pub fn field_alias(&self, field: &str) -> Option<&str> {
        self.field_alias_to_token.get(field).map(String::as_str)
    }

    /// Table name registered under a table label.
    pub fn table_for_label(&self, label: &str) -> Option<&str> {
        self.table_token_by_label.get(label).map(String::as_str)
    }

    /// Entity token owning a table.
    pub fn table_entity(&self, table: &str) -> Option<&str> {
        self.table_alias_to_entity_token.get(table).map(String::as_str)
    }

    /// True if `name` is a table of the `tables` relation.
    pub fn is_table(&self, name: &str) -> bool {
        self.fields_of_table.contains_key(name)
    }

    /// Tables whose owning entity is `entity_token`, in table order.
    pub fn tables_for_entity<'s>(&'s self, entity_token: &str) -> impl Iterator<Item = &'s str> {
        self.table_alias_to_entity_token
            .iter()
            .filter(move |(_, entity)| entity.as_str() == entity_token)
            .map(|(table, _)| table.as_str())
    }

    pub fn readable_label(&self, name: &str) -> Option<&str> {
        self.readable_label_by_token.get(name).map(String::as_str)
    }

    /// Field names of a table, in source row order.
    pub fn fields_of(&self, table: &str) -> Option<&[String]> {
        self.fields_of_table.get(table).map(Vec::as_slice)
    }

    /// Names of every table with a field list, in table order.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.fields_of_table.keys().map(String::as_str)
    }

    pub fn stats(&self) -> IndexStats {
        let entity_cards = self
            .cards_by_token
            .values()
            .filter(|card| card.kind == CardKind::Entity)
            .count();
        IndexStats {
            entity_cards,
            property_cards: self.cards_by_token.len() - entity_cards,
            entity_labels: self.entity_token_by_label.len(),
            property_labels: self.property_token_by_label.len(),
            field_aliases: self.field_alias_to_token.len(),
            table_labels: self.table_token_by_label.len(),
            table_aliases: self.table_alias_to_entity_token.len(),
            readable_labels: self.readable_label_by_token.len(),
            tables: self.fields_of_table.len(),
            fields: self.fields_of_table.values().map(Vec::len).sum(),
        }
    }
}
