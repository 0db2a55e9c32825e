//! Table layouts built with tabled.

use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Color, Modify, Style, object::Rows},
};

use crate::lookup::FieldListing;
use crate::schema::IndexStats;

/// Builds tables for field listings and index statistics.
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Field, label, resolved token and kind per row.
    pub fn fields(&self, listing: &FieldListing) -> String {
        let mut builder = Builder::default();
        builder.push_record(header(&["Field", "Label", "Resolves to", "Kind"]));

        for field in &listing.fields {
            builder.push_record(vec![
                field.name.clone(),
                field.label.clone().unwrap_or_default(),
                field.token.clone().unwrap_or_default(),
                field.kind.map(|k| k.as_str().to_string()).unwrap_or_default(),
            ]);
        }

        self.finish(builder.build())
    }

    /// One row per index map with its entry count.
    pub fn stats(&self, stats: &IndexStats) -> String {
        let rows = [
            ("Entity cards", stats.entity_cards),
            ("Property cards", stats.property_cards),
            ("Entity labels", stats.entity_labels),
            ("Property labels", stats.property_labels),
            ("Field aliases", stats.field_aliases),
            ("Table labels", stats.table_labels),
            ("Table aliases", stats.table_aliases),
            ("Readable labels", stats.readable_labels),
            ("Tables", stats.tables),
            ("Fields", stats.fields),
        ];

        let mut builder = Builder::default();
        builder.push_record(header(&["Map", "Entries"]));
        for (name, count) in rows {
            builder.push_record(vec![name.to_string(), count.to_string()]);
        }

        self.finish(builder.build())
    }

    fn finish(&self, mut table: Table) -> String {
        table.with(Style::modern());
        table.with(Modify::new(Rows::first()).with(Alignment::center()));

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }

        table.to_string()
    }
}

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaIndexBuilder, fixtures};

    #[test]
    fn test_fields_table() {
        let index = SchemaIndexBuilder::build(&fixtures::sample_rows()).index;
        let listing = FieldListing::collect(&index, "Orders").unwrap();
        let out = TableFormatter::new(false).fields(&listing);

        assert!(out.contains("Resolves to"));
        assert!(out.contains("amount"));
        assert!(out.contains("total"));
        assert!(out.contains("property"));
    }

    #[test]
    fn test_stats_table() {
        let index = SchemaIndexBuilder::build(&fixtures::sample_rows()).index;
        let out = TableFormatter::new(false).stats(&index.stats());
        assert!(out.contains("Entity cards"));
        assert!(out.contains("Readable labels"));
    }
}
