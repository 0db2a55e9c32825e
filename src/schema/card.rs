//! Definition cards: the display-ready record behind a machine token.

use serde::Serialize;

use super::row::{Column, Row};

/// Base of the external ontology PURL every definitional reference points into.
pub const ONTOLOGY_PURL_BASE: &str = "http://purl.obolibrary.org/obo/";

/// What a card describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Entity,
    Property,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Entity => "entity",
            CardKind::Property => "property",
        }
    }
}

/// Link to the defining term in the external ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalReference {
    /// The reference exactly as written in the schema, e.g. `NCIT:C16612`
    pub label: String,
    /// Resolved PURL
    pub url: String,
}

impl ExternalReference {
    /// Build a reference from a definitional-reference cell.
    ///
    /// Returns `None` for an empty cell.
    pub fn from_reference(reference: &str) -> Option<Self> {
        if reference.is_empty() {
            return None;
        }
        Some(Self {
            label: reference.to_string(),
            url: purl_for(reference),
        })
    }
}

/// `NCIT:C16612` becomes `http://purl.obolibrary.org/obo/NCIT_C16612`.
///
/// Only the first `:` is replaced.
pub fn purl_for(reference: &str) -> String {
    format!("{ONTOLOGY_PURL_BASE}{}", reference.replacen(':', "_", 1))
}

/// Resolved record for one machine token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionCard {
    pub machine_token: String,
    pub display_name: String,
    pub kind: CardKind,
    pub definition_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<ExternalReference>,
}

impl DefinitionCard {
    /// Build a card from an entity or property row.
    pub fn from_row(row: &Row, kind: CardKind) -> Self {
        Self {
            machine_token: row.get(Column::Name).to_string(),
            display_name: row.get(Column::Label).to_string(),
            kind,
            definition_text: row.get(Column::Definition).to_string(),
            external_reference: ExternalReference::from_reference(
                row.get(Column::DefinitionalReference),
            ),
        }
    }

    pub fn is_entity(&self) -> bool {
        self.kind == CardKind::Entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::row::RelationTable;

    fn entity_row(reference: &str) -> Row {
        let table = RelationTable::new(["Name", "Label", "Definitional reference", "Definition"])
            .with_record(["tumor", "Tumor", reference, "An abnormal mass of tissue."]);
        Row::from_record(&table.layout(), &table.records[0])
    }

    #[test]
    fn test_purl_replaces_first_colon_only() {
        assert_eq!(
            purl_for("NCIT:C18009"),
            "http://purl.obolibrary.org/obo/NCIT_C18009"
        );
        assert_eq!(purl_for("A:B:C"), "http://purl.obolibrary.org/obo/A_B:C");
        assert_eq!(purl_for("plain"), "http://purl.obolibrary.org/obo/plain");
    }

    #[test]
    fn test_card_with_reference() {
        let card = DefinitionCard::from_row(&entity_row("NCIT:C18009"), CardKind::Entity);
        assert_eq!(card.machine_token, "tumor");
        assert_eq!(card.display_name, "Tumor");
        assert!(card.is_entity());

        let reference = card.external_reference.expect("reference attached");
        assert_eq!(reference.label, "NCIT:C18009");
        assert_eq!(reference.url, "http://purl.obolibrary.org/obo/NCIT_C18009");
    }

    #[test]
    fn test_card_without_reference() {
        let card = DefinitionCard::from_row(&entity_row(""), CardKind::Property);
        assert_eq!(card.kind, CardKind::Property);
        assert!(card.external_reference.is_none());
    }

    #[test]
    fn test_card_serializes_without_empty_reference() {
        let card = DefinitionCard::from_row(&entity_row(""), CardKind::Entity);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["kind"], "entity");
        assert!(json.get("external_reference").is_none());
    }
}
