use serde::Serialize;

use super::{ContextTokenizer, TokenResolver};
use crate::schema::{CardKind, SchemaIndex};

/// One field of a table listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Machine token the field resolves to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CardKind>,
}

/// The fields of one table, with what each resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldListing {
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub fields: Vec<FieldEntry>,
}

impl FieldListing {
    /// List the fields of the table `word` names. `word` is matched the
    /// same way a completion anchor is: table name, table label or entity
    /// token.
    pub fn collect(index: &SchemaIndex, word: &str) -> Option<Self> {
        let owner = ContextTokenizer::new(index).owner_for(word)?;
        let resolver = TokenResolver::new(index);

        let fields = index
            .fields_of(owner)?
            .iter()
            .map(|name| {
                let card = resolver.resolve_card(name);
                FieldEntry {
                    name: name.clone(),
                    label: resolver.resolve_label(name).map(str::to_string),
                    token: card.map(|c| c.machine_token.clone()),
                    kind: card.map(|c| c.kind),
                }
            })
            .collect();

        Some(Self {
            table: owner.to_string(),
            entity: index.table_entity(owner).map(str::to_string),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaIndexBuilder, fixtures};

    #[test]
    fn test_collect_by_label() {
        let index = SchemaIndexBuilder::build(&fixtures::sample_rows()).index;
        let listing = FieldListing::collect(&index, "Patients").unwrap();

        assert_eq!(listing.table, "patients");
        assert_eq!(listing.entity.as_deref(), Some("person"));
        let names: Vec<&str> = listing.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["patient_id", "dob"]);
        assert_eq!(listing.fields[1].token.as_deref(), Some("birth_date"));
        assert_eq!(listing.fields[1].kind, Some(CardKind::Property));
        assert_eq!(listing.fields[1].label.as_deref(), Some("Date of birth"));
    }

    #[test]
    fn test_collect_unknown() {
        let index = SchemaIndexBuilder::build(&fixtures::sample_rows()).index;
        assert!(FieldListing::collect(&index, "nowhere").is_none());
    }
}
