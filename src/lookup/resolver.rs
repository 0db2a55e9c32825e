use serde::Serialize;

use crate::schema::{DefinitionCard, SchemaIndex};

/// Hover content for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    /// The word as it appeared in the buffer
    pub word: String,

    pub card: DefinitionCard,

    /// Readable label of `word`, set only when `word` is an alias rather
    /// than the card's own machine token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_known_as: Option<String>,
}

/// Resolves surface words to definition cards.
#[derive(Debug, Clone, Copy)]
pub struct TokenResolver<'a> {
    index: &'a SchemaIndex,
}

impl<'a> TokenResolver<'a> {
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self { index }
    }

    /// Find the card a word stands for.
    ///
    /// Tried in order: the word as a machine token, as a table name (via
    /// the table's owning entity), as a field name (via its alias). Each
    /// alias is followed exactly one hop.
    pub fn resolve_card(&self, word: &str) -> Option<&'a DefinitionCard> {
        if let Some(card) = self.index.card(word) {
            return Some(card);
        }

        if self.index.is_table(word) {
            return self
                .index
                .table_entity(word)
                .and_then(|entity| self.index.card(entity));
        }

        self.index
            .field_alias(word)
            .and_then(|token| self.index.card(token))
    }

    /// Human-readable label registered for a name.
    pub fn resolve_label(&self, word: &str) -> Option<&'a str> {
        self.index.readable_label(word)
    }

    pub fn hover(&self, word: &str) -> Option<Hover> {
        let card = self.resolve_card(word)?;
        let also_known_as = if word != card.machine_token {
            self.resolve_label(word).map(str::to_string)
        } else {
            None
        };

        Some(Hover {
            word: word.to_string(),
            card: card.clone(),
            also_known_as,
        })
    }
}
