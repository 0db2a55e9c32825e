//! Cursor-aware completion.
//!
//! A buffer is split into identifier tokens. The token under the cursor
//! (CURRENT) and the token just before it, across one separator character
//! (PREVIOUS), are the anchors. If either anchor names something with a
//! field list, completion is scoped to that list; otherwise every known
//! name is offered.

use std::ops::Range;

use serde::Serialize;

use crate::schema::SchemaIndex;

/// Characters that make up a token.
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// A maximal run of identifier characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken<'a> {
    pub text: &'a str,
    /// Byte range in the buffer
    pub span: Range<usize>,
}

/// Split a buffer into tokens, left to right.
pub fn tokenize(buffer: &str) -> Vec<WordToken<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in buffer.char_indices() {
        match (is_identifier_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                tokens.push(WordToken {
                    text: &buffer[s..i],
                    span: s..i,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(WordToken {
            text: &buffer[s..],
            span: s..buffer.len(),
        });
    }

    tokens
}

/// Clamp a byte offset into the buffer and snap it back to a char boundary.
fn clamp_cursor(buffer: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(buffer.len());
    while !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchors<'a> {
    pub current: Option<WordToken<'a>>,
    pub previous: Option<WordToken<'a>>,
}

/// Locate CURRENT and PREVIOUS for a cursor position.
pub fn anchors(buffer: &str, cursor: usize) -> Anchors<'_> {
    let cursor = clamp_cursor(buffer, cursor);
    let tokens = tokenize(buffer);

    let current = tokens
        .iter()
        .find(|t| t.span.start <= cursor && cursor <= t.span.end)
        .cloned();

    let boundary = current.as_ref().map_or(cursor, |t| t.span.start);
    let previous = buffer[..boundary].chars().next_back().and_then(|separator| {
        let end = boundary - separator.len_utf8();
        tokens.iter().find(|t| t.span.end == end).cloned()
    });

    Anchors { current, previous }
}

/// Which anchor selected a scoped completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Previous,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionScope<'a> {
    /// Fields of one owner
    Owner { owner: &'a str, anchor: Anchor },
    /// All cards and owners
    Generic,
}

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub token: String,
    /// Position in the candidate list
    pub sort_key: usize,
}

impl Candidate {
    /// Sort key as a fixed-width string, so lexical order matches list order.
    pub fn sort_text(&self) -> String {
        format!("{:08}", self.sort_key)
    }
}

/// Computes completion candidates against one index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ContextTokenizer<'a> {
    index: &'a SchemaIndex,
}

impl<'a> ContextTokenizer<'a> {
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self { index }
    }

    /// Owner with a field list that `word` names.
    ///
    /// Tried in order: a table name, a table label, an entity token that a
    /// table is an alias of (first such table).
    pub fn owner_for(&self, word: &str) -> Option<&'a str> {
        let index = self.index;
        if let Some((owner, _)) = index.fields_of_table.get_key_value(word) {
            return Some(owner.as_str());
        }
        if let Some(table) = index.table_for_label(word).filter(|t| index.is_table(t)) {
            return Some(table);
        }
        index
            .tables_for_entity(word)
            .find(|table| index.is_table(table))
    }

    /// Owner whose table name is exactly `word`.
    fn owner_named(&self, word: &str) -> Option<&'a str> {
        self.index
            .fields_of_table
            .get_key_value(word)
            .map(|(owner, _)| owner.as_str())
    }

    /// Decide how to complete at `cursor`. PREVIOUS is tried before CURRENT.
    ///
    /// PREVIOUS accepts any word [`owner_for`](Self::owner_for) resolves.
    /// CURRENT only scopes on an exact table name, so a fully typed entity
    /// or label still completes from the generic vocabulary.
    pub fn scope(&self, buffer: &str, cursor: usize) -> CompletionScope<'a> {
        let Anchors { current, previous } = anchors(buffer, cursor);

        if let Some(owner) = previous.and_then(|t| self.owner_for(t.text)) {
            return CompletionScope::Owner {
                owner,
                anchor: Anchor::Previous,
            };
        }
        if let Some(owner) = current.and_then(|t| self.owner_named(t.text)) {
            return CompletionScope::Owner {
                owner,
                anchor: Anchor::Current,
            };
        }
        CompletionScope::Generic
    }

    /// Every card's machine token in card order, then every owner in table
    /// order.
    pub fn generic_vocabulary(&self) -> impl Iterator<Item = &'a str> {
        let index = self.index;
        index
            .cards()
            .map(|card| card.machine_token.as_str())
            .chain(index.owners())
    }

    /// Completion candidates at `cursor`.
    pub fn complete(&self, buffer: &str, cursor: usize) -> Vec<Candidate> {
        let tokens: Vec<&str> = match self.scope(buffer, cursor) {
            CompletionScope::Owner { owner, .. } => self
                .index
                .fields_of(owner)
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect(),
            CompletionScope::Generic => self.generic_vocabulary().collect(),
        };

        tokens
            .into_iter()
            .enumerate()
            .map(|(sort_key, token)| Candidate {
                token: token.to_string(),
                sort_key,
            })
            .collect()
    }

    /// Start of the range a chosen candidate replaces; the range ends at
    /// the cursor.
    pub fn completion_start(buffer: &str, cursor: usize) -> usize {
        let cursor = clamp_cursor(buffer, cursor);
        anchors(buffer, cursor)
            .current
            .map_or(cursor, |t| t.span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaIndexBuilder, fixtures};

    fn index() -> SchemaIndex {
        SchemaIndexBuilder::build(&fixtures::sample_rows()).index
    }

    fn tokens(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.token.as_str()).collect()
    }

    #[test]
    fn test_tokenize() {
        let words: Vec<&str> = tokenize("SELECT a.b_c, x-y FROM t")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(words, vec!["SELECT", "a", "b_c", "x-y", "FROM", "t"]);
    }

    #[test]
    fn test_tokenize_multibyte() {
        let tokens = tokenize("été.x");
        assert_eq!(tokens[0].text, "été");
        assert_eq!(tokens[0].span, 0..5);
        assert_eq!(tokens[1].span, 6..7);
    }

    #[test]
    fn test_anchors_inside_word() {
        let a = anchors("Order.amount", 8);
        assert_eq!(a.current.unwrap().text, "amount");
        assert_eq!(a.previous.unwrap().text, "Order");
    }

    #[test]
    fn test_anchors_after_separator() {
        let a = anchors("Order.", 6);
        assert!(a.current.is_none());
        assert_eq!(a.previous.unwrap().text, "Order");
    }

    #[test]
    fn test_anchors_need_single_separator() {
        let a = anchors("Order. amount", 13);
        assert_eq!(a.current.unwrap().text, "amount");
        assert!(a.previous.is_none());
    }

    #[test]
    fn test_anchors_clamp_cursor() {
        let a = anchors("abc", 99);
        assert_eq!(a.current.unwrap().text, "abc");

        // Byte 1 is inside 'é'; snaps back to 0.
        let a = anchors("é", 1);
        assert_eq!(a.current.unwrap().span, 0..2);
    }

    #[test]
    fn test_scoped_by_previous() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        let candidates = tokenizer.complete("Order.amount", 9);
        assert_eq!(tokens(&candidates), vec!["amount", "total"]);
        assert_eq!(
            tokenizer.scope("Order.amount", 9),
            CompletionScope::Owner {
                owner: "Order",
                anchor: Anchor::Previous
            }
        );
    }

    #[test]
    fn test_scoped_by_current() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        let candidates = tokenizer.complete("samples", 7);
        assert_eq!(tokens(&candidates), vec!["sample_id", "donor"]);
    }

    #[test]
    fn test_owner_by_table_label() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        assert_eq!(tokenizer.owner_for("Patients"), Some("patients"));
        let candidates = tokenizer.complete("Patients.", 9);
        assert_eq!(tokens(&candidates), vec!["patient_id", "dob"]);
    }

    #[test]
    fn test_current_entity_token_stays_generic() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        assert_eq!(tokenizer.scope("person", 6), CompletionScope::Generic);
        assert_eq!(tokenizer.scope("Patients", 8), CompletionScope::Generic);

        let candidates = tokenizer.complete("person", 6);
        assert_eq!(candidates.len(), tokenizer.generic_vocabulary().count());
        assert_eq!(candidates[0].token, "person");

        // Still scoped when the entity is the PREVIOUS anchor.
        assert_eq!(
            tokens(&tokenizer.complete("person.", 7)),
            vec!["patient_id", "dob"]
        );
    }

    #[test]
    fn test_owner_by_entity_token() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        assert_eq!(tokenizer.owner_for("person"), Some("patients"));
        assert_eq!(tokenizer.owner_for("order"), Some("Order"));
        assert_eq!(tokenizer.owner_for("birth_date"), None);
    }

    #[test]
    fn test_generic_vocabulary() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        let candidates = tokenizer.complete("", 0);
        assert_eq!(
            tokens(&candidates),
            vec![
                "person",
                "sample",
                "order",
                "age",
                "birth_date",
                "amount",
                "patients",
                "samples",
                "Order",
                "audit"
            ]
        );
        for (i, candidate) in candidates.iter().enumerate() {
            assert_eq!(candidate.sort_key, i);
        }
    }

    #[test]
    fn test_empty_field_list_is_still_scoped() {
        let index = index();
        let tokenizer = ContextTokenizer::new(&index);
        assert!(tokenizer.complete("audit.", 6).is_empty());
    }

    #[test]
    fn test_sort_text() {
        let candidate = Candidate {
            token: "x".to_string(),
            sort_key: 42,
        };
        assert_eq!(candidate.sort_text(), "00000042");
    }

    #[test]
    fn test_completion_start() {
        assert_eq!(ContextTokenizer::completion_start("Order.am", 8), 6);
        assert_eq!(ContextTokenizer::completion_start("Order.", 6), 6);
        assert_eq!(ContextTokenizer::completion_start("ab cd", 1), 0);
    }

    #[test]
    fn test_empty_index() {
        let index = SchemaIndex::empty();
        let tokenizer = ContextTokenizer::new(&index);
        assert!(tokenizer.complete("anything", 3).is_empty());
    }
}
