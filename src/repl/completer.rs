//! Completer for reedline backed by the context tokenizer

use reedline::{Completer, Span, Suggestion};

use crate::lookup::{ContextTokenizer, TokenResolver};
use crate::schema::SchemaStore;

/// Completes words against the published schema index
pub struct DictCompleter {
    store: SchemaStore,
}

impl DictCompleter {
    pub fn new(store: SchemaStore) -> Self {
        Self { store }
    }
}

impl Completer for DictCompleter {
    /// Complete the input at the given cursor position
    ///
    /// Candidates come from the tokenizer in list order and are narrowed to
    /// those starting with the typed part of the current word, ignoring
    /// case. The replaced span runs from the start of that word to the
    /// cursor.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let index = self.store.snapshot();
        let tokenizer = ContextTokenizer::new(&index);
        let resolver = TokenResolver::new(&index);

        let pos = pos.min(line.len());
        let start = ContextTokenizer::completion_start(line, pos);
        let typed = line.get(start..pos).unwrap_or_default().to_lowercase();

        tokenizer
            .complete(line, pos)
            .into_iter()
            .filter(|candidate| candidate.token.to_lowercase().starts_with(&typed))
            .map(|candidate| Suggestion {
                description: resolver.resolve_label(&candidate.token).map(str::to_string),
                value: candidate.token,
                span: Span::new(start, pos),
                append_whitespace: false,
                ..Default::default()
            })
            .collect()
    }
}
