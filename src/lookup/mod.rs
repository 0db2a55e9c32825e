//! Read-side queries over a published [`SchemaIndex`](crate::schema::SchemaIndex).
//!
//! [`TokenResolver`] answers hover questions about a single word;
//! [`ContextTokenizer`] turns a buffer and cursor into completion
//! candidates. Both borrow one snapshot and never mutate it.

mod listing;
mod resolver;
mod tokenizer;

pub use listing::{FieldEntry, FieldListing};
pub use resolver::{Hover, TokenResolver};
pub use tokenizer::{
    Anchor, Anchors, Candidate, CompletionScope, ContextTokenizer, WordToken, anchors,
    is_identifier_char, tokenize,
};
