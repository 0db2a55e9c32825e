//! Hinter for reedline - shows what the word under the cursor resolves to

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use crate::lookup::{TokenResolver, anchors};
use crate::schema::SchemaStore;

/// Shows the display name and kind of the current word after the cursor.
///
/// The hint is informational only; accepting it inserts nothing.
pub struct DictHinter {
    store: SchemaStore,
    /// Style for hints
    style: Style,
}

impl DictHinter {
    pub fn new(store: SchemaStore) -> Self {
        Self {
            store,
            style: Style::new().italic().fg(Color::DarkGray),
        }
    }

    /// Hint text for `line` with the cursor at `pos`, if any
    fn hint_for(&self, line: &str, pos: usize) -> Option<String> {
        let word = anchors(line, pos).current?.text;
        let index = self.store.snapshot();
        let card = TokenResolver::new(&index).resolve_card(word)?;
        Some(format!("  {} ({})", card.display_name, card.kind.as_str()))
    }
}

impl Hinter for DictHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        _history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        // Only hint at the end of the line
        if pos != line.len() {
            return String::new();
        }

        match self.hint_for(line, pos) {
            Some(hint) if use_ansi_coloring => self.style.paint(hint).to_string(),
            Some(hint) => hint,
            None => String::new(),
        }
    }

    fn complete_hint(&self) -> String {
        String::new()
    }

    fn next_hint_token(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaIndexBuilder, fixtures};
    use reedline::FileBackedHistory;

    fn create_test_hinter() -> DictHinter {
        let index = SchemaIndexBuilder::build(&fixtures::sample_rows()).index;
        DictHinter::new(SchemaStore::with_index(index))
    }

    #[test]
    fn test_hint_for_resolved_word() {
        let mut hinter = create_test_hinter();
        let history = FileBackedHistory::new(10).unwrap();
        let hint = hinter.handle("Order.total", 11, &history, false, "/tmp");
        assert_eq!(hint, "  Amount (property)");
        assert_eq!(hinter.complete_hint(), "");
    }

    #[test]
    fn test_no_hint_for_unknown_word() {
        let mut hinter = create_test_hinter();
        let history = FileBackedHistory::new(10).unwrap();
        assert_eq!(hinter.handle("xyz", 3, &history, false, "/tmp"), "");
        assert_eq!(hinter.handle("", 0, &history, false, "/tmp"), "");
    }

    #[test]
    fn test_cursor_not_at_end_no_hint() {
        let mut hinter = create_test_hinter();
        let history = FileBackedHistory::new(10).unwrap();
        assert_eq!(hinter.handle("patients", 2, &history, false, "/tmp"), "");
    }
}
