//! Prompt showing the loaded schema

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt for the schemadict shell
pub struct DictPrompt {
    /// Short name of the schema source
    schema: String,
    /// Cards in the published index
    card_count: usize,
}

impl DictPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `schema` - Schema name shown before the count
    /// * `card_count` - Number of definition cards loaded
    pub fn new(schema: String, card_count: usize) -> Self {
        Self { schema, card_count }
    }
}

impl Prompt for DictPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("{} [{}]> ", self.schema, self.card_count).into()
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shows_schema_and_count() {
        let prompt = DictPrompt::new("reference".to_string(), 12);
        assert_eq!(prompt.render_prompt_left(), "reference [12]> ");
    }

    #[test]
    fn test_indicators() {
        let prompt = DictPrompt::new("reference".to_string(), 0);
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
