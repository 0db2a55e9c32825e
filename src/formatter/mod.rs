//! Output formatting for schemadict
//!
//! This module renders lookup results for the terminal:
//! - Text output, with entity and property names colored by kind
//! - Pretty-printed JSON for scripting
//! - Tables for field listings and index statistics

mod colorizer;
mod table;

use serde::Serialize;

use crate::config::{DisplayConfig, OutputFormat};
use crate::error::{DictError, Result};
use crate::lookup::{Candidate, FieldListing, Hover};
use crate::schema::{IndexStats, ReloadReport};

pub use colorizer::{Colorizer, ENTITY_COLOR, PROPERTY_COLOR};
pub use table::TableFormatter;

/// Main formatter for lookup results
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Colorizer for output highlighting
    colorizer: Colorizer,

    /// Enable colored output
    use_colors: bool,
}

/// JSON shape of one candidate
#[derive(Serialize)]
struct CandidateJson<'a> {
    token: &'a str,
    sort_text: String,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output; ignored for JSON
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        let use_colors = use_colors && !format_type.is_json();
        Self {
            format_type,
            colorizer: Colorizer::new(use_colors),
            use_colors,
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    pub fn colorizer(&self) -> Colorizer {
        self.colorizer
    }

    /// Format a hover card
    pub fn format_hover(&self, hover: &Hover) -> Result<String> {
        if self.format_type.is_json() {
            return to_json(hover);
        }

        let card = &hover.card;
        let mut lines = vec![format!(
            "{} {}",
            self.colorizer.token(&card.machine_token, card.kind),
            self.colorizer.dim(&format!("({})", card.kind.as_str()))
        )];

        lines.push(self.colorizer.heading(&card.display_name));
        if let Some(alias) = &hover.also_known_as {
            lines.push(format!("Also known as: {alias}"));
        }
        if !card.definition_text.is_empty() {
            lines.push(String::new());
            lines.push(card.definition_text.clone());
        }
        if let Some(reference) = &card.external_reference {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                reference.label,
                self.colorizer.link(&reference.url)
            ));
        }

        Ok(lines.join("\n"))
    }

    /// Format completion candidates
    ///
    /// # Arguments
    /// * `candidates` - Candidates in list order
    /// * `limit` - Print at most this many; 0 prints all
    pub fn format_candidates(&self, candidates: &[Candidate], limit: usize) -> Result<String> {
        let shown = if limit == 0 {
            candidates
        } else {
            &candidates[..candidates.len().min(limit)]
        };

        if self.format_type.is_json() {
            let items: Vec<CandidateJson<'_>> = shown
                .iter()
                .map(|c| CandidateJson {
                    token: &c.token,
                    sort_text: c.sort_text(),
                })
                .collect();
            return to_json(&items);
        }

        let mut lines: Vec<String> = shown.iter().map(|c| c.token.clone()).collect();
        if shown.len() < candidates.len() {
            lines.push(
                self.colorizer
                    .dim(&format!("... {} more", candidates.len() - shown.len())),
            );
        }
        Ok(lines.join("\n"))
    }

    /// Format the fields of a table
    pub fn format_fields(&self, listing: &FieldListing) -> Result<String> {
        if self.format_type.is_json() {
            return to_json(listing);
        }

        let mut heading = format!("Table {}", self.colorizer.heading(&listing.table));
        if let Some(entity) = &listing.entity {
            heading.push_str(&format!(
                " ({})",
                self.colorizer.token(entity, crate::schema::CardKind::Entity)
            ));
        }

        if listing.fields.is_empty() {
            return Ok(format!("{heading}\n(no fields)"));
        }
        let table = TableFormatter::new(self.use_colors).fields(listing);
        Ok(format!("{heading}\n{table}"))
    }

    /// Format index statistics
    pub fn format_stats(&self, stats: &IndexStats) -> Result<String> {
        if self.format_type.is_json() {
            return to_json(stats);
        }
        Ok(TableFormatter::new(self.use_colors).stats(stats))
    }

    /// Format a reload report: each diagnostic, then a summary line
    pub fn format_report(&self, report: &ReloadReport) -> Result<String> {
        if self.format_type.is_json() {
            return to_json(report);
        }

        let mut lines: Vec<String> = report
            .diagnostics
            .iter()
            .map(|d| format!("{}: {d}", self.colorizer.severity(d.severity())))
            .collect();

        let stats = report.stats;
        let summary = format!(
            "Loaded {} entities, {} properties, {} tables, {} fields from {}",
            stats.entity_cards, stats.property_cards, stats.tables, stats.fields, report.source
        );
        lines.push(match report.warning_count() {
            0 => self.colorizer.success(&summary),
            n => format!("{summary} ({n} warnings)"),
        });

        Ok(lines.join("\n"))
    }

    /// Format an error message
    pub fn format_error(&self, message: &str) -> String {
        self.colorizer.error(&format!("Error: {message}"))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DictError::Generic(format!("Failed to serialize output: {e}")))
}
