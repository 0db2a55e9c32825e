//! Interactive shell for schemadict
//!
//! Provides a reedline-based shell with:
//! - Tab completion driven by the context tokenizer
//! - Inline hints naming what the word under the cursor resolves to
//! - File-backed history
//! - A prompt showing the schema name and card count
//! - Meta commands (`:reload`, `:fields`, `:stats`, `:help`, `:quit`)

mod command;
mod completer;
mod hinter;
mod prompt;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::HistoryConfig;
use crate::error::{DictError, Result};
use crate::formatter::Formatter;
use crate::lookup::{FieldListing, TokenResolver, tokenize};
use crate::schema::{SchemaIndex, SchemaStore};

pub use command::{HELP, ReplCommand};
pub use completer::DictCompleter;
pub use hinter::DictHinter;
pub use prompt::DictPrompt;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive lookups
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Published schema shared with the completer and hinter
    store: SchemaStore,

    /// Where `:reload` reads from
    schema_path: PathBuf,

    /// Output formatter
    formatter: Formatter,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `store` - Store holding the loaded schema
    /// * `schema_path` - Schema source used by `:reload`
    /// * `history_config` - History configuration
    /// * `formatter` - Output formatter
    pub fn new(
        store: SchemaStore,
        schema_path: PathBuf,
        history_config: &HistoryConfig,
        formatter: Formatter,
    ) -> Result<Self> {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
        let mut editor = Reedline::create()
            .with_completer(Box::new(DictCompleter::new(store.clone())))
            .with_hinter(Box::new(DictHinter::new(store.clone())))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if history_config.persist {
            if let Some(parent) = history_config.file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let history = FileBackedHistory::with_file(
                history_config.max_size,
                history_config.file_path.clone(),
            )
            .map_err(|e| DictError::Generic(format!("Cannot open history file: {e}")))?;
            editor = editor.with_history(Box::new(history));
        }

        Ok(Self {
            editor,
            store,
            schema_path,
            formatter,
            running: true,
        })
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, None on EOF
    #[allow(unreachable_patterns)]
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = DictPrompt::new(
            schema_name(&self.schema_path),
            self.store.snapshot().card_count(),
        );

        match self.editor.read_line(&prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => Ok(Some(String::new())),
            Signal::CtrlD => Ok(None),
            _ => Ok(Some(String::new())),
        }
    }

    /// Run one input line
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Output to print, if any
    pub async fn execute(&mut self, command: ReplCommand) -> Result<Option<String>> {
        debug!(?command, "Executing shell command");
        match command {
            ReplCommand::Empty => Ok(None),
            ReplCommand::Quit => {
                self.running = false;
                Ok(None)
            }
            ReplCommand::Help => Ok(Some(HELP.to_string())),
            ReplCommand::Stats => {
                let stats = self.store.snapshot().stats();
                self.formatter.format_stats(&stats).map(Some)
            }
            ReplCommand::Reload => {
                let report = self.store.reload_path(&self.schema_path).await?;
                self.formatter.format_report(&report).map(Some)
            }
            ReplCommand::Fields(table) => {
                let index = self.store.snapshot();
                let listing = FieldListing::collect(&index, &table)
                    .ok_or_else(|| DictError::Generic(format!("No table found for '{table}'")))?;
                self.formatter.format_fields(&listing).map(Some)
            }
            ReplCommand::Lookup(line) => {
                let index = self.store.snapshot();
                self.lookup_line(&index, &line).map(Some)
            }
        }
    }

    /// Hover cards for each distinct word of `line`
    fn lookup_line(&self, index: &SchemaIndex, line: &str) -> Result<String> {
        let resolver = TokenResolver::new(index);
        let colorizer = self.formatter.colorizer();

        let mut seen = Vec::new();
        let mut blocks = Vec::new();
        for token in tokenize(line) {
            if seen.contains(&token.text) {
                continue;
            }
            seen.push(token.text);

            match resolver.hover(token.text) {
                Some(hover) => blocks.push(self.formatter.format_hover(&hover)?),
                None => blocks.push(colorizer.dim(&format!("{}: no definition", token.text))),
            }
        }

        Ok(blocks.join("\n\n"))
    }

    /// Run until `:quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        while self.is_running() {
            let Some(line) = self.read_line()? else {
                break;
            };

            let output = match ReplCommand::parse(&line) {
                Ok(command) => self.execute(command).await,
                Err(e) => Err(e),
            };

            match output {
                Ok(Some(text)) if !text.is_empty() => println!("{text}"),
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "Shell command failed");
                    eprintln!("{}", self.formatter.format_error(&e.to_string()));
                }
            }
        }

        Ok(())
    }
}

/// Short name for the prompt: the file stem or directory name
pub fn schema_name(path: &Path) -> String {
    path.file_stem()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
