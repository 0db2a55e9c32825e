//! Command-line interface for schemadict
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and precedence
//! - One-shot subcommands (hover, complete, fields, stats, check)
//! - Mode selection (subcommand vs interactive shell)

mod completion;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::{DictError, Result, SourceError};
use crate::formatter::Formatter;
use crate::lookup::{ContextTokenizer, FieldListing, TokenResolver};
use crate::schema::{ReloadReport, SchemaStore};

pub use completion::generate_completion;

/// Schema dictionary - hover and completion over a data model schema
#[derive(Parser, Debug)]
#[command(
    name = "schemadict",
    version,
    about = "Look up definitions and completions in a data model schema",
    long_about = "Builds a dictionary from a schema of entities, properties, tables and fields
(a SQLite file or a directory of TSV files) and answers hover and completion
queries, one-shot or in an interactive shell."
)]
pub struct CliArgs {
    /// Schema source: a SQLite file or a directory of TSV files
    #[arg(long, value_name = "PATH", global = true)]
    pub schema: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for schemadict
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the definition a word resolves to
    Hover {
        /// Machine token, table name or field name
        #[arg(value_name = "WORD")]
        word: String,
    },

    /// List completion candidates for a buffer
    Complete {
        /// Buffer text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Cursor byte offset (defaults to the end of the text)
        #[arg(long, value_name = "N")]
        cursor: Option<usize>,
    },

    /// List the fields of a table
    Fields {
        /// Table name, table label or entity token
        #[arg(value_name = "TABLE")]
        table: String,
    },

    /// Show index statistics
    Stats,

    /// Load the schema and report data problems
    Check,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments and environment
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args, |key| std::env::var(key).ok())?;

        Ok(Self { args, config })
    }

    /// Build an interface from already-parsed arguments and configuration
    pub fn from_parts(args: CliArgs, config: Config) -> Self {
        Self { args, config }
    }

    /// Load configuration from file, then environment, then arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    /// * `env` - Environment lookup
    ///
    /// # Returns
    /// * `Result<Config>` - Effective configuration or error
    fn load_config<F>(args: &CliArgs, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        config.apply_env(env)?;
        Self::apply_args_to_config(&mut config, args)?;
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Schema path from arguments, environment or config
    ///
    /// # Returns
    /// * `Result<&Path>` - The path, or `NoSchemaConfigured`
    pub fn schema_path(&self) -> Result<&Path> {
        self.config
            .schema
            .path
            .as_deref()
            .ok_or_else(|| SourceError::NoSchemaConfigured.into())
    }

    /// Formatter for the effective display settings
    pub fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display)
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(path) = &args.schema {
            config.schema.path = Some(path.clone());
        }
        Self::apply_display_args(config, args)?;
        Self::apply_logging_args(config, args);
        Ok(())
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str)?;
        }

        if args.no_color {
            config.display.color_output = false;
        }
        Ok(())
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> Result<OutputFormat> {
        match format_str.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(crate::error::ConfigError::InvalidValue {
                field: "display.format".to_string(),
                value: format_str.to_string(),
            }
            .into()),
        }
    }

    /// Load the configured schema into a new store
    pub async fn load_schema(&self) -> Result<(SchemaStore, ReloadReport)> {
        let store = SchemaStore::new();
        let report = store.reload_path(self.schema_path()?).await?;
        Ok((store, report))
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub async fn handle_subcommand(&self) -> Result<bool> {
        let Some(command) = &self.args.command else {
            return Ok(false);
        };

        match command {
            Commands::Hover { word } => self.run_hover(word).await?,
            Commands::Complete { text, cursor } => {
                self.run_complete(text, cursor.unwrap_or(text.len())).await?
            }
            Commands::Fields { table } => self.run_fields(table).await?,
            Commands::Stats => {
                let (store, _) = self.load_schema().await?;
                println!("{}", self.formatter().format_stats(&store.snapshot().stats())?);
            }
            Commands::Check => {
                let (_, report) = self.load_schema().await?;
                println!("{}", self.formatter().format_report(&report)?);
            }
            Commands::Config { show, validate } => self.handle_config_command(*show, *validate)?,
            Commands::Completion { shell } => generate_completion(shell)?,
        }

        Ok(true)
    }

    async fn run_hover(&self, word: &str) -> Result<()> {
        let (store, _) = self.load_schema().await?;
        let index = store.snapshot();
        let hover = TokenResolver::new(&index)
            .hover(word)
            .ok_or_else(|| DictError::Generic(format!("No definition found for '{word}'")))?;
        println!("{}", self.formatter().format_hover(&hover)?);
        Ok(())
    }

    async fn run_complete(&self, text: &str, cursor: usize) -> Result<()> {
        let (store, _) = self.load_schema().await?;
        let index = store.snapshot();
        let candidates = ContextTokenizer::new(&index).complete(text, cursor);
        let limit = self.config.display.max_candidates;
        println!("{}", self.formatter().format_candidates(&candidates, limit)?);
        Ok(())
    }

    async fn run_fields(&self, table: &str) -> Result<()> {
        let (store, _) = self.load_schema().await?;
        let index = store.snapshot();
        let listing = FieldListing::collect(&index, table)
            .ok_or_else(|| DictError::Generic(format!("No table found for '{table}'")))?;
        println!("{}", self.formatter().format_fields(&listing)?);
        Ok(())
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate the effective configuration
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist; using defaults");
        }

        match self.config.validate() {
            Ok(()) => println!("✅ Configuration is valid"),
            Err(e) => println!("❌ Configuration validation failed: {e}"),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("# Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version and schema info
    pub fn print_banner(&self, report: &ReloadReport) {
        if !self.args.quiet {
            println!("schemadict {}", env!("CARGO_PKG_VERSION"));
            println!("{}", self.formatter().format_report(report).unwrap_or_default());
            println!("Type :help for commands.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["schemadict"]).unwrap();
        assert!(args.schema.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(vec!["schemadict", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_complete_subcommand() {
        let args = CliArgs::try_parse_from(vec![
            "schemadict",
            "complete",
            "Order.am",
            "--cursor",
            "7",
            "--schema",
            "/tmp/schema",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Complete { text, cursor }) => {
                assert_eq!(text, "Order.am");
                assert_eq!(cursor, Some(7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.schema, Some(PathBuf::from("/tmp/schema")));
    }

    #[test]
    fn test_args_override_env_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[schema]\npath = \"file-path\"\n[display]\nformat = \"json\"\n",
        )
        .unwrap();

        let args = CliArgs::try_parse_from(vec![
            "schemadict",
            "-c",
            config_path.to_str().unwrap(),
            "--format",
            "text",
            "-v",
        ])
        .unwrap();
        let env = |key: &str| (key == crate::config::ENV_SCHEMA).then(|| "env-path".to_string());
        let config = CliInterface::load_config(&args, env).unwrap();

        assert_eq!(config.schema.path, Some(PathBuf::from("env-path")));
        assert_eq!(config.display.format, OutputFormat::Text);
        assert_eq!(config.logging.level, LogLevel::Debug);

        let args = CliArgs::try_parse_from(vec![
            "schemadict",
            "-c",
            config_path.to_str().unwrap(),
            "--schema",
            "arg-path",
        ])
        .unwrap();
        let config = CliInterface::load_config(&args, env).unwrap();
        assert_eq!(config.schema.path, Some(PathBuf::from("arg-path")));
        assert_eq!(config.display.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let args = CliArgs::try_parse_from(vec![
            "schemadict",
            "-c",
            config_path.to_str().unwrap(),
            "--format",
            "yaml",
        ])
        .unwrap();
        assert!(CliInterface::load_config(&args, no_env).is_err());
    }

    #[test]
    fn test_missing_schema_path() {
        let args = CliArgs::try_parse_from(vec!["schemadict"]).unwrap();
        let cli = CliInterface::from_parts(args, Config::default());
        match cli.schema_path() {
            Err(DictError::Source(SourceError::NoSchemaConfigured)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_schema_from_tsv_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("entities.tsv"),
            "Name\tLabel\tDefinitional reference\tDefinition\nperson\tPerson\t\tA human being.\n",
        )
        .unwrap();

        let args = CliArgs::try_parse_from(vec!["schemadict"]).unwrap();
        let mut config = Config::default();
        config.schema.path = Some(dir.path().to_path_buf());
        let cli = CliInterface::from_parts(args, config);

        let (store, report) = cli.load_schema().await.unwrap();
        assert_eq!(report.stats.entity_cards, 1);
        assert!(store.snapshot().card("person").is_some());
    }
}
