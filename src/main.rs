//! schemadict - semantic dictionary for data model schemas
//!
//! Looks up definitions and completions for entity, property, table and
//! field names, one-shot from the command line or in an interactive shell.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! schemadict --schema reference.sqlite
//!
//! # One-shot lookups
//! schemadict --schema tsv/ hover patients
//! schemadict --schema tsv/ complete "Order." --cursor 6
//! ```

use schemadict::Result;
use schemadict::cli::CliInterface;
use schemadict::repl::ReplEngine;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive shell
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand().await? {
        return Ok(());
    }

    run_interactive_mode(&cli).await
}

/// Load the schema and run the shell
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let schema_path = cli.schema_path()?.to_path_buf();
    let (store, report) = cli.load_schema().await?;
    cli.print_banner(&report);

    let mut repl = ReplEngine::new(
        store,
        schema_path,
        &cli.config().history,
        cli.formatter(),
    )?;
    repl.run().await?;

    if !cli.args().quiet {
        println!("Goodbye!");
    }
    Ok(())
}

/// Initialize logging from the effective configuration
///
/// Verbosity flags have already been folded into `logging.level`. Logs go to
/// stderr so they never mix with command output.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
