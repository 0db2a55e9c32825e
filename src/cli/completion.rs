//! Shell completion generation for schemadict
//!
//! Generates completion scripts for bash, zsh, fish, PowerShell and elvish
//! from the clap command definition.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

/// Print the completion script for `shell_name` to stdout
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish, powershell, elvish)
pub fn generate_completion(shell_name: &str) -> Result<()> {
    let script = completion_script(parse_shell(shell_name)?);
    io::stdout().write_all(&script)?;
    Ok(())
}

/// Render the completion script for `shell`
fn completion_script(shell: Shell) -> Vec<u8> {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, "schemadict", &mut buffer);
    buffer
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        _ => Err(ConfigError::InvalidValue {
            field: "shell".to_string(),
            value: shell_name.to_string(),
        }
        .into()),
    }
}
