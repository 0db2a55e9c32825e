//! Shell input lines

use crate::error::{DictError, Result};

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Reload the schema from its source
    Reload,
    /// List the fields of a table
    Fields(String),
    /// Show index statistics
    Stats,
    Help,
    Quit,
    /// Look up every word of the line
    Lookup(String),
    Empty,
}

pub const HELP: &str = "\
Commands:
  :reload           Reload the schema from its source
  :fields <table>   List the fields of a table
  :stats            Show index statistics
  :help             Show this help
  :quit, exit       Leave the shell

Any other input is looked up word by word. Press Tab to complete.";

impl ReplCommand {
    /// Parse an input line
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ReplCommand::Empty);
        }
        if line == "exit" || line == "quit" {
            return Ok(ReplCommand::Quit);
        }

        let Some(meta) = line.strip_prefix(':') else {
            return Ok(ReplCommand::Lookup(line.to_string()));
        };

        let mut parts = meta.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(DictError::Generic(format!(
                "Too many arguments for ':{name}'. Type :help for commands."
            )));
        }

        match (name, arg) {
            ("reload" | "r", None) => Ok(ReplCommand::Reload),
            ("fields" | "f", Some(table)) => Ok(ReplCommand::Fields(table.to_string())),
            ("fields" | "f", None) => Err(DictError::Generic("Usage: :fields <table>".to_string())),
            ("stats", None) => Ok(ReplCommand::Stats),
            ("help" | "h" | "?", None) => Ok(ReplCommand::Help),
            ("quit" | "q" | "exit", None) => Ok(ReplCommand::Quit),
            _ => Err(DictError::Generic(format!(
                "Unknown command ':{meta}'. Type :help for commands."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meta_commands() {
        assert_eq!(ReplCommand::parse(":reload").unwrap(), ReplCommand::Reload);
        assert_eq!(
            ReplCommand::parse(":fields Patients").unwrap(),
            ReplCommand::Fields("Patients".to_string())
        );
        assert_eq!(ReplCommand::parse("  :stats ").unwrap(), ReplCommand::Stats);
        assert_eq!(ReplCommand::parse(":help").unwrap(), ReplCommand::Help);
        assert_eq!(ReplCommand::parse(":quit").unwrap(), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("exit").unwrap(), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_lookup() {
        assert_eq!(
            ReplCommand::parse("Order.amount").unwrap(),
            ReplCommand::Lookup("Order.amount".to_string())
        );
        assert_eq!(ReplCommand::parse("   ").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_errors() {
        assert!(ReplCommand::parse(":fields").is_err());
        assert!(ReplCommand::parse(":frobnicate").is_err());
        assert!(ReplCommand::parse(":stats extra").is_err());
    }

    #[test]
    fn test_fields_rejects_extra_arguments() {
        let err = ReplCommand::parse(":fields Patients extra").unwrap_err();
        assert!(err.to_string().contains("Too many arguments for ':fields'"));
    }
}
