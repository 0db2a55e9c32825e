use std::{fmt, io};

/// Crate-wide `Result` type using [`DictError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, DictError>;

/// Top-level error type for schemadict operations.
///
/// Build-time data problems (bad rows, collisions, dangling references) are
/// not errors; they are reported as diagnostics. This type only covers
/// failures that stop an operation outright.
#[derive(Debug)]
pub enum DictError {
    /// The schema source could not be used.
    Source(SourceError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// SQLite driver errors.
    Sqlite(rusqlite::Error),

    /// Delimited file parse errors.
    Csv(csv::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Schema source errors. Any of these aborts a reload.
#[derive(Debug)]
pub enum SourceError {
    /// No schema path was given on the command line, environment or config.
    NoSchemaConfigured,

    /// The schema path does not exist.
    NotFound(String),

    /// The schema path exists but could not be read.
    Unreadable { path: String, reason: String },

    /// The source holds none of the four relations.
    Empty(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for DictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictError::Source(e) => write!(f, "Schema source error: {e}"),
            DictError::Config(e) => write!(f, "Configuration error: {e}"),
            DictError::Io(e) => write!(f, "I/O error: {e}"),
            DictError::Sqlite(e) => write!(f, "SQLite error: {e}"),
            DictError::Csv(e) => write!(f, "TSV parse error: {e}"),
            DictError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NoSchemaConfigured => write!(
                f,
                "no schema file or directory is specified (use --schema or [schema] path)"
            ),
            SourceError::NotFound(path) => write!(f, "schema source not found: {path}"),
            SourceError::Unreadable { path, reason } => {
                write!(f, "cannot read schema source {path}: {reason}")
            }
            SourceError::Empty(path) => {
                write!(f, "schema source {path} contains none of the reference relations")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for DictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DictError::Io(e) => Some(e),
            DictError::Sqlite(e) => Some(e),
            DictError::Csv(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for SourceError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to DictError ========================= */

impl From<io::Error> for DictError {
    fn from(err: io::Error) -> Self {
        DictError::Io(err)
    }
}

impl From<rusqlite::Error> for DictError {
    fn from(err: rusqlite::Error) -> Self {
        DictError::Sqlite(err)
    }
}

impl From<csv::Error> for DictError {
    fn from(err: csv::Error) -> Self {
        DictError::Csv(err)
    }
}

impl From<SourceError> for DictError {
    fn from(err: SourceError) -> Self {
        DictError::Source(err)
    }
}

impl From<ConfigError> for DictError {
    fn from(err: ConfigError) -> Self {
        DictError::Config(err)
    }
}

impl From<String> for DictError {
    fn from(msg: String) -> Self {
        DictError::Generic(msg)
    }
}

impl From<&str> for DictError {
    fn from(msg: &str) -> Self {
        DictError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = DictError::from(SourceError::NotFound("/tmp/nope".to_string()));
        assert_eq!(
            err.to_string(),
            "Schema source error: schema source not found: /tmp/nope"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "history.max_size".to_string(),
            value: "0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for field 'history.max_size'"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = DictError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
