use std::path::PathBuf;
use thiserror::Error;

/// Error codes, stable across releases.
pub mod codes {
    pub const PARSE_ERROR: &str = "DEMYSTIFY_PARSE_ERROR";
    pub const PRINT_ERROR: &str = "DEMYSTIFY_PRINT_ERROR";
    pub const CONFIG_READ: &str = "DEMYSTIFY_CONFIG_READ";
    pub const CONFIG_PARSE: &str = "DEMYSTIFY_CONFIG_PARSE";
    pub const IO_ERROR: &str = "DEMYSTIFY_IO_ERROR";
}

/// Core error type for the renaming pipeline.
///
/// Only structural failures end up here. A mining round that finds nothing,
/// or a short name with conflicting assignments, is not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to print program: {0}")]
    Print(String),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn print(msg: impl Into<String>) -> Self {
        Self::Print(msg.into())
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => codes::PARSE_ERROR,
            Self::Print(_) => codes::PRINT_ERROR,
            Self::ConfigRead { .. } => codes::CONFIG_READ,
            Self::ConfigParse { .. } => codes::CONFIG_PARSE,
            Self::Io(_) => codes::IO_ERROR,
        }
    }
}
