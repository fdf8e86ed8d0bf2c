use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    /// Input path does not exist.
    MissingFile(String),
    /// No candidate encoding produced parsable, non-empty content.
    UnreadableFile(String),
    /// No row matched the header triggers.
    HeaderNotFound(String),
    ValidationError(String),
    ConfigError(String),
    ParseError(String),
    IoError(String),
}

impl AppError {
    /// Short machine-friendly tag, used in structured log fields and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingFile(_) => "missing_file",
            AppError::UnreadableFile(_) => "unreadable_file",
            AppError::HeaderNotFound(_) => "header_not_found",
            AppError::ValidationError(_) => "validation",
            AppError::ConfigError(_) => "config",
            AppError::ParseError(_) => "parse",
            AppError::IoError(_) => "io",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFile(path) => write!(f, "File not found: {}", path),
            AppError::UnreadableFile(path) => {
                write!(f, "Could not read {} or file is empty", path)
            }
            AppError::HeaderNotFound(path) => write!(f, "Header row not found in {}", path),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
