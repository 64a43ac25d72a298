use crate::category::CategoryCode;
use thiserror::Error;

/// Error type for category lookups and configuration checks.
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Unknown emission category name '{0}'")]
    UnknownName(String),
    #[error("Unknown emission category code {0}")]
    UnknownCode(CategoryCode),
    #[error("Invalid category code '{0}'. Expected a non-negative integer, '-' or '-1'")]
    InvalidCode(String),
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Configuration is inconsistent with the category table ({count} error(s))")]
    Inconsistent { count: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid validation options: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience type for `Result<T, CategoryError>`.
pub type CategoryResult<T> = Result<T, CategoryError>;
