//! Error types for polyglot-sql-lexer

use crate::tokens::TokenType;
use thiserror::Error;

/// The result type for lexer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a rule table or tokenizing
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or conflicting dialect configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input could not be fully tokenized
    #[error("Tokenization error at line {line}, column {column}: {message}")]
    Tokenize {
        message: String,
        line: usize,
        column: usize,
    },

    /// A rule matched zero characters; the rule table is defective
    #[error("Rule {category} matched empty input at offset {offset}")]
    EmptyMatch { category: TokenType, offset: usize },

    /// No built-in or registered dialect has this name
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Internal error (should not happen in normal usage)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Create a tokenization error
    pub fn tokenize(message: impl Into<String>, line: usize, column: usize) -> Self {
        Error::Tokenize {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an unknown dialect error
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Error::UnknownDialect(name.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::config("empty operator").to_string(),
            "Configuration error: empty operator"
        );
        assert_eq!(
            Error::tokenize("Unexpected character '\\u{1}'", 2, 5).to_string(),
            "Tokenization error at line 2, column 5: Unexpected character '\\u{1}'"
        );
        assert_eq!(
            Error::EmptyMatch {
                category: TokenType::Word,
                offset: 7
            }
            .to_string(),
            "Rule Word matched empty input at offset 7"
        );
        assert_eq!(
            Error::unknown_dialect("nope").to_string(),
            "Unknown dialect: nope"
        );
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let err: Error = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, Error::Config { .. }));
    }
}
