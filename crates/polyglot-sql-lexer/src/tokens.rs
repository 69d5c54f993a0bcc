//! Token types produced by the lexer
//!
//! The category set is closed: formatters switch over [`TokenType`] to decide
//! line breaks, indentation and placeholder substitution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a position in the source SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Starting byte offset
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the spanned text in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A token in the SQL token stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The category of token
    pub token_type: TokenType,
    /// The exact source text of the token
    pub text: String,
    /// Normalized text: reserved words are uppercased with inner whitespace
    /// collapsed to a single space, everything else equals `text`
    pub value: String,
    /// Placeholder key (`1` for `?1`, `name` for `:name`), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Position information
    pub span: Span,
}

impl Token {
    /// Create a new token whose value equals its text
    pub fn new(token_type: TokenType, text: impl Into<String>, span: Span) -> Self {
        let text = text.into();
        Self {
            token_type,
            value: text.clone(),
            text,
            key: None,
            span,
        }
    }

    /// Replace the normalized value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Attach a placeholder key
    pub fn with_key(mut self, key: Option<String>) -> Self {
        self.key = key;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.text)
    }
}

/// All token categories, in no particular order. Rule priority lives in
/// [`crate::rules::RuleTable`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    // Trivia
    Whitespace,
    Newline,
    BlockComment,
    LineComment,

    // Punctuation
    Comma,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Operator,

    // Literals
    Number,
    String,

    // Block keywords
    CaseStart,
    CaseEnd,

    // Reserved words
    ReservedCommand,
    ReservedBinaryCommand,
    ReservedDependentClause,
    ReservedLogicalOperator,
    ReservedKeyword,

    // Placeholders
    IndexedPlaceholder,
    NamedPlaceholder,
    StringPlaceholder,

    Word,
}

impl TokenType {
    /// Whitespace, newlines and comments
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenType::Whitespace
                | TokenType::Newline
                | TokenType::BlockComment
                | TokenType::LineComment
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenType::BlockComment | TokenType::LineComment)
    }

    /// Any of the reserved word categories, including `CASE` / `END`
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            TokenType::CaseStart
                | TokenType::CaseEnd
                | TokenType::ReservedCommand
                | TokenType::ReservedBinaryCommand
                | TokenType::ReservedDependentClause
                | TokenType::ReservedLogicalOperator
                | TokenType::ReservedKeyword
        )
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            TokenType::IndexedPlaceholder
                | TokenType::NamedPlaceholder
                | TokenType::StringPlaceholder
        )
    }

    pub fn is_open_paren(&self) -> bool {
        matches!(
            self,
            TokenType::OpenParen | TokenType::OpenBracket | TokenType::CaseStart
        )
    }

    pub fn is_close_paren(&self) -> bool {
        matches!(
            self,
            TokenType::CloseParen | TokenType::CloseBracket | TokenType::CaseEnd
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_value_defaults_to_text() {
        let token = Token::new(TokenType::Word, "users", Span::new(0, 5, 1, 1));
        assert_eq!(token.value, "users");
        assert_eq!(token.key, None);
        assert_eq!(token.span.len(), 5);
        assert_eq!(token.to_string(), "Word(users)");
    }

    #[test]
    fn test_category_predicates() {
        assert!(TokenType::LineComment.is_trivia());
        assert!(TokenType::LineComment.is_comment());
        assert!(!TokenType::Word.is_trivia());
        assert!(TokenType::CaseEnd.is_reserved());
        assert!(TokenType::CaseEnd.is_close_paren());
        assert!(TokenType::StringPlaceholder.is_placeholder());
        assert!(!TokenType::String.is_placeholder());
    }

    #[test]
    fn test_token_serializes_with_screaming_category() {
        let token = Token::new(TokenType::ReservedCommand, "select", Span::new(0, 6, 1, 1))
            .with_value("SELECT");
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["token_type"], "RESERVED_COMMAND");
        assert_eq!(json["value"], "SELECT");
        assert!(json.get("key").is_none());
    }
}
