//! Polyglot SQL Lexer - dialect-aware SQL tokenization for pretty-printers
//!
//! This library turns raw SQL text into a classified, lossless token stream and
//! resolves caller-supplied values for placeholder tokens.
//!
//! # Architecture
//!
//! 1. **Config** - a [`DialectConfig`] lists the lexical features of a dialect
//! 2. **Rules** - [`RuleTable::build`] turns a config into an ordered rule list
//! 3. **Lexer** - [`Lexer::tokenize`] applies the rules lazily, first match wins
//! 4. **Params** - [`Params`] maps placeholder tokens back to supplied values
//!
//! Built-in dialects live in [`dialects`]; custom ones are registered with
//! [`CustomDialectBuilder`].

pub mod config;
pub mod dialects;
pub mod error;
pub mod lexer;
pub mod params;
pub mod rules;
pub mod tokens;
pub mod trie;

pub use config::{BracketPair, DialectConfig, QuoteStyle, SpecialWordChars};
pub use dialects::{unregister_custom_dialect, CustomDialectBuilder, Dialect, DialectType};
pub use error::{Error, Result};
pub use lexer::{Lexer, Tokens};
pub use params::{ParamSource, Params};
pub use rules::{Rule, RuleTable, WordChars};
pub use tokens::{Span, Token, TokenType};
pub use trie::{new_trie_from_keys, MatchMode, Trie};

/// Tokenize SQL with a built-in dialect.
///
/// # Arguments
/// * `sql` - The SQL string to tokenize
/// * `dialect` - The dialect whose lexical rules apply
///
/// # Returns
/// Every token, including whitespace and comments, or an error if part of the
/// input is not recognized
///
/// # Example
/// ```
/// use polyglot_sql_lexer::{tokenize, DialectType, TokenType};
///
/// let tokens = tokenize("select $1::int", DialectType::PostgreSQL).unwrap();
/// assert_eq!(tokens[0].value, "SELECT");
/// assert_eq!(tokens[2].token_type, TokenType::IndexedPlaceholder);
/// ```
pub fn tokenize(sql: &str, dialect: DialectType) -> Result<Vec<Token>> {
    Dialect::get(dialect).tokenize(sql)
}

/// Tokenize SQL using a string dialect name.
///
/// Supports both built-in names (and aliases such as `"postgres"`) and custom
/// dialects registered via [`CustomDialectBuilder`].
pub fn tokenize_by_name(sql: &str, dialect: &str) -> Result<Vec<Token>> {
    let d = Dialect::get_by_name(dialect).ok_or_else(|| Error::unknown_dialect(dialect))?;
    d.tokenize(sql)
}
