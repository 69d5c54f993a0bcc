//! T-SQL (SQL Server) Dialect
//!
//! `[bracketed]` identifiers replace the square bracket punctuation, `@param`
//! placeholders, `#temp` tables and `N'...'` unicode strings.

use super::generic::base_config;
use super::{DialectImpl, DialectType};
use crate::config::{BracketPair, DialectConfig, QuoteStyle, SpecialWordChars};

/// T-SQL dialect
pub struct TSQLDialect;

impl DialectImpl for TSQLDialect {
    fn dialect_type(&self) -> DialectType {
        DialectType::TSQL
    }

    fn config(&self) -> DialectConfig {
        base_config()
            .with_commands(["GO", "USE", "DECLARE", "EXEC", "OUTPUT", "MERGE INTO", "TOP"])
            .with_binary_commands(["CROSS APPLY", "OUTER APPLY"])
            .with_keywords(["NOCOUNT", "IDENTITY", "NVARCHAR", "VARCHAR", "WITH"])
            .with_string_types([
                QuoteStyle::Single,
                QuoteStyle::National,
                QuoteStyle::Bracket,
                QuoteStyle::Double,
            ])
            .with_brackets([BracketPair::Paren])
            .with_named_placeholders(["@"])
            .with_operators(["!<", "!>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "::", "~"])
            .with_special_word_chars(SpecialWordChars {
                prefix: vec!['#'],
                any: vec!['$', '#', '@'],
                ..Default::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::tokens::TokenType;
    use crate::{tokenize, DialectType};

    #[test]
    fn test_tsql_specifics() {
        let tokens: Vec<(TokenType, String)> = tokenize(
            "SELECT TOP 10 [first name] FROM #tmp WHERE id = @id",
            DialectType::TSQL,
        )
        .unwrap()
        .into_iter()
        .filter(|t| !t.token_type.is_trivia())
        .map(|t| (t.token_type, t.text))
        .collect();

        assert_eq!(
            tokens,
            vec![
                (TokenType::ReservedCommand, "SELECT".to_string()),
                (TokenType::ReservedCommand, "TOP".to_string()),
                (TokenType::Number, "10".to_string()),
                (TokenType::String, "[first name]".to_string()),
                (TokenType::ReservedCommand, "FROM".to_string()),
                (TokenType::Word, "#tmp".to_string()),
                (TokenType::ReservedCommand, "WHERE".to_string()),
                (TokenType::Word, "id".to_string()),
                (TokenType::Operator, "=".to_string()),
                (TokenType::NamedPlaceholder, "@id".to_string()),
            ]
        );
    }
}
