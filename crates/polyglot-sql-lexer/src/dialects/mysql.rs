//! MySQL Dialect
//!
//! Backtick identifiers, `#` line comments, `XOR`, `:=` assignment and
//! `@user_var` / `@@system_var` variables (words with `@` as prefix character).

use super::generic::base_config;
use super::{DialectImpl, DialectType};
use crate::config::{DialectConfig, QuoteStyle, SpecialWordChars};

/// MySQL dialect
pub struct MySQLDialect;

impl DialectImpl for MySQLDialect {
    fn dialect_type(&self) -> DialectType {
        DialectType::MySQL
    }

    fn config(&self) -> DialectConfig {
        base_config()
            .with_commands(["REPLACE INTO", "ON DUPLICATE KEY UPDATE", "SHOW"])
            .with_binary_commands(["STRAIGHT_JOIN"])
            .with_logical_operators(["XOR"])
            .with_keywords(["REGEXP", "RLIKE", "AUTO_INCREMENT", "ENGINE", "UNSIGNED"])
            .with_string_types([
                QuoteStyle::Single,
                QuoteStyle::Double,
                QuoteStyle::Backtick,
                QuoteStyle::National,
                QuoteStyle::Hex,
                QuoteStyle::Bit,
            ])
            .with_line_comments(["--", "#"])
            .with_indexed_placeholders(["?"])
            .with_operators([":=", "<=>", "->", "->>", "&&", "||", "<<", ">>", "!", "~"])
            .with_special_word_chars(SpecialWordChars {
                prefix: vec!['@'],
                ..Default::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::tokens::TokenType;
    use crate::{tokenize, DialectType};

    #[test]
    fn test_mysql_specifics() {
        let tokens: Vec<(TokenType, String)> = tokenize(
            "SELECT `order`, @@version FROM t # trailing\nWHERE a <=> ? XOR b",
            DialectType::MySQL,
        )
        .unwrap()
        .into_iter()
        .filter(|t| !matches!(t.token_type, TokenType::Whitespace | TokenType::Newline))
        .map(|t| (t.token_type, t.text))
        .collect();

        assert_eq!(tokens[1], (TokenType::String, "`order`".to_string()));
        assert_eq!(tokens[3], (TokenType::Word, "@@version".to_string()));
        assert_eq!(tokens[6], (TokenType::LineComment, "# trailing".to_string()));
        assert_eq!(tokens[9], (TokenType::Operator, "<=>".to_string()));
        assert_eq!(tokens[10], (TokenType::IndexedPlaceholder, "?".to_string()));
        assert_eq!(tokens[11], (TokenType::ReservedLogicalOperator, "XOR".to_string()));
    }

    #[test]
    fn test_backtick_is_quoted_identifier() {
        let tokens = tokenize("a ` b", DialectType::MySQL).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].token_type, TokenType::String);
        assert_eq!(tokens[2].text, "` b");
    }
}
