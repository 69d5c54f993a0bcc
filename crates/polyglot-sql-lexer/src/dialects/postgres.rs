//! PostgreSQL Dialect
//!
//! Key lexical differences from generic SQL:
//! - `$1` positional parameters and `$$` / `$tag$` dollar-quoted strings
//! - `E'...'`, `U&'...'`, `B'...'` and `X'...'` string prefixes
//! - `::` casts, JSON/JSONB operators (`->`, `->>`, `#>`, `#>>`, `@>`, `<@`, `?|`, `?&`)
//! - regex match operators (`~`, `~*`, `!~`, `!~*`)

use super::generic::base_config;
use super::{DialectImpl, DialectType};
use crate::config::{DialectConfig, QuoteStyle};

/// PostgreSQL dialect
pub struct PostgresDialect;

impl DialectImpl for PostgresDialect {
    fn dialect_type(&self) -> DialectType {
        DialectType::PostgreSQL
    }

    fn config(&self) -> DialectConfig {
        base_config()
            .with_commands(["RETURNING", "ON CONFLICT", "DO UPDATE SET"])
            .with_binary_commands(["LATERAL JOIN", "CROSS JOIN LATERAL", "LEFT JOIN LATERAL"])
            .with_keywords(["ILIKE", "SIMILAR", "LATERAL", "NULLS", "FIRST", "LAST"])
            .with_string_types([
                QuoteStyle::Single,
                QuoteStyle::Double,
                QuoteStyle::Escape,
                QuoteStyle::Unicode,
                QuoteStyle::Bit,
                QuoteStyle::Hex,
                QuoteStyle::Dollar,
            ])
            .with_indexed_placeholders(["$"])
            .with_named_placeholders([":"])
            .with_operators([
                "::", "||", "->", "->>", "#>", "#>>", "@>", "<@", "?|", "?&", "&&", "~", "~*",
                "!~", "!~*", "#", "@", "!", "?",
            ])
    }
}

#[cfg(test)]
mod tests {
    use crate::tokens::TokenType;
    use crate::{tokenize, DialectType};

    fn significant(sql: &str) -> Vec<(TokenType, String)> {
        tokenize(sql, DialectType::PostgreSQL)
            .unwrap()
            .into_iter()
            .filter(|t| !t.token_type.is_trivia())
            .map(|t| (t.token_type, t.text))
            .collect()
    }

    #[test]
    fn test_positional_parameters_and_casts() {
        let tokens = significant("SELECT $1::int, data->>'name' FROM t WHERE id = $2");
        assert_eq!(tokens[1], (TokenType::IndexedPlaceholder, "$1".to_string()));
        assert_eq!(tokens[2], (TokenType::Operator, "::".to_string()));
        assert_eq!(tokens[6], (TokenType::Operator, "->>".to_string()));
        assert_eq!(tokens[7], (TokenType::String, "'name'".to_string()));
        assert_eq!(
            tokens.last().unwrap(),
            &(TokenType::IndexedPlaceholder, "$2".to_string())
        );
    }

    #[test]
    fn test_dollar_quoted_body() {
        let sql = "CREATE FUNCTION f() RETURNS int AS $body$ SELECT 1; $body$ LANGUAGE sql";
        let tokens = significant(sql);
        assert!(tokens.contains(&(TokenType::String, "$body$ SELECT 1; $body$".to_string())));
    }

    #[test]
    fn test_escape_string_and_regex_operator() {
        let tokens = significant(r"SELECT E'a\'b' ~* 'x'");
        assert_eq!(tokens[1], (TokenType::String, r"E'a\'b'".to_string()));
        assert_eq!(tokens[2], (TokenType::Operator, "~*".to_string()));
    }
}
