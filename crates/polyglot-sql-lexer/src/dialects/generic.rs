//! Generic SQL Dialect
//!
//! ANSI-flavoured word lists shared by the other presets.

use super::{DialectImpl, DialectType};
use crate::config::{BracketPair, DialectConfig, QuoteStyle};

pub(super) const COMMANDS: &[&str] = &[
    "ADD",
    "ALTER COLUMN",
    "ALTER TABLE",
    "CREATE TABLE",
    "CREATE VIEW",
    "DELETE FROM",
    "DROP TABLE",
    "EXCEPT",
    "FETCH FIRST",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "INSERT",
    "INTERSECT",
    "LIMIT",
    "OFFSET",
    "ORDER BY",
    "PARTITION BY",
    "SELECT",
    "SET",
    "TRUNCATE TABLE",
    "UNION ALL",
    "UNION",
    "UPDATE",
    "VALUES",
    "WHERE",
    "WINDOW",
    "WITH",
];

pub(super) const BINARY_COMMANDS: &[&str] = &[
    "CROSS JOIN",
    "FULL JOIN",
    "FULL OUTER JOIN",
    "INNER JOIN",
    "JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "NATURAL JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
];

pub(super) const DEPENDENT_CLAUSES: &[&str] = &["WHEN", "ELSE"];

pub(super) const LOGICAL_OPERATORS: &[&str] = &["AND", "OR"];

pub(super) const KEYWORDS: &[&str] = &[
    "ALL",
    "AS",
    "ASC",
    "BETWEEN",
    "BY",
    "CAST",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DROP",
    "EXISTS",
    "FALSE",
    "FOREIGN",
    "FULL",
    "IN",
    "INDEX",
    "INNER",
    "INTERVAL",
    "INTO",
    "IS",
    "KEY",
    "LEFT",
    "LIKE",
    "NOT",
    "NULL",
    "ON",
    "OUTER",
    "OVER",
    "PRIMARY",
    "REFERENCES",
    "RIGHT",
    "ROWS",
    "TABLE",
    "THEN",
    "TRUE",
    "UNIQUE",
    "USING",
    "VIEW",
];

/// Start a config from the shared word lists
pub(super) fn base_config() -> DialectConfig {
    DialectConfig::default()
        .with_commands(COMMANDS.iter().copied())
        .with_binary_commands(BINARY_COMMANDS.iter().copied())
        .with_dependent_clauses(DEPENDENT_CLAUSES.iter().copied())
        .with_logical_operators(LOGICAL_OPERATORS.iter().copied())
        .with_keywords(KEYWORDS.iter().copied())
}

/// Generic SQL dialect (ANSI SQL)
pub struct GenericDialect;

impl DialectImpl for GenericDialect {
    fn dialect_type(&self) -> DialectType {
        DialectType::Generic
    }

    fn config(&self) -> DialectConfig {
        base_config()
            .with_string_types([QuoteStyle::Single, QuoteStyle::Double, QuoteStyle::National])
            .with_brackets([BracketPair::Paren, BracketPair::Square])
            .with_indexed_placeholders(["?"])
            .with_operators(["||", "::"])
    }
}
