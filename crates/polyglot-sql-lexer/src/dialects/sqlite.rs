//! SQLite Dialect

use super::generic::base_config;
use super::{DialectImpl, DialectType};
use crate::config::{DialectConfig, QuoteStyle};

/// SQLite dialect
///
/// Accepts every parameter form SQLite does: `?`, `?NNN`, `:name`, `@name`
/// and `$name`.
pub struct SQLiteDialect;

impl DialectImpl for SQLiteDialect {
    fn dialect_type(&self) -> DialectType {
        DialectType::SQLite
    }

    fn config(&self) -> DialectConfig {
        base_config()
            .with_commands(["PRAGMA", "REPLACE INTO", "INSERT OR REPLACE INTO", "ON CONFLICT"])
            .with_keywords(["GLOB", "AUTOINCREMENT", "WITHOUT", "ROWID"])
            .with_string_types([
                QuoteStyle::Single,
                QuoteStyle::Double,
                QuoteStyle::Backtick,
                QuoteStyle::Hex,
            ])
            .with_indexed_placeholders(["?"])
            .with_named_placeholders([":", "@", "$"])
            .with_operators(["||", "<<", ">>", "==", "->", "->>", "~"])
    }
}
