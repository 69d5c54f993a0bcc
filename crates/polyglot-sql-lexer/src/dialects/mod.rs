//! SQL dialect presets
//!
//! Each built-in dialect provides a [`DialectConfig`] through [`DialectImpl`].
//! Custom dialects derive from a built-in one with [`CustomDialectBuilder`] and
//! live in a process-wide registry keyed by name.

mod generic;
mod mysql;
mod postgres;
mod sqlite;
mod tsql;

pub use generic::GenericDialect;
pub use mysql::MySQLDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SQLiteDialect;
pub use tsql::TSQLDialect;

use crate::config::DialectConfig;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::rules::RuleTable;
use crate::tokens::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, RwLock};
use tracing::debug;

/// Built-in dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectType {
    Generic,
    PostgreSQL,
    MySQL,
    SQLite,
    TSQL,
}

impl DialectType {
    pub const ALL: [DialectType; 5] = [
        DialectType::Generic,
        DialectType::PostgreSQL,
        DialectType::MySQL,
        DialectType::SQLite,
        DialectType::TSQL,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            DialectType::Generic => "generic",
            DialectType::PostgreSQL => "postgresql",
            DialectType::MySQL => "mysql",
            DialectType::SQLite => "sqlite",
            DialectType::TSQL => "tsql",
        }
    }

    fn implementation(&self) -> &'static dyn DialectImpl {
        match self {
            DialectType::Generic => &GenericDialect,
            DialectType::PostgreSQL => &PostgresDialect,
            DialectType::MySQL => &MySQLDialect,
            DialectType::SQLite => &SQLiteDialect,
            DialectType::TSQL => &TSQLDialect,
        }
    }
}

impl fmt::Display for DialectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" | "sql" => Ok(DialectType::Generic),
            "postgresql" | "postgres" | "pg" => Ok(DialectType::PostgreSQL),
            "mysql" | "mariadb" => Ok(DialectType::MySQL),
            "sqlite" => Ok(DialectType::SQLite),
            "tsql" | "mssql" | "sqlserver" => Ok(DialectType::TSQL),
            _ => Err(Error::unknown_dialect(s)),
        }
    }
}

/// Lexical settings of a built-in dialect
pub trait DialectImpl: Send + Sync {
    fn dialect_type(&self) -> DialectType;

    fn config(&self) -> DialectConfig;
}

/// A resolved dialect: its name and configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    name: String,
    base: DialectType,
    config: DialectConfig,
}

impl Dialect {
    /// Get a built-in dialect
    pub fn get(dialect_type: DialectType) -> Self {
        let implementation = dialect_type.implementation();
        debug_assert_eq!(implementation.dialect_type(), dialect_type);
        Self {
            name: dialect_type.name().to_string(),
            base: implementation.dialect_type(),
            config: implementation.config(),
        }
    }

    /// Look up a built-in dialect (by name or alias) or a registered custom one
    pub fn get_by_name(name: &str) -> Option<Self> {
        if let Ok(dialect_type) = name.parse::<DialectType>() {
            return Some(Self::get(dialect_type));
        }
        let registry = CUSTOM_DIALECTS.read().ok()?;
        registry.get(name).cloned()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The built-in dialect this one is (or is derived from)
    pub fn dialect_type(&self) -> DialectType {
        self.base
    }

    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Build a lexer for this dialect
    pub fn lexer(&self) -> Result<Lexer> {
        Lexer::new(&self.config)
    }

    /// Tokenize `sql`, failing on unrecognized input
    pub fn tokenize(&self, sql: &str) -> Result<Vec<Token>> {
        self.lexer()?.tokenize_all(sql)
    }
}

static CUSTOM_DIALECTS: LazyLock<RwLock<HashMap<String, Dialect>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Remove a registered custom dialect. Returns whether it existed.
pub fn unregister_custom_dialect(name: &str) -> bool {
    match CUSTOM_DIALECTS.write() {
        Ok(mut registry) => registry.remove(name).is_some(),
        Err(_) => false,
    }
}

/// Builder for named dialects derived from a built-in one
///
/// ```
/// use polyglot_sql_lexer::dialects::{CustomDialectBuilder, Dialect, DialectType};
///
/// CustomDialectBuilder::new("doc_vars")
///     .based_on(DialectType::PostgreSQL)
///     .config_modifier(|c| c.named_placeholder_types.push("@".to_string()))
///     .register()
///     .unwrap();
///
/// let dialect = Dialect::get_by_name("doc_vars").unwrap();
/// assert!(dialect.config().named_placeholder_types.contains(&"@".to_string()));
/// # polyglot_sql_lexer::unregister_custom_dialect("doc_vars");
/// ```
pub struct CustomDialectBuilder {
    name: String,
    base: DialectType,
    modifiers: Vec<Box<dyn FnOnce(&mut DialectConfig)>>,
}

impl CustomDialectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: DialectType::Generic,
            modifiers: Vec::new(),
        }
    }

    /// Start from this built-in dialect's configuration (default: generic)
    pub fn based_on(mut self, base: DialectType) -> Self {
        self.base = base;
        self
    }

    /// Adjust the configuration; modifiers run in the order they were added
    pub fn config_modifier(mut self, modifier: impl FnOnce(&mut DialectConfig) + 'static) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    /// Produce the dialect without registering it. The configuration is
    /// checked by building its rule table.
    pub fn build(self) -> Result<Dialect> {
        let mut config = self.base.implementation().config();
        for modifier in self.modifiers {
            modifier(&mut config);
        }
        RuleTable::build(&config)?;
        Ok(Dialect {
            name: self.name,
            base: self.base,
            config,
        })
    }

    /// Build and register the dialect under its name
    pub fn register(self) -> Result<()> {
        if self.name.parse::<DialectType>().is_ok() {
            return Err(Error::config(format!(
                "{} is the name of a built-in dialect",
                self.name
            )));
        }
        let dialect = self.build()?;
        let mut registry = CUSTOM_DIALECTS
            .write()
            .map_err(|_| Error::internal("custom dialect registry is poisoned"))?;
        if registry.contains_key(dialect.name()) {
            return Err(Error::config(format!(
                "dialect {} is already registered",
                dialect.name()
            )));
        }
        debug!(name = dialect.name(), base = %dialect.base, "registered custom dialect");
        registry.insert(dialect.name.clone(), dialect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_config_builds() {
        for dialect_type in DialectType::ALL {
            let dialect = Dialect::get(dialect_type);
            assert!(
                dialect.lexer().is_ok(),
                "{} config failed to build",
                dialect_type
            );
            assert_eq!(dialect.dialect_type(), dialect_type);
        }
    }

    #[test]
    fn test_implementations_report_their_type() {
        for dialect_type in DialectType::ALL {
            assert_eq!(dialect_type.implementation().dialect_type(), dialect_type);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Postgres".parse::<DialectType>().unwrap(), DialectType::PostgreSQL);
        assert_eq!("mssql".parse::<DialectType>().unwrap(), DialectType::TSQL);
        assert!(matches!(
            "oracle".parse::<DialectType>(),
            Err(Error::UnknownDialect(_))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for dialect_type in DialectType::ALL {
            assert_eq!(
                dialect_type.to_string().parse::<DialectType>().unwrap(),
                dialect_type
            );
        }
    }

    #[test]
    fn test_builder_without_register() {
        let dialect = CustomDialectBuilder::new("unregistered")
            .based_on(DialectType::MySQL)
            .config_modifier(|c| c.operators.push("=>".to_string()))
            .build()
            .unwrap();
        assert_eq!(dialect.name(), "unregistered");
        assert!(dialect.config().operators.contains(&"=>".to_string()));
        assert!(Dialect::get_by_name("unregistered").is_none());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = CustomDialectBuilder::new("broken")
            .config_modifier(|c| c.operators.push(String::new()))
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
