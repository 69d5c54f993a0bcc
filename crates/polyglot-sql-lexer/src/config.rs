//! Dialect configuration consumed by the rule table builder
//!
//! A [`DialectConfig`] describes which lexical features are active for one SQL
//! variant. It is plain data: presets live in [`crate::dialects`], and custom
//! configurations can be assembled with the `with_*` methods or loaded from JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Quoting styles for string literals and quoted identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStyle {
    /// `'abc'`, with `''` and `\'` escapes
    #[serde(rename = "''")]
    Single,
    /// `"abc"`, with `""` and `\"` escapes
    #[serde(rename = "\"\"")]
    Double,
    /// `` `abc` ``, with doubled backtick escapes
    #[serde(rename = "``")]
    Backtick,
    /// `[abc]`, with `]]` escapes
    #[serde(rename = "[]")]
    Bracket,
    /// `N'abc'`
    #[serde(rename = "N''")]
    National,
    /// `X'0F'`
    #[serde(rename = "X''")]
    Hex,
    /// `B'0101'`
    #[serde(rename = "B''")]
    Bit,
    /// `E'a\nb'`
    #[serde(rename = "E''")]
    Escape,
    /// `U&'d\0061t'`
    #[serde(rename = "U&''")]
    Unicode,
    /// `$$abc$$` or `$tag$abc$tag$`
    #[serde(rename = "$$")]
    Dollar,
}

impl QuoteStyle {
    /// The literal text that opens this style, excluding any dollar tag
    pub fn opener(&self) -> &'static str {
        match self {
            QuoteStyle::Single => "'",
            QuoteStyle::Double => "\"",
            QuoteStyle::Backtick => "`",
            QuoteStyle::Bracket => "[",
            QuoteStyle::National => "N'",
            QuoteStyle::Hex => "X'",
            QuoteStyle::Bit => "B'",
            QuoteStyle::Escape => "E'",
            QuoteStyle::Unicode => "U&'",
            QuoteStyle::Dollar => "$",
        }
    }
}

/// Bracket pairs that are emitted as punctuation tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketPair {
    #[serde(rename = "()")]
    Paren,
    #[serde(rename = "[]")]
    Square,
}

/// Extra characters allowed inside bare words
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialWordChars {
    /// Allowed only at the start of a word (e.g. `@` in T-SQL variables)
    pub prefix: Vec<char>,
    /// Allowed anywhere in a word (e.g. `$` or `#`)
    pub any: Vec<char>,
    /// Allowed only at the end of a word
    pub suffix: Vec<char>,
}

impl SpecialWordChars {
    fn all(&self) -> impl Iterator<Item = char> + '_ {
        self.prefix
            .iter()
            .chain(self.any.iter())
            .chain(self.suffix.iter())
            .copied()
    }
}

/// Lexical configuration of a SQL dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Statement and clause starters (`SELECT`, `FROM`, `ORDER BY`)
    pub reserved_commands: Vec<String>,
    /// Infix keywords between two operands (`UNION ALL`, `LEFT JOIN`)
    pub reserved_binary_commands: Vec<String>,
    /// Clauses that depend on an enclosing construct (`WHEN`, `ELSE`)
    pub reserved_dependent_clauses: Vec<String>,
    /// `AND`, `OR`, ...
    pub reserved_logical_operators: Vec<String>,
    /// Every other reserved word
    pub reserved_keywords: Vec<String>,
    pub string_types: Vec<QuoteStyle>,
    pub brackets: Vec<BracketPair>,
    pub line_comment_types: Vec<String>,
    /// Prefixes of `?` / `?1` / `$1` style placeholders
    pub indexed_placeholder_types: Vec<String>,
    /// Prefixes of `:name` / `@name` style placeholders
    pub named_placeholder_types: Vec<String>,
    /// Multi-character operators on top of the built-in comparison operators
    pub operators: Vec<String>,
    pub special_word_chars: SpecialWordChars,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            reserved_commands: Vec::new(),
            reserved_binary_commands: Vec::new(),
            reserved_dependent_clauses: Vec::new(),
            reserved_logical_operators: Vec::new(),
            reserved_keywords: Vec::new(),
            string_types: vec![QuoteStyle::Single, QuoteStyle::Double],
            brackets: vec![BracketPair::Paren, BracketPair::Square],
            line_comment_types: vec!["--".to_string()],
            indexed_placeholder_types: Vec::new(),
            named_placeholder_types: Vec::new(),
            operators: Vec::new(),
            special_word_chars: SpecialWordChars::default(),
        }
    }
}

fn to_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl DialectConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_commands<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_commands.extend(to_strings(words));
        self
    }

    pub fn with_binary_commands<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_binary_commands.extend(to_strings(words));
        self
    }

    pub fn with_dependent_clauses<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_dependent_clauses.extend(to_strings(words));
        self
    }

    pub fn with_logical_operators<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_logical_operators.extend(to_strings(words));
        self
    }

    pub fn with_keywords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_keywords.extend(to_strings(words));
        self
    }

    /// Replace the enabled quoting styles
    pub fn with_string_types(mut self, styles: impl IntoIterator<Item = QuoteStyle>) -> Self {
        self.string_types = styles.into_iter().collect();
        self
    }

    /// Replace the enabled bracket pairs
    pub fn with_brackets(mut self, pairs: impl IntoIterator<Item = BracketPair>) -> Self {
        self.brackets = pairs.into_iter().collect();
        self
    }

    /// Replace the line comment prefixes
    pub fn with_line_comments<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.line_comment_types = to_strings(prefixes);
        self
    }

    pub fn with_indexed_placeholders<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexed_placeholder_types = to_strings(prefixes);
        self
    }

    pub fn with_named_placeholders<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.named_placeholder_types = to_strings(prefixes);
        self
    }

    pub fn with_operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators.extend(to_strings(operators));
        self
    }

    pub fn with_special_word_chars(mut self, chars: SpecialWordChars) -> Self {
        self.special_word_chars = chars;
        self
    }

    /// Reject malformed or conflicting settings.
    ///
    /// Called by [`crate::rules::RuleTable::build`]; exposed so that callers
    /// loading untrusted JSON can check a configuration up front.
    pub fn validate(&self) -> Result<()> {
        let word_lists = [
            ("reserved_commands", &self.reserved_commands),
            ("reserved_binary_commands", &self.reserved_binary_commands),
            ("reserved_dependent_clauses", &self.reserved_dependent_clauses),
            ("reserved_logical_operators", &self.reserved_logical_operators),
            ("reserved_keywords", &self.reserved_keywords),
        ];
        for (field, words) in word_lists {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(Error::config(format!("{} contains an empty word", field)));
            }
        }

        let symbol_lists = [
            ("operators", &self.operators),
            ("line_comment_types", &self.line_comment_types),
            ("indexed_placeholder_types", &self.indexed_placeholder_types),
            ("named_placeholder_types", &self.named_placeholder_types),
        ];
        for (field, symbols) in symbol_lists {
            for symbol in symbols {
                if symbol.is_empty() {
                    return Err(Error::config(format!("{} contains an empty entry", field)));
                }
                if symbol.chars().any(char::is_whitespace) {
                    return Err(Error::config(format!(
                        "{} entry {:?} contains whitespace",
                        field, symbol
                    )));
                }
            }
        }

        if let Some(prefix) = self
            .line_comment_types
            .iter()
            .find(|p| p.starts_with("/*"))
        {
            return Err(Error::config(format!(
                "line comment prefix {:?} collides with block comments",
                prefix
            )));
        }

        if let Some(prefix) = self
            .indexed_placeholder_types
            .iter()
            .find(|p| self.named_placeholder_types.contains(*p))
        {
            return Err(Error::config(format!(
                "placeholder prefix {:?} is both indexed and named",
                prefix
            )));
        }

        let placeholder_prefixes = self
            .indexed_placeholder_types
            .iter()
            .chain(self.named_placeholder_types.iter());
        for prefix in placeholder_prefixes {
            if let Some(comment) = self
                .line_comment_types
                .iter()
                .find(|c| prefix.starts_with(c.as_str()))
            {
                return Err(Error::config(format!(
                    "placeholder prefix {:?} is shadowed by line comment {:?}",
                    prefix, comment
                )));
            }
        }

        if self.string_types.contains(&QuoteStyle::Bracket)
            && self.brackets.contains(&BracketPair::Square)
        {
            return Err(Error::config(
                "[] quoting conflicts with the square bracket pair",
            ));
        }

        for ch in self.special_word_chars.all() {
            if ch.is_whitespace() || matches!(ch, ',' | '(' | ')' | '[' | ']' | '\'' | '"' | '`')
            {
                return Err(Error::config(format!(
                    "{:?} cannot be used as a special word character",
                    ch
                )));
            }
        }

        Ok(())
    }
}
