//! Placeholder value resolution
//!
//! A formatter that meets a placeholder token asks [`Params`] for the value to
//! print in its place. Values come either from a name → value mapping or from
//! an ordered list consumed left to right.

use crate::tokens::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Caller-supplied placeholder values
///
/// Deserializes from a JSON array (positional) or object (named).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSource {
    /// Values consumed in order by placeholders without a key
    Positional(Vec<String>),
    /// Values looked up by placeholder key
    Named(HashMap<String, String>),
}

impl ParamSource {
    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamSource::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ParamSource::Named(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Resolves placeholder tokens to values for one formatting pass
#[derive(Debug, Clone, Default)]
pub struct Params {
    source: Option<ParamSource>,
    index: usize,
}

impl Params {
    pub fn new(source: Option<ParamSource>) -> Self {
        Self { source, index: 0 }
    }

    /// Next positional index to be consumed
    pub fn position(&self) -> usize {
        self.index
    }

    /// Value for a placeholder whose source text is `text`.
    ///
    /// - without a source, `text` itself is returned so the placeholder is
    ///   printed unchanged
    /// - a keyed placeholder against a named source looks the key up
    /// - otherwise the value at the current position is returned and the
    ///   position advances, for a named source the position is used as the key
    ///
    /// Missing keys and exhausted positions yield `None`.
    pub fn resolve<'a>(&'a mut self, key: Option<&str>, text: &'a str) -> Option<&'a str> {
        let Some(source) = self.source.as_ref() else {
            return Some(text);
        };

        let value = match (source, key) {
            (ParamSource::Named(values), Some(key)) => values.get(key),
            (ParamSource::Positional(values), _) => {
                let value = values.get(self.index);
                self.index += 1;
                value
            }
            (ParamSource::Named(values), None) => {
                let value = values.get(&self.index.to_string());
                self.index += 1;
                value
            }
        };

        if value.is_none() {
            debug!(key, position = self.index, text, "placeholder has no value");
        }
        value.map(String::as_str)
    }

    /// Resolve a placeholder token using its key and text
    pub fn resolve_token<'a>(&'a mut self, token: &'a Token) -> Option<&'a str> {
        self.resolve(token.key.as_deref(), &token.text)
    }
}
