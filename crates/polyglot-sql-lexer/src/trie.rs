//! Prefix tree used by the rule table
//!
//! Reserved words are looked up case-insensitively, with a space in a key such
//! as `ORDER BY` matching any whitespace run; operators are looked up exactly.
//! A lookup returns the longest key the caller accepts, so a rejected long
//! candidate (one that ends in the middle of an identifier, say) falls back to
//! the next shorter key on the same path.

use std::collections::HashMap;

/// How input characters are compared against trie keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Characters must be identical
    Exact,
    /// Input is uppercased before comparison and a single space in a key
    /// matches any run of whitespace in the input
    Keyword,
}

/// A trie (prefix tree) keyed by characters
///
/// ```
/// use polyglot_sql_lexer::trie::{new_trie_from_keys, MatchMode};
///
/// let trie = new_trie_from_keys(["GROUP", "GROUP BY"]);
/// let (end, _) = trie.longest_match("group\n  by x", MatchMode::Keyword, |_| true).unwrap();
/// assert_eq!(end, 10);
/// ```
#[derive(Debug, Clone)]
pub struct Trie<V> {
    children: HashMap<char, Trie<V>>,
    value: Option<V>,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }

    /// Insert a key, replacing any previous value
    pub fn insert(&mut self, key: &str, value: V) {
        let mut current = self;
        for ch in key.chars() {
            current = current.children.entry(ch).or_insert_with(Trie::new);
        }
        current.value = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.value.is_none()
    }

    /// Find the longest key that is a prefix of `input` and for which
    /// `accept(end)` returns true, where `end` is the byte length of the
    /// matched input.
    pub fn longest_match(
        &self,
        input: &str,
        mode: MatchMode,
        mut accept: impl FnMut(usize) -> bool,
    ) -> Option<(usize, &V)> {
        let mut best = None;
        let mut current = self;
        let mut chars = input.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if mode == MatchMode::Keyword && ch.is_whitespace() {
                current = match current.children.get(&' ') {
                    Some(child) => child,
                    None => break,
                };
                while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
            } else if mode == MatchMode::Keyword {
                let mut folded = ch.to_uppercase();
                let next = folded.try_fold(current, |node, up| node.children.get(&up));
                current = match next {
                    Some(node) => node,
                    None => break,
                };
            } else {
                current = match current.children.get(&ch) {
                    Some(child) => child,
                    None => break,
                };
            }

            let end = chars.peek().map_or(input.len(), |(next_idx, _)| *next_idx);
            debug_assert!(end > idx);
            if let Some(value) = current.value.as_ref() {
                if accept(end) {
                    best = Some((end, value));
                }
            }
        }

        best
    }
}

/// Build a set-like trie from keys
pub fn new_trie_from_keys<I, S>(keys: I) -> Trie<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut trie = Trie::new();
    for key in keys {
        trie.insert(key.as_ref(), ());
    }
    trie
}
