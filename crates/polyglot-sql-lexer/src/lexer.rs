//! First-match lexer driven by a [`RuleTable`]
//!
//! [`Lexer::tokenize`] returns a lazy iterator. Every call starts from offset 0
//! with its own cursor, so one lexer can serve many inputs (and threads) at once.

use crate::config::DialectConfig;
use crate::error::{Error, Result};
use crate::rules::RuleTable;
use crate::tokens::{Span, Token};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// SQL lexer for one dialect
#[derive(Debug, Clone)]
pub struct Lexer {
    table: Arc<RuleTable>,
}

impl Lexer {
    /// Build a lexer for the given configuration
    pub fn new(config: &DialectConfig) -> Result<Self> {
        Ok(Self::from_table(Arc::new(RuleTable::build(config)?)))
    }

    /// Share an already built rule table
    pub fn from_table(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<RuleTable> {
        &self.table
    }

    /// Lazily tokenize `sql`.
    ///
    /// The sequence ends at end of input or at the first position no rule
    /// matches; check [`Tokens::is_complete`] afterwards to tell the two apart.
    pub fn tokenize<'a>(&'a self, sql: &'a str) -> Tokens<'a> {
        Tokens {
            table: &self.table,
            sql,
            offset: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Tokenize all of `sql`, failing if any part of it is not recognized
    pub fn tokenize_all(&self, sql: &str) -> Result<Vec<Token>> {
        let mut tokens = self.tokenize(sql);
        let collected = tokens.by_ref().collect::<Result<Vec<_>>>()?;
        if !tokens.is_complete() {
            let unexpected = tokens.remainder().chars().next().unwrap_or_default();
            return Err(Error::tokenize(
                format!("Unexpected character {:?}", unexpected),
                tokens.line,
                tokens.column,
            ));
        }
        Ok(collected)
    }
}

/// Lazy token sequence returned by [`Lexer::tokenize`]
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    table: &'a RuleTable,
    sql: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'a> Tokens<'a> {
    /// Byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Input not consumed yet. After the iterator is exhausted this is the
    /// unparsed tail, empty when tokenization reached end of input.
    pub fn remainder(&self) -> &'a str {
        &self.sql[self.offset..]
    }

    /// Whether the cursor reached end of input without a failure
    pub fn is_complete(&self) -> bool {
        !self.failed && self.offset == self.sql.len()
    }

    /// Drop whitespace, newlines and comments
    pub fn significant(self) -> impl Iterator<Item = Result<Token>> + 'a {
        self.filter(|token| !matches!(token, Ok(t) if t.token_type.is_trivia()))
    }

    fn advance(&mut self, text: &str) {
        self.offset += text.len();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' | '\r' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.sql.len() {
            return None;
        }

        let rest = &self.sql[self.offset..];
        let Some((rule, len)) = self.table.match_at(rest) else {
            debug!(
                offset = self.offset,
                line = self.line,
                column = self.column,
                "no rule matches, stopping"
            );
            return None;
        };

        if len == 0 {
            warn!(
                category = %rule.category(),
                offset = self.offset,
                "rule matched empty input"
            );
            self.failed = true;
            return Some(Err(Error::EmptyMatch {
                category: rule.category(),
                offset: self.offset,
            }));
        }

        let text = &rest[..len];
        let span = Span::new(self.offset, self.offset + len, self.line, self.column);
        let token = rule.token(text, span);
        trace!(category = %token.token_type, text, "token");
        self.advance(text);
        Some(Ok(token))
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuoteStyle;
    use crate::tokens::TokenType;

    fn lexer() -> Lexer {
        let config = DialectConfig::default()
            .with_commands(["SELECT", "FROM", "WHERE"])
            .with_logical_operators(["AND", "OR"])
            .with_indexed_placeholders(["?"])
            .with_named_placeholders([":"]);
        Lexer::new(&config).unwrap()
    }

    fn kinds(lexer: &Lexer, sql: &str) -> Vec<(TokenType, String)> {
        lexer
            .tokenize(sql)
            .map(|t| t.unwrap())
            .map(|t| (t.token_type, t.text))
            .collect()
    }

    #[test]
    fn test_simple_select() {
        let tokens = kinds(&lexer(), "SELECT a, b FROM t");
        assert_eq!(
            tokens,
            vec![
                (TokenType::ReservedCommand, "SELECT".to_string()),
                (TokenType::Whitespace, " ".to_string()),
                (TokenType::Word, "a".to_string()),
                (TokenType::Comma, ",".to_string()),
                (TokenType::Whitespace, " ".to_string()),
                (TokenType::Word, "b".to_string()),
                (TokenType::Whitespace, " ".to_string()),
                (TokenType::ReservedCommand, "FROM".to_string()),
                (TokenType::Whitespace, " ".to_string()),
                (TokenType::Word, "t".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_track_lines_and_columns() {
        let lexer = lexer();
        let tokens: Vec<Token> = lexer
            .tokenize("SELECT\r\n  x\n  FROM t")
            .map(|t| t.unwrap())
            .collect();

        let x = tokens.iter().find(|t| t.text == "x").unwrap();
        assert_eq!(x.span, Span::new(10, 11, 2, 3));

        let from = tokens.iter().find(|t| t.text == "FROM").unwrap();
        assert_eq!((from.span.line, from.span.column), (3, 3));
    }

    #[test]
    fn test_stops_at_unmatched_input() {
        let lexer = lexer();
        let mut tokens = lexer.tokenize("a ! b");
        let collected: Vec<Token> = tokens.by_ref().map(|t| t.unwrap()).collect();

        assert_eq!(collected.len(), 2);
        assert!(!tokens.is_complete());
        assert_eq!(tokens.remainder(), "! b");
        assert_eq!(tokens.offset(), 2);
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_tokenize_all_reports_position() {
        let err = lexer().tokenize_all("a\n  !").unwrap_err();
        match err {
            Error::Tokenize { line, column, .. } => assert_eq!((line, column), (2, 3)),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_restartable() {
        let lexer = lexer();
        let first: Vec<_> = lexer.tokenize("SELECT ?").map(|t| t.unwrap()).collect();
        let second: Vec<_> = lexer.tokenize("SELECT ?").map(|t| t.unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_significant_drops_trivia() {
        let lexer = lexer();
        let texts: Vec<String> = lexer
            .tokenize("SELECT /* c */ a -- x\n FROM t")
            .significant()
            .map(|t| t.unwrap().text)
            .collect();
        assert_eq!(texts, vec!["SELECT", "a", "FROM", "t"]);
    }

    #[test]
    fn test_empty_match_is_reported_once_then_fuses() {
        let table = RuleTable::build(&DialectConfig::default())
            .unwrap()
            .with_leading_empty_rule(TokenType::Word);
        let lexer = Lexer::from_table(Arc::new(table));
        let mut tokens = lexer.tokenize("a b");

        match tokens.next() {
            Some(Err(Error::EmptyMatch { category, offset })) => {
                assert_eq!(category, TokenType::Word);
                assert_eq!(offset, 0);
            }
            other => panic!("expected empty match error, got {:?}", other),
        }
        assert!(tokens.next().is_none());
        assert!(tokens.next().is_none());
        assert!(!tokens.is_complete());
        assert_eq!(tokens.remainder(), "a b");
    }

    #[test]
    fn test_tokenize_all_propagates_empty_match() {
        let table = RuleTable::build(&DialectConfig::default())
            .unwrap()
            .with_leading_empty_rule(TokenType::Operator);
        let err = Lexer::from_table(Arc::new(table))
            .tokenize_all("x")
            .unwrap_err();
        assert!(matches!(err, Error::EmptyMatch { offset: 0, .. }));
    }

    #[test]
    fn test_empty_input() {
        let lexer = lexer();
        let mut tokens = lexer.tokenize("");
        assert!(tokens.next().is_none());
        assert!(tokens.is_complete());
    }

    #[test]
    fn test_multiline_string_advances_lines() {
        let config = DialectConfig::default().with_string_types([QuoteStyle::Single]);
        let lexer = Lexer::new(&config).unwrap();
        let tokens: Vec<Token> = lexer
            .tokenize("'a\nb' c")
            .map(|t| t.unwrap())
            .collect();
        assert_eq!(tokens[2].text, "c");
        assert_eq!((tokens[2].span.line, tokens[2].span.column), (2, 4));
    }
}
