//! Rule table construction
//!
//! A [`RuleTable`] is an ordered list of (category, matcher) rules built from a
//! [`DialectConfig`]. The lexer tries the rules in table order at every
//! position and the first one that matches wins, so the order below is what
//! makes `<=` one operator, keeps `SELECTOR` a single word and lets `$1` be a
//! placeholder instead of an operator followed by a number:
//!
//! 1. whitespace, newline
//! 2. block comment
//! 3. line comment
//! 4. `,` `(` `)` `[` `]`
//! 5. operators (multi-character first)
//! 6. numbers
//! 7. `CASE`, `END`
//! 8. commands, binary commands, dependent clauses, logical operators, keywords
//! 9. indexed, named and string-valued placeholders
//! 10. strings
//! 11. words

use crate::config::{BracketPair, DialectConfig, QuoteStyle, SpecialWordChars};
use crate::error::Result;
use crate::tokens::{Span, Token, TokenType};
use crate::trie::{new_trie_from_keys, MatchMode, Trie};
use tracing::debug;

/// Single-character operators available in every dialect
pub const BASE_OPERATORS: [char; 18] = [
    '+', '-', '/', '*', '%', '&', '|', '^', '>', '<', '=', '.', ';', '{', '}', '`', ':', '$',
];

/// Multi-character operators available in every dialect
pub const BASE_MULTI_OPERATORS: [&str; 4] = ["<>", "<=", ">=", "!="];

/// Character classes for bare words, shared by every whole-word rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordChars {
    prefix: Vec<char>,
    any: Vec<char>,
    suffix: Vec<char>,
}

impl WordChars {
    pub fn new(special: &SpecialWordChars) -> Self {
        Self {
            prefix: special.prefix.clone(),
            any: special.any.clone(),
            suffix: special.suffix.clone(),
        }
    }

    /// Unicode letters, digits, `_` and the zero-width joiners
    pub fn is_word_char(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '\u{200C}' || c == '\u{200D}'
    }

    /// Whether a whole-word match may end right before `next`
    /// (`None` is end of input).
    pub fn is_word_boundary(&self, next: Option<char>) -> bool {
        match next {
            None => true,
            Some(c) => !self.is_word_char(c) && !self.any.contains(&c) && !self.suffix.contains(&c),
        }
    }

    fn is_body_char(&self, c: char) -> bool {
        self.is_word_char(c) || self.any.contains(&c)
    }

    /// Byte length of the word body (word and `any` characters) at the start of `input`
    fn scan_body(&self, input: &str) -> usize {
        input
            .char_indices()
            .find(|(_, c)| !self.is_body_char(*c))
            .map_or(input.len(), |(idx, _)| idx)
    }

    /// Byte length of a full bare word: prefix chars, body, suffix chars
    fn scan_word(&self, input: &str) -> Option<usize> {
        let prefix_len = input
            .char_indices()
            .find(|(_, c)| !self.prefix.contains(c))
            .map_or(input.len(), |(idx, _)| idx);
        let body_len = self.scan_body(&input[prefix_len..]);
        if body_len == 0 {
            return None;
        }
        let end = prefix_len + body_len;
        let suffix_len = input[end..]
            .char_indices()
            .find(|(_, c)| !self.suffix.contains(c))
            .map_or(input.len() - end, |(idx, _)| idx);
        Some(end + suffix_len)
    }

    fn boundary_at(&self, input: &str, end: usize) -> bool {
        self.is_word_boundary(input[end..].chars().next())
    }
}

/// How a rule recognizes its text
#[derive(Debug, Clone)]
enum Matcher {
    Whitespace,
    Newline,
    BlockComment,
    LineComment(Vec<String>),
    Char(char),
    Operator {
        multi: Trie<()>,
        single: Vec<char>,
        /// Single characters that also open a placeholder or string yield
        /// whenever one of these matches at the same position
        deferred: Vec<Matcher>,
    },
    Number,
    Words(Trie<()>),
    IndexedPlaceholder {
        prefixes: Vec<String>,
        /// A bare prefix is not a placeholder where one of these opens a string
        /// (`$` before `$$body$$`)
        strings: Vec<QuoteStyle>,
    },
    NamedPlaceholder(Vec<String>),
    StringPlaceholder {
        prefixes: Vec<String>,
        styles: Vec<QuoteStyle>,
    },
    Quoted(Vec<QuoteStyle>),
    Word,
    /// Matches nothing but succeeds; stands in for a defective rule
    #[cfg(test)]
    Empty,
}

impl Matcher {
    /// Byte length of the match at the start of `input`
    fn match_len(&self, input: &str, chars: &WordChars) -> Option<usize> {
        match self {
            Matcher::Whitespace => {
                let end = input
                    .char_indices()
                    .find(|(_, c)| !c.is_whitespace() || *c == '\n' || *c == '\r')
                    .map_or(input.len(), |(idx, _)| idx);
                (end > 0).then_some(end)
            }
            Matcher::Newline => {
                if input.starts_with("\r\n") {
                    Some(2)
                } else if input.starts_with('\n') || input.starts_with('\r') {
                    Some(1)
                } else {
                    None
                }
            }
            Matcher::BlockComment => {
                let body = input.strip_prefix("/*")?;
                Some(body.find("*/").map_or(input.len(), |idx| idx + 4))
            }
            Matcher::LineComment(prefixes) => {
                longest_prefix(input, prefixes)?;
                Some(
                    input
                        .find(|c: char| c == '\n' || c == '\r')
                        .unwrap_or(input.len()),
                )
            }
            Matcher::Char(ch) => input.starts_with(*ch).then(|| ch.len_utf8()),
            Matcher::Operator {
                multi,
                single,
                deferred,
            } => {
                if let Some((end, _)) = multi.longest_match(input, MatchMode::Exact, |_| true) {
                    return Some(end);
                }
                let c = input.chars().next()?;
                if !single.contains(&c) {
                    return None;
                }
                if deferred.iter().any(|m| m.match_len(input, chars).is_some()) {
                    return None;
                }
                Some(c.len_utf8())
            }
            Matcher::Number => scan_number(input, chars),
            Matcher::Words(trie) => trie
                .longest_match(input, MatchMode::Keyword, |end| chars.boundary_at(input, end))
                .map(|(end, _)| end),
            Matcher::IndexedPlaceholder { prefixes, strings } => {
                let prefix = longest_prefix(input, prefixes)?;
                let digits = input[prefix.len()..]
                    .bytes()
                    .take_while(u8::is_ascii_digit)
                    .count();
                if digits == 0 && strings.iter().any(|s| scan_quoted(input, *s).is_some()) {
                    return None;
                }
                Some(prefix.len() + digits)
            }
            Matcher::NamedPlaceholder(prefixes) => {
                let prefix = longest_prefix(input, prefixes)?;
                let name = chars.scan_body(&input[prefix.len()..]);
                (name > 0).then_some(prefix.len() + name)
            }
            Matcher::StringPlaceholder { prefixes, styles } => {
                let prefix = longest_prefix(input, prefixes)?;
                let rest = &input[prefix.len()..];
                styles
                    .iter()
                    .find_map(|style| scan_quoted(rest, *style))
                    .map(|len| prefix.len() + len)
            }
            Matcher::Quoted(styles) => styles.iter().find_map(|style| scan_quoted(input, *style)),
            Matcher::Word => chars.scan_word(input),
            #[cfg(test)]
            Matcher::Empty => Some(0),
        }
    }
}

/// A single classification rule
#[derive(Debug, Clone)]
pub struct Rule {
    category: TokenType,
    matcher: Matcher,
}

impl Rule {
    fn new(category: TokenType, matcher: Matcher) -> Self {
        Self { category, matcher }
    }

    pub fn category(&self) -> TokenType {
        self.category
    }

    /// Byte length of this rule's match at the start of `input`, if any
    pub fn match_len(&self, input: &str, chars: &WordChars) -> Option<usize> {
        self.matcher.match_len(input, chars)
    }

    /// Build the token for text this rule matched
    pub fn token(&self, text: &str, span: Span) -> Token {
        let token = Token::new(self.category, text, span);
        match &self.matcher {
            Matcher::Words(_) => token.with_value(normalize_word(text)),
            Matcher::IndexedPlaceholder { prefixes, .. } => {
                let key = longest_prefix(text, prefixes)
                    .map(|p| &text[p.len()..])
                    .filter(|k| !k.is_empty())
                    .map(str::to_string);
                token.with_key(key)
            }
            Matcher::NamedPlaceholder(prefixes) => {
                let key = longest_prefix(text, prefixes).map(|p| text[p.len()..].to_string());
                token.with_key(key)
            }
            Matcher::StringPlaceholder { prefixes, .. } => {
                let key = longest_prefix(text, prefixes)
                    .and_then(|p| unquote_placeholder_key(&text[p.len()..]));
                token.with_key(key)
            }
            _ => token,
        }
    }
}

/// Ordered, immutable set of rules for one dialect
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    word_chars: WordChars,
}

impl RuleTable {
    /// Build the rule table for a dialect.
    ///
    /// Fails with [`crate::Error::Config`] if the configuration is malformed;
    /// no partial table is ever returned.
    pub fn build(config: &DialectConfig) -> Result<Self> {
        config.validate()?;

        let word_chars = WordChars::new(&config.special_word_chars);
        let string_styles = dedup(config.string_types.iter().copied());
        let indexed = sorted_symbols(&config.indexed_placeholder_types);
        let named = sorted_symbols(&config.named_placeholder_types);

        let mut rules = vec![
            Rule::new(TokenType::Whitespace, Matcher::Whitespace),
            Rule::new(TokenType::Newline, Matcher::Newline),
            Rule::new(TokenType::BlockComment, Matcher::BlockComment),
        ];
        if !config.line_comment_types.is_empty() {
            rules.push(Rule::new(
                TokenType::LineComment,
                Matcher::LineComment(sorted_symbols(&config.line_comment_types)),
            ));
        }

        rules.push(Rule::new(TokenType::Comma, Matcher::Char(',')));
        if config.brackets.contains(&BracketPair::Paren) {
            rules.push(Rule::new(TokenType::OpenParen, Matcher::Char('(')));
            rules.push(Rule::new(TokenType::CloseParen, Matcher::Char(')')));
        }
        if config.brackets.contains(&BracketPair::Square) {
            rules.push(Rule::new(TokenType::OpenBracket, Matcher::Char('[')));
            rules.push(Rule::new(TokenType::CloseBracket, Matcher::Char(']')));
        }

        let mut placeholder_rules = Vec::new();
        if !indexed.is_empty() {
            placeholder_rules.push(Rule::new(
                TokenType::IndexedPlaceholder,
                Matcher::IndexedPlaceholder {
                    prefixes: indexed.clone(),
                    strings: string_styles.clone(),
                },
            ));
        }
        if !named.is_empty() {
            placeholder_rules.push(Rule::new(
                TokenType::NamedPlaceholder,
                Matcher::NamedPlaceholder(named.clone()),
            ));
            let styles: Vec<QuoteStyle> = string_styles
                .iter()
                .copied()
                .filter(|s| {
                    matches!(
                        s,
                        QuoteStyle::Single
                            | QuoteStyle::Double
                            | QuoteStyle::Backtick
                            | QuoteStyle::Bracket
                    )
                })
                .collect();
            if !styles.is_empty() {
                placeholder_rules.push(Rule::new(
                    TokenType::StringPlaceholder,
                    Matcher::StringPlaceholder {
                        prefixes: named.clone(),
                        styles,
                    },
                ));
            }
        }
        let string_rule = (!string_styles.is_empty())
            .then(|| Rule::new(TokenType::String, Matcher::Quoted(string_styles.clone())));

        rules.push(Rule::new(
            TokenType::Operator,
            operator_matcher(config, &placeholder_rules, string_rule.as_ref()),
        ));
        rules.push(Rule::new(TokenType::Number, Matcher::Number));
        rules.push(Rule::new(TokenType::CaseStart, words_matcher(&["CASE".to_string()])));
        rules.push(Rule::new(TokenType::CaseEnd, words_matcher(&["END".to_string()])));

        let reserved = [
            (TokenType::ReservedCommand, &config.reserved_commands),
            (TokenType::ReservedBinaryCommand, &config.reserved_binary_commands),
            (TokenType::ReservedDependentClause, &config.reserved_dependent_clauses),
            (TokenType::ReservedLogicalOperator, &config.reserved_logical_operators),
            (TokenType::ReservedKeyword, &config.reserved_keywords),
        ];
        for (category, words) in reserved {
            if !words.is_empty() {
                rules.push(Rule::new(category, words_matcher(words)));
            }
        }

        rules.extend(placeholder_rules);
        rules.extend(string_rule);
        rules.push(Rule::new(TokenType::Word, Matcher::Word));

        debug!(
            rules = rules.len(),
            string_styles = string_styles.len(),
            indexed_placeholders = indexed.len(),
            named_placeholders = named.len(),
            "built rule table"
        );

        Ok(Self { rules, word_chars })
    }

    /// Put a rule that matches empty input ahead of every other rule
    #[cfg(test)]
    pub(crate) fn with_leading_empty_rule(mut self, category: TokenType) -> Self {
        self.rules.insert(0, Rule::new(category, Matcher::Empty));
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn word_chars(&self) -> &WordChars {
        &self.word_chars
    }

    /// First rule, in table order, matching at the start of `input`, with the
    /// byte length of its match
    pub fn match_at(&self, input: &str) -> Option<(&Rule, usize)> {
        self.rules.iter().find_map(|rule| {
            rule.match_len(input, &self.word_chars)
                .map(|len| (rule, len))
        })
    }
}

fn operator_matcher(
    config: &DialectConfig,
    placeholder_rules: &[Rule],
    string_rule: Option<&Rule>,
) -> Matcher {
    let mut multi = Trie::new();
    let mut single: Vec<char> = BASE_OPERATORS.to_vec();
    let extras = config.operators.iter().map(String::as_str);
    for op in BASE_MULTI_OPERATORS.iter().copied().chain(extras) {
        let mut chars = op.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if !single.contains(&c) {
                    single.push(c);
                }
            }
            _ => multi.insert(op, ()),
        }
    }

    let deferred = placeholder_rules
        .iter()
        .chain(string_rule)
        .map(|rule| rule.matcher.clone())
        .collect();

    Matcher::Operator {
        multi,
        single,
        deferred,
    }
}

fn words_matcher(words: &[String]) -> Matcher {
    Matcher::Words(new_trie_from_keys(words.iter().map(|w| normalize_word(w))))
}

/// Uppercase and collapse inner whitespace runs to one space
pub fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn dedup<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Deduplicated, longest first
fn sorted_symbols(symbols: &[String]) -> Vec<String> {
    let mut out = dedup(symbols.iter().cloned());
    out.sort_by(|a, b| b.len().cmp(&a.len()));
    out
}

fn longest_prefix<'p>(input: &str, prefixes: &'p [String]) -> Option<&'p str> {
    prefixes
        .iter()
        .find(|p| input.starts_with(p.as_str()))
        .map(String::as_str)
}

fn scan_number(input: &str, chars: &WordChars) -> Option<usize> {
    let bytes = input.as_bytes();
    let digits_from = |start: usize, pred: fn(&u8) -> bool| {
        start + bytes[start.min(bytes.len())..].iter().take_while(|b| pred(*b)).count()
    };

    for (marker, pred) in [(b'x', u8::is_ascii_hexdigit as fn(&u8) -> bool), (b'b', is_bin_digit)] {
        if bytes.len() > 2 && bytes[0] == b'0' && bytes[1].to_ascii_lowercase() == marker {
            let end = digits_from(2, pred);
            if end > 2 && chars.boundary_at(input, end) {
                return Some(end);
            }
        }
    }

    let mut pos = 0;
    if bytes.first() == Some(&b'-') {
        pos = 1 + bytes[1..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
    }

    let int_end = digits_from(pos, u8::is_ascii_digit);
    if int_end == pos {
        return None;
    }
    let mut candidates = vec![int_end];
    let mut end = int_end;

    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1, u8::is_ascii_digit);
        candidates.push(end);
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp, u8::is_ascii_digit);
        if exp_end > exp {
            candidates.push(exp_end);
        }
    }

    candidates
        .into_iter()
        .rev()
        .find(|end| chars.boundary_at(input, *end))
}

fn is_bin_digit(b: &u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// Byte length of a string literal of `style` at the start of `input`.
/// Unterminated literals run to end of input.
fn scan_quoted(input: &str, style: QuoteStyle) -> Option<usize> {
    match style {
        QuoteStyle::Single
        | QuoteStyle::Double
        | QuoteStyle::National
        | QuoteStyle::Hex
        | QuoteStyle::Bit
        | QuoteStyle::Escape
        | QuoteStyle::Unicode => {
            let opener = style.opener();
            let close = if style == QuoteStyle::Double { '"' } else { '\'' };
            scan_delimited(input, opener, close, true)
        }
        QuoteStyle::Backtick => scan_delimited(input, "`", '`', false),
        QuoteStyle::Bracket => scan_delimited(input, "[", ']', false),
        QuoteStyle::Dollar => scan_dollar(input),
    }
}

/// Skips `opener` (letters compared case-insensitively), then runs to the
/// first unescaped `close`. A doubled `close` is an escaped delimiter.
fn scan_delimited(input: &str, opener: &str, close: char, backslash: bool) -> Option<usize> {
    let head = input.get(..opener.len())?;
    if !head.eq_ignore_ascii_case(opener) {
        return None;
    }
    let mut iter = input[opener.len()..].char_indices().peekable();
    while let Some((idx, c)) = iter.next() {
        if backslash && c == '\\' {
            iter.next();
            continue;
        }
        if c == close && iter.next_if(|(_, next)| *next == close).is_none() {
            return Some(opener.len() + idx + c.len_utf8());
        }
    }
    Some(input.len())
}

/// `$$...$$` or `$tag$...$tag$`
fn scan_dollar(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('$')?;
    let tag_len = rest
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map_or(rest.len(), |(idx, _)| idx);
    if rest[..tag_len].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if !rest[tag_len..].starts_with('$') {
        return None;
    }
    let delimiter = &input[..tag_len + 2];
    let body = &input[delimiter.len()..];
    Some(
        body.find(delimiter)
            .map_or(input.len(), |idx| delimiter.len() + idx + delimiter.len()),
    )
}

/// `"foo ""bar"""` -> `foo "bar"`, `'a\'b'` -> `a'b`
fn unquote_placeholder_key(quoted: &str) -> Option<String> {
    let open = quoted.chars().next()?;
    let close = match open {
        '[' => ']',
        other => other,
    };
    let inner = quoted.strip_prefix(open)?;
    let inner = inner.strip_suffix(close).unwrap_or(inner);

    let mut key = String::with_capacity(inner.len());
    let mut iter = inner.chars().peekable();
    while let Some(c) = iter.next() {
        if c == '\\' && iter.peek() == Some(&close) {
            continue;
        }
        if c == close && iter.peek() == Some(&close) {
            iter.next();
        }
        key.push(c);
    }
    Some(key)
}
