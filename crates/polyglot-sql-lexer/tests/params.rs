//! Placeholder resolution driven by lexer output

use polyglot_sql_lexer::{tokenize, DialectType, ParamSource, Params, Token};

/// Replace every placeholder token with its resolved value, keeping the
/// placeholder text when no value is available.
fn substitute(tokens: &[Token], params: &mut Params) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.token_type.is_placeholder() {
            match params.resolve_token(token) {
                Some(value) => out.push_str(value),
                None => out.push_str(&token.text),
            }
        } else {
            out.push_str(&token.text);
        }
    }
    out
}

#[test]
fn test_positional_substitution() {
    let tokens = tokenize("SELECT * FROM t WHERE a = ? AND b = ?", DialectType::Generic).unwrap();
    let mut params = Params::new(Some(ParamSource::positional(["1", "'x'"])));
    assert_eq!(
        substitute(&tokens, &mut params),
        "SELECT * FROM t WHERE a = 1 AND b = 'x'"
    );
    assert_eq!(params.position(), 2);
}

#[test]
fn test_positional_runs_out() {
    let tokens = tokenize("VALUES (?, ?, ?)", DialectType::SQLite).unwrap();
    let mut params = Params::new(Some(ParamSource::positional(["a", "b"])));
    assert_eq!(substitute(&tokens, &mut params), "VALUES (a, b, ?)");
}

#[test]
fn test_named_substitution() {
    let tokens = tokenize(
        "SELECT * FROM t WHERE id = :id OR owner = :\"owner id\" OR x = :missing",
        DialectType::SQLite,
    )
    .unwrap();
    let mut params = Params::new(Some(ParamSource::named([
        ("id", "42"),
        ("owner id", "'bob'"),
    ])));
    assert_eq!(
        substitute(&tokens, &mut params),
        "SELECT * FROM t WHERE id = 42 OR owner = 'bob' OR x = :missing"
    );
}

#[test]
fn test_numbered_placeholders_with_named_source() {
    let tokens = tokenize("SELECT $2, $1", DialectType::PostgreSQL).unwrap();
    let mut params = Params::new(Some(ParamSource::named([("1", "first"), ("2", "second")])));
    assert_eq!(substitute(&tokens, &mut params), "SELECT second, first");
}

#[test]
fn test_no_source_keeps_placeholders() {
    let sql = "SELECT @a, @b FROM t";
    let tokens = tokenize(sql, DialectType::TSQL).unwrap();
    let mut params = Params::default();
    assert_eq!(substitute(&tokens, &mut params), sql);
}

#[test]
fn test_params_from_json() {
    let source: ParamSource = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
    let tokens = tokenize("DELETE FROM t WHERE id = @id", DialectType::TSQL).unwrap();
    let mut params = Params::new(Some(source));
    assert_eq!(
        substitute(&tokens, &mut params),
        "DELETE FROM t WHERE id = 7"
    );
}
