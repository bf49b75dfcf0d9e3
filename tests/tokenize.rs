//! Tests for the token stream API

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

use esparse::{tokenize, EcmaVersion, Options, Token, TokenType};

#[allow(clippy::unwrap_used)]
fn tokens(source: &str, ecma: EcmaVersion) -> Vec<Token> {
    tokenize(source, Options::new(ecma))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn kinds(source: &str, ecma: EcmaVersion) -> Vec<TokenType> {
    tokens(source, ecma).into_iter().map(|t| t.token_type).collect()
}

#[test]
fn test_arrow_function_token_stream() {
    let toks = tokens("x => x+1", EcmaVersion::Es2015);
    assert_eq!(toks.len(), 6);
    assert_eq!(
        toks.iter().map(|t| t.token_type).collect::<Vec<_>>(),
        [
            TokenType::Name,
            TokenType::Arrow,
            TokenType::Name,
            TokenType::PlusMin,
            TokenType::Num,
            TokenType::Eof,
        ]
    );
    assert_eq!(toks[0].value.name(), Some("x"));
    assert_eq!(toks[3].value.punct(), Some("+"));
}

#[test]
fn test_final_eof_token() {
    let toks = tokens("a", EcmaVersion::Latest);
    let eof = toks.last().unwrap();
    assert_eq!(eof.token_type, TokenType::Eof);
    assert_eq!(eof.start, 1);
    assert_eq!(eof.end, 1);
}

#[test]
fn test_iterator_fuses_after_eof() {
    let mut it = tokenize("a", Options::new(EcmaVersion::Latest)).unwrap();
    assert!(it.next().is_some());
    assert!(it.next().is_some()); // eof
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn test_iterator_fuses_after_error() {
    let mut it = tokenize("'abc", Options::new(EcmaVersion::Latest)).unwrap();
    let first = it.next().unwrap();
    assert!(first.is_err());
    assert!(it.next().is_none());
}

#[test]
fn test_regex_vs_division() {
    assert_eq!(
        kinds("a / b", EcmaVersion::Latest),
        [TokenType::Name, TokenType::Slash, TokenType::Name, TokenType::Eof]
    );
    assert_eq!(
        kinds("/ab/g", EcmaVersion::Latest),
        [TokenType::Regexp, TokenType::Eof]
    );
    // After a closing paren of a condition, a regex may start.
    let toks = kinds("if (x) /re/.test(y)", EcmaVersion::Latest);
    assert!(toks.contains(&TokenType::Regexp));
}

#[test]
fn test_comments_produce_no_tokens() {
    assert_eq!(
        kinds("a /* c */ b // d", EcmaVersion::Latest),
        [TokenType::Name, TokenType::Name, TokenType::Eof]
    );
}

#[test]
fn test_template_token_sequence() {
    assert_eq!(
        kinds("`a${b}`", EcmaVersion::Latest),
        [
            TokenType::BackQuote,
            TokenType::Template,
            TokenType::DollarBraceL,
            TokenType::Name,
            TokenType::BraceR,
            TokenType::Template,
            TokenType::BackQuote,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_token_locations() {
    let toks = tokenize("a\nb", Options::new(EcmaVersion::Latest).with_locations())
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let loc = toks[1].loc.as_ref().unwrap();
    assert_eq!(loc.start.line, 2);
    assert_eq!(loc.start.column, 0);
}

#[test]
fn test_keyword_values() {
    let toks = tokens("typeof new", EcmaVersion::Latest);
    assert_eq!(toks[0].token_type, TokenType::TypeOf);
    assert_eq!(toks[1].token_type, TokenType::New);
    // Keyword tokens carry their word, like plain names.
    assert_eq!(toks[0].value.name(), Some("typeof"));
    assert_eq!(toks[1].value.name(), Some("new"));
}

#[test]
fn test_missing_ecma_version_rejected() {
    let options = Options::default();
    assert!(tokenize("a", options).is_err());
}
