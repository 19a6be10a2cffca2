//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers, decimals, signs)
//! - Character and string literals with escape sequences
//! - Operators and punctuation
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.plc".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "LET DEF DO END IF ELSE FOR IN WHILE RETURN NIL TRUE FALSE AND OR".to_string();
    let tokens = tokenize(source, Some("test.plc".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Def);
    assert_eq!(tokens[2].kind, TokenKind::Do);
    assert_eq!(tokens[3].kind, TokenKind::End);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::For);
    assert_eq!(tokens[7].kind, TokenKind::In);
    assert_eq!(tokens[8].kind, TokenKind::While);
    assert_eq!(tokens[9].kind, TokenKind::Return);
    assert_eq!(tokens[10].kind, TokenKind::Nil);
    assert_eq!(tokens[11].kind, TokenKind::True);
    assert_eq!(tokens[12].kind, TokenKind::False);
    assert_eq!(tokens[13].kind, TokenKind::And);
    assert_eq!(tokens[14].kind, TokenKind::Or);
    assert_eq!(tokens[15].kind, TokenKind::EOF);
}

#[test]
fn test_keywords_are_case_sensitive() {
    let tokens = tokenize("let Def".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_1 _under Mixed9".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_1");
    assert_eq!(tokens[2].value, "_under");
    assert_eq!(tokens[3].value, "Mixed9");
    assert!(tokens[..4].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_dash_ends_an_identifier() {
    let tokens = tokenize("total-count".to_string(), None).unwrap();

    assert_eq!(tokens[0].value, "total");
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].value, "count");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0, -7, +1.5".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Decimal);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[4].kind, TokenKind::Integer);
    assert_eq!(tokens[4].value, "-7");
    assert_eq!(tokens[6].kind, TokenKind::Decimal);
    assert_eq!(tokens[6].value, "+1.5");
}

#[test]
fn test_sign_after_operand_is_an_operator() {
    assert_eq!(
        kinds("n-1"),
        vec![TokenKind::Identifier, TokenKind::Dash, TokenKind::Integer, TokenKind::EOF]
    );
    assert_eq!(
        kinds("f(x) +2"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Plus,
            TokenKind::Integer,
            TokenKind::EOF
        ]
    );
    assert_eq!(
        kinds("0 -7"),
        vec![TokenKind::Integer, TokenKind::Dash, TokenKind::Integer, TokenKind::EOF]
    );
    assert_eq!(
        kinds("x = -1"),
        vec![TokenKind::Identifier, TokenKind::Assignment, TokenKind::Integer, TokenKind::EOF]
    );
}

#[test]
fn test_trailing_dot_is_not_a_decimal() {
    assert_eq!(
        kinds("1.toString"),
        vec![TokenKind::Integer, TokenKind::Dot, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_characters() {
    let tokens = tokenize(r"'c' '\n' '\''".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Character);
    assert_eq!(tokens[0].value, "c");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "tab\there" "quote\"d" "back\\slash""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "quote\"d");
    assert_eq!(tokens[3].value, "back\\slash");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("<= >= == != < > = + - * / . , ; : ( )"),
        vec![
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("LET  x".to_string(), None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[2].span.start.0, 6);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("x # y".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_invalid_escape() {
    let error = tokenize(r#""bad\q""#.to_string(), None).unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::InvalidEscape { escape: 'q' });
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("\"never closed".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
}

#[test]
fn test_empty_character_literal() {
    let error = tokenize("''".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
}
