use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("LET", TokenKind::Let);
        map.insert("DEF", TokenKind::Def);
        map.insert("DO", TokenKind::Do);
        map.insert("END", TokenKind::End);
        map.insert("IF", TokenKind::If);
        map.insert("ELSE", TokenKind::Else);
        map.insert("FOR", TokenKind::For);
        map.insert("IN", TokenKind::In);
        map.insert("WHILE", TokenKind::While);
        map.insert("RETURN", TokenKind::Return);
        map.insert("NIL", TokenKind::Nil);
        map.insert("TRUE", TokenKind::True);
        map.insert("FALSE", TokenKind::False);
        map.insert("AND", TokenKind::And);
        map.insert("OR", TokenKind::Or);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Integer,
    Decimal,
    Character,
    String,

    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    Def,
    Do,
    End,
    If,
    Else,
    For,
    In,
    While,
    Return,
    Nil,
    True,
    False,
    And,
    Or,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TokenKind {
    /// Whether a token of this kind can be the last token of an operand.
    ///
    /// A `+` or `-` directly after such a token is an operator, never a sign.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Integer
                | TokenKind::Decimal
                | TokenKind::Character
                | TokenKind::String
                | TokenKind::CloseParen
                | TokenKind::Nil
                | TokenKind::True
                | TokenKind::False
        )
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
