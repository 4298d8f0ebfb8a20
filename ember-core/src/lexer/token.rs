use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Группировка
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }

    // Разделители
    Semicolon, // ;
    Comma, // ,

    // Арифметика
    Plus, // +
    Minus, // -
    Asterisk, // *
    Slash, // /

    // Присваивание
    Assign, // =

    // Сравнение
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=
    Bang, // !

    // Логические операции
    And, // &&
    Or, // ||

    // <буква>{<буква>|<цифра>|_}
    Ident,
    // {/ <цифра> /}
    Int,

    // Ключевые слова
    Let,
    If,
    Else,
    While,
    Break,
    Continue,
    Return,
    Fn,

    // Логические константы
    True,
    False,

    Eof,
}

impl TokenKind {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Return
            | TokenKind::Fn
            | TokenKind::True
            | TokenKind::False
        )
    }

    /// Tokens a statement or declaration may start with. Used to resynchronize
    /// the parser after a syntax error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Return
            | TokenKind::Fn
        )
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Assign => "=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::LessThanOrEqual => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanOrEqual => ">=",
            TokenKind::Bang => "!",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "number",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Fn => "fn",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Eof => "end of file",
        }
    }

    /// Upper-case name used by the token dump.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LParen => "LEFT_PAREN",
            TokenKind::RParen => "RIGHT_PAREN",
            TokenKind::LBrace => "LEFT_BRACE",
            TokenKind::RBrace => "RIGHT_BRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Assign => "EQUAL",
            TokenKind::Equal => "EQUAL_EQUAL",
            TokenKind::NotEqual => "BANG_EQUAL",
            TokenKind::LessThan => "LESS",
            TokenKind::LessThanOrEqual => "LESS_EQUAL",
            TokenKind::GreaterThan => "GREATER",
            TokenKind::GreaterThanOrEqual => "GREATER_EQUAL",
            TokenKind::Bang => "BANG",
            TokenKind::And => "AND_AND",
            TokenKind::Or => "OR_OR",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::Int => "NUMBER",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Return => "RETURN",
            TokenKind::Fn => "FN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

/// Value carried by number and boolean tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Literal {
    #[default]
    Nil,
    Int(i64),
    Bool(bool),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Nil => write!(f, "nil"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Bool(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Literal,
    pub location: SrcSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, literal: Literal, location: SrcSpan) -> Self {
        Self {
            kind,
            lexeme,
            literal,
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.kind.name(), self.lexeme)
    }
}

pub fn str_to_keyword(word: &str) -> Option<(TokenKind, Literal)> {
    Some(match word {
        "let" => (TokenKind::Let, Literal::Nil),
        "if" => (TokenKind::If, Literal::Nil),
        "else" => (TokenKind::Else, Literal::Nil),
        "while" => (TokenKind::While, Literal::Nil),
        "break" => (TokenKind::Break, Literal::Nil),
        "continue" => (TokenKind::Continue, Literal::Nil),
        "return" => (TokenKind::Return, Literal::Nil),
        "fn" => (TokenKind::Fn, Literal::Nil),

        "true" => (TokenKind::True, Literal::Bool(true)),
        "false" => (TokenKind::False, Literal::Bool(false)),

        _ => return None
    })
}
