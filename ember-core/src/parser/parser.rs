use crate::{lexer::prelude::{Literal, Token, TokenKind}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Identifier, Statement};

pub trait Parse
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser {
    pub errors: Vec<ParseError>,

    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|token| token.is(TokenKind::Eof)) {
            let location = tokens.last()
                .map(|token| SrcSpan::from(token.location.end, token.location.end, token.location.pos))
                .unwrap_or_default();

            tokens.push(Token::new(TokenKind::Eof, String::new(), Literal::Nil, location));
        }

        Self {
            errors: vec![],

            tokens,
            current: 0,
        }
    }

    /// Parses declarations until the end of input. Statements that fail to
    /// parse are left out and their errors end up in `errors`.
    pub fn parse(&mut self) -> Vec<Statement> {
        let mut statements = vec![];

        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        statements
    }

    pub fn declaration(&mut self) -> Option<Statement> {
        match Statement::parse(self, None) {
            Ok(statement) => Some(statement),
            Err(err) => {
                self.report(err);
                self.synchronize();

                None
            }
        }
    }

    /// Body of a block or function, up to (not including) the closing brace.
    pub fn declarations_until_brace(&mut self) -> Vec<Statement> {
        let mut statements = vec![];

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        statements
    }

    /// Skips tokens until just past a `;` or right before a token that starts
    /// a new statement.
    pub fn synchronize(&mut self) {
        self.step();

        while !self.is_at_end() {
            if self.previous().is(TokenKind::Semicolon) {
                return;
            }

            if self.current_token().kind.starts_statement() {
                return;
            }

            self.step();
        }
    }

    pub fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub fn is_at_end(&self) -> bool {
        self.current_token().is(TokenKind::Eof)
    }

    /// Consumes the current token and returns it. Never moves past the
    /// end-of-stream token.
    pub fn step(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous().clone()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current_token().is(kind)
    }

    pub fn matches(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        match kinds.iter().any(|kind| self.check(*kind)) {
            true => Some(self.step()),
            false => None
        }
    }

    pub fn expect_one(&mut self, kind: TokenKind, context: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.step());
        }

        let found = self.current_token();

        parse_error(
            ParseErrorType::UnexpectedToken {
                found: found.kind,
                expected: kind,
                context,
            },
            found.location
        )
    }

    pub fn expect_ident(&mut self, error: ParseErrorType) -> Result<Identifier, ParseError> {
        match self.check(TokenKind::Ident) {
            true => Ok(Identifier::from(self.step())),
            false => parse_error(error, self.current_token().location)
        }
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token().kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Assign,
    Or,
    And,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call
}

impl From<&TokenKind> for Precedence {
    fn from(value: &TokenKind) -> Self {
        match value {
            TokenKind::Assign => Self::Assign,
            TokenKind::Or => Self::Or,
            TokenKind::And => Self::And,
            TokenKind::Equal | TokenKind::NotEqual => Self::Equals,
            TokenKind::LessThan | TokenKind::GreaterThan |
            TokenKind::LessThanOrEqual | TokenKind::GreaterThanOrEqual => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Self::Product,
            TokenKind::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

/// Parses a whole token stream, collecting every syntax error instead of
/// stopping at the first one.
pub fn parse(tokens: Vec<Token>) -> (Vec<Statement>, Vec<ParseError>) {
    let mut parser = Parser::new(tokens);
    let statements = parser.parse();

    (statements, parser.errors)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
