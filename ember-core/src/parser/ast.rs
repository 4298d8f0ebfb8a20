use std::rc::Rc;

use crate::{
    lexer::prelude::{Literal, Token, TokenKind},
    parser::prelude::{parse_error, ParseError, ParseErrorType, Parse, Parser, Precedence},
    utils::prelude::SrcSpan
};

// statement -> <let> | <fn> | <block> | <if> | <while> | <break> | <continue> | <return> | <expression_statement>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Let(LetStatement),
    Block(Block),
    If(Conditional),
    While(ConditionalLoop),
    Break { location: SrcSpan },
    Continue { location: SrcSpan },
    Return(ReturnStatement),
    Fn(Rc<FunctionDeclaration>),
}

impl Parse for Statement {
    /// Declarations are only recognized here, at the start of a statement.
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let res = match parser.current_token().kind {
            TokenKind::Let => Self::Let(LetStatement::parse(parser, None)?),
            TokenKind::Fn => Self::Fn(Rc::new(FunctionDeclaration::parse(parser, None)?)),
            _ => Self::parse_statement(parser)?
        };

        Ok(res)
    }
}

impl Statement {
    pub fn parse_statement(parser: &mut Parser) -> Result<Self, ParseError> {
        let res = match parser.current_token().kind {
            TokenKind::If => Self::If(Conditional::parse(parser, None)?),
            TokenKind::While => Self::While(ConditionalLoop::parse(parser, None)?),
            TokenKind::Break => {
                let keyword = parser.step();
                let semicolon = parser.expect_one(TokenKind::Semicolon, "after 'break'")?;

                Self::Break { location: keyword.location.to(&semicolon.location) }
            },
            TokenKind::Continue => {
                let keyword = parser.step();
                let semicolon = parser.expect_one(TokenKind::Semicolon, "after 'continue'")?;

                Self::Continue { location: keyword.location.to(&semicolon.location) }
            },
            TokenKind::Return => Self::Return(ReturnStatement::parse(parser, None)?),
            TokenKind::LBrace => Self::Block(Block::parse(parser, None)?),
            _ => Self::Expression(ExpressionStatement::parse(parser, None)?)
        };

        Ok(res)
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Expression(statement) => statement.location,
            Self::Let(statement) => statement.location,
            Self::Block(block) => block.location,
            Self::If(conditional) => conditional.location,
            Self::While(loop_) => loop_.location,
            Self::Break { location } | Self::Continue { location } => *location,
            Self::Return(statement) => statement.location,
            Self::Fn(declaration) => declaration.location,
        }
    }
}

// expression_statement -> <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl Parse for ExpressionStatement {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let expression = Expression::parse(parser, None)?;
        let semicolon = parser.expect_one(TokenKind::Semicolon, "after expression")?;

        let location = expression.location().to(&semicolon.location);

        Ok(Self {
            expression,
            location
        })
    }
}

// let -> let <identifier> = <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: Identifier,
    pub initializer: Expression,
    pub location: SrcSpan
}

impl Parse for LetStatement {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::Let, "at the start of a declaration")?;
        let name = parser.expect_ident(ParseErrorType::ExpectedVariableName)?;

        if parser.matches(&[TokenKind::Assign]).is_none() {
            return parse_error(
                ParseErrorType::ExpectedInitializer,
                parser.current_token().location
            );
        }

        let initializer = Expression::parse(parser, None)?;
        let semicolon = parser.expect_one(TokenKind::Semicolon, "after variable declaration")?;

        Ok(Self {
            name,
            initializer,
            location: keyword.location.to(&semicolon.location)
        })
    }
}

// fn -> fn <identifier> ( [<identifier> {, <identifier>}] ) { {<statement>} }
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Vec<Statement>,
    pub location: SrcSpan
}

impl Parse for FunctionDeclaration {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::Fn, "at the start of a function")?;
        let name = parser.expect_ident(ParseErrorType::ExpectedFunctionName)?;

        parser.expect_one(TokenKind::LParen, "after function name")?;

        let mut params = vec![];

        if !parser.check(TokenKind::RParen) {
            loop {
                params.push(parser.expect_ident(ParseErrorType::ExpectedParameterName)?);

                if parser.matches(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }

        parser.expect_one(TokenKind::RParen, "after parameters")?;
        parser.expect_one(TokenKind::LBrace, "before function body")?;

        let body = parser.declarations_until_brace();
        let right_brace = parser.expect_one(TokenKind::RBrace, "after function body")?;

        Ok(Self {
            name,
            params,
            body,
            location: keyword.location.to(&right_brace.location)
        })
    }
}

// block -> { {<statement>} }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Parse for Block {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let left_brace = parser.expect_one(TokenKind::LBrace, "at the start of a block")?;

        let statements = parser.declarations_until_brace();
        let right_brace = parser.expect_one(TokenKind::RBrace, "after block")?;

        Ok(Self {
            statements,
            location: left_brace.location.to(&right_brace.location)
        })
    }
}

// conditional -> if ( <expression> ) <statement> [else <statement>]
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expression,
    pub resolution: Box<Statement>,
    pub alternative: Option<Box<Statement>>,
    pub location: SrcSpan
}

impl Parse for Conditional {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::If, "at the start of a conditional")?;

        parser.expect_one(TokenKind::LParen, "after 'if'")?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(TokenKind::RParen, "after if condition")?;

        let resolution = Box::new(Statement::parse_statement(parser)?);

        let mut end = resolution.location();

        let alternative = match parser.matches(&[TokenKind::Else]) {
            Some(_) => {
                let alternative = Statement::parse_statement(parser)?;

                end = alternative.location();

                Some(Box::new(alternative))
            },
            None => None
        };

        Ok(Self {
            condition,
            resolution,
            alternative,
            location: keyword.location.to(&end)
        })
    }
}

// conditional_loop -> while ( <expression> ) <statement>
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalLoop {
    pub condition: Expression,
    pub block: Box<Statement>,
    pub location: SrcSpan
}

impl Parse for ConditionalLoop {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::While, "at the start of a loop")?;

        parser.expect_one(TokenKind::LParen, "after 'while'")?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(TokenKind::RParen, "after while condition")?;

        let block = Box::new(Statement::parse_statement(parser)?);
        let location = keyword.location.to(&block.location());

        Ok(Self {
            condition,
            block,
            location
        })
    }
}

// return -> return [<expression>] ;
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl Parse for ReturnStatement {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::Return, "at the start of a return")?;

        let value = match parser.check(TokenKind::Semicolon) {
            true => None,
            false => Some(Expression::parse(parser, None)?)
        };

        let semicolon = parser.expect_one(TokenKind::Semicolon, "after return value")?;

        Ok(Self {
            value,
            location: keyword.location.to(&semicolon.location)
        })
    }
}

// expression -> <primitive> | <identifier> | ( <expression> ) | <unary> | <binary> | <assign> | <call>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primitive(Primitive),
    Identifier(Identifier),
    Grouping {
        expression: Box<Expression>,
        location: SrcSpan
    },
    Unary(Unary),
    Binary(Binary),
    Assign(Assign),
    Call(Call),
}

impl Parse for Expression {
    /// Parses every operator binding tighter than `precedence`. `None` is the
    /// assignment level.
    fn parse(
        parser: &mut Parser,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = precedence.unwrap_or(Precedence::Lowest);

        let mut expr = match parser.current_token().kind {
            TokenKind::Bang | TokenKind::Minus => Self::Unary(Unary::parse(parser, None)?),
            _ => Self::parse_primary(parser)?
        };

        while precedence < parser.current_precedence() {
            expr = match parser.current_precedence() {
                Precedence::Call => Self::Call(Call::parse_infix(parser, expr)?),
                Precedence::Assign => Assign::parse_infix(parser, expr)?,
                _ => Self::Binary(Binary::parse_infix(parser, expr)?)
            };
        }

        Ok(expr)
    }
}

impl Expression {
    fn parse_primary(parser: &mut Parser) -> Result<Self, ParseError> {
        let token = parser.current_token().clone();

        match token.kind {
            TokenKind::Int | TokenKind::True | TokenKind::False => {
                parser.step();

                Ok(Self::Primitive(Primitive::from(token)))
            },
            TokenKind::Ident => {
                parser.step();

                Ok(Self::Identifier(Identifier::from(token)))
            },
            TokenKind::LParen => {
                parser.step();

                let expression = Box::new(Expression::parse(parser, None)?);
                let right_paren = parser.expect_one(TokenKind::RParen, "after expression")?;

                Ok(Self::Grouping {
                    expression,
                    location: token.location.to(&right_paren.location)
                })
            },
            _ => parse_error(ParseErrorType::ExpectedExpression, token.location)
        }
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Primitive(primitive) => primitive.location(),
            Self::Identifier(ident) => ident.location,
            Self::Grouping { location, .. } => *location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location,
            Self::Assign(assign) => assign.location,
            Self::Call(call) => call.location,
        }
    }
}

// identifier -> (<letter> | _) {<letter> | <digit> | _}
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl From<Token> for Identifier {
    fn from(value: Token) -> Self {
        Identifier {
            value: value.lexeme,
            location: value.location
        }
    }
}

// primitive -> <int> | true | false
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Nil {
        location: SrcSpan
    },
    Int {
        value: i64,
        location: SrcSpan
    },
    Bool {
        value: bool,
        location: SrcSpan
    }
}

impl From<Token> for Primitive {
    fn from(value: Token) -> Self {
        let location = value.location;

        match value.literal {
            Literal::Nil => Self::Nil { location },
            Literal::Int(value) => Self::Int { value, location },
            Literal::Bool(value) => Self::Bool { value, location },
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Nil { location } |
            Self::Int { location, .. } |
            Self::Bool { location, .. } => *location
        }
    }
}

// unary -> (! | -) <unary>
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl Parse for Unary {
    fn parse(
        parser: &mut Parser,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let operator = parser.step();

        let expression = Expression::parse(parser, Some(Precedence::Prefix))?;
        let location = operator.location.to(&expression.location());

        Ok(Self {
            operator,
            expression: Box::new(expression),
            location
        })
    }
}

// binary -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Binary {
    /// The right operand only takes operators binding tighter than this one,
    /// which folds chains of one level into a left-deep tree.
    fn parse_infix(parser: &mut Parser, left: Expression) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let operator = parser.step();

        let right = Expression::parse(parser, Some(precedence))?;
        let location = left.location().to(&right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

// assign -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl Assign {
    /// Right-associative. A target other than a bare identifier is reported
    /// without unwinding, and parsing carries on with the left expression.
    fn parse_infix(parser: &mut Parser, left: Expression) -> Result<Expression, ParseError> {
        let equals = parser.step();
        let value = Expression::parse(parser, None)?;

        match left {
            Expression::Identifier(target) => {
                let location = target.location.to(&value.location());

                Ok(Expression::Assign(Self {
                    target,
                    value: Box::new(value),
                    location
                }))
            },
            left => {
                parser.report(ParseError {
                    error: ParseErrorType::InvalidAssignmentTarget,
                    span: equals.location
                });

                Ok(left)
            }
        }
    }
}

// call -> <expression> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub paren: SrcSpan,
    pub location: SrcSpan
}

impl Call {
    fn parse_infix(parser: &mut Parser, callee: Expression) -> Result<Self, ParseError> {
        let left_paren = parser.expect_one(TokenKind::LParen, "before arguments")?;

        let mut arguments = vec![];

        if !parser.check(TokenKind::RParen) {
            loop {
                arguments.push(Expression::parse(parser, None)?);

                if parser.matches(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }

        let right_paren = parser.expect_one(TokenKind::RParen, "after arguments")?;
        let location = callee.location().to(&right_paren.location);

        Ok(Self {
            callee: Box::new(callee),
            arguments,
            paren: left_paren.location.to(&right_paren.location),
            location
        })
    }
}
