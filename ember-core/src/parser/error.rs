use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::prelude::TokenKind, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("Expect variable name after 'let'.")]
    ExpectedVariableName,
    #[error("Expect '=' after variable name.")]
    ExpectedInitializer,
    #[error("Expect function name after 'fn'.")]
    ExpectedFunctionName,
    #[error("Expect parameter name.")]
    ExpectedParameterName,
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    #[error("Expect '{expected}' {context}.")]
    UnexpectedToken {
        found: TokenKind,
        expected: TokenKind,
        context: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (String, Vec<String>) {
        let label = self.error.to_string();

        match &self.error {
            ParseErrorType::UnexpectedToken { found, .. } => {
                let found = match found {
                    TokenKind::Int => "a Number".to_string(),
                    TokenKind::Ident => "an Identifier".to_string(),
                    TokenKind::Eof => "the end of file".to_string(),
                    _ if found.is_reserved_word() => format!("the keyword `{}`", found.as_literal()),
                    _ => format!("`{}`", found.as_literal())
                };

                (label, vec![format!("Found {found}")])
            },
            ParseErrorType::InvalidAssignmentTarget => {
                (label, vec!["Only a plain variable name can be assigned to".to_string()])
            },
            _ => (label, vec![])
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.span.pos, self.error)
    }
}
