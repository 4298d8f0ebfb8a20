use std::fmt::Display;

use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    #[error("Unexpected character.")]
    UnrecognizedToken { tok: char },
    #[error("Unexpected '{tok}' without pair.")]
    UnpairedOperator { tok: char },
    #[error("Integer literal is too large.")]
    IntegerOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (String, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                (self.error.to_string(), vec![format!("Found {tok:?}")])
            },
            LexicalErrorType::UnpairedOperator { tok } => {
                (self.error.to_string(), vec![format!("Did you mean `{tok}{tok}`?")])
            },
            LexicalErrorType::IntegerOverflow => {
                (self.error.to_string(), vec![format!("Integers must fit in {} bits", i64::BITS)])
            }
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location.pos, self.error)
    }
}
