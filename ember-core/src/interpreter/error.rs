use std::fmt::Display;

use thiserror::Error;

use crate::{environment::prelude::{Arity, ValueType}, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorType {
    #[error("Variable already declared in this scope: '{name}'.")]
    VariableRedeclaration { name: String },
    #[error("Function already declared in this scope: '{name}'.")]
    FunctionRedeclaration { name: String },
    #[error("Duplicate parameter name '{name}'.")]
    DuplicateParameter { name: String },
    #[error("Undefined identifier '{name}'.")]
    UndefinedIdentifier { name: String },
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String },
    #[error("Break used outside of a loop.")]
    BreakOutsideLoop,
    #[error("Continue used outside of a loop.")]
    ContinueOutsideLoop,
    #[error("Return used outside of a function.")]
    ReturnOutsideFunction,
    #[error("Expected number in {context}, got {got}.")]
    ExpectedNumber {
        context: &'static str,
        got: ValueType
    },
    #[error("Expected boolean in {context}, got {got}.")]
    ExpectedBoolean {
        context: &'static str,
        got: ValueType
    },
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Integer overflow in {context}.")]
    IntegerOverflow { context: &'static str },
    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch {
        expected: Arity,
        got: usize
    },
    #[error("Can only call functions or builtins.")]
    NotCallable { got: ValueType },
    #[error("Failed to write program output: {err}.")]
    Output { err: std::io::ErrorKind },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (String, Vec<String>) {
        let label = self.error.to_string();

        match &self.error {
            RuntimeErrorType::VariableRedeclaration { .. } |
            RuntimeErrorType::FunctionRedeclaration { .. } => {
                (label, vec!["Shadowing is only allowed in a nested block".to_string()])
            },
            RuntimeErrorType::BreakOutsideLoop |
            RuntimeErrorType::ContinueOutsideLoop => {
                (label, vec!["No loop is running at this point".to_string()])
            },
            RuntimeErrorType::NotCallable { got } => {
                (label, vec![format!("The callee is a {got}")])
            },
            _ => (label, vec![])
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location.pos, self.error)
    }
}

pub fn runtime_error<T, E: From<RuntimeError>>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, E> {
    Err(RuntimeError { error, location }.into())
}
