use std::{cell::RefCell, fmt::{Debug, Display}, io::Write, rc::Rc};

use crate::parser::prelude::FunctionDeclaration;

use super::environment::Environment;

pub const NIL: Value = Value::Nil;

#[derive(Clone)]
pub enum Value {
    Nil,
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    Function(Rc<Function>),
    Builtin(Rc<Builtin>),
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Nil => ValueType::Nil,
            Self::Integer { .. } => ValueType::Integer,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Function(_) => ValueType::Function,
            Self::Builtin(_) => ValueType::Builtin,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer { value }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean { value }
    }
}

// callables are equal only to themselves
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Integer { value: a }, Self::Integer { value: b }) => a == b,
            (Self::Boolean { value: a }, Self::Boolean { value: b }) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Function(_) => write!(f, "function"),
            Value::Builtin(_) => write!(f, "builtin"),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Function(function) => write!(f, "Function({})", function.declaration.name.value),
            Value::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
            other => write!(f, "{other}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Nil,
    Integer,
    Boolean,
    Function,
    Builtin
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Nil => "nil",
            ValueType::Integer => "number",
            ValueType::Boolean => "boolean",
            ValueType::Function => "function",
            ValueType::Builtin => "builtin",
        };

        write!(f, "{name}")
    }
}

/// A user function together with the scope it was declared in.
pub struct Function {
    pub declaration: Rc<FunctionDeclaration>,
    pub closure: Rc<RefCell<Environment>>
}

impl Function {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(expected) => *expected == count,
            Arity::Variadic => true
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Fixed(count) => write!(f, "{count}"),
            Arity::Variadic => write!(f, "any number of")
        }
    }
}

pub type NativeFn = fn(&[Value], &mut dyn Write) -> std::io::Result<Value>;

pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub function: NativeFn
}

impl Builtin {
    pub fn new(name: &'static str, arity: Arity, function: NativeFn) -> Self {
        Self {
            name,
            arity,
            function
        }
    }

    pub fn call(&self, arguments: &[Value], out: &mut dyn Write) -> std::io::Result<Value> {
        (self.function)(arguments, out)
    }
}
