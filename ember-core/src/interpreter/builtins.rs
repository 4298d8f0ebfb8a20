use std::{io::Write, rc::Rc};

use crate::environment::prelude::{Arity, Builtin, Environment, NativeFn, Value, NIL};

/// Native callables installed into every fresh global scope.
#[derive(Clone)]
pub struct Builtins {
    entries: Vec<Rc<Builtin>>
}

impl Builtins {
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    pub fn standard() -> Self {
        let mut builtins = Self::empty();
        builtins.register("print", Arity::Variadic, print);

        builtins
    }

    /// Adds a builtin, replacing one registered earlier under the same name.
    pub fn register(&mut self, name: &'static str, arity: Arity, function: NativeFn) -> &mut Self {
        let builtin = Rc::new(Builtin::new(name, arity, function));

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => *entry = builtin,
            None => self.entries.push(builtin)
        }

        self
    }

    pub fn get(&self, name: &str) -> Option<Rc<Builtin>> {
        self.entries.iter()
            .find(|entry| entry.name == name)
            .cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    pub fn install(&self, globals: &mut Environment) {
        for builtin in &self.entries {
            globals.define(builtin.name, Value::Builtin(builtin.clone()));
        }
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

/// Writes its arguments separated by single spaces, then a newline.
pub fn print(arguments: &[Value], out: &mut dyn Write) -> std::io::Result<Value> {
    let line = arguments.iter()
        .map(|argument| argument.to_string())
        .collect::<Vec<String>>()
        .join(" ");

    writeln!(out, "{line}")?;

    Ok(NIL)
}
