use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::Value;

/// One lexical scope. Scopes are shared through `Rc` so that a closure can
/// keep its defining scope alive after the block that created it is gone.
#[derive(Default)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            enclosing: None
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            enclosing: Some(enclosing)
        }
    }

    pub fn into_shared(self) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(self))
    }

    /// Binds `name` in this scope. Returns `false` and leaves the old binding
    /// alone when the name is already bound here.
    pub fn define(&mut self, name: &str, value: Value) -> bool {
        if self.has_local(name) {
            return false;
        }

        self.store.insert(name.to_string(), value);

        true
    }

    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(var) = self.store.get_mut(name) {
            *var = value;

            return true;
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => false
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.enclosing.as_ref()
                .and_then(|enclosing| enclosing.borrow().lookup(name))
        }
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.store.keys().collect::<Vec<&String>>();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &self.enclosing.is_some())
            .finish()
    }
}
