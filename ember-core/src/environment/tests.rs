use std::{io::Write, rc::Rc};

use super::prelude::{Arity, Builtin, Environment, Value, ValueType, NIL};

fn constant(_: &[Value], _: &mut dyn Write) -> std::io::Result<Value> {
    Ok(Value::from(7))
}

#[test]
fn test_define_rejects_same_scope_redefinition() {
    let mut env = Environment::new();

    assert!(env.define("x", Value::from(1)));
    assert!(!env.define("x", Value::from(2)));

    assert_eq!(Some(Value::from(1)), env.lookup("x"));
}

#[test]
fn test_shadowing_in_nested_scope() {
    let global = Environment::new().into_shared();
    global.borrow_mut().define("x", Value::from(1));

    let mut inner = Environment::with_enclosing(global.clone());

    assert!(!inner.has_local("x"));
    assert!(inner.define("x", Value::from(true)));
    assert_eq!(Some(Value::from(true)), inner.lookup("x"));

    assert_eq!(Some(Value::from(1)), global.borrow().lookup("x"));
}

#[test]
fn test_assign_walks_outward() {
    let global = Environment::new().into_shared();
    global.borrow_mut().define("counter", Value::from(0));

    let middle = Environment::with_enclosing(global.clone()).into_shared();
    let mut inner = Environment::with_enclosing(middle.clone());

    assert!(inner.assign("counter", Value::from(5)));
    assert!(!inner.has_local("counter"));
    assert!(!middle.borrow().has_local("counter"));

    assert_eq!(Some(Value::from(5)), global.borrow().lookup("counter"));
}

#[test]
fn test_assign_and_lookup_unbound() {
    let global = Environment::new().into_shared();
    let mut inner = Environment::with_enclosing(global.clone());

    assert!(!inner.assign("missing", NIL));
    assert_eq!(None, inner.lookup("missing"));
    assert!(!global.borrow().has_local("missing"));
}

#[test]
fn test_captured_scope_outlives_its_holder() {
    let global = Environment::new().into_shared();
    let block = Environment::with_enclosing(global.clone()).into_shared();
    block.borrow_mut().define("kept", Value::from(42));

    let captured = block.clone();
    drop(block);

    assert_eq!(Some(Value::from(42)), captured.borrow().lookup("kept"));
}

#[test]
fn test_value_equality() {
    assert_eq!(Value::from(3), Value::from(3));
    assert_ne!(Value::from(3), Value::from(4));
    assert_eq!(Value::from(false), Value::from(false));
    assert_eq!(NIL, Value::Nil);

    // different kinds never compare equal
    assert_ne!(Value::from(0), Value::from(false));
    assert_ne!(Value::from(0), NIL);
    assert_ne!(Value::from(false), NIL);

    let builtin = Rc::new(Builtin::new("seven", Arity::Fixed(0), constant));
    let same = Value::Builtin(builtin.clone());
    let twin = Value::Builtin(Rc::new(Builtin::new("seven", Arity::Fixed(0), constant)));

    assert_eq!(Value::Builtin(builtin), same);
    assert_ne!(same, twin);
}

#[test]
fn test_value_display_and_types() {
    let builtin = Value::Builtin(Rc::new(Builtin::new("seven", Arity::Fixed(0), constant)));

    let rendered = [NIL, Value::from(-12), Value::from(true), builtin.clone()]
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>();

    assert_eq!(vec!["nil", "-12", "true", "builtin"], rendered);

    assert_eq!(ValueType::Integer, Value::from(1)._type());
    assert_eq!("number", Value::from(1)._type().to_string());
    assert_eq!("boolean", Value::from(true)._type().to_string());
    assert_eq!("nil", NIL._type().to_string());
    assert_eq!("builtin", builtin._type().to_string());
}

#[test]
fn test_builtin_call_and_arity() -> std::io::Result<()> {
    let builtin = Builtin::new("seven", Arity::Fixed(0), constant);
    let mut out = Vec::new();

    assert_eq!(Value::from(7), builtin.call(&[], &mut out)?);
    assert!(builtin.arity.accepts(0));
    assert!(!builtin.arity.accepts(1));
    assert!(Arity::Variadic.accepts(0));
    assert!(Arity::Variadic.accepts(12));

    Ok(())
}
