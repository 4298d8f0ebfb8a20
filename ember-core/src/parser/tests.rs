use crate::{
    lexer::prelude::{scan, TokenKind},
    parser::prelude::{parse, Expression, ParseError, ParseErrorType, Primitive, Statement}
};

fn parse_source(input: &str) -> (Vec<Statement>, Vec<ParseError>) {
    let (tokens, errors) = scan(input);
    assert!(errors.is_empty(), "unexpected lexical errors: {errors:?}");

    parse(tokens)
}

fn parse_module(input: &str) -> Result<Vec<Statement>, ParseError> {
    let (statements, errors) = parse_source(input);

    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(statements)
    }
}

fn error_messages(input: &str) -> Vec<String> {
    let (_, errors) = parse_source(input);

    errors.iter().map(|err| err.to_string()).collect()
}

// prefix notation keeps tree-shape assertions short
fn sexp(expression: &Expression) -> String {
    match expression {
        Expression::Primitive(Primitive::Int { value, .. }) => value.to_string(),
        Expression::Primitive(Primitive::Bool { value, .. }) => value.to_string(),
        Expression::Primitive(Primitive::Nil { .. }) => "nil".to_string(),
        Expression::Identifier(ident) => ident.value.clone(),
        Expression::Grouping { expression, .. } => format!("(group {})", sexp(expression)),
        Expression::Unary(unary) => format!("({} {})", unary.operator.lexeme, sexp(&unary.expression)),
        Expression::Binary(binary) => format!(
            "({} {} {})",
            binary.operator.lexeme,
            sexp(&binary.left),
            sexp(&binary.right)
        ),
        Expression::Assign(assign) => format!("(= {} {})", assign.target.value, sexp(&assign.value)),
        Expression::Call(call) => {
            let mut parts = vec!["call".to_string(), sexp(&call.callee)];
            parts.extend(call.arguments.iter().map(sexp));

            format!("({})", parts.join(" "))
        }
    }
}

fn expression_of(statement: &Statement) -> &Expression {
    match statement {
        Statement::Expression(statement) => &statement.expression,
        other => panic!("expected expression statement, got {other:?}")
    }
}

fn single_expression(input: &str) -> Result<String, ParseError> {
    let statements = parse_module(input)?;
    assert_eq!(1, statements.len());

    Ok(sexp(expression_of(&statements[0])))
}

#[test]
fn test_precedence_ladder() -> Result<(), ParseError> {
    assert_eq!(
        "(|| (== (+ 1 (* 2 3)) 7) (&& false true))",
        single_expression("1 + 2 * 3 == 7 || false && true;")?
    );
    assert_eq!("(< (- a 1) (/ b 2))", single_expression("a - 1 < b / 2;")?);
    assert_eq!("(!= (>= a b) (<= c d))", single_expression("a >= b != c <= d;")?);
    assert_eq!("(* (group (+ 1 2)) 3)", single_expression("(1 + 2) * 3;")?);

    Ok(())
}

#[test]
fn test_left_associativity() -> Result<(), ParseError> {
    assert_eq!("(- (- a b) c)", single_expression("a - b - c;")?);
    assert_eq!("(/ (* a b) c)", single_expression("a * b / c;")?);
    assert_eq!("(|| (|| a b) c)", single_expression("a || b || c;")?);
    assert_eq!("(== (== a b) c)", single_expression("a == b == c;")?);

    Ok(())
}

#[test]
fn test_assignment_is_right_associative() -> Result<(), ParseError> {
    assert_eq!("(= a (= b 3))", single_expression("a = b = 3;")?);
    assert_eq!("(= a (|| b c))", single_expression("a = b || c;")?);

    Ok(())
}

#[test]
fn test_prefix() -> Result<(), ParseError> {
    assert_eq!("(- (! (- x)))", single_expression("-!-x;")?);
    assert_eq!("(* (- a) b)", single_expression("-a * b;")?);
    assert_eq!("(! (call f))", single_expression("!f();")?);

    Ok(())
}

#[test]
fn test_calls() -> Result<(), ParseError> {
    assert_eq!("(call (call f 1 2) (call g))", single_expression("f(1, 2)(g());")?);
    assert_eq!("(+ 1 (call f (= x 2)))", single_expression("1 + f(x = 2);")?);
    assert_eq!("(call (group f))", single_expression("(f)();")?);

    Ok(())
}

#[test]
fn test_statements() -> Result<(), ParseError> {
    let input = r#"
        let a = 1;
        fn add(x, y) { return x + y; }
        if (a < 2) { a = 2; } else a = 3;
        while (true) { break; continue; }
        fn nothing() { return; }
        { let b = a; }
    "#;

    let statements = parse_module(input)?;
    assert_eq!(6, statements.len());

    match &statements[0] {
        Statement::Let(statement) => {
            assert_eq!("a", statement.name.value);
            assert_eq!("1", sexp(&statement.initializer));
        },
        other => panic!("expected let, got {other:?}")
    }

    match &statements[1] {
        Statement::Fn(declaration) => {
            assert_eq!("add", declaration.name.value);

            let params = declaration.params.iter()
                .map(|param| param.value.as_str())
                .collect::<Vec<&str>>();
            assert_eq!(vec!["x", "y"], params);

            assert!(matches!(
                declaration.body.as_slice(),
                [Statement::Return(statement)] if statement.value.is_some()
            ));
        },
        other => panic!("expected fn, got {other:?}")
    }

    match &statements[2] {
        Statement::If(conditional) => {
            assert_eq!("(< a 2)", sexp(&conditional.condition));
            assert!(matches!(*conditional.resolution, Statement::Block(_)));
            assert!(matches!(conditional.alternative.as_deref(), Some(Statement::Expression(_))));
        },
        other => panic!("expected if, got {other:?}")
    }

    match &statements[3] {
        Statement::While(loop_) => match loop_.block.as_ref() {
            Statement::Block(block) => assert!(matches!(
                block.statements.as_slice(),
                [Statement::Break { .. }, Statement::Continue { .. }]
            )),
            other => panic!("expected block, got {other:?}")
        },
        other => panic!("expected while, got {other:?}")
    }

    match &statements[4] {
        Statement::Fn(declaration) => {
            assert!(declaration.params.is_empty());
            assert!(matches!(
                declaration.body.as_slice(),
                [Statement::Return(statement)] if statement.value.is_none()
            ));
        },
        other => panic!("expected fn, got {other:?}")
    }

    assert!(matches!(&statements[5], Statement::Block(block) if block.statements.len() == 1));

    Ok(())
}

#[test]
fn test_dangling_else_binds_to_nearest_if() -> Result<(), ParseError> {
    let statements = parse_module("if (a) if (b) c; else d;")?;

    match &statements[0] {
        Statement::If(outer) => {
            assert!(outer.alternative.is_none());
            assert!(matches!(
                outer.resolution.as_ref(),
                Statement::If(inner) if inner.alternative.is_some()
            ));
        },
        other => panic!("expected if, got {other:?}")
    }

    Ok(())
}

#[test]
fn test_spans() -> Result<(), ParseError> {
    let input = "let x = 1 + 2;";
    let statements = parse_module(input)?;

    let Statement::Let(statement) = &statements[0] else {
        panic!("expected let");
    };

    assert_eq!((0, 14), (statement.location.start, statement.location.end));
    assert_eq!((1, 1), (statement.location.pos.line, statement.location.pos.col));
    assert_eq!((4, 5), (statement.name.location.start, statement.name.location.end));

    let initializer = statement.initializer.location();
    assert_eq!("1 + 2", &input[initializer.start as usize..initializer.end as usize]);
    assert_eq!(9, initializer.pos.col);

    let input = "fn add(a, b) {\n  return a + b;\n}";
    let statements = parse_module(input)?;

    let Statement::Fn(declaration) = &statements[0] else {
        panic!("expected fn");
    };

    assert_eq!((0, input.len() as u32), (declaration.location.start, declaration.location.end));
    assert_eq!((7, 8), (declaration.params[0].location.start, declaration.params[0].location.end));
    assert_eq!((10, 11), (declaration.params[1].location.start, declaration.params[1].location.end));

    let returned = declaration.body[0].location();
    assert_eq!("return a + b;", &input[returned.start as usize..returned.end as usize]);
    assert_eq!((2, 3), (returned.pos.line, returned.pos.col));

    Ok(())
}

#[test]
fn test_call_spans() -> Result<(), ParseError> {
    let input = "print(f(41));";
    let statements = parse_module(input)?;

    let Expression::Call(outer) = expression_of(&statements[0]) else {
        panic!("expected call");
    };

    assert_eq!((0, 12), (outer.location.start, outer.location.end));
    assert_eq!((5, 12), (outer.paren.start, outer.paren.end));
    assert_eq!(6, outer.paren.pos.col);

    let Expression::Call(inner) = &outer.arguments[0] else {
        panic!("expected call");
    };

    assert_eq!((6, 11), (inner.location.start, inner.location.end));
    assert_eq!((7, 11), (inner.paren.start, inner.paren.end));

    Ok(())
}

#[test]
fn test_composite_spans_cover_children() -> Result<(), ParseError> {
    let input = "if ((a + b) * -c == d(e, f)) { g = h; } else { i; }";
    let statements = parse_module(input)?;

    fn check(expression: &Expression, input: &str) {
        let location = expression.location();
        let text = &input[location.start as usize..location.end as usize];

        let children: Vec<&Expression> = match expression {
            Expression::Grouping { expression, .. } => {
                assert!(text.starts_with('(') && text.ends_with(')'));
                vec![expression.as_ref()]
            },
            Expression::Unary(unary) => {
                assert_eq!(unary.operator.location.start, location.start);
                vec![unary.expression.as_ref()]
            },
            Expression::Binary(binary) => vec![binary.left.as_ref(), binary.right.as_ref()],
            Expression::Assign(assign) => {
                assert_eq!(assign.target.location.start, location.start);
                vec![assign.value.as_ref()]
            },
            Expression::Call(call) => {
                assert!(text.ends_with(')'));
                let mut children = vec![call.callee.as_ref()];
                children.extend(call.arguments.iter());
                children
            },
            _ => vec![]
        };

        if let Some(first) = children.first() {
            if !matches!(expression, Expression::Grouping { .. } | Expression::Unary(_)) {
                assert_eq!(first.location().start, location.start, "{text}");
            }
        }

        if let Some(last) = children.last() {
            if !matches!(expression, Expression::Grouping { .. } | Expression::Call(_)) {
                assert_eq!(last.location().end, location.end, "{text}");
            }
        }

        for child in children {
            let child_location = child.location();
            assert!(location.start <= child_location.start && child_location.end <= location.end);
            check(child, input);
        }
    }

    let Statement::If(conditional) = &statements[0] else {
        panic!("expected if");
    };

    assert_eq!((0, input.len() as u32), (conditional.location.start, conditional.location.end));
    check(&conditional.condition, input);

    Ok(())
}

#[test]
fn test_missing_semicolon() {
    assert_eq!(
        vec!["Line 1, col 10: Expect ';' after expression.".to_string()],
        error_messages("print(1) print(2);")
    );
}

#[test]
fn test_let_requires_initializer() {
    assert_eq!(
        vec!["Line 1, col 6: Expect '=' after variable name.".to_string()],
        error_messages("let x;")
    );
}

#[test]
fn test_recovers_from_multiple_errors() {
    let (statements, errors) = parse_source("let = 1;\nlet y 2;\nprint(y);");

    let messages = errors.iter()
        .map(|err| err.to_string())
        .collect::<Vec<String>>();

    assert_eq!(
        vec![
            "Line 1, col 5: Expect variable name after 'let'.".to_string(),
            "Line 2, col 7: Expect '=' after variable name.".to_string(),
        ],
        messages
    );
    assert_eq!(1, statements.len());
}

#[test]
fn test_invalid_assignment_target() {
    let (statements, errors) = parse_source("1 = 2;\na + b = c;");

    assert_eq!(2, errors.len());
    assert_eq!(ParseErrorType::InvalidAssignmentTarget, errors[0].error);
    assert_eq!("Line 1, col 3: Invalid assignment target.", errors[0].to_string());
    assert_eq!("Line 2, col 7: Invalid assignment target.", errors[1].to_string());

    // the statements themselves survive with their left-hand side
    assert_eq!(2, statements.len());
    assert_eq!("1", sexp(expression_of(&statements[0])));
    assert_eq!("(+ a b)", sexp(expression_of(&statements[1])));
}

#[test]
fn test_declaration_not_allowed_as_branch() {
    assert_eq!(
        vec!["Line 1, col 8: Expect expression.".to_string()],
        error_messages("if (x) let y = 1;")
    );
}

#[test]
fn test_recovery_inside_block() {
    let (statements, errors) = parse_source("{ let = 1; print(1); }\nprint(2);");

    assert_eq!(1, errors.len());
    assert_eq!("Line 1, col 7: Expect variable name after 'let'.", errors[0].to_string());
    assert_eq!(2, statements.len());
    assert!(matches!(&statements[0], Statement::Block(block) if block.statements.len() == 1));
}

#[test]
fn test_unclosed_block() {
    assert_eq!(
        vec!["Line 1, col 13: Expect '}' after block.".to_string()],
        error_messages("{ let a = 1;")
    );
}

#[test]
fn test_unexpected_token_details() {
    let (_, errors) = parse_source("fn f(a b) {}");

    assert_eq!(1, errors.len());

    match &errors[0].error {
        ParseErrorType::UnexpectedToken { found, expected, .. } => {
            assert_eq!(TokenKind::Ident, *found);
            assert_eq!(TokenKind::RParen, *expected);
        },
        other => panic!("expected unexpected token error, got {other:?}")
    }

    let (label, extra) = errors[0].details();
    assert_eq!("Expect ')' after parameters.", label);
    assert_eq!(vec!["Found an Identifier".to_string()], extra);
}

#[test]
fn test_empty_input() {
    let (statements, errors) = parse_source("  // nothing here\n");

    assert!(statements.is_empty());
    assert!(errors.is_empty());
}
