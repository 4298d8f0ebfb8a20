use std::path::Path;

use crate::interpreter::prelude::{parse_source, run_in, run_source, tokenize, Interpreter};
use super::prelude::{Error, SrcPos, SrcSpan};

#[test]
fn test_span_helpers() {
    let first = SrcSpan::from(4, 7, SrcPos { line: 2, col: 3 });
    let last = SrcSpan::from(12, 13, SrcPos { line: 3, col: 1 });

    let joined = first.to(&last);
    assert_eq!((4, 13), (joined.start, joined.end));
    assert_eq!(first.pos, joined.pos);
    assert_eq!(9, joined.len());
    assert!(!joined.is_empty());
    assert_eq!("4..13", joined.to_string());
    assert_eq!("Line 2, col 3", joined.pos.to_string());

    assert!(SrcSpan::default().is_empty());
    assert_eq!(SrcPos { line: 1, col: 1 }, SrcSpan::default().pos);
}

#[test]
fn test_run_source_writes_program_output() -> Result<(), Error> {
    let mut out = Vec::new();
    run_source(Path::new("main.em"), "print(1 + 1); print(true);", &mut out)?;

    assert_eq!("2\ntrue\n", String::from_utf8_lossy(&out));

    Ok(())
}

#[test]
fn test_pipeline_stops_at_first_failing_stage() {
    let path = Path::new("main.em");

    // the missing semicolon is never reached
    match tokenize(path, "let a = 1 @ 2\nprint(a)") {
        Err(err @ Error::Lex { .. }) => {
            assert_eq!(vec!["Line 1, col 11: Unexpected character.".to_string()], err.plain_lines());
        },
        other => panic!("expected lexical error, got {other:?}")
    }

    match parse_source(path, "let = 1;\nprint(1 / 0);\nlet y 2;") {
        Err(err @ Error::Parse { .. }) => {
            assert_eq!(
                vec![
                    "Line 1, col 5: Expect variable name after 'let'.".to_string(),
                    "Line 3, col 7: Expect '=' after variable name.".to_string(),
                ],
                err.plain_lines()
            );
        },
        other => panic!("expected syntax error, got {other:?}")
    }

    let mut out = Vec::new();

    match run_source(path, "print(1);\nprint(1 / 0);\nprint(2);", &mut out) {
        Err(err @ Error::Runtime { .. }) => {
            assert_eq!(vec!["Line 2, col 9: Division by zero.".to_string()], err.plain_lines());
        },
        other => panic!("expected runtime error, got {other:?}")
    }

    assert_eq!("1\n", String::from_utf8_lossy(&out));
}

#[test]
fn test_run_in_keeps_globals() -> Result<(), Error> {
    let path = Path::new("<repl>");
    let mut interpreter = Interpreter::with_output(Vec::new());

    run_in(&mut interpreter, path, "fn double(x) { return x * 2; }")?;
    run_in(&mut interpreter, path, "let a = double(4);")?;
    assert!(run_in(&mut interpreter, path, "a();").is_err());
    run_in(&mut interpreter, path, "print(a);")?;

    assert_eq!("8\n", String::from_utf8_lossy(interpreter.output()));

    Ok(())
}

#[test]
fn test_pretty_syntax_error() {
    let err = parse_source(Path::new("main.em"), "print(1) print(2);")
        .err()
        .unwrap();

    let pretty = err.pretty_string();

    assert!(pretty.contains("error: Syntax error"), "{pretty}");
    assert!(pretty.contains("main.em:1:10"), "{pretty}");
    assert!(pretty.contains("Expect ';' after expression."), "{pretty}");
    assert!(pretty.contains("Found an Identifier"), "{pretty}");
}

#[test]
fn test_pretty_runtime_error() {
    let mut out = Vec::new();
    let err = run_source(Path::new("calc.em"), "let x = 1;\nlet x = 2;", &mut out)
        .err()
        .unwrap();

    let pretty = err.pretty_string();

    assert!(pretty.contains("error: Runtime error"), "{pretty}");
    assert!(pretty.contains("calc.em:2:5"), "{pretty}");
    assert!(pretty.contains("Variable already declared in this scope: 'x'."), "{pretty}");
}

#[test]
fn test_io_error() {
    let err = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));

    assert_eq!(Error::StdIo { err: std::io::ErrorKind::NotFound }, err);
    assert_eq!(1, err.to_diagnostics().len());
    assert!(err.pretty_string().contains("error: Standard IO error"));
    assert!(err.plain_lines()[0].starts_with("IO operation failed"));
}
