use std::{io::Write, path::Path};

use crate::{
    lexer::prelude::{scan, Token},
    parser::prelude::{parse, Statement},
    utils::prelude::Error
};
use super::interpreter::Interpreter;

pub fn tokenize(path: &Path, src: &str) -> Result<Vec<Token>, Error> {
    let (tokens, errors) = scan(src);

    if !errors.is_empty() {
        return Err(Error::Lex {
            path: path.to_path_buf(),
            src: src.to_string(),
            errors
        });
    }

    Ok(tokens)
}

pub fn parse_source(path: &Path, src: &str) -> Result<Vec<Statement>, Error> {
    let tokens = tokenize(path, src)?;
    let (statements, errors) = parse(tokens);

    if !errors.is_empty() {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            src: src.to_string(),
            errors
        });
    }

    Ok(statements)
}

/// Feeds `src` to an existing interpreter, so globals defined by earlier
/// sources stay visible.
pub fn run_in<W: Write>(interpreter: &mut Interpreter<W>, path: &Path, src: &str) -> Result<(), Error> {
    let statements = parse_source(path, src)?;

    interpreter.run(&statements)
        .map_err(|error| Error::Runtime {
            path: path.to_path_buf(),
            src: src.to_string(),
            error
        })
}

pub fn run_source<W: Write>(path: &Path, src: &str, out: W) -> Result<(), Error> {
    let mut interpreter = Interpreter::with_output(out);

    run_in(&mut interpreter, path, src)
}
