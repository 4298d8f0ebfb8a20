use std::path::{Path, PathBuf};

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    interpreter::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Location};

/// Whatever stopped a source from running, together with the source itself
/// so that it can be rendered against the offending lines.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to scan source code")]
    Lex {
        path: PathBuf,
        src: String,
        errors: Vec<LexicalError>
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("program stopped with a runtime error")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::StdIo { err: value.kind() }
    }
}

impl Error {
    /// One `Line {line}, col {col}: {message}` string per reported error.
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            Error::Lex { errors, .. } => errors.iter().map(|err| err.to_string()).collect(),
            Error::Parse { errors, .. } => errors.iter().map(|err| err.to_string()).collect(),
            Error::Runtime { error, .. } => vec![error.to_string()],
            Error::StdIo { err } => vec![format!("{}: {err}", self)]
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        match self.pretty(&mut nocolor) {
            Ok(()) => String::from_utf8_lossy(nocolor.as_slice()).to_string(),
            Err(_) => self.plain_lines().join("\n")
        }
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, errors } => {
                errors.iter()
                    .map(|error| {
                        let (label, extra) = error.details();

                        located(path, src, "Invalid token", label, extra, error.location)
                    })
                    .collect()
            },
            Error::Parse { path, src, errors } => {
                errors.iter()
                    .map(|error| {
                        let (label, extra) = error.details();

                        located(path, src, "Syntax error", label, extra, error.span)
                    })
                    .collect()
            },
            Error::Runtime { path, src, error } => {
                let (label, extra) = error.details();

                vec![located(path, src, "Runtime error", label, extra, error.location)]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    notes: vec![format!("{err}")],
                    location: None,
                }]
            }
        }
    }
}

fn located<'a>(
    path: &Path,
    src: &'a str,
    title: &str,
    label: String,
    extra: Vec<String>,
    span: SrcSpan
) -> Diagnostic<'a> {
    Diagnostic {
        title: title.into(),
        notes: extra,
        location: Some(Location {
            src,
            path: path.to_path_buf(),
            label: Label {
                text: Some(label),
                span,
            },
            extra_labels: vec![],
        }),
    }
}
