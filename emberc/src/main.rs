mod cli;
mod repl;

use std::{path::{Path, PathBuf}, process::ExitCode, time::Instant};

use clap::Parser;
use cli::{print_diagnostics, print_failed, print_finished, print_running};
use ember_core::{
    interpreter::prelude::{run_source, tokenize},
    utils::prelude::Error
};

#[derive(Parser)]
#[command(version, about = "Runs programs written in the Ember scripting language")]
enum Command {
    /// Scans, parses and runs a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Render diagnostics as annotated source snippets
        #[arg(long, default_value_t = false)]
        pretty: bool,
        /// Do not print status lines
        #[arg(short, long, default_value_t = false)]
        quiet: bool
    },
    /// Prints the token stream of a source file, one `KIND 'lexeme'` per line
    Tokens {
        /// Path of source file
        path: PathBuf,
        /// Render diagnostics as annotated source snippets
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Runs Read Eval Print Loop
    Repl {
        /// Render diagnostics as annotated source snippets
        #[arg(long, default_value_t = false)]
        pretty: bool,
    }
}

fn main() -> ExitCode {
    match Command::parse() {
        Command::Run { path, pretty, quiet } => run(&path, pretty, quiet),
        Command::Tokens { path, pretty } => {
            match read_source(&path).and_then(|src| tokenize(&path, &src)) {
                Ok(tokens) => {
                    for token in tokens {
                        println!("{token}");
                    }

                    ExitCode::SUCCESS
                },
                Err(err) => {
                    print_diagnostics(&err, pretty);

                    ExitCode::FAILURE
                }
            }
        },
        Command::Repl { pretty } => match repl::start(pretty) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                print_diagnostics(&Error::from(err), pretty);

                ExitCode::FAILURE
            }
        }
    }
}

fn run(path: &Path, pretty: bool, quiet: bool) -> ExitCode {
    let name = path.to_string_lossy();

    if !quiet {
        print_running(&name);
    }

    let start = Instant::now();

    let res = read_source(path)
        .and_then(|src| run_source(path, &src, std::io::stdout().lock()));

    match res {
        Ok(()) => {
            if !quiet {
                print_finished(start.elapsed());
            }

            ExitCode::SUCCESS
        },
        Err(err) => {
            print_diagnostics(&err, pretty);

            if !quiet {
                print_failed(&name);
            }

            ExitCode::FAILURE
        }
    }
}

fn read_source(path: &Path) -> Result<String, Error> {
    Ok(std::fs::read_to_string(path)?)
}
