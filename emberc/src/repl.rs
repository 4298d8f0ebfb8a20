use std::{io::Write, path::Path};

use ember_core::interpreter::prelude::{run_in, Interpreter};

use crate::cli::print_diagnostics;

const PROMPT: &str = ">> ";
const EXIT: &str = ".exit";

/// Evaluates one line at a time until `.exit` or end of input. Definitions
/// made on earlier lines stay visible, and an error only discards its line.
pub fn start(pretty: bool) -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let path = Path::new("<repl>");

	let mut interpreter = Interpreter::new();
	let mut line = String::new();

	loop {
		print!("{PROMPT}");
		std::io::stdout().flush()?;

		line.clear();
		if stdin.read_line(&mut line)? == 0 {
			println!();
			return Ok(());
		}

		let input = line.trim_end_matches(['\r', '\n']);

		if input.trim() == EXIT {
			return Ok(());
		}

		if input.trim().is_empty() {
			continue;
		}

		if let Err(err) = run_in(&mut interpreter, path, input) {
			print_diagnostics(&err, pretty);
		}
	}
}
