use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use ember_core::utils::prelude::Error;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Status {
    Running,
    Finished,
    Failed
}

impl Status {
    fn label(&self) -> (&'static str, Color) {
        match self {
            Status::Running => ("Running", Color::Cyan),
            Status::Finished => ("Finished", Color::Green),
            Status::Failed => ("Failed", Color::Red),
        }
    }
}

pub(crate) fn print_running(path: &str) {
    print_status(Status::Running, path)
}

pub(crate) fn print_finished(duration: Duration) {
    print_status(Status::Finished, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_failed(path: &str) {
    print_status(Status::Failed, path)
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}

/// Right-aligned, coloured status word followed by `text`, on stderr.
pub(crate) fn print_status(status: Status, text: &str) {
    let (prefix, color) = status.label();

    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    // nowhere left to report a broken stderr
    let _ = write_prefixed(&mut buffer, prefix, color, text)
        .and_then(|_| buffer_writer.print(&buffer));
}

fn write_prefixed(buffer: &mut Buffer, prefix: &str, color: Color, text: &str) -> std::io::Result<()> {
    buffer.set_color(ColorSpec::new().set_intense(true).set_bold(true).set_fg(Some(color)))?;
    write!(buffer, "{prefix: >11}")?;
    buffer.reset()?;
    writeln!(buffer, " {text}")
}

/// Writes every diagnostic of `err` to stderr, either as source snippets
/// or as one `Line {line}, col {col}: {message}` line per error.
pub(crate) fn print_diagnostics(err: &Error, pretty: bool) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    if !pretty || err.pretty(&mut buffer).is_err() {
        buffer.clear();

        for line in err.plain_lines() {
            let _ = writeln!(buffer, "{line}");
        }
    }

    let _ = buffer_writer.print(&buffer);
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
