use std::{io::Write, path::PathBuf};

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity},
    files::SimpleFile,
    term::{self, Config},
};
use termcolor::{ColorSpec, WriteColor};

use super::src_span::SrcSpan;

/// A message attached to a byte range of the source.
pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    fn to_codespan(&self, style: LabelStyle) -> CodespanLabel<()> {
        let label = CodespanLabel::new(style, (), (self.span.start as usize)..(self.span.end as usize));

        match &self.text {
            Some(text) => label.with_message(text),
            None => label,
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

/// One reportable problem. With a location it is rendered as an annotated
/// source snippet, without one as a bare `error: title` line.
pub struct Diagnostic<'a> {
    pub title: String,
    pub notes: Vec<String>,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut impl WriteColor) -> std::io::Result<()> {
        match &self.location {
            Some(location) => self.write_snippet(location, buf),
            None => self.write_bare(buf),
        }
    }

    fn write_snippet(&self, location: &Location, buf: &mut impl WriteColor) -> std::io::Result<()> {
        let file = SimpleFile::new(location.path.to_string_lossy(), location.src);

        let labels = std::iter::once(location.label.to_codespan(LabelStyle::Primary))
            .chain(location.extra_labels.iter().map(|label| label.to_codespan(LabelStyle::Secondary)))
            .collect();

        let diagnostic = CodespanDiagnostic::new(Severity::Error)
            .with_message(&self.title)
            .with_labels(labels)
            .with_notes(self.notes.clone());

        term::emit(buf, &Config::default(), &file, &diagnostic)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
    }

    fn write_bare(&self, buf: &mut impl WriteColor) -> std::io::Result<()> {
        use termcolor::Color;

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Red)))?;
        write!(buf, "error")?;
        buf.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(buf, ": {}", self.title)?;
        buf.reset()?;

        for note in &self.notes {
            writeln!(buf, "  = {note}")?;
        }

        Ok(())
    }
}
