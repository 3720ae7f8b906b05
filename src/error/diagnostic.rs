//! Diagnostic formatting for fatal front-end errors
//!
//! A diagnostic re-derives the offending source line, either from an
//! in-memory copy of the source or by re-opening the file with its own
//! read-only handle, and underlines the reported location with carets:
//!
//! ```text
//! --> src/main.exm
//! 3 | total = 1.2.3
//!                ^
//! error: too many decimal points for float
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use colored::{ColoredString, Colorize};

use super::{ExemeError, SourceLocation};

/// Diagnostic information for displaying errors with context
pub struct Diagnostic {
    error: ExemeError,
    source_line: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic from an error
    pub fn new(error: ExemeError) -> Self {
        Self {
            error,
            source_line: None,
        }
    }

    /// Create a diagnostic with source code context
    pub fn with_source(error: ExemeError, source: &str) -> Self {
        let source_line = error
            .location()
            .and_then(|location| nth_line(source.lines(), location.line));
        Self { error, source_line }
    }

    /// Create a diagnostic by re-reading the file named in the error location
    ///
    /// The file is opened independently of any live lexer and closed again
    /// before this returns. If it cannot be read the diagnostic is rendered
    /// without the source line.
    pub fn from_file(error: ExemeError) -> Self {
        let source_line = match error.location() {
            Some(SourceLocation {
                filename: Some(filename),
                line,
                ..
            }) => match read_line(Path::new(filename), *line) {
                Ok(line) => line,
                Err(err) => {
                    tracing::debug!(%filename, %err, "could not re-open source for diagnostic");
                    None
                }
            },
            _ => None,
        };
        Self { error, source_line }
    }

    /// The wrapped error
    pub fn error(&self) -> &ExemeError {
        &self.error
    }

    /// The source line the diagnostic points into, if it could be recovered
    pub fn source_line(&self) -> Option<&str> {
        self.source_line.as_deref()
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        self.render(true)
    }

    /// Format the diagnostic without terminal colors
    pub fn format_plain(&self) -> String {
        self.render(false)
    }

    fn render(&self, color: bool) -> String {
        let mut output = String::new();

        if let Some(filename) = self.error.filename() {
            output.push_str(&format!(
                "{} {}\n",
                paint(color, "-->", |s| s.bright_blue().bold()),
                filename
            ));
        }

        if let (Some(location), Some(line)) = (self.error.location(), &self.source_line) {
            output.push_str(&format_source_context(location, line, color));
        }

        output.push_str(&format!(
            "{} {}\n",
            paint(color, "error:", |s| s.bright_red().bold()),
            self.error.message()
        ));

        output
    }
}

/// Render `<line> | <text>` followed by the caret underline
fn format_source_context(location: &SourceLocation, line: &str, color: bool) -> String {
    let line_number = location.line.to_string();
    // "<line> | " prefix
    let prefix_width = line_number.len() + 3;

    let carets = match location.end_column {
        Some(end) => end.saturating_sub(location.column) + 1,
        None => 1,
    };

    format!(
        "{} {} {}\n{}{}\n",
        paint(color, &line_number, |s| s.blue().bold()),
        paint(color, "|", |s| s.blue().bold()),
        line,
        " ".repeat(prefix_width + location.column),
        paint(color, &"^".repeat(carets), |s| s.bright_red().bold()),
    )
}

fn paint(color: bool, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn nth_line<'a>(mut lines: impl Iterator<Item = &'a str>, line: usize) -> Option<String> {
    if line == 0 {
        return None;
    }
    lines.nth(line - 1).map(str::to_string)
}

/// Scan forward line by line (1-based) until `line` is reached
fn read_line(path: &Path, line: usize) -> io::Result<Option<String>> {
    if line == 0 {
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    for (index, text) in reader.lines().enumerate() {
        let text = text?;
        if index + 1 == line {
            return Ok(Some(text));
        }
    }
    Ok(None)
}
