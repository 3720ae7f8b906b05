//! Character cursor over a single source stream
//!
//! The cursor reads one UTF-8 character at a time and keeps exactly one
//! character of pushback. It never crosses a line boundary on its own: once
//! a newline has been read, [`SourceCursor::advance`] keeps returning `false`
//! until the caller asks for the next line with [`SourceCursor::advance_line`].

use std::io::{self, BufRead};
use std::sync::Arc;

use crate::error::{ExemeError, ExemeResult};

/// Column counter value meaning "before the first character of the line"
const BEFORE_LINE_START: usize = 0;

/// Read position over one source, with one-level pushback
pub struct SourceCursor<R> {
    reader: R,
    name: Arc<str>,
    current: Option<char>,
    previous: Option<char>,
    /// A pushed-back character waiting to be read again
    pending: Option<char>,
    /// Characters consumed on the current line
    column: usize,
    line: usize,
    exhausted: bool,
}

impl<R: BufRead> SourceCursor<R> {
    /// Create a cursor positioned before the first line
    pub fn new(reader: R, name: impl Into<Arc<str>>) -> Self {
        Self {
            reader,
            name: name.into(),
            // Behaves as the end of a line zero, so the first call to
            // `advance` refuses until `advance_line` starts line one.
            current: Some('\n'),
            previous: None,
            pending: None,
            column: BEFORE_LINE_START,
            line: 0,
            exhausted: false,
        }
    }

    /// The most recently read character
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Zero-based column of the current character
    pub fn column(&self) -> usize {
        self.column.saturating_sub(1)
    }

    /// One-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether the underlying stream has been drained
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether the cursor sits on a newline and needs `advance_line`
    pub fn at_line_end(&self) -> bool {
        self.current == Some('\n')
    }

    /// Name of the source, used for diagnostics
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Read the next character
    ///
    /// Returns `false` without consuming anything when the stream is
    /// exhausted or the current character is a newline. Reading a newline
    /// also returns `false`; the newline becomes current but belongs to no
    /// token. With `skip_whitespace`, whitespace is read and discarded until
    /// a significant character turns up.
    pub fn advance(&mut self, skip_whitespace: bool) -> ExemeResult<bool> {
        if self.exhausted || self.at_line_end() {
            return Ok(false);
        }

        loop {
            self.previous = self.current;

            let c = match self.read_char() {
                Ok(Some(c)) => c,
                Ok(None) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Err(source) => {
                    self.exhausted = true;
                    return Err(ExemeError::Read {
                        filename: self.name.to_string(),
                        source,
                    });
                }
            };

            self.current = Some(c);
            self.column += 1;

            if c == '\n' {
                return Ok(false);
            }

            if !skip_whitespace || !c.is_whitespace() {
                return Ok(true);
            }
        }
    }

    /// Un-read the current character
    ///
    /// Only one level is kept: the character before the previous one is not
    /// recoverable, and a second pushback without an intervening `advance`
    /// fails with [`ExemeError::Pushback`]. A no-op returning `false` once
    /// the stream is exhausted.
    pub fn push_back(&mut self) -> ExemeResult<bool> {
        if self.exhausted {
            return Ok(false);
        }

        let current = match (self.pending, self.current) {
            (None, Some(c)) if self.column > BEFORE_LINE_START => c,
            _ => {
                return Err(ExemeError::Pushback {
                    filename: self.name.to_string(),
                })
            }
        };

        self.pending = Some(current);
        self.current = self.previous.take();
        self.column -= 1;

        Ok(true)
    }

    /// Move to the next line
    ///
    /// Without `force` this is a successful no-op unless the current line has
    /// been read up to its newline. Otherwise the column resets to before the
    /// first character, the line number increments, and leading whitespace of
    /// the new line is optionally consumed.
    pub fn advance_line(&mut self, force: bool, skip_leading_whitespace: bool) -> ExemeResult<bool> {
        if self.exhausted {
            return Ok(false);
        }

        if !force && !self.at_line_end() {
            return Ok(true);
        }

        self.previous = self.current;
        self.current = None;
        self.column = BEFORE_LINE_START;
        self.line += 1;
        tracing::trace!(source = %self.name, line = self.line, "advanced line");

        if skip_leading_whitespace {
            while self.advance(false)? {
                if !self.current.is_some_and(char::is_whitespace) {
                    self.push_back()?;
                    break;
                }
            }
        }

        Ok(true)
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.pending.take() {
            return Ok(Some(c));
        }

        let first = match self.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        let width = utf8_width(first);
        if width == 0 {
            return Err(invalid_utf8());
        }

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "truncated UTF-8 sequence"))?;
        }

        std::str::from_utf8(&buf[..width])
            .map_err(|_| invalid_utf8())
            .map(|s| s.chars().next())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }
}

fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}
