//! Error handling and diagnostics for the Exeme front end
//!
//! Every failure is fatal to the lexing run, but none of them terminates the
//! process from inside the library: they are returned as [`ExemeError`] and the
//! driver decides whether to print and exit.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for Exeme operations
pub type ExemeResult<T> = Result<T, ExemeError>;

/// Source location information for error reporting
///
/// Columns are zero-based offsets from the start of the line, lines are
/// one-based. A location without an `end_column` is a single point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column of the first marked character (0-based)
    pub column: usize,
    /// Inclusive end column when the location covers a span
    pub end_column: Option<usize>,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a point location
    pub fn point(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            end_column: None,
            filename,
        }
    }

    /// Create a location covering `[column, end_column]`
    pub fn span(line: usize, column: usize, end_column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            end_column: Some(end_column.max(column)),
            filename,
        }
    }

    /// Create a point location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::point(line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column + 1)
        } else {
            write!(f, "{}:{}", self.line, self.column + 1)
        }
    }
}

/// Classifies a lexical-structure fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Backslash followed by a character outside the escape table
    InvalidEscape,
    /// More than one decoded character between single quotes
    MultiCharacterChar,
    /// End of input (or line) before the closing `'`
    UnterminatedChar,
    /// End of input (or line) before the closing `"`
    UnterminatedString,
    /// A letter inside a numeric literal
    InvalidIntegerCharacter,
    /// A second `.` inside a float literal
    TooManyDecimalPoints,
    /// Stray punctuation glued onto an operator
    UnexpectedContinuation(String),
    /// `&` or `|` followed by something other than itself
    InvalidPrefix { expected: char, found: char },
    /// `&` or `|` at the end of a line or of the input
    IncompleteOperator(char),
    /// A character that cannot start any token
    UnrecognizedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscape => write!(f, "invalid escape sequence"),
            Self::MultiCharacterChar => write!(f, "multi-character char"),
            Self::UnterminatedChar => write!(f, "unterminated char"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::InvalidIntegerCharacter => write!(f, "invalid character for integer"),
            Self::TooManyDecimalPoints => write!(f, "too many decimal points for float"),
            Self::UnexpectedContinuation(lexeme) => {
                write!(f, "unexpected continuation of token '{}'", lexeme)
            }
            Self::InvalidPrefix { expected, found } => write!(
                f,
                "'{}{}' is not a valid token prefix - did you mean '{}{}'",
                expected, found, expected, expected
            ),
            Self::IncompleteOperator(c) => write!(
                f,
                "'{}' is not a valid token - did you mean '{}{}'",
                c, c, c
            ),
            Self::UnrecognizedCharacter(c) => write!(f, "unrecognized character '{}'", c),
        }
    }
}

/// Main error type for the Exeme front end
#[derive(Debug, thiserror::Error)]
pub enum ExemeError {
    /// The source file could not be opened
    #[error("failed to open file '{}'", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading from an open source failed
    #[error("failed to read from '{filename}': {source}")]
    Read {
        filename: String,
        #[source]
        source: io::Error,
    },
    /// A second pushback without an intervening advance
    #[error("failed to unget char in {filename}")]
    Pushback { filename: String },
    /// Lexical analysis error
    #[error("{kind}")]
    Lex {
        kind: LexErrorKind,
        location: SourceLocation,
    },
}

impl ExemeError {
    /// Create a new lexer error
    pub fn lex(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self::Lex { kind, location }
    }

    /// Get the error category as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::Open { .. } | Self::Read { .. } | Self::Pushback { .. } => "I/O Error",
            Self::Lex { .. } => "Lexer Error",
        }
    }

    /// Get the lexical fault, if this is one
    pub fn lex_kind(&self) -> Option<&LexErrorKind> {
        match self {
            Self::Lex { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Lex { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Name of the source the error refers to, if known
    pub fn filename(&self) -> Option<String> {
        match self {
            Self::Open { path, .. } => Some(path.display().to_string()),
            Self::Read { filename, .. } | Self::Pushback { filename } => Some(filename.clone()),
            Self::Lex { location, .. } => location.filename.clone(),
        }
    }
}
