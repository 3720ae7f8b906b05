//! Lexer configuration
//!
//! Two behaviours of the scanner are policy rather than fixed semantics and
//! are selected here.

/// Options controlling how the lexer treats comments and line breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerConfig {
    /// Emit a `Comment` token for `#` comments instead of discarding them
    pub emit_comment_tokens: bool,
    /// Let char, string and numeric literals continue past the end of a line
    ///
    /// A char or string keeps the line break as `'\n'`. A number picks up
    /// again after the leading whitespace of the next non-blank line.
    pub allow_multiline_literals: bool,
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_tokens(mut self, emit: bool) -> Self {
        self.emit_comment_tokens = emit;
        self
    }

    pub fn with_multiline_literals(mut self, allow: bool) -> Self {
        self.allow_multiline_literals = allow;
        self
    }
}
