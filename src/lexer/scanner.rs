//! Lexer/Scanner implementation for the Exeme language
//!
//! The scanner pulls characters from a [`SourceCursor`], dispatches on the
//! first significant character of each token and emits at most one token
//! per call. Any malformed input ends the run with an [`ExemeError`]; there
//! is no resynchronisation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use super::cursor::SourceCursor;
use super::stream::TokenStream;
use super::token::{Keyword, Span, Token, TokenKind};
use crate::config::LexerConfig;
use crate::error::{ExemeError, ExemeResult, LexErrorKind, SourceLocation};

/// Lexer for Exeme source code
pub struct Lexer<R> {
    cursor: SourceCursor<R>,
    config: LexerConfig,
    filename: Option<Arc<str>>,
    tokens: TokenStream,
    finished: bool,
}

impl Lexer<BufReader<File>> {
    /// Open a source file for lexing
    pub fn open(path: impl AsRef<Path>) -> ExemeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ExemeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened source");
        Ok(Self::from_reader(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }
}

impl<'a> Lexer<&'a [u8]> {
    /// Create a lexer over in-memory source text
    pub fn new(source: &'a str, filename: Option<&str>) -> Self {
        let filename: Option<Arc<str>> = filename.map(Arc::from);
        let name = filename.clone().unwrap_or_else(|| Arc::from("<input>"));
        Self {
            cursor: SourceCursor::new(source.as_bytes(), name),
            config: LexerConfig::default(),
            filename,
            tokens: TokenStream::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> Lexer<R> {
    /// Create a lexer over any buffered reader
    pub fn from_reader(reader: R, name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self {
            cursor: SourceCursor::new(reader, Arc::clone(&name)),
            config: LexerConfig::default(),
            filename: Some(name),
            tokens: TokenStream::new(),
            finished: false,
        }
    }

    /// Replace the lexer configuration
    pub fn with_config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    /// Tokens produced so far
    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Lex the whole source
    #[tracing::instrument(level = "debug", skip_all, fields(source = %self.cursor.name()))]
    pub fn tokenize(mut self) -> ExemeResult<TokenStream> {
        while self.next_token()?.is_some() {}
        tracing::debug!(tokens = self.tokens.len(), "lexing finished");
        Ok(self.tokens)
    }

    /// Pull and classify exactly one token
    ///
    /// Skips whitespace, blank lines and (unless configured otherwise)
    /// comments. Returns `Ok(None)` at the end of input, and keeps doing so
    /// after the first error.
    pub fn next_token(&mut self) -> ExemeResult<Option<Token>> {
        if self.finished {
            return Ok(None);
        }

        match self.scan_token() {
            Ok(Some(token)) => {
                tracing::trace!(kind = ?token.kind, lexeme = %token.lexeme, span = %token.span, "token");
                self.tokens.push(token.clone());
                Ok(Some(token))
            }
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }

    fn scan_token(&mut self) -> ExemeResult<Option<Token>> {
        loop {
            if !self.cursor.advance(true)? {
                if self.cursor.is_exhausted() {
                    return Ok(None);
                }
                self.cursor.advance_line(true, false)?;
                continue;
            }

            if let Some(token) = self.lex_next()? {
                return Ok(Some(token));
            }
        }
    }

    /// Dispatch on the current character
    fn lex_next(&mut self) -> ExemeResult<Option<Token>> {
        let c = match self.cursor.current() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '\'' => self.lex_quoted('\'')?,
            '"' => self.lex_quoted('"')?,
            '#' => return self.lex_comment(),

            // Single-character tokens
            '(' => self.punctuation(TokenKind::OpenParen, c),
            ')' => self.punctuation(TokenKind::CloseParen, c),
            '[' => self.punctuation(TokenKind::OpenBracket, c),
            ']' => self.punctuation(TokenKind::CloseBracket, c),
            '{' => self.punctuation(TokenKind::OpenBrace, c),
            '}' => self.punctuation(TokenKind::CloseBrace, c),
            ',' => self.punctuation(TokenKind::Comma, c),
            '.' => self.punctuation(TokenKind::Dot, c),
            '@' => self.punctuation(TokenKind::At, c),
            ':' => self.lex_colon()?,

            // Operators
            '*' => self.lex_operator(TokenKind::Multiply, Some(TokenKind::Exponent))?,
            '/' => self.lex_operator(TokenKind::Divide, Some(TokenKind::FloorDivide))?,
            '=' => self.lex_operator(TokenKind::Assign, Some(TokenKind::EqualTo))?,
            '<' => self.lex_operator(TokenKind::LessThan, Some(TokenKind::ShiftLeft))?,
            '>' => self.lex_operator(TokenKind::GreaterThan, Some(TokenKind::ShiftRight))?,
            '+' => self.lex_operator(TokenKind::Add, None)?,
            '%' => self.lex_operator(TokenKind::Modulo, None)?,
            '^' => self.lex_operator(TokenKind::BitwiseXor, None)?,
            '~' => self.lex_operator(TokenKind::BitwiseNot, None)?,
            '!' => self.lex_operator(TokenKind::LogicalNot, None)?,
            '-' => self.lex_subtract()?,
            '&' => self.lex_doubled(TokenKind::LogicalAnd)?,
            '|' => self.lex_doubled(TokenKind::LogicalOr)?,

            c if c.is_ascii_alphabetic() => self.lex_word()?,
            c if c.is_ascii_digit() => self.lex_number()?,

            _ => {
                return Err(self.point_error(
                    LexErrorKind::UnrecognizedCharacter(c),
                    self.cursor.column(),
                ))
            }
        };

        Ok(Some(token))
    }

    fn punctuation(&self, kind: TokenKind, c: char) -> Token {
        let column = self.cursor.column();
        self.make_token(kind, c.to_string(), column, column)
    }

    /// `:` or `::`
    fn lex_colon(&mut self) -> ExemeResult<Token> {
        let start = self.cursor.column();
        if self.check_for_trailing(':')? {
            Ok(self.make_token(TokenKind::ScopeResolution, "::", start, self.cursor.column()))
        } else {
            Ok(self.make_token(TokenKind::Colon, ":", start, start))
        }
    }

    /// Lex an operator that may be doubled and may take a trailing `=`
    fn lex_operator(&mut self, single: TokenKind, doubled: Option<TokenKind>) -> ExemeResult<Token> {
        let first = self.current_char();
        let start = self.cursor.column();
        let mut end = start;
        let mut kind = single;
        let mut lexeme = String::from(first);

        if let Some(doubled) = doubled {
            if self.check_for_trailing(first)? {
                kind = doubled;
                lexeme.push(first);
                end = self.cursor.column();
            }
        }

        self.finish_operator(kind, lexeme, start, end)
    }

    /// `-`, `-=` or `->`
    fn lex_subtract(&mut self) -> ExemeResult<Token> {
        let start = self.cursor.column();

        if self.check_for_trailing('>')? {
            let token = self.make_token(TokenKind::Arrow, "->", start, self.cursor.column());
            self.check_for_continuation(&token.lexeme)?;
            return Ok(token);
        }

        self.finish_operator(TokenKind::Subtract, "-".to_string(), start, start)
    }

    /// Apply the `=` remapping and the continuation check
    fn finish_operator(
        &mut self,
        mut kind: TokenKind,
        mut lexeme: String,
        start: usize,
        mut end: usize,
    ) -> ExemeResult<Token> {
        if let Some(assign) = kind.assignment_form() {
            if self.check_for_trailing('=')? {
                kind = assign;
                lexeme.push('=');
                end = self.cursor.column();
            }
        }

        let token = self.make_token(kind, lexeme, start, end);
        self.check_for_continuation(&token.lexeme)?;
        Ok(token)
    }

    /// `&&` and `||`; the single forms are not tokens
    fn lex_doubled(&mut self, kind: TokenKind) -> ExemeResult<Token> {
        let first = self.current_char();
        let start = self.cursor.column();

        if !self.cursor.advance(false)? {
            return Err(self.point_error(LexErrorKind::IncompleteOperator(first), start));
        }

        let next = self.current_char();
        if next != first {
            return Err(self.span_error(
                LexErrorKind::InvalidPrefix {
                    expected: first,
                    found: next,
                },
                start,
                self.cursor.column(),
            ));
        }

        let token = self.make_token(kind, format!("{}{}", first, first), start, self.cursor.column());
        self.check_for_continuation(&token.lexeme)?;
        Ok(token)
    }

    /// Char and string literals
    fn lex_quoted(&mut self, quote: char) -> ExemeResult<Token> {
        let (kind, unterminated) = if quote == '\'' {
            (TokenKind::CharLiteral, LexErrorKind::UnterminatedChar)
        } else {
            (TokenKind::StringLiteral, LexErrorKind::UnterminatedString)
        };

        let start = self.mark();
        let mut last = start;
        let mut value = String::new();
        let mut decoded = 0;
        let mut escaping = false;

        loop {
            if !self.cursor.advance(false)? {
                if self.config.allow_multiline_literals && self.cursor.at_line_end() && !escaping {
                    value.push('\n');
                    decoded += 1;
                    if kind == TokenKind::CharLiteral && decoded > 1 {
                        return Err(self.literal_error(LexErrorKind::MultiCharacterChar, start, last));
                    }
                    if self.cursor.advance_line(true, false)? {
                        continue;
                    }
                }
                return Err(self.literal_error(unterminated, start, last));
            }

            let c = self.current_char();
            last = self.mark();

            if escaping {
                value.push(self.escape_char(c)?);
                escaping = false;
            } else if c == '\\' {
                escaping = true;
                continue;
            } else if c == quote {
                break;
            } else {
                value.push(c);
            }

            decoded += 1;
            if kind == TokenKind::CharLiteral && decoded > 1 {
                return Err(self.literal_error(LexErrorKind::MultiCharacterChar, start, last));
            }
        }

        Ok(self.literal_token(kind, value, start, last))
    }

    /// Decode the character after a backslash
    fn escape_char(&self, c: char) -> ExemeResult<char> {
        Ok(match c {
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            _ => {
                let column = self.cursor.column();
                return Err(self.span_error(LexErrorKind::InvalidEscape, column - 1, column));
            }
        })
    }

    /// Integer and float literals
    ///
    /// With multi-line literals enabled the digits carry on after the
    /// leading whitespace of the next non-blank line.
    fn lex_number(&mut self) -> ExemeResult<Token> {
        let start = self.mark();
        let mut last = start;
        let mut text = String::from(self.current_char());
        let mut is_float = false;

        loop {
            if !self.cursor.advance(false)? {
                if self.config.allow_multiline_literals
                    && self.cursor.at_line_end()
                    && self.cursor.advance_line(true, true)?
                {
                    continue;
                }
                break;
            }

            let c = self.current_char();

            if c.is_whitespace() || !(c.is_ascii_alphanumeric() || c == '.') {
                self.cursor.push_back()?;
                break;
            }

            if c == '.' {
                if is_float {
                    return Err(self.point_error(LexErrorKind::TooManyDecimalPoints, self.cursor.column()));
                }
                is_float = true;
            } else if !c.is_ascii_digit() {
                return Err(self.point_error(LexErrorKind::InvalidIntegerCharacter, self.cursor.column()));
            }

            text.push(c);
            last = self.mark();
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        Ok(self.literal_token(kind, text, start, last))
    }

    /// Identifiers and keywords
    fn lex_word(&mut self) -> ExemeResult<Token> {
        let start = self.cursor.column();
        let mut last = start;
        let mut word = String::from(self.current_char());

        while self.cursor.advance(false)? {
            let c = self.current_char();
            if !c.is_ascii_alphanumeric() {
                self.cursor.push_back()?;
                break;
            }
            word.push(c);
            last = self.cursor.column();
        }

        let kind = if Keyword::is_keyword(&word) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Ok(self.make_token(kind, word, start, last))
    }

    /// `#` runs to the end of the line
    fn lex_comment(&mut self) -> ExemeResult<Option<Token>> {
        let start = self.cursor.column();
        let mut last = start;
        let mut text = String::new();

        while self.cursor.advance(false)? {
            text.push(self.current_char());
            last = self.cursor.column();
        }

        if !self.config.emit_comment_tokens {
            return Ok(None);
        }

        if text.ends_with('\r') {
            text.pop();
            last -= 1;
        }
        Ok(Some(self.make_token(TokenKind::Comment, text, start, last)))
    }

    /// Consume the next character if it is `expected`, otherwise put it back
    fn check_for_trailing(&mut self, expected: char) -> ExemeResult<bool> {
        if !self.cursor.advance(false)? {
            return Ok(false);
        }
        if self.cursor.current() == Some(expected) {
            return Ok(true);
        }
        self.cursor.push_back()?;
        Ok(false)
    }

    /// Reject stray punctuation glued onto an operator
    fn check_for_continuation(&mut self, lexeme: &str) -> ExemeResult<()> {
        if !self.cursor.advance(false)? {
            return Ok(());
        }

        let c = self.current_char();
        let column = self.cursor.column();
        self.cursor.push_back()?;

        if c.is_whitespace() || c.is_ascii_alphanumeric() || starts_follow_token(c) {
            Ok(())
        } else {
            Err(self.point_error(LexErrorKind::UnexpectedContinuation(lexeme.to_string()), column))
        }
    }

    fn current_char(&self) -> char {
        self.cursor.current().unwrap_or('\0')
    }

    fn mark(&self) -> Mark {
        Mark {
            line: self.cursor.line(),
            column: self.cursor.column(),
        }
    }

    fn literal_token(&self, kind: TokenKind, lexeme: String, start: Mark, last: Mark) -> Token {
        Token::new(kind, lexeme, literal_span(start, last), self.filename.clone())
    }

    fn literal_error(&self, kind: LexErrorKind, start: Mark, last: Mark) -> ExemeError {
        let span = literal_span(start, last);
        ExemeError::lex(
            kind,
            SourceLocation::span(span.line, span.start_column, span.end_column, self.error_filename()),
        )
    }

    fn make_token(&self, kind: TokenKind, lexeme: impl Into<String>, start: usize, end: usize) -> Token {
        Token::new(
            kind,
            lexeme,
            Span::new(start, end, self.cursor.line()),
            self.filename.clone(),
        )
    }

    fn point_error(&self, kind: LexErrorKind, column: usize) -> ExemeError {
        ExemeError::lex(
            kind,
            SourceLocation::point(self.cursor.line(), column, self.error_filename()),
        )
    }

    fn span_error(&self, kind: LexErrorKind, start: usize, end: usize) -> ExemeError {
        ExemeError::lex(
            kind,
            SourceLocation::span(self.cursor.line(), start, end, self.error_filename()),
        )
    }

    fn error_filename(&self) -> Option<String> {
        self.filename.as_deref().map(String::from)
    }
}

/// Line and column of a character that has been read
#[derive(Debug, Clone, Copy)]
struct Mark {
    line: usize,
    column: usize,
}

/// Span of a literal from its opening character to the last one read
///
/// A literal that continued onto later lines claims the line it ends on,
/// starting from column 0.
fn literal_span(start: Mark, last: Mark) -> Span {
    let first = if start.line == last.line { start.column } else { 0 };
    Span::new(first, last.column.max(first), last.line)
}

/// Characters that may directly follow an operator because they start a
/// token of their own
fn starts_follow_token(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '[' | ']' | '{' | '}' | ',' | '.' | '@' | ':' | '\'' | '"' | '#' | '-' | '!' | '~'
    )
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = ExemeResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
