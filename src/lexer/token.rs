//! Token definitions for the Exeme language
//!
//! This module defines the closed token taxonomy shared with the parser.

use std::fmt;
use std::sync::Arc;

/// Column range and line a token occupies
///
/// Both columns are zero-based offsets from the start of the line and the
/// range is inclusive, so a single character has `start_column == end_column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start_column: usize,
    pub end_column: usize,
    /// Line number (1-based)
    pub line: usize,
}

impl Span {
    pub fn new(start_column: usize, end_column: usize, line: usize) -> Self {
        debug_assert!(start_column <= end_column);
        Self {
            start_column,
            end_column,
            line,
        }
    }

    /// A span covering the single character at `column`
    pub fn point(column: usize, line: usize) -> Self {
        Self::new(column, column, line)
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end_column - self.start_column + 1
    }

    /// Extend the span by `n` characters to the right
    pub fn extend(self, n: usize) -> Self {
        Self {
            end_column: self.end_column + n,
            ..self
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start_column, self.end_column)
    }
}

/// A token in the Exeme language
///
/// Tokens are immutable once produced. `source` names the file the token
/// was read from and only matters for diagnostics, so it takes no part in
/// equality.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub source: Option<Arc<str>>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span, source: Option<Arc<str>>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            source,
        }
    }

    /// The keyword this token spells, if it is a keyword token
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_str(&self.lexeme),
            _ => None,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme && self.span == other.span
    }
}

impl Eq for Token {}

/// Token kinds in the Exeme language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,

    // Literals
    CharLiteral,
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,

    Comment,

    // Arithmetic
    Modulo,      // %
    Exponent,    // **
    Divide,      // /
    FloorDivide, // //
    Multiply,    // *
    Add,         // +
    Subtract,    // -

    // Comparison
    EqualTo,        // ==
    NotEqualTo,     // !=
    GreaterThan,    // >
    LessThan,       // <
    GreaterOrEqual, // >=
    LessOrEqual,    // <=

    // Logical
    LogicalAnd, // &&
    LogicalOr,  // ||
    LogicalNot, // !

    // Bitwise
    BitwiseAnd, // &
    BitwiseOr,  // |
    BitwiseXor, // ^
    BitwiseNot, // ~
    ShiftLeft,  // <<
    ShiftRight, // >>

    // Assignment
    Assign,            // =
    ModuloAssign,      // %=
    ExponentAssign,    // **=
    DivideAssign,      // /=
    FloorDivideAssign, // //=
    MultiplyAssign,    // *=
    AddAssign,         // +=
    SubtractAssign,    // -=
    AndAssign,         // &=
    OrAssign,          // |=
    XorAssign,         // ^=
    NotAssign,         // ~=
    ShiftLeftAssign,   // <<=
    ShiftRightAssign,  // >>=

    // Member access
    Dot,   // .
    Arrow, // ->
    At,    // @

    // Delimiters
    OpenParen,       // (
    OpenBracket,     // [
    OpenBrace,       // {
    CloseParen,      // )
    CloseBracket,    // ]
    CloseBrace,      // }
    Comma,           // ,
    Colon,           // :
    ScopeResolution, // ::
}

impl TokenKind {
    /// Human readable description of the kind
    pub fn description(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::CharLiteral => "char",
            Self::StringLiteral => "string",
            Self::IntegerLiteral => "integer",
            Self::FloatLiteral => "float",
            Self::Comment => "comment",
            Self::Modulo => "modulo operator",
            Self::Exponent => "exponent operator",
            Self::Divide => "division operator",
            Self::FloorDivide => "floor division operator",
            Self::Multiply => "multiplication operator",
            Self::Add => "addition operator",
            Self::Subtract => "subtraction operator",
            Self::EqualTo => "equal to operator",
            Self::NotEqualTo => "not equal to operator",
            Self::GreaterThan => "greater than operator",
            Self::LessThan => "less than operator",
            Self::GreaterOrEqual => "greater than or equal operator",
            Self::LessOrEqual => "less than or equal operator",
            Self::LogicalAnd => "logical and operator",
            Self::LogicalOr => "logical or operator",
            Self::LogicalNot => "logical not operator",
            Self::BitwiseAnd => "bitwise AND operator",
            Self::BitwiseOr => "bitwise OR operator",
            Self::BitwiseXor => "bitwise XOR operator",
            Self::BitwiseNot => "bitwise NOT operator",
            Self::ShiftLeft => "bitwise left shift",
            Self::ShiftRight => "bitwise right shift",
            Self::Assign => "assignment operator",
            Self::ModuloAssign => "modulo assignment operator",
            Self::ExponentAssign => "exponent assignment operator",
            Self::DivideAssign => "division assignment operator",
            Self::FloorDivideAssign => "floor division assignment operator",
            Self::MultiplyAssign => "multiplication assignment operator",
            Self::AddAssign => "addition assignment operator",
            Self::SubtractAssign => "subtraction assignment operator",
            Self::AndAssign => "bitwise AND assignment operator",
            Self::OrAssign => "bitwise OR assignment operator",
            Self::XorAssign => "bitwise XOR assignment operator",
            Self::NotAssign => "bitwise NOT assignment operator",
            Self::ShiftLeftAssign => "bitwise left shift assignment operator",
            Self::ShiftRightAssign => "bitwise right shift assignment operator",
            Self::Dot => "dot operator",
            Self::Arrow => "arrow operator",
            Self::At => "address of operator",
            Self::OpenParen => "open brace",
            Self::OpenBracket => "open square brace",
            Self::OpenBrace => "open curly brace",
            Self::CloseParen => "close brace",
            Self::CloseBracket => "close square brace",
            Self::CloseBrace => "close curly brace",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::ScopeResolution => "scope resolution operator",
        }
    }

    /// The compound-assignment form of an operator, e.g. `+` to `+=`
    pub fn assignment_form(&self) -> Option<TokenKind> {
        Some(match self {
            Self::Modulo => Self::ModuloAssign,
            Self::Exponent => Self::ExponentAssign,
            Self::Divide => Self::DivideAssign,
            Self::FloorDivide => Self::FloorDivideAssign,
            Self::Multiply => Self::MultiplyAssign,
            Self::Add => Self::AddAssign,
            Self::Subtract => Self::SubtractAssign,
            Self::GreaterThan => Self::GreaterOrEqual,
            Self::LessThan => Self::LessOrEqual,
            Self::LogicalNot => Self::NotEqualTo,
            Self::BitwiseAnd => Self::AndAssign,
            Self::BitwiseOr => Self::OrAssign,
            Self::BitwiseXor => Self::XorAssign,
            Self::BitwiseNot => Self::NotAssign,
            Self::ShiftLeft => Self::ShiftLeftAssign,
            Self::ShiftRight => Self::ShiftRightAssign,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The closed keyword set, in lexical order
pub const KEYWORDS: [&str; 13] = [
    "break", "catch", "class", "continue", "elif", "else", "finally", "for", "if", "import",
    "return", "try", "while",
];

/// Keywords in the Exeme language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Break,
    Catch,
    Class,
    Continue,
    Elif,
    Else,
    Finally,
    For,
    If,
    Import,
    Return,
    Try,
    While,
}

impl Keyword {
    /// Get keyword from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "break" => Some(Self::Break),
            "catch" => Some(Self::Catch),
            "class" => Some(Self::Class),
            "continue" => Some(Self::Continue),
            "elif" => Some(Self::Elif),
            "else" => Some(Self::Else),
            "finally" => Some(Self::Finally),
            "for" => Some(Self::For),
            "if" => Some(Self::If),
            "import" => Some(Self::Import),
            "return" => Some(Self::Return),
            "try" => Some(Self::Try),
            "while" => Some(Self::While),
            _ => None,
        }
    }

    /// Get string representation of keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Catch => "catch",
            Self::Class => "class",
            Self::Continue => "continue",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::Finally => "finally",
            Self::For => "for",
            Self::If => "if",
            Self::Import => "import",
            Self::Return => "return",
            Self::Try => "try",
            Self::While => "while",
        }
    }

    /// Whether `word` belongs to the keyword set
    pub fn is_keyword(word: &str) -> bool {
        Self::from_str(word).is_some()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("elif"), Some(Keyword::Elif));
        assert_eq!(Keyword::from_str("finally"), Some(Keyword::Finally));
        assert_eq!(Keyword::from_str("import"), Some(Keyword::Import));
        assert_eq!(Keyword::from_str("invalid"), None);
        // case-sensitive
        assert_eq!(Keyword::from_str("While"), None);
    }

    #[test]
    fn test_keyword_table_matches_enum() {
        for word in KEYWORDS {
            let keyword = Keyword::from_str(word).unwrap();
            assert_eq!(keyword.as_str(), word);
        }
    }

    #[test]
    fn test_token_equality_ignores_source() {
        let span = Span::new(0, 2, 1);
        let a = Token::new(TokenKind::Identifier, "foo", span, Some(Arc::from("a.exm")));
        let b = Token::new(TokenKind::Identifier, "foo", span, Some(Arc::from("b.exm")));
        assert_eq!(a, b);
        assert_ne!(a, Token::new(TokenKind::Identifier, "foo", span.extend(1), None));
    }

    #[test]
    fn test_assignment_form() {
        assert_eq!(TokenKind::Add.assignment_form(), Some(TokenKind::AddAssign));
        assert_eq!(TokenKind::Exponent.assignment_form(), Some(TokenKind::ExponentAssign));
        assert_eq!(TokenKind::LogicalNot.assignment_form(), Some(TokenKind::NotEqualTo));
        assert_eq!(TokenKind::Assign.assignment_form(), None);
        assert_eq!(TokenKind::Arrow.assignment_form(), None);
    }

    #[test]
    fn test_span_len() {
        assert_eq!(Span::point(4, 1).len(), 1);
        assert_eq!(Span::new(4, 6, 1).len(), 3);
    }
}
