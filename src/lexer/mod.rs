//! Lexical analysis module
//!
//! This module turns Exeme source text into a stream of positioned tokens.

pub mod cursor;
pub mod scanner;
pub mod stream;
pub mod token;

pub use cursor::SourceCursor;
pub use scanner::Lexer;
pub use stream::TokenStream;
pub use token::{Keyword, Span, Token, TokenKind, KEYWORDS};
