//! # Exeme Lexical Front End
//!
//! Converts Exeme source text into classified tokens with line and column
//! information, and reports malformed input with source-accurate diagnostics.
//!
//! ## Architecture
//!
//! - `lexer`: character cursor, token recognizers and the token stream
//! - `error`: error types and caret-underlined diagnostics
//! - `config`: lexer policy switches
//! - `ast`: the placeholder node where parsing begins
//! - `logging`: subscriber setup for the driver
//!
//! Errors are returned, never printed: the caller decides whether to render a
//! [`Diagnostic`] and exit.

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod logging;

use std::path::Path;

// Re-export commonly used types
pub use config::LexerConfig;
pub use error::{Diagnostic, ExemeError, ExemeResult, LexErrorKind, SourceLocation};
pub use lexer::{Keyword, Lexer, Span, Token, TokenKind, TokenStream, KEYWORDS};

/// Version of the Exeme front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lex in-memory source text with the default configuration
pub fn tokenize(source: &str) -> ExemeResult<TokenStream> {
    Lexer::new(source, None).tokenize()
}

/// Lex a file on disk
pub fn tokenize_file(path: impl AsRef<Path>, config: LexerConfig) -> ExemeResult<TokenStream> {
    Lexer::open(path)?.with_config(config).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("import io").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].keyword(), Some(Keyword::Import));
    }

    #[test]
    fn test_tokenize_missing_file() {
        let err = tokenize_file("/no/such/file.exm", LexerConfig::default()).unwrap_err();
        assert!(matches!(err, ExemeError::Open { .. }));
        assert_eq!(err.to_string(), "failed to open file '/no/such/file.exm'");
    }
}
