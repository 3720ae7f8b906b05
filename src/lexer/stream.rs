//! Ordered, append-only token sequence handed to the parser

use std::ops::Index;

use super::token::Token;

/// Tokens in the order they were produced
///
/// The writing side only ever appends. The reading side walks the tokens
/// with a position that can step back by exactly one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    can_unget: bool,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token
    pub fn push(&mut self, token: Token) {
        debug_assert!(
            self.tokens
                .last()
                .map_or(true, |last| last.span.line <= token.span.line),
            "token lines must not decrease"
        );
        self.tokens.push(token);
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }

    /// Index of the next token `next` will return
    pub fn position(&self) -> usize {
        self.position
    }

    /// Return the token at the read position and move past it
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        self.can_unget = true;
        Some(token)
    }

    /// Look at the token at the read position without moving
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Step back over the token last returned by `next`
    ///
    /// Only one level is supported; returns `false` if there is nothing to
    /// step back over.
    pub fn unget(&mut self) -> bool {
        if !self.can_unget {
            return false;
        }
        self.position -= 1;
        self.can_unget = false;
        true
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::{Span, TokenKind};

    fn ident(name: &str, line: usize) -> Token {
        Token::new(TokenKind::Identifier, name, Span::new(0, name.len() - 1, line), None)
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut stream = TokenStream::new();
        stream.push(ident("a", 1));
        stream.push(ident("b", 1));
        stream.push(ident("c", 2));

        let names: Vec<&str> = stream.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(stream[1].lexeme, "b");
        assert_eq!(stream.last().map(|t| t.lexeme.as_str()), Some("c"));
    }

    #[test]
    fn test_single_level_unget() {
        let mut stream = TokenStream::from(vec![ident("a", 1), ident("b", 1)]);
        assert!(!stream.unget());

        assert_eq!(stream.next().unwrap().lexeme, "a");
        assert_eq!(stream.next().unwrap().lexeme, "b");
        assert!(stream.unget());
        assert!(!stream.unget());
        assert_eq!(stream.peek().unwrap().lexeme, "b");
        assert_eq!(stream.next().unwrap().lexeme, "b");
        assert!(stream.next().is_none());
        assert_eq!(stream.position(), 2);
    }
}
