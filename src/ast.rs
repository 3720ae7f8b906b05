//! Abstract Syntax Tree definitions
//!
//! Only the node the parser will start from exists so far. New node kinds are
//! added as variants of [`Node`].

use crate::lexer::{Span, Token, TokenKind};

/// AST node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Variable reference: `count`
    Variable(Variable),
}

/// A variable reference and the token it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub token: Token,
    pub name: String,
}

impl Node {
    /// Build a variable reference from an identifier token
    pub fn variable(token: Token) -> Option<Self> {
        if token.kind != TokenKind::Identifier {
            return None;
        }
        let name = token.lexeme.clone();
        Some(Self::Variable(Variable { token, name }))
    }

    /// The token the node was built from
    pub fn token(&self) -> &Token {
        match self {
            Self::Variable(variable) => &variable.token,
        }
    }

    pub fn span(&self) -> Span {
        self.token().span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_from_identifier() {
        let token = Token::new(TokenKind::Identifier, "count", Span::new(4, 8, 2), None);
        let node = Node::variable(token.clone()).unwrap();

        let Node::Variable(variable) = &node;
        assert_eq!(variable.name, "count");
        assert_eq!(node.token(), &token);
        assert_eq!(node.span(), Span::new(4, 8, 2));
    }

    #[test]
    fn test_variable_rejects_other_tokens() {
        let token = Token::new(TokenKind::Keyword, "while", Span::new(0, 4, 1), None);
        assert_eq!(Node::variable(token), None);
    }
}
