use std::fmt;

use thiserror::Error;

use crate::ast::BinaryOperator;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },
    #[error("integer literal {lexeme} at position {pos} does not fit in 64 bits")]
    IntegerOutOfRange { lexeme: String, pos: usize },
}

impl LexError {
    pub fn pos(&self) -> usize {
        match self {
            LexError::InvalidCharacter { pos, .. } | LexError::IntegerOutOfRange { pos, .. } => *pos,
        }
    }
}

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    Factor,
    StatementSeparator,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => fmt::Display::fmt(kind, f),
            Expected::Factor => f.write_str("an integer, '(' or identifier"),
            Expected::StatementSeparator => f.write_str("';' or END"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected}, found {found} at position {pos}")]
    UnexpectedToken {
        expected: Expected,
        found: Token,
        pos: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(ParseError),
    #[error("division by zero")]
    DivisionByZero,
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("integer overflow in {left} {op} {right}")]
    Overflow {
        op: BinaryOperator,
        left: i64,
        right: i64,
    },
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(lex) => EvalError::Lex(lex),
            other => EvalError::Parse(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_keeps_its_kind_through_layers() {
        let lex = LexError::InvalidCharacter { ch: '&', pos: 2 };
        assert_eq!(lex.pos(), 2);
        let eval: EvalError = ParseError::from(lex.clone()).into();
        assert_eq!(eval, EvalError::Lex(lex));
    }

    #[test]
    fn test_parse_error_message() {
        let err = ParseError::UnexpectedToken {
            expected: Expected::Token(TokenKind::Dot),
            found: Token::Eof,
            pos: 15,
        };
        assert_eq!(
            err.to_string(),
            "expected '.', found end of input at position 15"
        );
    }

    #[test]
    fn test_eval_error_messages() {
        assert_eq!(
            EvalError::UndefinedVariable("x".to_string()).to_string(),
            "undefined variable `x`"
        );
        assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
        let overflow = EvalError::Overflow {
            op: BinaryOperator::Mul,
            left: i64::MAX,
            right: 2,
        };
        assert_eq!(
            overflow.to_string(),
            format!("integer overflow in {} * 2", i64::MAX)
        );
    }
}
