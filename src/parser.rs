use tracing::trace;

use crate::ast::{Assignment, BinaryOperator, Compound, Expr, Statement, Variable};
use crate::error::{Expected, LexError, ParseError};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Recursive-descent parser over a one-token lookahead.
///
/// ```text
/// program            : compound_statement DOT
/// compound_statement : BEGIN statement_list END
/// statement_list     : statement (SEMI statement)*
/// statement          : compound_statement | assignment | empty
/// assignment         : variable ASSIGN expr
/// expr               : term ((PLUS | MINUS) term)*
/// term               : factor ((MUL | DIV) factor)*
/// factor             : INTEGER | LPAREN expr RPAREN | variable
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_pos: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, LexError> {
        let current_token = lexer.next_token()?;
        let current_pos = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_pos,
        })
    }

    fn advance(&mut self) -> Result<(), LexError> {
        self.current_token = self.lexer.next_token()?;
        self.current_pos = self.lexer.token_start();
        Ok(())
    }

    fn unexpected(&self, expected: Expected) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_token.clone(),
            pos: self.current_pos,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.current_token.kind() == kind {
            trace!(token = %self.current_token, pos = self.current_pos, "consume");
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(Expected::Token(kind)))
        }
    }

    /// Parses a whole program which must be followed by end of input.
    pub fn parse_program(&mut self) -> Result<Compound, ParseError> {
        let node = self.compound_statement()?;
        self.expect(TokenKind::Dot)?;
        self.expect(TokenKind::Eof)?;
        Ok(node)
    }

    /// Parses a bare arithmetic expression which must be followed by end of input.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let node = self.expr()?;
        self.expect(TokenKind::Eof)?;
        Ok(node)
    }

    fn compound_statement(&mut self) -> Result<Compound, ParseError> {
        self.expect(TokenKind::Begin)?;
        let children = self.statement_list()?;
        self.expect(TokenKind::End)?;
        Ok(Compound { children })
    }

    fn statement_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut results = vec![self.statement()?];

        while self.current_token == Token::Semi {
            self.expect(TokenKind::Semi)?;
            results.push(self.statement()?);
        }

        // Two statements with no `;` between them.
        if self.current_token.kind() == TokenKind::Id {
            return Err(self.unexpected(Expected::StatementSeparator));
        }

        Ok(results)
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        match self.current_token {
            Token::Begin => Ok(Statement::Compound(self.compound_statement()?)),
            Token::Id(_) => Ok(Statement::Assignment(self.assignment()?)),
            _ => Ok(self.empty()),
        }
    }

    fn assignment(&mut self) -> Result<Assignment, ParseError> {
        let target = self.variable()?;
        self.expect(TokenKind::Assign)?;
        let value = self.expr()?;
        Ok(Assignment { target, value })
    }

    fn variable(&mut self) -> Result<Variable, ParseError> {
        let Token::Id(name) = &self.current_token else {
            return Err(self.unexpected(Expected::Token(TokenKind::Id)));
        };
        let name = name.clone();
        self.expect(TokenKind::Id)?;
        Ok(Variable { name })
    }

    fn empty(&self) -> Statement {
        Statement::NoOp
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.term()?;

        while let Some(op @ (BinaryOperator::Plus | BinaryOperator::Minus)) =
            BinaryOperator::from_token(&self.current_token)
        {
            self.expect(self.current_token.kind())?;
            node = Expr::binary(node, op, self.term()?);
        }

        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.factor()?;

        while let Some(op @ (BinaryOperator::Mul | BinaryOperator::Div)) =
            BinaryOperator::from_token(&self.current_token)
        {
            self.expect(self.current_token.kind())?;
            node = Expr::binary(node, op, self.factor()?);
        }

        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.current_token {
            Token::Integer(value) => {
                self.expect(TokenKind::Integer)?;
                Ok(Expr::Num(value))
            }
            Token::LParen => {
                self.expect(TokenKind::LParen)?;
                let node = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(node)
            }
            Token::Id(_) => Ok(Expr::Variable(self.variable()?)),
            _ => Err(self.unexpected(Expected::Factor)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Compound, ParseError> {
        Parser::new(Lexer::new(text))?.parse_program()
    }

    fn parse_expr(text: &str) -> Result<Expr, ParseError> {
        Parser::new(Lexer::new(text))?.parse_expression()
    }

    #[test]
    fn test_parse_simple_assignment() {
        assert_eq!(
            parse("BEGIN x := 5 END.").unwrap(),
            Compound {
                children: vec![Statement::assign("x", Expr::Num(5))],
            }
        );
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(
            parse_expr("2 + 3 * 4").unwrap(),
            Expr::binary(
                Expr::Num(2),
                BinaryOperator::Plus,
                Expr::binary(Expr::Num(3), BinaryOperator::Mul, Expr::Num(4)),
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        assert_eq!(
            parse_expr("7 - 3 - 2").unwrap(),
            Expr::binary(
                Expr::binary(Expr::Num(7), BinaryOperator::Minus, Expr::Num(3)),
                BinaryOperator::Minus,
                Expr::Num(2),
            )
        );
    }

    #[test]
    fn test_parse_parentheses() {
        assert_eq!(
            parse_expr("(2 + a) * 4").unwrap(),
            Expr::binary(
                Expr::binary(Expr::Num(2), BinaryOperator::Plus, Expr::variable("a")),
                BinaryOperator::Mul,
                Expr::Num(4),
            )
        );
    }

    #[test]
    fn test_parse_nested_blocks_and_empty_statements() {
        assert_eq!(
            parse("BEGIN x := 5; BEGIN y := 10; END; END.").unwrap(),
            Compound {
                children: vec![
                    Statement::assign("x", Expr::Num(5)),
                    Statement::Compound(Compound {
                        children: vec![
                            Statement::assign("y", Expr::Num(10)),
                            Statement::NoOp,
                        ],
                    }),
                    Statement::NoOp,
                ],
            }
        );
    }

    #[test]
    fn test_parse_empty_block() {
        assert_eq!(
            parse("BEGIN END.").unwrap(),
            Compound {
                children: vec![Statement::NoOp],
            }
        );
    }

    #[test]
    fn test_parse_missing_dot() {
        assert_eq!(
            parse("BEGIN x := 5 END"),
            Err(ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::Dot),
                found: Token::Eof,
                pos: 16,
            })
        );
    }

    #[test]
    fn test_parse_missing_end() {
        assert_eq!(
            parse("BEGIN x := 5."),
            Err(ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::End),
                found: Token::Dot,
                pos: 12,
            })
        );
    }

    #[test]
    fn test_parse_missing_separator() {
        assert_eq!(
            parse("BEGIN x := 1 y := 2 END."),
            Err(ParseError::UnexpectedToken {
                expected: Expected::StatementSeparator,
                found: Token::Id("y".to_string()),
                pos: 13,
            })
        );
    }

    #[test]
    fn test_parse_trailing_garbage() {
        assert_eq!(
            parse("BEGIN END. x"),
            Err(ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::Eof),
                found: Token::Id("x".to_string()),
                pos: 11,
            })
        );
    }

    #[test]
    fn test_parse_unary_minus_is_rejected() {
        assert_eq!(
            parse("BEGIN x := -5 END."),
            Err(ParseError::UnexpectedToken {
                expected: Expected::Factor,
                found: Token::Minus,
                pos: 11,
            })
        );
    }

    #[test]
    fn test_parse_unbalanced_parenthesis() {
        assert!(matches!(
            parse_expr("(1 + 2"),
            Err(ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::RParen),
                ..
            })
        ));
    }

    #[test]
    fn test_lex_error_surfaces_mid_parse() {
        assert_eq!(
            parse("BEGIN x := 1 # END."),
            Err(ParseError::Lex(LexError::InvalidCharacter { ch: '#', pos: 13 }))
        );
    }

    #[test]
    fn test_priming_fails_on_bad_first_token() {
        assert!(Parser::new(Lexer::new("?")).is_err());
    }

    #[test]
    fn test_expression_trailing_token() {
        assert!(matches!(
            parse_expr("3 4"),
            Err(ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::Eof),
                found: Token::Integer(4),
                ..
            })
        ));
    }
}
