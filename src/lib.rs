pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod store;
pub mod token;

pub use ast::{Assignment, BinaryOperator, Compound, Expr, Statement, Variable};
pub use error::{EvalError, Expected, LexError, ParseError};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, tokenize};
pub use parser::Parser;
pub use store::VariableStore;
pub use token::{Token, TokenKind};

/// Runs a `BEGIN ... END.` program and returns the final variable store.
pub fn execute(program: &str) -> Result<VariableStore, EvalError> {
    let lexer = Lexer::new(program);
    let parser = Parser::new(lexer)?;
    let mut evaluator = Evaluator::new(parser);
    evaluator.run()?;
    Ok(evaluator.into_variables())
}

/// Evaluates a bare arithmetic expression such as `3 + 5`.
pub fn calculate(expression: &str) -> Result<i64, EvalError> {
    let lexer = Lexer::new(expression);
    let parser = Parser::new(lexer)?;
    Evaluator::new(parser).evaluate_expression()
}
