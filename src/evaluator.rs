use tracing::debug;

use crate::ast::{BinaryOperator, Compound, Expr, Statement};
use crate::error::EvalError;
use crate::parser::Parser;
use crate::store::VariableStore;

pub struct Evaluator {
    parser: Parser,
    variables: VariableStore,
}

impl Evaluator {
    pub fn new(parser: Parser) -> Self {
        Evaluator {
            parser,
            variables: VariableStore::new(),
        }
    }

    /// Parses the whole program and executes it against the variable store.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<(), EvalError> {
        let tree = self.parser.parse_program()?;
        self.execute_compound(&tree)
    }

    /// Parses a bare expression and returns its value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_expression(&mut self) -> Result<i64, EvalError> {
        let tree = self.parser.parse_expression()?;
        self.evaluate(&tree)
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn into_variables(self) -> VariableStore {
        self.variables
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<(), EvalError> {
        match statement {
            Statement::Compound(compound) => self.execute_compound(compound),
            Statement::Assignment(assignment) => {
                let value = self.evaluate(&assignment.value)?;
                debug!(name = %assignment.target.name, value, "assign");
                self.variables.assign(&assignment.target.name, value);
                Ok(())
            }
            Statement::NoOp => Ok(()),
        }
    }

    fn execute_compound(&mut self, compound: &Compound) -> Result<(), EvalError> {
        for child in &compound.children {
            self.execute(child)?;
        }
        Ok(())
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<i64, EvalError> {
        match expr {
            Expr::Num(value) => Ok(*value),
            Expr::BinaryOp { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                apply(*op, left, right)
            }
            Expr::Variable(variable) => self
                .variables
                .get(&variable.name)
                .ok_or_else(|| EvalError::UndefinedVariable(variable.name.clone())),
        }
    }
}

fn apply(op: BinaryOperator, left: i64, right: i64) -> Result<i64, EvalError> {
    let result = match op {
        BinaryOperator::Plus => left.checked_add(right),
        BinaryOperator::Minus => left.checked_sub(right),
        BinaryOperator::Mul => left.checked_mul(right),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            floor_div(left, right)
        }
    };
    result.ok_or(EvalError::Overflow { op, left, right })
}

/// Integer division rounding toward negative infinity. `None` on overflow.
pub fn floor_div(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;
    if left % right != 0 && (left < 0) != (right < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}
