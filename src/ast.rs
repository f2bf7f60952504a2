use std::error::Error;
use std::f64::consts::{E, PI};
use std::fmt::Display;

use crate::tok::Token;

/// A parsed expression tree. Nodes own their children outright; the tree is
/// never mutated after the parser builds it, so one tree can be evaluated any
/// number of times (from any number of threads) at different `x` values.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    /// A leaf: a number, the variable, or a named constant.
    Atom(Token),
    /// A unary function applied to one argument, like `sin(x)`.
    Call {
        function: String,
        argument: Box<Expr>,
    },
    /// A binary operation, one of `+ - * / ^`.
    Infix {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, PartialEq)]
pub enum EvalError {
    UnknownFunction(String),
    UnknownOperator(char),
    UnknownConstant(String),
    InvalidNumber(String),
    InvalidAtom(Token),
}

impl Display for EvalError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::UnknownFunction(name) => {
                write!(formatter, "unknown function '{}'", name)
            }
            EvalError::UnknownOperator(op) => {
                write!(formatter, "unknown operator '{}'", op)
            }
            EvalError::UnknownConstant(name) => {
                write!(formatter, "unknown constant '{}'", name)
            }
            EvalError::InvalidNumber(text) => {
                write!(formatter, "'{}' is not a valid number", text)
            }
            EvalError::InvalidAtom(token) => {
                write!(formatter, "cannot evaluate {}", token)
            }
        }
    }
}

impl Error for EvalError {}

impl Expr {
    /// Computes the value of the tree at the given `x`.
    ///
    /// Division by zero and out-of-domain arguments to `ln`/`log` follow
    /// IEEE 754 semantics (infinity or NaN), they are not errors. The error
    /// arms cover symbols outside the known sets, which the parser already
    /// rejects; they are kept so a hand-built tree fails loudly instead of
    /// producing a silent zero.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Expr::Atom(token) => match token {
                Token::Variable => Ok(x),
                Token::Number(text) => text
                    .parse()
                    .map_err(|_| EvalError::InvalidNumber(text.clone())),
                Token::Constant(name) => match name.as_str() {
                    "pi" => Ok(PI),
                    "e" => Ok(E),
                    _ => Err(EvalError::UnknownConstant(name.clone())),
                },
                other => Err(EvalError::InvalidAtom(other.clone())),
            },
            Expr::Call { function, argument } => {
                let value = argument.eval(x)?;
                match function.as_str() {
                    "abs" => Ok(value.abs()),
                    "sin" => Ok(value.sin()),
                    "cos" => Ok(value.cos()),
                    "tan" => Ok(value.tan()),
                    "atan" => Ok(value.atan()),
                    "exp" => Ok(value.exp()),
                    "ln" => Ok(value.ln()),
                    "log" => Ok(value.log10()),
                    _ => Err(EvalError::UnknownFunction(function.clone())),
                }
            }
            Expr::Infix { op, lhs, rhs } => {
                let left = lhs.eval(x)?;
                let right = rhs.eval(x)?;
                match op {
                    '+' => Ok(left + right),
                    '-' => Ok(left - right),
                    '*' => Ok(left * right),
                    '/' => Ok(left / right),
                    '^' => Ok(left.powf(right)),
                    _ => Err(EvalError::UnknownOperator(*op)),
                }
            }
        }
    }
}
