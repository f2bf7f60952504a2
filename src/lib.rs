//! Expression engine for plotting single-variable functions.
//!
//! Text goes through the lexer in [`tok`], the precedence-climbing parser in
//! [`parser`] and the tree evaluator in [`ast`]; [`sample::eval_in_range`] is
//! the entry point a plotting front end consumes, turning an expression
//! string plus a stepped domain into parallel `(x, f(x))` vectors.

pub mod ast;
pub mod parser;
pub mod sample;
pub mod tok;

pub use ast::{EvalError, Expr};
pub use parser::{parse, ParseError, Parser};
pub use sample::{eval_in_range, SampleError};
pub use tok::{lex, Lexer, Token};
