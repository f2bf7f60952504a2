use std::error::Error;
use std::fmt::Display;
use std::iter::Peekable;

use crate::ast::Expr;
use crate::tok::{lex, Token};

/// Infix binding powers, `(left, right)`. Left-associative operators have
/// left < right by one, so same-precedence chains fold to the left. `^` sits
/// on the highest tier and is left-associative as well: `2^3^2 == 64`.
fn infix_binding_power(op: char) -> Option<(u8, u8)> {
    match op {
        '+' | '-' => Some((1, 2)),
        '*' | '/' => Some((3, 4)),
        '^' => Some((4, 5)),
        _ => None,
    }
}

/// Prefix binding power for unary minus: above `+`/`-`, level with `*`/`/`,
/// below `^`. `-2^2` is `-(2^2)` while `(-2)^2` needs the parentheses.
const NEGATION_BINDING_POWER: u8 = 3;

#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The token stream ran out where a token was expected.
    UnexpectedEof,
    /// A token that cannot start or continue the expression at this position.
    UnexpectedToken {
        expected: Option<Token>,
        found: Token,
    },
    /// Input continued past a complete expression.
    TrailingTokens(Token),
    /// The lexer emitted an error token; carries the lexer's message.
    Lex(String),
}

impl Display for ParseError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(formatter, "unexpected end of input"),
            ParseError::UnexpectedToken {
                expected: Some(expected),
                found,
            } => write!(formatter, "expected {} but found {}", expected, found),
            ParseError::UnexpectedToken {
                expected: None,
                found,
            } => write!(formatter, "unexpected {}", found),
            ParseError::TrailingTokens(token) => {
                write!(formatter, "unexpected {} after the expression", token)
            }
            ParseError::Lex(message) => write!(formatter, "{}", message),
        }
    }
}

impl Error for ParseError {}

/// Precedence-climbing parser over any token source, usually a `Lexer`.
/// Consumes the stream once and produces exactly one tree for the full input.
pub struct Parser<I>
where
    I: Iterator<Item = Token>,
{
    tokens: Peekable<I>,
}

/// Lexes and parses `input` in one go.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(lex(input)).parse_expression()
}

impl<I> Parser<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
        }
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.expr_bp(0)?;

        // the whole input must be one expression
        match self.tokens.next() {
            None => Ok(expr),
            Some(Token::Error(message)) => Err(ParseError::Lex(message)),
            Some(token) => Err(ParseError::TrailingTokens(token)),
        }
    }

    fn consume(&mut self) -> Result<Token, ParseError> {
        self.tokens.next().ok_or(ParseError::UnexpectedEof)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(token) if token == expected => Ok(()),
            Some(Token::Error(message)) => Err(ParseError::Lex(message)),
            Some(found) => Err(ParseError::UnexpectedToken {
                expected: Some(expected),
                found,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = match self.consume()? {
            Token::Error(message) => return Err(ParseError::Lex(message)),
            Token::OpenParen => {
                let inner = self.expr_bp(0)?;
                self.expect(Token::CloseParen)?;
                inner
            }
            Token::Function(name) => {
                self.expect(Token::OpenParen)?;
                let argument = self.expr_bp(0)?;
                self.expect(Token::CloseParen)?;
                Expr::Call {
                    function: name,
                    argument: Box::new(argument),
                }
            }
            // unary minus desugars to subtraction from zero
            Token::Op('-') => {
                let operand = self.expr_bp(NEGATION_BINDING_POWER)?;
                Expr::Infix {
                    op: '-',
                    lhs: Box::new(Expr::Atom(Token::Number(String::from("0")))),
                    rhs: Box::new(operand),
                }
            }
            token @ Token::Number(_) | token @ Token::Variable | token @ Token::Constant(_) => {
                Expr::Atom(token)
            }
            found => {
                return Err(ParseError::UnexpectedToken {
                    expected: None,
                    found,
                })
            }
        };

        loop {
            let op = match self.tokens.peek() {
                Some(Token::Op(op)) => *op,
                _ => break,
            };

            let (l_bp, r_bp) = match infix_binding_power(op) {
                Some(powers) => powers,
                None => break,
            };
            if l_bp < min_bp {
                break;
            }

            self.tokens.next();
            let rhs = self.expr_bp(r_bp)?;
            lhs = Expr::Infix {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }
}
