use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

/// The function names the lexer recognizes. Anything else in an alphabetic
/// run (other than a constant or the variable) is a lex error.
pub const FUNCTIONS: [&str; 8] = ["abs", "cos", "sin", "tan", "atan", "exp", "ln", "log"];

/// The named constants the lexer recognizes.
pub const CONSTANTS: [&str; 2] = ["e", "pi"];

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // single-character symbols
    Op(char),
    Variable,
    OpenParen,
    CloseParen,

    // more complex stuff
    Number(String),
    Function(String),
    Constant(String),

    // carries a message; the lexer stops after yielding one of these
    Error(String),
}

impl Display for Token {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Op(op) => write!(formatter, "operator '{}'", op),
            Token::Variable => write!(formatter, "variable 'x'"),
            Token::OpenParen => write!(formatter, "'('"),
            Token::CloseParen => write!(formatter, "')'"),
            Token::Number(text) => write!(formatter, "number '{}'", text),
            Token::Function(name) => write!(formatter, "function '{}'", name),
            Token::Constant(name) => write!(formatter, "constant '{}'", name),
            Token::Error(message) => write!(formatter, "error: {}", message),
        }
    }
}

/// A pull-based lexer over an expression string.
///
/// Tokens come out lazily, left to right, one or more characters each. After
/// an `Error` token the iterator is fused: no further tokens are produced, so
/// consumers never resume past a malformed position.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    done: bool,
}

/// Starts lexing `input`. Each call starts fresh; the lexer keeps no state
/// between invocations.
pub fn lex(input: &str) -> Lexer<'_> {
    Lexer {
        chars: input.chars().peekable(),
        done: false,
    }
}

impl<'a> Lexer<'a> {
    fn fail(&mut self, message: String) -> Option<Token> {
        self.done = true;
        Some(Token::Error(message))
    }

    /// Maximal run of ASCII digits and dots starting at the current position.
    fn take_number(&mut self) -> Option<Token> {
        let mut text = String::new();
        let mut has_dot = false;

        while let Some(&chr) = self.chars.peek() {
            if chr.is_ascii_digit() || chr == '.' {
                has_dot = has_dot || chr == '.';
                text.push(chr);
                self.chars.next();
            } else {
                break;
            }
        }

        if has_dot && text.ends_with('.') {
            return self.fail(String::from("number after dot was expected"));
        }

        Some(Token::Number(text))
    }

    /// Maximal run of alphabetic characters: a constant, a function name, or
    /// a lex error for anything unknown.
    fn take_name(&mut self) -> Option<Token> {
        let mut name = String::new();

        while let Some(&chr) = self.chars.peek() {
            if chr.is_alphabetic() {
                name.push(chr);
                self.chars.next();
            } else {
                break;
            }
        }

        if CONSTANTS.contains(&name.as_str()) {
            return Some(Token::Constant(name));
        }

        if FUNCTIONS.contains(&name.as_str()) {
            return Some(Token::Function(name));
        }

        self.fail(format!("unknown function name '{}'", name))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        // skip whitespace
        while let Some(chr) = self.chars.peek() {
            if chr.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }

        let chr = *self.chars.peek()?;
        match chr {
            '(' => {
                self.chars.next();
                Some(Token::OpenParen)
            }
            ')' => {
                self.chars.next();
                Some(Token::CloseParen)
            }
            // operators win over sign-prefixed literals: `-2` is an operator
            // followed by a number, which is what lets the parser treat the
            // minus as a prefix form
            '+' | '-' | '*' | '/' | '^' => {
                self.chars.next();
                Some(Token::Op(chr))
            }
            // `x` is a reserved single-letter symbol, checked before the
            // generic alphabetic run
            'x' => {
                self.chars.next();
                Some(Token::Variable)
            }
            _ if chr.is_alphabetic() => self.take_name(),
            _ if chr.is_ascii_digit() || chr == '.' => self.take_number(),
            _ => self.fail(String::from("not an accepted character")),
        }
    }
}
