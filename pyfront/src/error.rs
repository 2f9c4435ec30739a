use std::fmt;

use thiserror::Error;

use crate::parser::lexer::Token;

/// No token rule matched at `line`:`column`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Illegal character {character:?} at line {line}, column {column}")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub character: char,
}

/// A grammar rule did not get the token it requires.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error: expected {expected}, found {found}")]
pub struct ParseError {
    pub found: Found,
    pub expected: String,
}

impl ParseError {
    pub fn new(found: Found, expected: impl Into<String>) -> Self {
        Self {
            found,
            expected: expected.into(),
        }
    }
}

/// What the parser saw instead of the expected construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => write!(
                f,
                "{} `{}` at line {}, column {}",
                token.kind, token.text, token.line, token.column
            ),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
