//! Lexer and recursive-descent parser for a small Python-flavoured
//! expression language: assignments, arithmetic and single-`return`
//! function definitions.
//!
//! ```
//! let program = pyfront::parse("x = 1 + 2 * 3").unwrap();
//! assert_eq!(program.to_string(), "x = (1 + (2 * 3))\n");
//! ```

pub mod error;
pub mod ir;
pub mod parser;
pub mod position;

pub use error::{Error, Found, LexError, ParseError};
pub use ir::ast;
pub use parser::lexer::{Token, TokenKind, tokenize};
pub use parser::parse;
pub use parser::parser::parse_tokens;
pub use position::Position;
