pub mod lexer;
pub mod parser;


use crate::error::Error;
use crate::ir::ast;

/// Source text to AST: tokenize, then parse the whole token list.
pub fn parse(source: &str) -> Result<ast::Program, Error> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::parse_tokens(&tokens)?;
    Ok(program)
}
