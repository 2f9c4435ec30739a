use crate::error::{Found, ParseError};
use crate::ir::ast::{BinaryOperator, Expression, Program, Statement, UnaryOperator};
use super::lexer::{Token, TokenKind};

/// Deepest run of nested parentheses, unary operators and calls accepted.
pub const MAX_NESTING: usize = 256;

pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;
    tracing::debug!(
        tokens = tokens.len(),
        statements = program.statements.len(),
        "parsed program"
    );
    Ok(program)
}

/// Recursive descent over a borrowed token slice, one method per nonterminal.
struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek() {
            Some(token) if token.is(TokenKind::Keyword, "def") => self.parse_function_def(),
            Some(token)
                if token.kind == TokenKind::Identifier
                    && self
                        .lookahead(1)
                        .is_some_and(|next| next.is(TokenKind::Operator, "=")) =>
            {
                self.parse_assignment()
            }
            _ => Ok(Statement::Expression(self.parse_expression()?)),
        }
    }

    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let target = self.expect_identifier("assignment target")?;
        self.expect(TokenKind::Operator, "=")?;
        let value = self.parse_expression()?;
        Ok(Statement::Assignment { target, value })
    }

    fn parse_function_def(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Keyword, "def")?;
        let name = self.expect_identifier("function name")?;
        self.expect(TokenKind::Punctuation, "(")?;

        let mut params: Vec<String> = Vec::new();
        if !self.check(TokenKind::Punctuation, ")") {
            loop {
                let token = self.peek();
                let param = self.expect_identifier("parameter name")?;
                if params.contains(&param) {
                    return Err(ParseError::new(found(token), "a unique parameter name"));
                }
                params.push(param);

                if !self.eat(TokenKind::Punctuation, ",") {
                    break;
                }
            }
        }

        self.expect(TokenKind::Punctuation, ")")?;
        self.expect(TokenKind::Punctuation, ":")?;

        // Body is a run of `return` statements; anything else belongs to the caller.
        let mut body = Vec::new();
        while self.check(TokenKind::Keyword, "return") {
            body.push(self.parse_return()?);
        }

        Ok(Statement::FunctionDef { name, params, body })
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Keyword, "return")?;
        let value = self.parse_expression()?;
        Ok(Statement::Return { value })
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.eat_binary(&[BinaryOperator::Add, BinaryOperator::Subtract]) {
            let right = self.parse_term()?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.eat_binary(&[BinaryOperator::Multiply, BinaryOperator::Divide]) {
            let right = self.parse_factor()?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError::new(Found::EndOfInput, "expression"));
        };

        match token.kind {
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral => {
                self.advance();
                Ok(Expression::number(
                    token.text.clone(),
                    token.kind == TokenKind::FloatLiteral,
                ))
            }
            TokenKind::Identifier => {
                self.advance();
                if self.check(TokenKind::Punctuation, "(") {
                    self.enter(token)?;
                    let call = self.parse_call(token.text.clone());
                    self.depth -= 1;
                    call
                } else {
                    Ok(Expression::variable(token.text.clone()))
                }
            }
            TokenKind::Operator => match UnaryOperator::from_symbol(&token.text) {
                Some(op) => {
                    self.advance();
                    self.enter(token)?;
                    let operand = self.parse_factor();
                    self.depth -= 1;
                    Ok(Expression::unary(op, operand?))
                }
                None => Err(ParseError::new(Found::Token(token.clone()), "expression")),
            },
            TokenKind::Punctuation if token.text == "(" => {
                self.advance();
                self.enter(token)?;
                let expr = self.parse_expression();
                self.depth -= 1;
                let expr = expr?;
                self.expect(TokenKind::Punctuation, ")")?;
                Ok(expr)
            }
            _ => Err(ParseError::new(Found::Token(token.clone()), "expression")),
        }
    }

    fn parse_call(&mut self, function: String) -> Result<Expression, ParseError> {
        self.expect(TokenKind::Punctuation, "(")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::Punctuation, ")") {
            loop {
                args.push(self.parse_expression()?);
                if !self.eat(TokenKind::Punctuation, ",") {
                    break;
                }
            }
        }

        self.expect(TokenKind::Punctuation, ")")?;
        Ok(Expression::Call { function, args })
    }

    // Helpers

    /// Opens one nesting level at `token`; the caller closes it.
    fn enter(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                Found::Token(token.clone()),
                "a less deeply nested expression",
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn lookahead(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.position + n)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is(kind, text))
    }

    fn eat(&mut self, kind: TokenKind, text: &str) -> bool {
        let matched = self.check(kind, text);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_binary(&mut self, allowed: &[BinaryOperator]) -> Option<BinaryOperator> {
        let token = self.peek().filter(|token| token.kind == TokenKind::Operator)?;
        let op = BinaryOperator::from_symbol(&token.text).filter(|op| allowed.contains(op))?;
        self.advance();
        Some(op)
    }

    fn expect(&mut self, kind: TokenKind, text: &str) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.is(kind, text) => {
                self.advance();
                Ok(token)
            }
            other => Err(ParseError::new(found(other), format!("`{text}`"))),
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(token.text.clone())
            }
            other => Err(ParseError::new(found(other), what)),
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

fn found(token: Option<&Token>) -> Found {
    token.map_or(Found::EndOfInput, |token| Found::Token(token.clone()))
}
