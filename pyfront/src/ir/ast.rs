use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// x = 1 + 2
    Assignment {
        target: String,
        value: Expression,
    },
    /// def add(x, y): return x
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Statement>,
    },
    /// Only appears inside a function body.
    Return {
        value: Expression,
    },
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// 10, 2.5 (kept as written)
    NumberLiteral {
        value: String,
        is_float: bool,
    },
    Variable {
        name: String,
    },
    /// -x, +x
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// add(10, 20)
    Call {
        function: String,
        args: Vec<Expression>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,  // +
    Minus, // -
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl Expression {
    pub fn number(value: impl Into<String>, is_float: bool) -> Self {
        Self::NumberLiteral {
            value: value.into(),
            is_float,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Numeric value of a literal; `None` for every other node.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::NumberLiteral { value, .. } => value.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assignment { target, value } => write!(f, "{target} = {value}"),
            Statement::FunctionDef { name, params, body } => {
                write!(f, "def {name}({}):", params.join(", "))?;
                for statement in body {
                    write!(f, " {statement}")?;
                }
                Ok(())
            }
            Statement::Return { value } => write!(f, "return {value}"),
            Statement::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::NumberLiteral { value, .. } => f.write_str(value),
            Expression::Variable { name } => f.write_str(name),
            Expression::UnaryOp { op, operand } => write!(f, "({}{operand})", op.symbol()),
            Expression::BinaryOp { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expression::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
