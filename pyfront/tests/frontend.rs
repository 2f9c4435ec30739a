use pyfront::ast::{BinaryOperator, Expression, Program, Statement, UnaryOperator};
use pyfront::{Error, Found, TokenKind, parse, parse_tokens, tokenize};

fn int(value: &str) -> Expression {
    Expression::number(value, false)
}

fn statements(source: &str) -> Vec<Statement> {
    parse(source).unwrap().statements
}

#[test]
fn whitespace_and_comments_only() {
    assert!(tokenize("   \n\t# just a comment\n\n  # another").unwrap().is_empty());
}

#[test]
fn float_is_one_token() {
    let tokens = tokenize("12.5").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[0].text, "12.5");
}

#[test]
fn keyword_wins_over_identifier() {
    let tokens = tokenize("return").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Keyword);
}

#[test]
fn positions_across_lines() {
    let tokens = tokenize("x\ny").unwrap();
    assert_eq!(
        tokens
            .iter()
            .map(|t| (t.kind, t.text.as_str(), t.line, t.column))
            .collect::<Vec<_>>(),
        vec![
            (TokenKind::Identifier, "x", 1, 1),
            (TokenKind::Identifier, "y", 2, 1),
        ]
    );
}

#[test]
fn multiply_binds_tighter_than_add() {
    assert_eq!(
        statements("x = 1 + 2 * 3"),
        vec![Statement::Assignment {
            target: "x".into(),
            value: Expression::binary(
                BinaryOperator::Add,
                int("1"),
                Expression::binary(BinaryOperator::Multiply, int("2"), int("3")),
            ),
        }]
    );
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(
        statements("(1 + 2) * 3"),
        vec![Statement::Expression(Expression::binary(
            BinaryOperator::Multiply,
            Expression::binary(BinaryOperator::Add, int("1"), int("2")),
            int("3"),
        ))]
    );
}

#[test]
fn unary_minus_nests() {
    assert_eq!(
        statements("--x"),
        vec![Statement::Expression(Expression::unary(
            UnaryOperator::Minus,
            Expression::unary(UnaryOperator::Minus, Expression::variable("x")),
        ))]
    );
}

#[test]
fn function_definition() {
    assert_eq!(
        statements("def add(x, y):\n    return x"),
        vec![Statement::FunctionDef {
            name: "add".into(),
            params: vec!["x".into(), "y".into()],
            body: vec![Statement::Return {
                value: Expression::variable("x"),
            }],
        }]
    );
}

#[test]
fn missing_close_paren_is_parse_error() {
    match parse("(1 + 2") {
        Err(Error::Parse(err)) => {
            assert_eq!(err.expected, "`)`");
            assert_eq!(err.found, Found::EndOfInput);
            assert_eq!(
                err.to_string(),
                "Syntax error: expected `)`, found end of input"
            );
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn lex_error_surfaces_through_parse() {
    match parse("x = 1\ny = 2 @ 3") {
        Err(Error::Lex(err)) => {
            assert_eq!((err.line, err.column, err.character), (2, 7, '@'));
            assert_eq!(err.to_string(), "Illegal character '@' at line 2, column 7");
        }
        other => panic!("expected a lex error, got {other:?}"),
    }
}

#[test]
fn parse_error_names_found_token() {
    let tokens = tokenize("x = 1 +\n  )").unwrap();
    let err = parse_tokens(&tokens).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: expected expression, found punctuation `)` at line 2, column 3"
    );
}

#[test]
fn lexing_is_repeatable() {
    let source = "def f(a):\n  return a * 2.5 # twice-ish\nf(\"s\")";
    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}

#[test]
fn sample_program() {
    let source = r#"
def add(x, y):
    return x + y

result = add(10, 20) # Compute sum
"#;
    let program = parse(source).unwrap();
    assert_eq!(
        program.to_string(),
        "def add(x, y): return (x + y)\nresult = add(10, 20)\n"
    );
}

#[test]
fn parsing_holds_no_state_between_calls() {
    let tokens = tokenize("a = 1").unwrap();
    let first = parse_tokens(&tokens).unwrap();
    let second = parse_tokens(&tokens).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, Program::default());
}

#[test]
fn independent_inputs_parse_on_separate_threads() {
    let sources = ["a = 1 + 2", "def f(x): return -x", "(4 - 2) / 2"];
    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| std::thread::spawn(move || parse(source).map(|p| p.to_string())))
        .collect();
    let rendered: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "a = (1 + 2)\n",
            "def f(x): return (-x)\n",
            "((4 - 2) / 2)\n",
        ]
    );
}
