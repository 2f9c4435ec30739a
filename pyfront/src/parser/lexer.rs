use std::fmt;

use crate::error::LexError;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    Operator,
    Punctuation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::FloatLiteral => "float",
            TokenKind::StringLiteral => "string",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text exactly as matched, quotes included for strings.
    pub text: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character, counted in characters.
    pub column: usize,
}

impl Token {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

pub const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "False", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return", "True", "try", "while",
    "with", "yield",
];

// Two-character operators come first so `==` is never read as `=` `=`.
pub const OPERATORS: &[&str] = &["==", "!=", "&&", "||", "+", "-", "*", "/", ">", "<", "="];

pub const PUNCTUATION: &[char] = &[';', ',', '(', ')', '[', ']', '{', '}', ':'];

/// What a matched rule does with its text.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    Newline,
    Whitespace,
    Comment,
    Emit(TokenKind),
}

/// Returns the byte length matched at the start of the input, if any.
type Matcher = fn(&str) -> Option<usize>;

// Tried in order at every position; the first match wins.
const RULES: &[(Rule, Matcher)] = &[
    (Rule::Newline, match_newline),
    (Rule::Whitespace, match_whitespace),
    (Rule::Emit(TokenKind::Keyword), match_keyword),
    (Rule::Emit(TokenKind::Identifier), match_identifier),
    (Rule::Emit(TokenKind::IntegerLiteral), match_integer),
    (Rule::Emit(TokenKind::FloatLiteral), match_float),
    (Rule::Emit(TokenKind::StringLiteral), match_string),
    (Rule::Emit(TokenKind::Operator), match_operator),
    (Rule::Emit(TokenKind::Punctuation), match_punctuation),
    (Rule::Comment, match_comment),
];

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut position = Position::default();
    let mut offset = 0;

    while let Some(character) = source[offset..].chars().next() {
        let rest = &source[offset..];
        let Some((rule, len)) = match_rule(rest) else {
            return Err(LexError {
                line: position.line,
                column: position.column,
                character,
            });
        };

        let text = &rest[..len];
        if let Rule::Emit(kind) = rule {
            tracing::trace!(%kind, text, line = position.line, column = position.column, "token");
            tokens.push(Token {
                kind,
                text: text.to_string(),
                line: position.line,
                column: position.column,
            });
        }

        position.advance(text);
        offset += len;
    }

    tracing::debug!(tokens = tokens.len(), lines = position.line, "tokenized source");
    Ok(tokens)
}

fn match_rule(rest: &str) -> Option<(Rule, usize)> {
    RULES.iter().find_map(|&(rule, matcher)| {
        matcher(rest).filter(|&len| len > 0).map(|len| (rule, len))
    })
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn digit_run(input: &str) -> usize {
    input.bytes().take_while(u8::is_ascii_digit).count()
}

/// True when the number ending at `len` runs straight into a name.
fn glued_to_word(input: &str, len: usize) -> bool {
    input[len..].chars().next().is_some_and(is_identifier_continue)
}

fn match_newline(input: &str) -> Option<usize> {
    input.starts_with('\n').then_some(1)
}

fn match_whitespace(input: &str) -> Option<usize> {
    let len = input
        .chars()
        .take_while(|&ch| ch.is_whitespace() && ch != '\n')
        .map(char::len_utf8)
        .sum();
    Some(len)
}

fn match_keyword(input: &str) -> Option<usize> {
    let len = match_identifier(input)?;
    KEYWORDS.contains(&&input[..len]).then_some(len)
}

fn match_identifier(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    if !chars.next().is_some_and(is_identifier_start) {
        return None;
    }
    Some(1 + chars.take_while(|&ch| is_identifier_continue(ch)).count())
}

fn match_integer(input: &str) -> Option<usize> {
    let len = digit_run(input);
    if len == 0 || glued_to_word(input, len) {
        return None;
    }
    // Leave `12.5` for the float rule.
    let after = &input[len..];
    if after.starts_with('.') && digit_run(&after[1..]) > 0 {
        return None;
    }
    Some(len)
}

fn match_float(input: &str) -> Option<usize> {
    let whole = digit_run(input);
    if whole == 0 || !input[whole..].starts_with('.') {
        return None;
    }
    let fraction = digit_run(&input[whole + 1..]);
    if fraction == 0 {
        return None;
    }
    let len = whole + 1 + fraction;
    (!glued_to_word(input, len)).then_some(len)
}

fn match_string(input: &str) -> Option<usize> {
    let body = input.strip_prefix('"')?;
    body.find('"').map(|end| end + 2)
}

fn match_operator(input: &str) -> Option<usize> {
    OPERATORS
        .iter()
        .find(|op| input.starts_with(*op))
        .map(|op| op.len())
}

fn match_punctuation(input: &str) -> Option<usize> {
    input
        .chars()
        .next()
        .filter(|ch| PUNCTUATION.contains(ch))
        .map(char::len_utf8)
}

fn match_comment(input: &str) -> Option<usize> {
    if !input.starts_with('#') {
        return None;
    }
    Some(input.find('\n').unwrap_or(input.len()))
}
