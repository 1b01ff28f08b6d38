//! Formula tokenizer
//!
//! Splits raw cell text into tokens and decides whether the text is a
//! formula (starts with `=`) or a literal value.

use crate::error::{FormulaError, FormulaResult};
use lazy_regex::{regex, regex_is_match};
use std::fmt;
use tracing::warn;

const EXPRESSION_MARKER: &str = "=";

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Leading `=`
    Expression,

    // Literals
    DecimalNumber(f64),
    WholeNumber(i64),

    // Identifiers and references
    CellRef(String),  // Cell reference like A3, upper-cased
    Function(String), // Function name like pow

    // Operators
    Plus,
    BinaryMinus,
    UnaryMinus,
    Multiply,
    Divide,
    Comma,

    // Delimiters
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Expression => f.write_str("="),
            Token::DecimalNumber(n) => write!(f, "{}", n),
            Token::WholeNumber(n) => write!(f, "{}", n),
            Token::CellRef(s) | Token::Function(s) => f.write_str(s),
            Token::Plus => f.write_str("+"),
            Token::BinaryMinus | Token::UnaryMinus => f.write_str("-"),
            Token::Multiply => f.write_str("*"),
            Token::Divide => f.write_str("/"),
            Token::Comma => f.write_str(","),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Outcome of tokenizing cell text
#[derive(Debug, Clone, PartialEq)]
pub enum TokenResult {
    /// Nothing but whitespace
    Empty,
    /// Formula tokens, without the leading `=`
    Expression(Vec<Token>),
    /// Literal text, returned unmodified
    Value(String),
}

/// Tokenize raw cell text
///
/// # Example
/// ```rust
/// use cellcalc_formula::tokenizer::{tokenize, Token, TokenResult};
///
/// let tokens = tokenize("=-17 - 5").unwrap();
/// assert_eq!(
///     tokens,
///     TokenResult::Expression(vec![
///         Token::UnaryMinus,
///         Token::WholeNumber(17),
///         Token::BinaryMinus,
///         Token::WholeNumber(5),
///     ])
/// );
/// ```
pub fn tokenize(raw: &str) -> FormulaResult<TokenResult> {
    let sanitized: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    // "3A" would otherwise split into a number and a function name
    let invalid_cell_ids = find_invalid_cell_ids(&sanitized);
    if !invalid_cell_ids.is_empty() {
        warn!(?invalid_cell_ids, "rejecting malformed cell ids");
        return Err(FormulaError::Tokenize(format!(
            "Wrong Cell Ids: {}",
            invalid_cell_ids.join(", ")
        )));
    }

    let lexemes = split(&sanitized);

    if lexemes.matched.is_empty() && lexemes.unknown.is_empty() {
        return Ok(TokenResult::Empty);
    }

    let marker_count = lexemes
        .matched
        .iter()
        .filter(|lexeme| **lexeme == EXPRESSION_MARKER)
        .count();

    if lexemes.matched == [EXPRESSION_MARKER] && lexemes.unknown.is_empty() {
        return Err(FormulaError::Tokenize("Empty expression not allowed".into()));
    }
    if marker_count > 1 {
        return Err(FormulaError::Tokenize(
            "= is allowed only once at beginning".into(),
        ));
    }
    if !sanitized.starts_with(EXPRESSION_MARKER) {
        return Ok(TokenResult::Value(raw.to_string()));
    }

    if let Some(unknown) = lexemes.unknown.first() {
        warn!(token = %unknown, "unknown token in expression");
        return Err(FormulaError::Tokenize(format!("Unknown token: {}", unknown)));
    }

    let mut tokens = classify(&lexemes.matched)?;
    tokens.remove(0);
    Ok(TokenResult::Expression(tokens))
}

fn find_invalid_cell_ids(sanitized: &str) -> Vec<&str> {
    regex!(r"[0-9]+[a-zA-Z]+")
        .find_iter(sanitized)
        .map(|m| m.as_str())
        .collect()
}

/// Recognized substrings in order, plus whatever fell between them
struct Lexemes<'a> {
    matched: Vec<&'a str>,
    unknown: Vec<&'a str>,
}

fn split(sanitized: &str) -> Lexemes<'_> {
    let pattern = regex!(
        r"=|[0-9]*\.[0-9]+|[0-9]+|[a-zA-Z]+[0-9]+|[a-zA-Z]+|\+|-|\*|/|,|\(|\)"
    );

    let mut matched = Vec::new();
    let mut unknown = Vec::new();
    let mut last_end = 0;

    for m in pattern.find_iter(sanitized) {
        if m.start() > last_end {
            unknown.push(&sanitized[last_end..m.start()]);
        }
        matched.push(m.as_str());
        last_end = m.end();
    }
    if last_end < sanitized.len() {
        unknown.push(&sanitized[last_end..]);
    }

    Lexemes { matched, unknown }
}

/// Turn lexemes into tokens, resolving unary vs binary minus
fn classify(lexemes: &[&str]) -> FormulaResult<Vec<Token>> {
    // A minus is unary at the start and after anything that expects an operand
    let mut unary_minus_enabled = true;
    let mut tokens = Vec::with_capacity(lexemes.len());

    for &lexeme in lexemes {
        let token = match lexeme {
            EXPRESSION_MARKER => {
                unary_minus_enabled = true;
                Token::Expression
            }
            "+" => {
                unary_minus_enabled = true;
                Token::Plus
            }
            "-" => {
                if unary_minus_enabled {
                    Token::UnaryMinus
                } else {
                    unary_minus_enabled = true;
                    Token::BinaryMinus
                }
            }
            "*" => {
                unary_minus_enabled = true;
                Token::Multiply
            }
            "/" => {
                unary_minus_enabled = true;
                Token::Divide
            }
            "," => {
                unary_minus_enabled = true;
                Token::Comma
            }
            "(" => {
                unary_minus_enabled = true;
                Token::LeftParen
            }
            ")" => {
                unary_minus_enabled = false;
                Token::RightParen
            }
            _ if regex_is_match!(r"^[0-9]*\.[0-9]+$", lexeme) => {
                unary_minus_enabled = false;
                Token::DecimalNumber(parse_number(lexeme)?)
            }
            _ if regex_is_match!(r"^[0-9]+$", lexeme) => {
                unary_minus_enabled = false;
                Token::WholeNumber(parse_number(lexeme)?)
            }
            _ if regex_is_match!(r"^[a-zA-Z]+[0-9]+$", lexeme) => {
                unary_minus_enabled = false;
                Token::CellRef(lexeme.to_uppercase())
            }
            _ if regex_is_match!(r"^[a-zA-Z]+$", lexeme) => Token::Function(lexeme.to_string()),
            _ => {
                return Err(FormulaError::Tokenize(format!("Unknown token: {}", lexeme)));
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn parse_number<T>(lexeme: &str) -> FormulaResult<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    lexeme
        .parse()
        .map_err(|e| FormulaError::Tokenize(format!("Can't parse '{}' because {}", lexeme, e)))
}
