//! Formula parser
//!
//! Turns tokens into a [`Node`] tree. Operators are applied strictly left to
//! right: the token list is rearranged into prefix order on a stack and the
//! tree is then built by popping that stack.

use crate::ast::{BinaryOperator, Node, MAX_NESTING_DEPTH};
use crate::error::{FormulaError, FormulaResult};
use crate::tokenizer::{tokenize, Token, TokenResult};
use cellcalc_core::CellId;
use lazy_regex::regex_is_match;
use tracing::warn;

const POWER_FUNCTION: &str = "pow";

/// Outcome of parsing cell text
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// Blank input
    Empty,
    Success(Node),
    Failure(String),
}

impl ParseResult {
    /// Convert into a `Result`, mapping blank input to [`Node::Empty`]
    pub fn into_result(self) -> FormulaResult<Node> {
        match self {
            ParseResult::Empty => Ok(Node::Empty),
            ParseResult::Success(node) => Ok(node),
            ParseResult::Failure(message) => Err(FormulaError::Parse(message)),
        }
    }
}

impl From<FormulaResult<Node>> for ParseResult {
    fn from(result: FormulaResult<Node>) -> Self {
        match result {
            Ok(node) => ParseResult::Success(node),
            Err(e) => ParseResult::Failure(e.to_string()),
        }
    }
}

/// Parse raw cell text into a node
///
/// Text starting with `=` is a formula; anything else is a literal number
/// or opaque text.
///
/// # Example
/// ```rust
/// use cellcalc_formula::{parse, BinaryOperator, Node, ParseResult};
///
/// assert_eq!(parse(""), ParseResult::Empty);
/// assert_eq!(parse("17"), ParseResult::Success(Node::WholeNumber(17)));
/// assert_eq!(
///     parse("=17 - 5"),
///     ParseResult::Success(Node::binary(
///         BinaryOperator::Subtract,
///         Node::WholeNumber(17),
///         Node::WholeNumber(5),
///     ))
/// );
/// ```
pub fn parse(raw: &str) -> ParseResult {
    let result = match tokenize(raw) {
        Ok(TokenResult::Empty) => return ParseResult::Empty,
        Ok(TokenResult::Value(text)) => parse_literal(&text),
        Ok(TokenResult::Expression(tokens)) => parse_expression(tokens),
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        warn!(input = raw, error = %e, "failed to parse cell text");
    }
    result.into()
}

fn parse_literal(text: &str) -> FormulaResult<Node> {
    let cant_parse =
        |reason: String| FormulaError::Parse(format!("Can't parse '{}' because {}", text, reason));

    if regex_is_match!(r"^-?[0-9]+$", text) {
        text.parse()
            .map(Node::WholeNumber)
            .map_err(|e: std::num::ParseIntError| cant_parse(e.to_string()))
    } else if regex_is_match!(r"^-?[0-9]*\.[0-9]+$", text) {
        text.parse()
            .map(Node::DecimalNumber)
            .map_err(|e: std::num::ParseFloatError| cant_parse(e.to_string()))
    } else {
        Ok(Node::Text(text.to_string()))
    }
}

fn parse_expression(tokens: Vec<Token>) -> FormulaResult<Node> {
    let mut stack = to_prefix_stack(tokens);
    let node = build_node(&mut stack, 0)?;

    if !stack.is_empty() {
        return Err(FormulaError::Parse(
            "Can't parse because of dangling tokens".into(),
        ));
    }

    Ok(node)
}

/// Rearrange infix tokens so that popping the returned stack (from the end)
/// yields a prefix traversal.
fn to_prefix_stack(tokens: Vec<Token>) -> Vec<Token> {
    let mut stack: Vec<Token> = Vec::with_capacity(tokens.len());
    // Operators on top of the stack still waiting for their operand
    let mut pending_moves = 0;
    let mut open_function: Option<String> = None;

    for token in tokens {
        match token {
            Token::WholeNumber(_) | Token::DecimalNumber(_) | Token::CellRef(_) => {
                // Slide the operand underneath the waiting operators; they come
                // back in reverse so the earliest one is popped last.
                let split = stack.len().saturating_sub(pending_moves);
                let mut moved = stack.split_off(split);
                moved.reverse();
                stack.push(token);
                stack.extend(moved);
                pending_moves = 0;
            }
            Token::Plus
            | Token::BinaryMinus
            | Token::UnaryMinus
            | Token::Multiply
            | Token::Divide => {
                stack.push(token);
                pending_moves += 1;
            }
            Token::Function(ref name) => {
                open_function = Some(name.clone());
                stack.push(token);
            }
            Token::RightParen => {
                if let Some(name) = open_function.take() {
                    let position = stack
                        .iter()
                        .rposition(|t| matches!(t, Token::Function(n) if *n == name));
                    if let Some(position) = position {
                        let function = stack.remove(position);
                        stack.push(function);
                    }
                }
            }
            Token::LeftParen | Token::Comma | Token::Expression => {}
        }
    }

    stack
}

fn build_node(stack: &mut Vec<Token>, depth: usize) -> FormulaResult<Node> {
    if depth > MAX_NESTING_DEPTH {
        return Err(FormulaError::Parse(
            "Can't parse because the expression is too deeply nested".into(),
        ));
    }

    let token = stack.pop().ok_or_else(|| {
        FormulaError::Parse("Can't parse because the expression is incomplete".into())
    })?;

    let node = match token {
        Token::WholeNumber(n) => Node::WholeNumber(n),
        Token::DecimalNumber(n) => Node::DecimalNumber(n),
        Token::CellRef(text) => {
            let cell = CellId::parse(&text)
                .map_err(|e| FormulaError::InvalidReference(format!("'{}': {}", text, e)))?;
            Node::Reference(cell)
        }
        Token::Plus => build_binary(BinaryOperator::Add, stack, depth)?,
        Token::BinaryMinus => build_binary(BinaryOperator::Subtract, stack, depth)?,
        Token::Multiply => build_binary(BinaryOperator::Multiply, stack, depth)?,
        Token::Divide => build_binary(BinaryOperator::Divide, stack, depth)?,
        Token::UnaryMinus => Node::negate(build_node(stack, depth + 1)?),
        Token::Function(name) => {
            if !name.eq_ignore_ascii_case(POWER_FUNCTION) {
                return Err(FormulaError::UnknownFunction(name));
            }
            let exponent = build_node(stack, depth + 1)?;
            let base = build_node(stack, depth + 1)?;
            Node::power(base, exponent)
        }
        Token::LeftParen | Token::RightParen | Token::Comma | Token::Expression => {
            return Err(FormulaError::Parse(format!(
                "Can't parse because '{}' is not allowed here",
                token
            )));
        }
    };

    Ok(node)
}

fn build_binary(op: BinaryOperator, stack: &mut Vec<Token>, depth: usize) -> FormulaResult<Node> {
    // Right operand sits above the left one
    let right = build_node(stack, depth + 1)?;
    let left = build_node(stack, depth + 1)?;
    Ok(Node::binary(op, left, right))
}
