//! Formula Abstract Syntax Tree types

use cellcalc_core::CellId;

/// Deepest tree the parser builds and the evaluator walks
///
/// Tree building and evaluation recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parsed content of a cell
///
/// Nodes are immutable once handed to the evaluator; an update always
/// replaces the whole tree for a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Cleared cell
    Empty,
    /// Literal non-formula content
    Text(String),

    // === Values ===
    WholeNumber(i64),
    DecimalNumber(f64),
    /// Single cell reference
    Reference(CellId),

    // === Operators ===
    UnaryMinus(Box<Node>),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },

    // === Named functions ===
    /// `pow(base, exponent)`
    Power {
        base: Box<Node>,
        exponent: Box<Node>,
    },
}

impl Node {
    /// Build a binary operation
    pub fn binary(op: BinaryOperator, left: Node, right: Node) -> Self {
        Node::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a unary minus
    pub fn negate(operand: Node) -> Self {
        Node::UnaryMinus(Box::new(operand))
    }

    /// Build a `pow` call
    pub fn power(base: Node, exponent: Node) -> Self {
        Node::Power {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    /// Whether the evaluator stores no value for this node
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Empty | Node::Text(_))
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}
