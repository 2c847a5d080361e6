//! Expression nodes.

use super::{Ident, Node};
use crate::token::{FloatSuffix, IntSuffix};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An expression node.
pub type Expr = Node<ExprKind>;

/// The forms an expression can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Reference to a name: `x`
    Name(String),

    /// Constant: `1ub`, `0.5d`, `'c'`
    Literal(Literal),

    /// Prefix operator: `-e`, `!e`
    Unary {
        /// The operator
        op: Node<UnaryOp>,
        /// The operand, if written
        operand: Option<Box<Expr>>,
    },

    /// Infix operator: `l + r`
    Binary {
        /// The operator
        op: Node<BinaryOp>,
        /// Left operand
        lhs: Box<Expr>,
        /// Right operand, if written
        rhs: Option<Box<Expr>>,
    },

    /// Parenthesized expression: `(e)`
    Group(Option<Box<Expr>>),

    /// Function application: `f(a, b)`
    Call {
        /// The applied expression
        callee: Box<Expr>,
        /// Arguments in order
        args: Vec<Expr>,
    },

    /// Record construction: `{name: e, age: 3ub}`
    Record(Vec<Node<FieldInit>>),

    /// Field selection: `e.label`
    Access {
        /// The record expression
        target: Box<Expr>,
        /// The selected label
        label: Ident,
    },
}

/// One `label: value` entry of a record literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInit {
    /// The field label
    pub label: Ident,
    /// The field value, if written
    pub value: Option<Expr>,
}

/// A literal constant with its classified suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer digits and optional width suffix
    Int(String, Option<IntSuffix>),
    /// Float digits and optional width suffix
    Float(String, Option<FloatSuffix>),
    /// String contents
    Str(String),
    /// Character
    Char(char),
    /// Boolean
    Bool(bool),
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// All infix operators.
    pub const ALL: [BinaryOp; 13] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
        Self::And,
        Self::Or,
    ];

    /// The source symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
}

impl UnaryOp {
    /// The source symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

/// Any operator; prefix and infix `-` are distinct operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    /// Prefix operator
    Unary(UnaryOp),
    /// Infix operator
    Binary(BinaryOp),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary(op) => write!(f, "prefix {}", op.symbol()),
            Self::Binary(op) => f.write_str(op.symbol()),
        }
    }
}
