//! Statement nodes.

use super::{Expr, Ident, Node, TypeExpr};
use serde::{Deserialize, Serialize};

/// A statement node.
pub type Stmt = Node<StmtKind>;

/// The forms a statement can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// `let name[: T] = value`
    Let {
        /// The bound name
        name: Ident,
        /// Optional annotation
        annotation: Option<TypeExpr>,
        /// Initializer, if written
        value: Option<Expr>,
    },

    /// `return [value]`
    Return(Option<Expr>),

    /// `if (condition) { body }`
    If {
        /// Condition, if written
        condition: Option<Expr>,
        /// The guarded block
        body: Node<Block>,
    },

    /// An expression evaluated for effect
    Expr(Expr),
}

/// A sequence of statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order
    pub stmts: Vec<Stmt>,
}
