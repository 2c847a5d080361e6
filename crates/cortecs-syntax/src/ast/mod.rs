//! Span-tagged syntax tree.
//!
//! Every node is a [`Node`]: its kind, its extent, and its start measured
//! from the start of its parent. Relative starts are what make an edited
//! subtree's diagnostics and requirements independent of where the subtree
//! sits in the document; only the edited node's own offset moves when text
//! above it changes.
//!
//! A child that is syntactically absent (an `if ()` with no condition, a
//! `let x =` with no initializer) is `None`, never a parse failure.
//!
//! # Modules
//!
//! - [`expr`] - expressions
//! - [`stmt`] - statements and blocks
//! - [`decl`] - function declarations and programs
//! - [`ty`] - type annotations

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use decl::{Function, Param, Program};
pub use expr::{BinaryOp, Expr, ExprKind, FieldInit, Literal, Operator, UnaryOp};
pub use stmt::{Block, Stmt, StmtKind};
pub use ty::{TypeExpr, TypeKind};

use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

/// A syntax node with its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<T> {
    /// Start of this node relative to the start of its parent
    pub offset: Span,

    /// Extent of this node from its own start
    pub span: Span,

    /// The node itself
    pub kind: T,
}

impl<T> Node<T> {
    /// Creates a node.
    #[must_use]
    pub const fn new(offset: Span, span: Span, kind: T) -> Self {
        Self { offset, span, kind }
    }

    /// Re-expresses an absolute `offset` relative to `parent_start`.
    ///
    /// The parser builds nodes with absolute starts and rebases each child
    /// once its parent's start is known.
    #[must_use]
    pub fn rebase(mut self, parent_start: Span) -> Self {
        self.offset = self.offset - parent_start;
        self
    }
}

impl<T> Spanned for Node<T> {
    fn span(&self) -> Span {
        self.span
    }

    fn offset(&self) -> Span {
        self.offset
    }
}

/// A name with its position, as used for binders and labels.
pub type Ident = Node<String>;
