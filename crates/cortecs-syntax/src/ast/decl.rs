//! Declaration nodes.

use super::{Block, Ident, Node, TypeExpr};
use serde::{Deserialize, Serialize};

/// `function name(params) [-> T] { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Declared name
    pub name: Ident,
    /// Parameters in order
    pub params: Vec<Node<Param>>,
    /// Optional result annotation
    pub ret: Option<TypeExpr>,
    /// Function body
    pub body: Node<Block>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name
    pub name: Ident,
    /// Optional annotation
    pub annotation: Option<TypeExpr>,
}

/// A whole document: top-level function declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Declarations in source order; offsets are document positions
    pub functions: Vec<Node<Function>>,
}

impl Program {
    /// Finds a declaration by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Node<Function>> {
        self.functions.iter().find(|f| f.kind.name.kind == name)
    }
}
