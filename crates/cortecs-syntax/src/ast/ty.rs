//! Type annotation nodes.

use super::{Ident, Node};
use serde::{Deserialize, Serialize};

/// A type annotation node.
pub type TypeExpr = Node<TypeKind>;

/// Type annotation forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    /// A primitive name such as `I32`, or a lowercase type variable such as `t`
    Named(String),

    /// Closed record: `{name: String, age: U8}`
    Record(Vec<(Ident, TypeExpr)>),

    /// Function type: `T -> U` or `(T, U) -> V`
    Arrow {
        /// Parameter types; empty for `() -> T`
        params: Vec<TypeExpr>,
        /// Result type
        ret: Box<TypeExpr>,
    },
}

impl TypeKind {
    /// Returns `true` for names written in lowercase, which denote type
    /// variables rather than concrete types.
    #[must_use]
    pub fn is_type_variable(name: &str) -> bool {
        name.starts_with(|c: char| c.is_lowercase())
    }
}
