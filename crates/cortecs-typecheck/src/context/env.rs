//! Per-node environments and the arena that stores them.
//!
//! Every syntax node is analyzed into an [`Environment`]. Parents refer to
//! their children's environments through [`Subordinate`] handles into an
//! [`EnvArena`], so replacing an edited subtree is a single slot swap.
//!
//! # Design
//!
//! - **Two shapes**: an expression environment synthesizes a type; a block
//!   environment introduces bindings instead.
//! - **Relative positions**: errors and requirement sites are stored relative
//!   to the node that owns them and re-offset on the way up.
//! - **Immutable once built**: rules read their children and build a new
//!   environment; nothing is patched in place except through
//!   [`EnvArena::replace`].

use crate::context::{Bindings, Compatibilities, Requirements, Substitution};
use crate::error::CortecsError;
use crate::types::Ty;
use cortecs_syntax::Span;
use std::collections::BTreeSet;

/// Handle of an environment inside an [`EnvArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvId(u32);

impl EnvId {
    /// Position in the arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node produces besides its requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// An expression: one synthesized type.
    Expression {
        /// The synthesized type
        ty: Ty,
    },
    /// A statement, block or declaration: bindings for later siblings.
    Block {
        /// Names introduced for the rest of the enclosing block
        bindings: Bindings,
        /// User type variables named by annotations in this subtree
        user_vars: BTreeSet<String>,
    },
}

/// A child environment and where the child starts relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subordinate {
    /// The child
    pub env: EnvId,
    /// Child start relative to the parent start
    pub offset: Span,
}

/// The analysis result of one syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Type or bindings
    pub shape: Shape,
    /// Extent of the node
    pub span: Span,
    /// Demands not discharged inside the node
    pub requirements: Requirements,
    /// Variables whose instances link back to them
    pub compatibilities: Compatibilities,
    /// Everything learned about the node's variables
    pub substitution: Substitution,
    /// Child environments
    pub subordinates: Vec<Subordinate>,
    /// Errors produced by this node itself, relative to its start
    pub errors: Vec<CortecsError>,
}

impl Environment {
    fn with_shape(shape: Shape, span: Span) -> Self {
        Self {
            shape,
            span,
            requirements: Requirements::new(),
            compatibilities: Compatibilities::new(),
            substitution: Substitution::new(),
            subordinates: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// An expression environment of type `ty` with nothing else.
    pub fn expression(ty: Ty, span: Span) -> Self {
        Self::with_shape(Shape::Expression { ty }, span)
    }

    /// The environment of a missing expression.
    pub fn empty_expression(span: Span) -> Self {
        Self::expression(Ty::Invalid, span)
    }

    /// A block environment with no bindings.
    pub fn block(span: Span) -> Self {
        Self::with_shape(
            Shape::Block {
                bindings: Bindings::new(),
                user_vars: BTreeSet::new(),
            },
            span,
        )
    }

    /// The synthesized type of an expression environment.
    pub fn ty(&self) -> Option<&Ty> {
        match &self.shape {
            Shape::Expression { ty } => Some(ty),
            Shape::Block { .. } => None,
        }
    }

    /// The bindings of a block environment.
    pub fn bindings(&self) -> Option<&Bindings> {
        match &self.shape {
            Shape::Block { bindings, .. } => Some(bindings),
            Shape::Expression { .. } => None,
        }
    }

    /// Replaces the bindings; an expression environment becomes a block.
    pub fn set_bindings(&mut self, new: Bindings) {
        if let Shape::Block { bindings, .. } = &mut self.shape {
            *bindings = new;
            return;
        }
        self.shape = Shape::Block {
            bindings: new,
            user_vars: BTreeSet::new(),
        };
    }

    /// User type variables named in this subtree.
    pub fn user_vars(&self) -> Option<&BTreeSet<String>> {
        match &self.shape {
            Shape::Block { user_vars, .. } => Some(user_vars),
            Shape::Expression { .. } => None,
        }
    }

    /// Records user type variables on a block environment.
    pub fn add_user_vars(&mut self, vars: impl IntoIterator<Item = String>) {
        if let Shape::Block { user_vars, .. } = &mut self.shape {
            user_vars.extend(vars);
        }
    }

    /// Records an error relative to this node.
    pub fn error(&mut self, message: impl Into<String>, offset: Span, span: Span) {
        self.errors.push(CortecsError::new(message, offset, span));
    }
}

/// Storage for every environment of a document.
#[derive(Debug, Clone, Default)]
pub struct EnvArena {
    envs: Vec<Environment>,
}

impl EnvArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `env` and returns its handle.
    pub fn alloc(&mut self, env: Environment) -> EnvId {
        let id = EnvId(self.envs.len() as u32);
        self.envs.push(env);
        id
    }

    /// The environment behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn get(&self, id: EnvId) -> &Environment {
        &self.envs[id.index()]
    }

    /// Swaps the environment behind `id`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn replace(&mut self, id: EnvId, env: Environment) -> Environment {
        std::mem::replace(&mut self.envs[id.index()], env)
    }

    /// Number of stored environments, live or not.
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    /// Checks if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    /// Errors of `id` and of every environment below it, relative to `id`.
    ///
    /// A node's own errors come before those of its children; children are
    /// visited in order.
    pub fn errors(&self, id: EnvId) -> Vec<CortecsError> {
        let mut errors = Vec::new();
        let mut stack = vec![(id, Span::ZERO)];
        while let Some((id, shift)) = stack.pop() {
            let env = self.get(id);
            errors.extend(env.errors.iter().cloned().map(|e| e.shifted(shift)));
            for sub in env.subordinates.iter().rev() {
                stack.push((sub.env, shift + sub.offset));
            }
        }
        errors
    }

    /// Number of environments reachable from `id`, itself included.
    pub fn subtree_len(&self, id: EnvId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.get(id).subordinates.iter().map(|s| s.env));
        }
        count
    }
}
