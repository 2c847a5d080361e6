//! Recomposition after an edit.
//!
//! [`EnvBuilder::rebuild_function`] walks an edited declaration next to the
//! version it replaces. Each child is paired with an old child:
//!
//! - **Unchanged** syntax keeps its environment and [`EnvId`] untouched, even
//!   if it moved among its siblings.
//! - **Changed** syntax handled by the same rule is recomposed: the rule runs
//!   again over its children, which are paired the same way, and the result
//!   takes the old environment's arena slot.
//! - **New** syntax is built from scratch into fresh slots.
//!
//! Only the edited subtree is analyzed again; every ancestor up to the
//! declaration is re-merged from the environments its other children kept.

use crate::check::EnvBuilder;
use crate::context::{EnvId, Environment};
use cortecs_log::trace;
use cortecs_syntax::ast::{Block, Expr, ExprKind, Function, Node, Stmt, StmtKind};
use std::iter;

/// A syntax node together with the rule that analyzes it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Part<'s> {
    Function(&'s Node<Function>),
    Block(&'s Node<Block>),
    Stmt(&'s Stmt),
    Expr(&'s Expr),
}

impl<'s> Part<'s> {
    /// Same rule over equal syntax. Offsets belong to the parent and are
    /// ignored.
    fn same(&self, other: &Part<'_>) -> bool {
        match (self, other) {
            (Self::Function(a), Part::Function(b)) => a.kind == b.kind && a.span == b.span,
            (Self::Block(a), Part::Block(b)) => a.kind == b.kind && a.span == b.span,
            (Self::Stmt(a), Part::Stmt(b)) => a.kind == b.kind && a.span == b.span,
            (Self::Expr(a), Part::Expr(b)) => a.kind == b.kind && a.span == b.span,
            _ => false,
        }
    }

    fn same_rule(&self, other: &Part<'_>) -> bool {
        matches!(
            (self, other),
            (Self::Function(_), Part::Function(_))
                | (Self::Block(_), Part::Block(_))
                | (Self::Stmt(_), Part::Stmt(_))
                | (Self::Expr(_), Part::Expr(_))
        )
    }

    /// Children with an environment, in the order the rule absorbs them.
    fn children(&self) -> Vec<Part<'s>> {
        match *self {
            Self::Function(func) => vec![Part::Block(&func.kind.body)],
            Self::Block(block) => block.kind.stmts.iter().map(Part::Stmt).collect(),
            Self::Stmt(stmt) => match &stmt.kind {
                StmtKind::Let { value, .. } | StmtKind::Return(value) => {
                    value.iter().map(Part::Expr).collect()
                }
                StmtKind::If { condition, body } => condition
                    .iter()
                    .map(Part::Expr)
                    .chain(iter::once(Part::Block(body)))
                    .collect(),
                StmtKind::Expr(expr) => vec![Part::Expr(expr)],
            },
            Self::Expr(expr) => match &expr.kind {
                ExprKind::Name(_) | ExprKind::Literal(_) => Vec::new(),
                ExprKind::Unary { operand: inner, .. } | ExprKind::Group(inner) => {
                    inner.as_deref().map(Part::Expr).into_iter().collect()
                }
                ExprKind::Binary { lhs, rhs, .. } => iter::once(&**lhs)
                    .chain(rhs.as_deref())
                    .map(Part::Expr)
                    .collect(),
                ExprKind::Call { callee, args } => iter::once(&**callee)
                    .chain(args)
                    .map(Part::Expr)
                    .collect(),
                ExprKind::Record(inits) => inits
                    .iter()
                    .filter_map(|init| init.kind.value.as_ref())
                    .map(Part::Expr)
                    .collect(),
                ExprKind::Access { target, .. } => vec![Part::Expr(target)],
            },
        }
    }
}

/// Old children of a node being recomposed, lined up with its new children.
#[derive(Debug, Default)]
pub(crate) struct Frame<'s> {
    pairs: Vec<Option<(Part<'s>, EnvId)>>,
    next: usize,
}

impl<'s> Frame<'s> {
    fn pair(old: &[(Part<'s>, EnvId)], new: &[Part<'_>]) -> Self {
        let mut taken = vec![false; old.len()];
        let mut pairs = vec![None; new.len()];

        // Unchanged children first, wherever they moved.
        for (pair, part) in pairs.iter_mut().zip(new) {
            let found = old
                .iter()
                .zip(&taken)
                .position(|((previous, _), taken)| !taken && previous.same(part));
            if let Some(index) = found {
                taken[index] = true;
                *pair = Some(old[index]);
            }
        }
        // A changed child takes the old slot at its own position.
        for (index, (pair, part)) in pairs.iter_mut().zip(new).enumerate() {
            if pair.is_some() || index >= old.len() || taken[index] {
                continue;
            }
            if old[index].0.same_rule(part) {
                taken[index] = true;
                *pair = Some(old[index]);
            }
        }
        Self { pairs, next: 0 }
    }

    fn claim(&mut self) -> Option<(Part<'s>, EnvId)> {
        let claimed = self.pairs.get(self.next).copied().flatten();
        self.next += 1;
        claimed
    }
}

impl<'a> EnvBuilder<'a> {
    /// Rebuilds the declaration `func` whose earlier version `previous` was
    /// built into `root`, reusing every unchanged subtree.
    ///
    /// Returns `root`: the declaration keeps its slot.
    pub fn rebuild_function(
        &mut self,
        previous: &'a Node<Function>,
        root: EnvId,
        func: &Node<Function>,
    ) -> EnvId {
        self.frames
            .push(Frame::pair(&[(Part::Function(previous), root)], &[Part::Function(func)]));
        let id = self.function(func);
        self.frames.pop();
        id
    }

    /// Number of subtrees reused as they were since the builder was created.
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Runs `rule` for `part` unless an earlier environment can stand in.
    pub(crate) fn build(
        &mut self,
        part: Part<'_>,
        rule: impl FnOnce(&mut Self) -> Environment,
    ) -> EnvId {
        let Some(frame) = self.frames.last_mut() else {
            let env = rule(self);
            return self.arena.alloc(env);
        };
        match frame.claim() {
            Some((old, id)) if old.same(&part) => {
                trace!("reusing environment {}", id.index());
                self.reused += 1;
                id
            }
            Some((old, id)) => {
                let children: Vec<_> = old
                    .children()
                    .into_iter()
                    .zip(self.arena.get(id).subordinates.iter().map(|sub| sub.env))
                    .collect();
                self.frames.push(Frame::pair(&children, &part.children()));
                let env = rule(self);
                self.frames.pop();
                trace!("recomposed environment {}", id.index());
                self.arena.replace(id, env);
                id
            }
            None => {
                self.frames.push(Frame::default());
                let env = rule(self);
                self.frames.pop();
                self.arena.alloc(env)
            }
        }
    }
}
