//! Environment production rules.
//!
//! [`EnvBuilder`] turns syntax nodes into environments, bottom-up. Each rule
//! reads only the environments of the node's children, so an unchanged
//! subtree never has to be analyzed again.
//!
//! - Expressions: [`EnvBuilder::expression`]
//! - Statements and blocks: [`EnvBuilder::statement`], [`EnvBuilder::block`]
//! - Declarations: [`EnvBuilder::function`]
//! - Recomposition after an edit: [`EnvBuilder::rebuild_function`]
//! - Type annotation conversion: [`convert_annotation`]

pub mod decl;
pub mod expr;
mod reuse;
pub mod stmt;
pub mod ty;

pub use expr::literal_type;
pub use ty::{Annotation, convert_annotation};

use crate::check::reuse::Frame;
use crate::context::{EnvArena, EnvId, Environment, Site, Subordinate};
use crate::infer::VarSupply;
use crate::types::Ty;
use cortecs_log::trace;
use cortecs_syntax::Span;

/// Builds environments into an arena.
pub struct EnvBuilder<'a> {
    arena: &'a mut EnvArena,
    supply: &'a VarSupply,
    frames: Vec<Frame<'a>>,
    reused: usize,
}

impl<'a> EnvBuilder<'a> {
    /// Create a builder allocating into `arena`.
    pub fn new(arena: &'a mut EnvArena, supply: &'a VarSupply) -> Self {
        Self {
            arena,
            supply,
            frames: Vec::new(),
            reused: 0,
        }
    }

    /// The arena built so far.
    pub fn arena(&self) -> &EnvArena {
        self.arena
    }

    /// Folds the child `child`, seen at `offset`, into `env`.
    ///
    /// Requirements are forwarded unchanged apart from their sites. Returns
    /// the child's type, or [`Ty::Invalid`] for a block-shaped child.
    fn absorb(&self, env: &mut Environment, child: EnvId, offset: Span) -> Ty {
        let child_env = self.arena.get(child);
        env.requirements.extend(&child_env.requirements, offset);
        env.compatibilities.extend(&child_env.compatibilities);
        if let Err(err) = env.substitution.merge(&child_env.substitution, self.supply) {
            env.error(err.to_string(), offset, child_env.span);
        }
        if let Some(vars) = child_env.user_vars() {
            env.add_user_vars(vars.iter().cloned());
        }
        env.subordinates.push(Subordinate { env: child, offset });
        child_env.ty().cloned().unwrap_or(Ty::Invalid)
    }

    /// Unifies `expected` with `found` in `env`.
    ///
    /// On failure the error is recorded at `site` and `found` is poisoned.
    fn constrain(&self, env: &mut Environment, expected: &Ty, found: &Ty, site: Site) -> bool {
        match env.substitution.unify(expected, found, self.supply) {
            Ok(()) => true,
            Err(err) => {
                trace!("constraint failed at {}: {}", site.offset, err);
                env.error(err.to_string(), site.offset, site.span);
                env.substitution.poison(found);
                false
            }
        }
    }
}
