//! Type checking context and environment management.
//!
//! - **Substitution**: union-find store with compatibility classes
//! - **Bindings / Requirements / Compatibilities**: the per-node sets
//! - **Environment / EnvArena**: per-node analysis results

pub mod bindings;
pub mod env;
pub mod subst;

pub use bindings::{BindableToken, Bindings, Compatibilities, Demand, Requirements, Site};
pub use env::{EnvArena, EnvId, Environment, Shape, Subordinate};
pub use subst::{Entry, Substitution};
