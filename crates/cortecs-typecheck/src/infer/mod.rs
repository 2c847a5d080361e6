//! Type inference machinery.
//!
//! - **VarSupply**: fresh variables
//! - **Unifier**: structural unification over a substitution
//! - **generalize**: let and declaration level generalization, instantiation

pub mod context;
pub mod generalize;
pub mod unify;

pub use context::VarSupply;
pub use generalize::{generalize_closed, generalize_let, instantiate};
pub use unify::Unifier;
