//! `cortecs` type checker: incremental inference over span-tagged syntax.
//!
//! Every syntax node is analyzed into an environment built only from its
//! children's environments: a type (or a set of bindings), the requirements
//! it could not discharge, a substitution and its diagnostics. Names are not
//! looked up on the way down; a reference becomes a requirement that the
//! nearest binding scope discharges on the way up. Top-level declarations
//! are then solved over the call graph, mutually recursive ones together.
//!
//! The type language has primitives, arrows, products, unification and
//! user type variables, and row-polymorphic records (open `{a: T | r}` and
//! closed `{a: T}`).
//!
//! # Modules
//!
//! - [`types`] - types, schemes and their display
//! - [`context`] - substitution, environments and their sets
//! - [`infer`] - unification, generalization, fresh variables
//! - [`check`] - per-node production rules
//! - [`graph`] - call graph and cycle clustering
//! - [`driver`] - whole-program checking, configuration, sessions
//! - [`error`] - unifier errors, diagnostics, driver errors
//!
//! # Examples
//!
//! ```
//! use cortecs_syntax::parse_program;
//! use cortecs_typecheck::Checker;
//!
//! let program = parse_program(
//!     "function id(x) { return x }\nfunction one() -> U8 { return id(1ub) }",
//! )
//! .unwrap();
//! let report = Checker::default().check_program(&program).unwrap();
//! assert!(report.is_ok());
//! assert_eq!(report.scheme("one").unwrap().to_string(), "Unit -> U8");
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod context;
pub mod driver;
pub mod error;
pub mod graph;
pub mod infer;
pub mod types;

pub use check::EnvBuilder;
pub use context::{BindableToken, EnvArena, EnvId, Environment, Substitution};
pub use driver::{
    Checker, CheckerConfig, ConfigError, DeclarationReport, ProgramReport, Session,
};
pub use error::{CheckError, CortecsError, CortecsErrors, UnifyError};
pub use graph::{CallGraph, ReducedGraph, Vertex};
pub use infer::VarSupply;
pub use types::{PrimTy, Scheme, Ty, TypeVar};
