//! Type representation and operations.
//!
//! - **Ty**: inferred types with unification and user variables
//! - **Scheme**: quantified types bound to names
//! - **Display**: pretty-printing for diagnostics

pub mod display;
pub mod scheme;
pub mod ty;

pub use scheme::Scheme;
pub use ty::{Fields, PrimTy, Ty, TypeVar};
