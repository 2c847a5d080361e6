//! Type schemes.

use crate::context::Substitution;
use crate::types::{Ty, TypeVar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A type scheme: a type with universally quantified variables.
///
/// A scheme with no bound variables is monomorphic.
///
/// # Example
///
/// ```
/// use cortecs_typecheck::types::{Scheme, Ty, TypeVar};
///
/// let id = Scheme::poly(vec![TypeVar::Unification(0)], Ty::arrow(Ty::var(0), Ty::var(0)));
/// assert!(!id.is_mono());
/// assert!(id.free_vars().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    /// Universally quantified type variables.
    pub vars: Vec<TypeVar>,

    /// The type itself (may contain references to `vars`).
    pub ty: Ty,
}

impl Scheme {
    /// Create a monomorphic type scheme.
    pub fn mono(ty: Ty) -> Self {
        Self {
            vars: Vec::new(),
            ty,
        }
    }

    /// Create a polymorphic type scheme.
    pub fn poly(vars: Vec<TypeVar>, ty: Ty) -> Self {
        Self { vars, ty }
    }

    /// Checks if nothing is quantified.
    pub fn is_mono(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variables of the body that are not bound by this scheme.
    pub fn free_vars(&self) -> BTreeSet<TypeVar> {
        let mut vars = self.ty.free_vars();
        for bound in &self.vars {
            vars.remove(bound);
        }
        vars
    }

    /// Resolves the body through `subst` and re-derives the bound set.
    ///
    /// A bound unification variable that now resolves to another variable is
    /// renamed to that variable's representative; one that resolves to any
    /// other type has been discharged and is dropped. User variables are never
    /// bound by a substitution and are kept as they are.
    pub fn apply(&self, subst: &Substitution) -> Scheme {
        let mut vars = Vec::with_capacity(self.vars.len());
        for var in &self.vars {
            let kept = match var {
                TypeVar::Unification(n) => match subst.apply(&Ty::var(*n)) {
                    Ty::Var(resolved) => Some(resolved),
                    _ => None,
                },
                TypeVar::User(_) => Some(var.clone()),
            };
            if let Some(kept) = kept
                && !vars.contains(&kept)
            {
                vars.push(kept);
            }
        }
        Scheme {
            vars,
            ty: subst.apply(&self.ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::VarSupply;
    use crate::types::PrimTy;

    #[test]
    fn test_free_vars_excludes_bound() {
        let scheme = Scheme::poly(
            vec![TypeVar::Unification(0)],
            Ty::arrow(Ty::var(0), Ty::var(1)),
        );
        assert_eq!(
            scheme.free_vars().into_iter().collect::<Vec<_>>(),
            vec![TypeVar::Unification(1)]
        );
    }

    #[test]
    fn test_apply_drops_discharged_vars() {
        let supply = VarSupply::new();
        let mut subst = Substitution::new();
        subst
            .unify(&Ty::var(0), &Ty::Prim(PrimTy::I32), &supply)
            .unwrap();

        let scheme = Scheme::poly(vec![TypeVar::Unification(0)], Ty::var(0));
        let applied = scheme.apply(&subst);
        assert!(applied.is_mono());
        assert_eq!(applied.ty, Ty::Prim(PrimTy::I32));
    }

    #[test]
    fn test_apply_renames_to_representative() {
        let supply = VarSupply::new();
        let mut subst = Substitution::new();
        subst.unify(&Ty::var(5), &Ty::var(2), &supply).unwrap();

        let scheme = Scheme::poly(vec![TypeVar::Unification(5)], Ty::var(5));
        let applied = scheme.apply(&subst);
        assert_eq!(applied.vars, vec![TypeVar::Unification(2)]);
        assert_eq!(applied.ty, Ty::var(2));
    }
}
