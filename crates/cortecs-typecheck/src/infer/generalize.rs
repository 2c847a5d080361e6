//! Generalization and instantiation.

use crate::context::{Compatibilities, Substitution};
use crate::infer::VarSupply;
use crate::types::{Scheme, Ty, TypeVar};
use fxhash::FxHashMap;

/// Let-level generalization.
///
/// Quantifies the unification variables of the resolved `ty` and marks each
/// of them compatible, so constraints found at instantiation sites flow back.
/// User variables stay rigid and free.
pub fn generalize_let(ty: &Ty, subst: &Substitution) -> (Scheme, Compatibilities) {
    let ty = subst.apply(ty);
    let vars = ty.unification_vars();
    let compat = vars.iter().copied().collect();
    let scheme = Scheme::poly(vars.into_iter().map(TypeVar::Unification).collect(), ty);
    (scheme, compat)
}

/// Declaration-level generalization.
///
/// Quantifies every free variable, user variables included. The result is
/// closed: its instances never link back.
pub fn generalize_closed(ty: &Ty, subst: &Substitution) -> Scheme {
    let ty = subst.apply(ty);
    Scheme::poly(ty.free_vars().into_iter().collect(), ty)
}

/// Replaces the bound variables of `scheme` with fresh ones.
///
/// A fresh variable is linked to its original when the original belongs to
/// `compat`.
pub fn instantiate(
    scheme: &Scheme,
    compat: &Compatibilities,
    subst: &mut Substitution,
    supply: &VarSupply,
) -> Ty {
    let scheme = scheme.apply(subst);
    if scheme.is_mono() {
        return scheme.ty;
    }

    let mut mapping = FxHashMap::default();
    for var in &scheme.vars {
        let fresh = supply.fresh();
        if let TypeVar::Unification(original) = var
            && compat.contains(*original, subst)
        {
            subst.link_instance(*original, fresh);
        }
        mapping.insert(var.clone(), fresh);
    }
    scheme.ty.rename(&mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimTy;

    #[test]
    fn test_generalize_let_quantifies_unification_vars() {
        let subst = Substitution::new();
        let ty = Ty::arrow(Ty::var(4), Ty::Product(vec![Ty::user("t"), Ty::var(2)]));
        let (scheme, compat) = generalize_let(&ty, &subst);

        assert_eq!(
            scheme.vars,
            vec![TypeVar::Unification(2), TypeVar::Unification(4)]
        );
        assert_eq!(compat.iter().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(
            scheme.free_vars().into_iter().collect::<Vec<_>>(),
            vec![TypeVar::User("t".into())]
        );
    }

    #[test]
    fn test_generalize_resolved_is_mono() {
        let supply = VarSupply::new();
        let mut subst = Substitution::new();
        subst.unify(&Ty::var(0), &Ty::Prim(PrimTy::I32), &supply).unwrap();

        let (scheme, compat) = generalize_let(&Ty::var(0), &subst);
        assert!(scheme.is_mono());
        assert!(compat.is_empty());
        assert_eq!(scheme.ty, Ty::Prim(PrimTy::I32));
    }

    #[test]
    fn test_generalize_closed_includes_user_vars() {
        let subst = Substitution::new();
        let scheme = generalize_closed(&Ty::arrow(Ty::user("a"), Ty::var(1)), &subst);
        assert_eq!(
            scheme.vars,
            vec![TypeVar::Unification(1), TypeVar::User("a".into())]
        );
    }

    #[test]
    fn test_instantiate_fresh_and_linked() {
        let supply = VarSupply::starting_at(10);
        let mut subst = Substitution::new();
        let (scheme, compat) = generalize_let(&Ty::arrow(Ty::var(0), Ty::var(0)), &subst);

        let first = instantiate(&scheme, &compat, &mut subst, &supply);
        let second = instantiate(&scheme, &compat, &mut subst, &supply);
        assert_eq!(first, Ty::arrow(Ty::var(10), Ty::var(10)));
        assert_eq!(second, Ty::arrow(Ty::var(11), Ty::var(11)));

        // Constraining one instance reaches the original and its sibling.
        subst.unify(&Ty::var(10), &Ty::Prim(PrimTy::U8), &supply).unwrap();
        assert_eq!(subst.apply(&Ty::var(0)), Ty::Prim(PrimTy::U8));
        assert_eq!(subst.apply(&Ty::var(11)), Ty::Prim(PrimTy::U8));
        assert!(subst.unify(&Ty::var(11), &Ty::Prim(PrimTy::Bool), &supply).is_err());
    }

    #[test]
    fn test_instantiate_closed_is_independent() {
        let supply = VarSupply::starting_at(10);
        let mut subst = Substitution::new();
        let scheme = generalize_closed(&Ty::arrow(Ty::user("a"), Ty::user("a")), &subst);

        let inst = instantiate(&scheme, &Compatibilities::new(), &mut subst, &supply);
        assert_eq!(inst, Ty::arrow(Ty::var(10), Ty::var(10)));
        subst.unify(&inst, &Ty::arrow(Ty::unit(), Ty::unit()), &supply).unwrap();
        assert!(subst.compatible_with(10).is_empty());
    }

    #[test]
    fn test_instantiate_mono_is_identity() {
        let supply = VarSupply::starting_at(10);
        let mut subst = Substitution::new();
        let scheme = Scheme::mono(Ty::var(3));
        assert_eq!(
            instantiate(&scheme, &Compatibilities::new(), &mut subst, &supply),
            Ty::var(3)
        );
        assert_eq!(supply.peek(), 10);
    }
}
