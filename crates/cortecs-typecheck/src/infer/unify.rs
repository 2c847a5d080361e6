//! Unification algorithm with occurs check.
//!
//! This module implements structural unification over a [`Substitution`],
//! including row unification of open and closed records.

use crate::context::Substitution;
use crate::error::{UnifyError, UnifyResult};
use crate::infer::VarSupply;
use crate::types::{Fields, Ty, TypeVar};
use cortecs_log::trace;

/// Unifier borrowing the substitution it extends.
pub struct Unifier<'a> {
    subst: &'a mut Substitution,
    supply: &'a VarSupply,
}

impl<'a> Unifier<'a> {
    /// Create a new unifier.
    pub fn new(subst: &'a mut Substitution, supply: &'a VarSupply) -> Self {
        Self { subst, supply }
    }

    /// Unify two types, accumulating substitutions.
    ///
    /// [`Ty::Invalid`] on either side succeeds without binding anything.
    ///
    /// # Errors
    ///
    /// Returns a [`UnifyError`] if the types cannot be unified.
    pub fn unify(&mut self, a: &Ty, b: &Ty) -> UnifyResult<()> {
        trace!("unify {} ~ {}", a, b);
        let a = self.shallow(a);
        let b = self.shallow(b);

        match (&a, &b) {
            (Ty::Invalid, _) | (_, Ty::Invalid) => Ok(()),

            (Ty::Var(TypeVar::Unification(x)), Ty::Var(TypeVar::Unification(y))) => {
                if x != y {
                    self.subst.union(*x, *y);
                }
                Ok(())
            }
            (Ty::Var(TypeVar::Unification(x)), other) | (other, Ty::Var(TypeVar::Unification(x))) => {
                self.bind(*x, other)
            }

            (Ty::Var(TypeVar::User(n)), Ty::Var(TypeVar::User(m))) if n == m => Ok(()),
            (Ty::Var(TypeVar::User(name)), other) | (other, Ty::Var(TypeVar::User(name))) => {
                Err(UnifyError::RigidVariable {
                    name: name.clone(),
                    ty: self.subst.apply(other),
                })
            }

            (Ty::Prim(p), Ty::Prim(q)) if p == q => Ok(()),

            (Ty::Arrow(l1, r1), Ty::Arrow(l2, r2)) => {
                self.unify(l1, l2)?;
                self.unify(r1, r2)
            }

            (Ty::Product(xs), Ty::Product(ys)) => {
                if xs.len() != ys.len() {
                    return Err(UnifyError::ArityMismatch {
                        expected: xs.len(),
                        found: ys.len(),
                    });
                }
                for (x, y) in xs.iter().zip(ys) {
                    self.unify(x, y)?;
                }
                Ok(())
            }

            (Ty::OpenRecord { fields: f1, row: r1 }, Ty::OpenRecord { fields: f2, row: r2 }) => {
                self.unify_open(f1, *r1, f2, *r2)
            }
            (Ty::OpenRecord { fields: open, row }, Ty::ClosedRecord { fields: closed })
            | (Ty::ClosedRecord { fields: closed }, Ty::OpenRecord { fields: open, row }) => {
                self.unify_open_closed(open, *row, closed)
            }
            (Ty::ClosedRecord { fields: f1 }, Ty::ClosedRecord { fields: f2 }) => {
                if !f1.keys().eq(f2.keys()) {
                    return Err(UnifyError::LabelMismatch {
                        expected: f1.keys().cloned().collect(),
                        found: f2.keys().cloned().collect(),
                    });
                }
                for (t1, t2) in f1.values().zip(f2.values()) {
                    self.unify(t1, t2)?;
                }
                Ok(())
            }

            _ => Err(UnifyError::Mismatch {
                expected: self.subst.apply(&a),
                found: self.subst.apply(&b),
            }),
        }
    }

    /// Resolves the head of `ty`; records are resolved fully so that their
    /// rows are flattened.
    fn shallow(&mut self, ty: &Ty) -> Ty {
        match ty {
            Ty::Var(TypeVar::Unification(n)) => {
                let root = self.subst.find(*n);
                match self.subst.resolved(root).cloned() {
                    Some(resolved) => self.shallow(&resolved),
                    None => Ty::var(root),
                }
            }
            Ty::OpenRecord { .. } => self.subst.apply(ty),
            _ => ty.clone(),
        }
    }

    /// Binds the unresolved root `var` to `ty` after the occurs check.
    fn bind(&mut self, var: u32, ty: &Ty) -> UnifyResult<()> {
        let ty = self.subst.apply(ty);
        if ty.occurs(var) {
            return Err(UnifyError::InfiniteType { var, ty });
        }
        trace!("bind {} := {}", Ty::var(var), ty);
        for member in self.subst.bind_var(var, ty.clone()) {
            trace!("propagate {} to compatible {}", ty, Ty::var(member));
            self.unify(&Ty::var(member), &ty)?;
        }
        Ok(())
    }

    fn unify_shared(&mut self, f1: &Fields, f2: &Fields) -> UnifyResult<()> {
        for (label, t1) in f1 {
            if let Some(t2) = f2.get(label) {
                self.unify(t1, t2)?;
            }
        }
        Ok(())
    }

    fn unify_open(&mut self, f1: &Fields, r1: u32, f2: &Fields, r2: u32) -> UnifyResult<()> {
        self.unify_shared(f1, f2)?;
        let only1 = difference(f1, f2);
        let only2 = difference(f2, f1);

        if self.subst.find(r1) == self.subst.find(r2) {
            if only1.is_empty() && only2.is_empty() {
                return Ok(());
            }
            return Err(UnifyError::LabelMismatch {
                expected: f1.keys().cloned().collect(),
                found: f2.keys().cloned().collect(),
            });
        }

        match (only1.is_empty(), only2.is_empty()) {
            (true, true) => self.unify(&Ty::var(r1), &Ty::var(r2)),
            (true, false) => self.unify(
                &Ty::var(r1),
                &Ty::OpenRecord {
                    fields: only2,
                    row: r2,
                },
            ),
            (false, true) => self.unify(
                &Ty::var(r2),
                &Ty::OpenRecord {
                    fields: only1,
                    row: r1,
                },
            ),
            (false, false) => {
                let tail = self.supply.fresh();
                self.unify(
                    &Ty::var(r1),
                    &Ty::OpenRecord {
                        fields: only2,
                        row: tail,
                    },
                )?;
                self.unify(
                    &Ty::var(r2),
                    &Ty::OpenRecord {
                        fields: only1,
                        row: tail,
                    },
                )
            }
        }
    }

    fn unify_open_closed(&mut self, open: &Fields, row: u32, closed: &Fields) -> UnifyResult<()> {
        let extra = difference(open, closed);
        if !extra.is_empty() {
            return Err(UnifyError::ExtraLabels {
                labels: extra.into_keys().collect(),
                record: self.subst.apply(&Ty::ClosedRecord {
                    fields: closed.clone(),
                }),
            });
        }
        self.unify_shared(open, closed)?;
        self.unify(
            &Ty::var(row),
            &Ty::ClosedRecord {
                fields: difference(closed, open),
            },
        )
    }
}

/// Fields of `a` whose label is not in `b`.
fn difference(a: &Fields, b: &Fields) -> Fields {
    a.iter()
        .filter(|(label, _)| !b.contains_key(*label))
        .map(|(label, ty)| (label.clone(), ty.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimTy;

    fn prim(p: PrimTy) -> Ty {
        Ty::Prim(p)
    }

    fn fields(pairs: &[(&str, Ty)]) -> Fields {
        pairs
            .iter()
            .map(|(label, ty)| ((*label).to_string(), ty.clone()))
            .collect()
    }

    fn setup() -> (Substitution, VarSupply) {
        (Substitution::new(), VarSupply::starting_at(1000))
    }

    #[test]
    fn test_unify_same_prim() {
        let (mut subst, supply) = setup();
        assert!(subst.unify(&prim(PrimTy::I32), &prim(PrimTy::I32), &supply).is_ok());
        assert!(subst.is_empty());
    }

    #[test]
    fn test_unify_prim_mismatch() {
        let (mut subst, supply) = setup();
        let err = subst
            .unify(&prim(PrimTy::I32), &prim(PrimTy::Bool), &supply)
            .unwrap_err();
        assert_eq!(
            err,
            UnifyError::Mismatch {
                expected: prim(PrimTy::I32),
                found: prim(PrimTy::Bool),
            }
        );
    }

    #[test]
    fn test_unify_var_with_type() {
        let (mut subst, supply) = setup();
        subst.unify(&Ty::var(0), &prim(PrimTy::Bool), &supply).unwrap();
        assert_eq!(subst.apply(&Ty::var(0)), prim(PrimTy::Bool));
    }

    #[test]
    fn test_unify_arrows() {
        let (mut subst, supply) = setup();
        let a = Ty::arrow(Ty::var(0), Ty::var(1));
        let b = Ty::arrow(prim(PrimTy::I32), prim(PrimTy::F64));
        subst.unify(&a, &b, &supply).unwrap();
        assert_eq!(subst.apply(&a), b);
    }

    #[test]
    fn test_product_arity_mismatch() {
        let (mut subst, supply) = setup();
        let a = Ty::Product(vec![Ty::var(0), Ty::var(1)]);
        let b = Ty::Product(vec![Ty::var(2), Ty::var(3), Ty::var(4)]);
        assert_eq!(
            subst.unify(&a, &b, &supply),
            Err(UnifyError::ArityMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_occurs_check() {
        let (mut subst, supply) = setup();
        let err = subst
            .unify(&Ty::var(0), &Ty::arrow(Ty::var(0), Ty::unit()), &supply)
            .unwrap_err();
        assert!(matches!(err, UnifyError::InfiniteType { var: 0, .. }));
    }

    #[test]
    fn test_invalid_absorbs() {
        let (mut subst, supply) = setup();
        subst.unify(&Ty::Invalid, &prim(PrimTy::I32), &supply).unwrap();
        subst
            .unify(&Ty::arrow(Ty::Invalid, Ty::var(0)), &Ty::arrow(Ty::unit(), Ty::unit()), &supply)
            .unwrap();
        assert_eq!(subst.apply(&Ty::var(0)), Ty::unit());
    }

    #[test]
    fn test_user_variables_are_rigid() {
        let (mut subst, supply) = setup();
        subst.unify(&Ty::user("t"), &Ty::user("t"), &supply).unwrap();
        assert!(matches!(
            subst.unify(&Ty::user("t"), &prim(PrimTy::I32), &supply),
            Err(UnifyError::RigidVariable { .. })
        ));
        assert!(subst.unify(&Ty::user("t"), &Ty::user("u"), &supply).is_err());

        subst.unify(&Ty::var(0), &Ty::user("t"), &supply).unwrap();
        assert_eq!(subst.apply(&Ty::var(0)), Ty::user("t"));
    }

    #[test]
    fn test_open_against_closed() {
        let (mut subst, supply) = setup();
        let open = Ty::OpenRecord {
            fields: fields(&[("name", Ty::var(0))]),
            row: 1,
        };
        let closed = Ty::ClosedRecord {
            fields: fields(&[("name", prim(PrimTy::I32)), ("age", prim(PrimTy::U8))]),
        };
        subst.unify(&open, &closed, &supply).unwrap();

        assert_eq!(subst.apply(&Ty::var(0)), prim(PrimTy::I32));
        assert_eq!(
            subst.apply(&Ty::var(1)),
            Ty::ClosedRecord {
                fields: fields(&[("age", prim(PrimTy::U8))]),
            }
        );
        assert_eq!(subst.apply(&open), closed);
    }

    #[test]
    fn test_open_label_cannot_escape_closed() {
        let (mut subst, supply) = setup();
        let open = Ty::OpenRecord {
            fields: fields(&[("missing", Ty::var(0))]),
            row: 1,
        };
        let closed = Ty::ClosedRecord {
            fields: fields(&[("name", prim(PrimTy::I32))]),
        };
        let err = subst.unify(&closed, &open, &supply).unwrap_err();
        assert!(matches!(err, UnifyError::ExtraLabels { ref labels, .. } if labels == &["missing".to_string()]));
    }

    #[test]
    fn test_closed_label_mismatch() {
        let (mut subst, supply) = setup();
        let a = Ty::ClosedRecord {
            fields: fields(&[("a", prim(PrimTy::I32))]),
        };
        let b = Ty::ClosedRecord {
            fields: fields(&[("b", prim(PrimTy::I32))]),
        };
        assert!(matches!(
            subst.unify(&a, &b, &supply),
            Err(UnifyError::LabelMismatch { .. })
        ));
        assert!(subst.unify(&a, &a.clone(), &supply).is_ok());
    }

    #[test]
    fn test_open_open_shares_tail() {
        let (mut subst, supply) = setup();
        let a = Ty::OpenRecord {
            fields: fields(&[("x", prim(PrimTy::I32))]),
            row: 0,
        };
        let b = Ty::OpenRecord {
            fields: fields(&[("y", prim(PrimTy::Bool))]),
            row: 1,
        };
        subst.unify(&a, &b, &supply).unwrap();

        let resolved_a = subst.apply(&a);
        let resolved_b = subst.apply(&b);
        assert_eq!(resolved_a, resolved_b);
        match resolved_a {
            Ty::OpenRecord { fields, row } => {
                assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["x", "y"]);
                assert!(row >= 1000);
            }
            other => panic!("expected open record, found {other}"),
        }
    }

    #[test]
    fn test_open_open_subset() {
        let (mut subst, supply) = setup();
        let small = Ty::OpenRecord {
            fields: fields(&[("x", Ty::var(2))]),
            row: 0,
        };
        let large = Ty::OpenRecord {
            fields: fields(&[("x", prim(PrimTy::I32)), ("y", prim(PrimTy::Bool))]),
            row: 1,
        };
        subst.unify(&small, &large, &supply).unwrap();
        assert_eq!(subst.apply(&small), subst.apply(&large));
        assert_eq!(subst.apply(&Ty::var(2)), prim(PrimTy::I32));
        assert_eq!(supply.peek(), 1000);
    }

    #[test]
    fn test_same_row_different_labels() {
        let (mut subst, supply) = setup();
        let a = Ty::OpenRecord {
            fields: fields(&[("x", prim(PrimTy::I32))]),
            row: 0,
        };
        let b = Ty::OpenRecord {
            fields: fields(&[("y", prim(PrimTy::I32))]),
            row: 0,
        };
        assert!(matches!(
            subst.unify(&a, &b, &supply),
            Err(UnifyError::LabelMismatch { .. })
        ));
    }
}
