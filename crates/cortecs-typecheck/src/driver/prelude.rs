//! Built-in operator schemes.

use crate::context::{BindableToken, Bindings};
use crate::types::{PrimTy, Scheme, Ty, TypeVar};
use cortecs_syntax::ast::{BinaryOp, Operator, UnaryOp};

/// Schemes of every operator.
///
/// Arithmetic is `forall a. (a, a) -> a`, comparison is
/// `forall a. (a, a) -> Bool`, `&&` and `||` take booleans, prefix `-` is
/// `forall a. a -> a` and `!` is `Bool -> Bool`.
pub fn prelude() -> Bindings {
    let a = Ty::user("a");
    let bool_ty = Ty::Prim(PrimTy::Bool);
    let forall = |ty| Scheme::poly(vec![TypeVar::User("a".into())], ty);

    let mut bindings = Bindings::new();
    for op in BinaryOp::ALL {
        let scheme = match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
                forall(Ty::arrow(Ty::Product(vec![a.clone(), a.clone()]), a.clone()))
            }
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::Le
            | BinaryOp::Ge => forall(Ty::arrow(
                Ty::Product(vec![a.clone(), a.clone()]),
                bool_ty.clone(),
            )),
            BinaryOp::And | BinaryOp::Or => Scheme::mono(Ty::arrow(
                Ty::Product(vec![bool_ty.clone(), bool_ty.clone()]),
                bool_ty.clone(),
            )),
        };
        bindings.insert(BindableToken::Operator(Operator::Binary(op)), scheme);
    }
    bindings.insert(
        BindableToken::Operator(Operator::Unary(UnaryOp::Neg)),
        forall(Ty::arrow(a.clone(), a)),
    );
    bindings.insert(
        BindableToken::Operator(Operator::Unary(UnaryOp::Not)),
        Scheme::mono(Ty::arrow(bool_ty.clone(), bool_ty)),
    );
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(op: Operator) -> String {
        prelude()
            .get(&BindableToken::Operator(op))
            .map(ToString::to_string)
            .unwrap()
    }

    #[test]
    fn test_every_operator_is_bound() {
        assert_eq!(prelude().len(), BinaryOp::ALL.len() + 2);
    }

    #[test]
    fn test_operator_schemes() {
        assert_eq!(scheme(Operator::Binary(BinaryOp::Add)), "forall a. (a, a) -> a");
        assert_eq!(scheme(Operator::Binary(BinaryOp::Lt)), "forall a. (a, a) -> Bool");
        assert_eq!(scheme(Operator::Binary(BinaryOp::And)), "(Bool, Bool) -> Bool");
        assert_eq!(scheme(Operator::Unary(UnaryOp::Neg)), "forall a. a -> a");
        assert_eq!(scheme(Operator::Unary(UnaryOp::Not)), "Bool -> Bool");
    }
}
