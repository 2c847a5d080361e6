//! Expression rules.
//!
//! Every expression synthesizes one type. Names, operators and calls do not
//! look anything up: they create a fresh variable and record a requirement
//! that an enclosing scope (or the driver) discharges later.

use crate::check::EnvBuilder;
use crate::check::reuse::Part;
use crate::context::{BindableToken, EnvId, Environment, Shape, Site};
use crate::types::{Fields, PrimTy, Ty};
use cortecs_log::trace;
use cortecs_syntax::Span;
use cortecs_syntax::ast::{Expr, ExprKind, Literal, Operator};

/// Type of a literal; integer and float suffixes select width and signedness.
pub fn literal_type(literal: &Literal) -> PrimTy {
    match literal {
        Literal::Int(_, suffix) => PrimTy::of_int(*suffix),
        Literal::Float(_, suffix) => PrimTy::of_float(*suffix),
        Literal::Str(_) => PrimTy::String,
        Literal::Char(_) => PrimTy::Char,
        Literal::Bool(_) => PrimTy::Bool,
    }
}

impl EnvBuilder<'_> {
    /// Builds and stores the environment of `expr`.
    pub fn expression(&mut self, expr: &Expr) -> EnvId {
        self.build(Part::Expr(expr), |this| this.expression_env(expr))
    }

    /// Builds the child `expr` seen at `offset` and folds it into `env`.
    fn child(&mut self, env: &mut Environment, expr: Option<&Expr>, offset: Span) -> Ty {
        match expr {
            Some(expr) => {
                let id = self.expression(expr);
                self.absorb(env, id, offset + expr.offset)
            }
            None => Ty::Invalid,
        }
    }

    fn expression_env(&mut self, expr: &Expr) -> Environment {
        let span = expr.span;
        let mut env = Environment::empty_expression(span);
        let ty = match &expr.kind {
            ExprKind::Name(name) => {
                let ty = self.supply.fresh_var();
                env.requirements.push(
                    BindableToken::name(name.clone()),
                    ty.clone(),
                    Site::new(Span::ZERO, span),
                );
                ty
            }

            ExprKind::Literal(literal) => literal_type(literal).into(),

            ExprKind::Unary { op, operand } => {
                let operand = self.child(&mut env, operand.as_deref(), Span::ZERO);
                let result = self.supply.fresh_var();
                if env.substitution.apply(&operand) == Ty::Invalid {
                    env.substitution.poison(&result);
                }
                env.requirements.push(
                    BindableToken::Operator(Operator::Unary(op.kind)),
                    Ty::arrow(operand, result.clone()),
                    Site::new(op.offset, op.span),
                );
                result
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.child(&mut env, Some(lhs), Span::ZERO);
                let rhs = self.child(&mut env, rhs.as_deref(), Span::ZERO);
                let result = self.supply.fresh_var();
                if [&lhs, &rhs]
                    .into_iter()
                    .any(|operand| env.substitution.apply(operand) == Ty::Invalid)
                {
                    env.substitution.poison(&result);
                }
                env.requirements.push(
                    BindableToken::Operator(Operator::Binary(op.kind)),
                    Ty::arrow(Ty::Product(vec![lhs, rhs]), result.clone()),
                    Site::new(op.offset, op.span),
                );
                result
            }

            ExprKind::Group(inner) => self.child(&mut env, inner.as_deref(), Span::ZERO),

            ExprKind::Call { callee, args } => {
                let callee = self.child(&mut env, Some(callee), Span::ZERO);
                let args = args
                    .iter()
                    .map(|arg| self.child(&mut env, Some(arg), Span::ZERO))
                    .collect();
                let result = self.supply.fresh_var();
                let expected = Ty::arrow(Ty::args(args), result.clone());
                if let Err(err) = env.substitution.unify(&callee, &expected, self.supply) {
                    trace!("call rule failed: {}", err);
                    env.error(err.to_string(), Span::ZERO, span);
                    env.substitution.poison(&callee);
                    env.substitution.poison(&result);
                }
                result
            }

            ExprKind::Record(inits) => {
                let mut fields = Fields::new();
                for init in inits {
                    let label = &init.kind.label;
                    let ty = self.child(&mut env, init.kind.value.as_ref(), init.offset);
                    if fields.contains_key(&label.kind) {
                        env.error(
                            format!("duplicate field `{}` in record", label.kind),
                            init.offset + label.offset,
                            label.span,
                        );
                        continue;
                    }
                    fields.insert(label.kind.clone(), ty);
                }
                Ty::ClosedRecord { fields }
            }

            ExprKind::Access { target, label } => {
                let target = self.child(&mut env, Some(target), Span::ZERO);
                let result = self.supply.fresh_var();
                let pattern = Ty::OpenRecord {
                    fields: Fields::from([(label.kind.clone(), result.clone())]),
                    row: self.supply.fresh(),
                };
                if let Err(err) = env.substitution.unify(&target, &pattern, self.supply) {
                    env.error(err.to_string(), Span::ZERO, span);
                    env.substitution.poison(&target);
                }
                result
            }
        };
        env.shape = Shape::Expression { ty };
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EnvArena;
    use crate::infer::VarSupply;
    use cortecs_syntax::ast::BinaryOp;
    use cortecs_syntax::parse_expression;

    fn analyze(source: &str) -> (EnvArena, EnvId) {
        let expr = parse_expression(source).unwrap();
        let supply = VarSupply::new();
        let mut arena = EnvArena::new();
        let id = EnvBuilder::new(&mut arena, &supply).expression(&expr);
        (arena, id)
    }

    fn ty_of(arena: &EnvArena, id: EnvId) -> Ty {
        let env = arena.get(id);
        env.substitution.apply(env.ty().unwrap())
    }

    #[test]
    fn test_name_rule() {
        let (arena, id) = analyze("x");
        let env = arena.get(id);
        assert_eq!(env.ty(), Some(&Ty::var(0)));
        assert_eq!(env.requirements.types(&BindableToken::name("x")), vec![Ty::var(0)]);
    }

    #[test]
    fn test_literal_rule() {
        let cases = [
            ("0", PrimTy::I32),
            ("0b", PrimTy::I8),
            ("0s", PrimTy::I16),
            ("0l", PrimTy::I64),
            ("0u", PrimTy::U32),
            ("0ub", PrimTy::U8),
            ("0us", PrimTy::U16),
            ("0ul", PrimTy::U64),
            ("0.0", PrimTy::F32),
            ("0.0f", PrimTy::F32),
            ("0.0d", PrimTy::F64),
            ("'a'", PrimTy::Char),
            ("\"s\"", PrimTy::String),
            ("true", PrimTy::Bool),
        ];
        for (source, expected) in cases {
            let (arena, id) = analyze(source);
            let env = arena.get(id);
            assert_eq!(env.ty(), Some(&Ty::Prim(expected)), "literal {source}");
            assert!(env.requirements.is_empty(), "literal {source}");
        }
    }

    #[test]
    fn test_binary_rule_shape() {
        let (arena, id) = analyze("a + b");
        let env = arena.get(id);
        let plus = BindableToken::Operator(Operator::Binary(BinaryOp::Add));
        assert_eq!(
            env.requirements.types(&plus),
            vec![Ty::arrow(Ty::Product(vec![Ty::var(0), Ty::var(1)]), Ty::var(2))]
        );
        assert_eq!(env.ty(), Some(&Ty::var(2)));
        let site = env.requirements.get(&plus)[0].site;
        assert_eq!(site.offset, Span::columns(2));
        assert_eq!(site.span, Span::columns(1));
    }

    #[test]
    fn test_unary_rule() {
        let (arena, id) = analyze("!done");
        let env = arena.get(id);
        let not = BindableToken::Operator(Operator::Unary(cortecs_syntax::ast::UnaryOp::Not));
        assert_eq!(
            env.requirements.types(&not),
            vec![Ty::arrow(Ty::var(0), Ty::var(1))]
        );
    }

    #[test]
    fn test_missing_operand_poisons_result() {
        for source in ["-", "!", "1 +", "(-) * 2"] {
            let (arena, id) = analyze(source);
            assert_eq!(ty_of(&arena, id), Ty::Invalid, "{source}");
        }
        let (arena, id) = analyze("-x");
        assert_eq!(ty_of(&arena, id), Ty::var(1));
    }

    #[test]
    fn test_group_is_transparent() {
        let (plain_arena, plain) = analyze("a + 1");
        let (group_arena, group) = analyze("( a + 1)");
        let plain_env = plain_arena.get(plain);
        let group_env = group_arena.get(group);

        assert_eq!(plain_env.ty(), group_env.ty());
        for token in plain_env.requirements.tokens() {
            assert_eq!(
                plain_env.requirements.types(token),
                group_env.requirements.types(token)
            );
        }
        let name = BindableToken::name("a");
        assert_eq!(
            group_env.requirements.get(&name)[0].site.offset,
            plain_env.requirements.get(&name)[0].site.offset + Span::columns(2)
        );
    }

    #[test]
    fn test_group_reoffsets_errors() {
        let (plain_arena, plain) = analyze("1(2)");
        let (group_arena, group) = analyze("(  1(2))");
        let plain_errors = plain_arena.errors(plain);
        let group_errors = group_arena.errors(group);
        assert_eq!(plain_errors.len(), 1);
        assert_eq!(group_errors.len(), 1);
        assert_eq!(plain_errors[0].message, group_errors[0].message);
        assert_eq!(group_errors[0].offset, plain_errors[0].offset + Span::columns(3));
    }

    #[test]
    fn test_call_rule() {
        let (arena, id) = analyze("f(1, true)");
        let env = arena.get(id);
        let f = env.requirements.types(&BindableToken::name("f"));
        assert_eq!(f.len(), 1);
        assert_eq!(
            env.substitution.apply(&f[0]),
            Ty::arrow(
                Ty::Product(vec![Ty::Prim(PrimTy::I32), Ty::Prim(PrimTy::Bool)]),
                Ty::var(1)
            )
        );
        assert_eq!(env.ty(), Some(&Ty::var(1)));
    }

    #[test]
    fn test_call_without_arguments_takes_unit() {
        let (arena, id) = analyze("f()");
        let env = arena.get(id);
        let f = env.requirements.types(&BindableToken::name("f"));
        assert_eq!(env.substitution.apply(&f[0]), Ty::arrow(Ty::unit(), Ty::var(1)));
    }

    #[test]
    fn test_calling_a_literal_fails_once() {
        let (arena, id) = analyze("1(2)");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("type mismatch"));
        assert_eq!(ty_of(&arena, id), Ty::Invalid);
    }

    #[test]
    fn test_record_literal() {
        let (arena, id) = analyze("{name: 1, ok: true}");
        assert_eq!(
            ty_of(&arena, id),
            Ty::ClosedRecord {
                fields: Fields::from([
                    ("name".to_string(), Ty::Prim(PrimTy::I32)),
                    ("ok".to_string(), Ty::Prim(PrimTy::Bool)),
                ]),
            }
        );
    }

    #[test]
    fn test_record_duplicate_label() {
        let (arena, id) = analyze("{a: 1, a: 2}");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "duplicate field `a` in record");
        assert_eq!(errors[0].offset, Span::columns(7));
    }

    #[test]
    fn test_access_on_record_literal() {
        let (arena, id) = analyze("{a: 1, b: true}.b");
        assert_eq!(ty_of(&arena, id), Ty::Prim(PrimTy::Bool));
        assert!(arena.errors(id).is_empty());
    }

    #[test]
    fn test_access_missing_field() {
        let (arena, id) = analyze("{a: 1}.b");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("`b`"));
    }

    #[test]
    fn test_access_on_name_is_open() {
        let (arena, id) = analyze("p.x");
        let env = arena.get(id);
        let p = env.requirements.types(&BindableToken::name("p"));
        match env.substitution.apply(&p[0]) {
            Ty::OpenRecord { fields, .. } => {
                assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["x"]);
            }
            other => panic!("expected open record, found {other}"),
        }
    }
}
