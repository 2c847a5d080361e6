//! Function declaration rule.

use crate::check::reuse::Part;
use crate::check::{EnvBuilder, convert_annotation};
use crate::context::{BindableToken, Bindings, EnvId, Environment, Site, Subordinate};
use crate::types::{Scheme, Ty};
use cortecs_log::trace;
use cortecs_syntax::Span;
use cortecs_syntax::ast::{Function, Node};
use fxhash::FxHashMap;

impl EnvBuilder<'_> {
    /// Builds and stores the environment of the declaration `func`.
    ///
    /// The result binds the function name to its monomorphic arrow type.
    /// Parameter and return demands of the body are discharged here; demands
    /// on other names are left for the driver.
    pub fn function(&mut self, func: &Node<Function>) -> EnvId {
        self.build(Part::Function(func), |this| this.function_env(func))
    }

    fn function_env(&mut self, func: &Node<Function>) -> Environment {
        let decl = &func.kind;
        let mut env = Environment::block(func.span);

        let mut params: Vec<Ty> = Vec::with_capacity(decl.params.len());
        let mut scope: FxHashMap<&str, Ty> = FxHashMap::default();
        for param in &decl.params {
            let ty = match &param.kind.annotation {
                Some(annotation) => {
                    let converted = convert_annotation(annotation, param.offset);
                    env.errors.extend(converted.errors);
                    env.add_user_vars(converted.user_vars);
                    converted.ty
                }
                None => self.supply.fresh_var(),
            };
            let name = param.kind.name.kind.as_str();
            if scope.contains_key(name) {
                env.error(
                    format!("duplicate parameter `{name}`"),
                    param.offset,
                    param.span,
                );
            } else {
                scope.insert(name, ty.clone());
            }
            params.push(ty);
        }

        let ret = self.supply.fresh_var();
        let ret_site = decl.ret.as_ref().map(|annotation| {
            let converted = convert_annotation(annotation, Span::ZERO);
            env.errors.extend(converted.errors);
            env.add_user_vars(converted.user_vars);
            let site = Site::new(annotation.offset, annotation.span);
            self.constrain(&mut env, &converted.ty, &ret, site);
            site
        });

        let body_id = self.block(&decl.body);
        let body_offset = decl.body.offset;
        let body = self.arena.get(body_id);
        env.compatibilities.extend(&body.compatibilities);
        if let Err(err) = env.substitution.merge(&body.substitution, self.supply) {
            env.error(err.to_string(), body_offset, body.span);
        }
        if let Some(vars) = body.user_vars() {
            env.add_user_vars(vars.iter().cloned());
        }

        let mut returned = false;
        let mut returns_invalid = false;
        for (token, demands) in body.requirements.iter() {
            let local = match token {
                BindableToken::ReturnType => {
                    returned = true;
                    Some(&ret)
                }
                BindableToken::Name(name) => scope.get(name.as_str()),
                _ => None,
            };
            let Some(expected) = local else {
                for demand in demands {
                    env.requirements
                        .push_demand(token.clone(), demand.clone().shifted(body_offset));
                }
                continue;
            };
            trace!("{}: discharging {} demand(s) on {}", decl.name.kind, demands.len(), token);
            for demand in demands {
                let site = demand.site.shifted(body_offset);
                if *token == BindableToken::ReturnType
                    && env.substitution.apply(&demand.ty) == Ty::Invalid
                {
                    returns_invalid = true;
                }
                self.constrain(&mut env, expected, &demand.ty, site);
            }
        }
        // An invalid return value must not leave the return type free.
        if returns_invalid && env.substitution.apply(&ret).as_unification().is_some() {
            env.substitution.poison(&ret);
        }

        if !returned {
            let site = ret_site.unwrap_or(Site::new(Span::ZERO, func.span));
            self.constrain(&mut env, &ret, &Ty::unit(), site);
        }

        env.subordinates.push(Subordinate {
            env: body_id,
            offset: body_offset,
        });

        let ty = env.substitution.apply(&Ty::arrow(Ty::args(params), ret));
        let mut bindings = Bindings::new();
        bindings.insert(BindableToken::name(decl.name.kind.clone()), Scheme::mono(ty));
        env.set_bindings(bindings);
        env.requirements = env.requirements.apply(&env.substitution);
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EnvArena;
    use crate::infer::VarSupply;
    use crate::types::PrimTy;
    use cortecs_syntax::parse_program;

    fn analyze(source: &str) -> (EnvArena, EnvId) {
        let program = parse_program(source).unwrap();
        let supply = VarSupply::new();
        let mut arena = EnvArena::new();
        let id = EnvBuilder::new(&mut arena, &supply).function(&program.functions[0]);
        (arena, id)
    }

    fn fn_type(arena: &EnvArena, id: EnvId, name: &str) -> Ty {
        let env = arena.get(id);
        let scheme = env
            .bindings()
            .and_then(|b| b.get(&BindableToken::name(name)))
            .unwrap();
        env.substitution.apply(&scheme.ty)
    }

    #[test]
    fn test_annotated_function() {
        let (arena, id) = analyze("function add(a: I32, b: I32) -> I32 { return a }");
        assert_eq!(
            fn_type(&arena, id, "add"),
            Ty::arrow(
                Ty::Product(vec![Ty::Prim(PrimTy::I32), Ty::Prim(PrimTy::I32)]),
                Ty::Prim(PrimTy::I32)
            )
        );
        assert!(arena.errors(id).is_empty());
        assert!(arena.get(id).requirements.is_empty());
    }

    #[test]
    fn test_parameter_inferred_from_return() {
        let (arena, id) = analyze("function f(x) -> U8 { return x }");
        assert_eq!(
            fn_type(&arena, id, "f"),
            Ty::arrow(Ty::Prim(PrimTy::U8), Ty::Prim(PrimTy::U8))
        );
    }

    #[test]
    fn test_no_return_means_unit() {
        let (arena, id) = analyze("function f() { let x = 1 }");
        assert_eq!(fn_type(&arena, id, "f"), Ty::arrow(Ty::unit(), Ty::unit()));
    }

    #[test]
    fn test_missing_return_conflicts_with_annotation() {
        let (arena, id) = analyze("function f() -> I32 { let x = 1 }");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, Span::columns(16));
        assert_eq!(errors[0].span, Span::columns(3));
    }

    #[test]
    fn test_let_annotation_conflict_with_parameter() {
        let (arena, id) = analyze("function f(a: I32) {\n  let x: F32 = a\n}");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, Span::new(1, 2));
        assert_eq!(errors[0].span, Span::columns(14));
    }

    #[test]
    fn test_return_type_conflict() {
        let (arena, id) = analyze("function f(a: Bool) -> I32 { return a }");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, Span::columns(36));
    }

    #[test]
    fn test_duplicate_parameter() {
        let (arena, id) = analyze("function f(a: I32, a: Bool) { return a }");
        let errors = arena.errors(id);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "duplicate parameter `a`");
        assert_eq!(
            fn_type(&arena, id, "f"),
            Ty::arrow(
                Ty::Product(vec![Ty::Prim(PrimTy::I32), Ty::Prim(PrimTy::Bool)]),
                Ty::Prim(PrimTy::I32)
            )
        );
    }

    #[test]
    fn test_other_names_are_forwarded() {
        let (arena, id) = analyze("function f(n) {\n  return g(n)\n}");
        let env = arena.get(id);
        let g = env.requirements.get(&BindableToken::name("g"));
        assert_eq!(g.len(), 1);
        assert_eq!(g[0].site.offset, Span::new(1, 9));
        assert!(!env.requirements.contains(&BindableToken::ReturnType));
    }

    #[test]
    fn test_open_record_parameter() {
        let (arena, id) = analyze("function age(p) { return p.age }");
        match fn_type(&arena, id, "age") {
            Ty::Arrow(param, ret) => {
                let Ty::OpenRecord { fields, .. } = *param else {
                    panic!("expected open record parameter");
                };
                assert_eq!(fields.get("age"), Some(&*ret));
            }
            other => panic!("expected arrow, found {other}"),
        }
    }

    #[test]
    fn test_user_type_variables() {
        let (arena, id) = analyze("function id(x: t) -> t { return x }");
        assert_eq!(fn_type(&arena, id, "id"), Ty::arrow(Ty::user("t"), Ty::user("t")));
        assert!(arena.get(id).user_vars().unwrap().contains("t"));
    }
}
