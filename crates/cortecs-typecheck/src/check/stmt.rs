//! Statement and block rules.
//!
//! Statements produce block environments. A `let` binds its name for the
//! statements after it; the enclosing [`EnvBuilder::block`] discharges the
//! requirements of each statement against the bindings of the statements
//! before it and forwards everything else.

use crate::check::reuse::Part;
use crate::check::{EnvBuilder, convert_annotation};
use crate::context::{
    BindableToken, Bindings, Demand, EnvId, Environment, Site, Subordinate,
};
use crate::infer::{generalize_let, instantiate};
use crate::types::{PrimTy, Scheme, Ty};
use cortecs_log::trace;
use cortecs_syntax::Span;
use cortecs_syntax::ast::{Block, Expr, Node, Stmt, StmtKind, TypeExpr};

impl EnvBuilder<'_> {
    /// Builds and stores the environment of `stmt`.
    pub fn statement(&mut self, stmt: &Stmt) -> EnvId {
        self.build(Part::Stmt(stmt), |this| this.statement_env(stmt))
    }

    /// Builds and stores the environment of `block`.
    pub fn block(&mut self, block: &Node<Block>) -> EnvId {
        self.build(Part::Block(block), |this| this.block_env(block))
    }

    fn statement_env(&mut self, stmt: &Stmt) -> Environment {
        let span = stmt.span;
        let mut env = Environment::block(span);
        match &stmt.kind {
            StmtKind::Let {
                name,
                annotation,
                value,
            } => {
                let scheme = self.let_binding(&mut env, annotation.as_ref(), value.as_ref(), span);
                let mut bindings = Bindings::new();
                bindings.insert(BindableToken::name(name.kind.clone()), scheme);
                env.set_bindings(bindings);
            }

            StmtKind::Return(Some(value)) => {
                let ty = self.expression_child(&mut env, value);
                env.requirements.push(
                    BindableToken::ReturnType,
                    ty,
                    Site::new(value.offset, value.span),
                );
            }

            StmtKind::Return(None) => {
                env.requirements
                    .push(BindableToken::ReturnType, Ty::unit(), Site::new(Span::ZERO, span));
            }

            StmtKind::If { condition, body } => {
                if let Some(condition) = condition {
                    let ty = self.expression_child(&mut env, condition);
                    let site = Site::new(condition.offset, condition.span);
                    self.constrain(&mut env, &Ty::Prim(PrimTy::Bool), &ty, site);
                }
                let body_id = self.block(body);
                self.absorb(&mut env, body_id, body.offset);
            }

            StmtKind::Expr(expr) => {
                self.expression_child(&mut env, expr);
            }
        }
        env.requirements = env.requirements.apply(&env.substitution);
        env
    }

    /// Folds the expression `expr` of a statement into `env`.
    fn expression_child(&mut self, env: &mut Environment, expr: &Expr) -> Ty {
        let id = self.expression(expr);
        self.absorb(env, id, expr.offset)
    }

    /// The scheme bound by `let name[: annotation] = value`.
    fn let_binding(
        &mut self,
        env: &mut Environment,
        annotation: Option<&TypeExpr>,
        value: Option<&Expr>,
        span: Span,
    ) -> Scheme {
        let value_ty = match value {
            Some(value) => self.expression_child(env, value),
            None => Ty::Invalid,
        };

        let Some(annotation) = annotation else {
            let (scheme, compat) = generalize_let(&value_ty, &env.substitution);
            env.compatibilities.extend(&compat);
            return scheme;
        };

        let converted = convert_annotation(annotation, Span::ZERO);
        env.errors.extend(converted.errors);
        env.add_user_vars(converted.user_vars);

        // Demands feeding the initializer are charged to the statement, so a
        // conflict found once they are resolved lands on the whole `let`.
        let init_vars = env.substitution.apply(&value_ty).unification_vars();
        if !init_vars.is_empty() {
            let subst = &env.substitution;
            for demand in env.requirements.demands_mut() {
                let demanded = subst.apply(&demand.ty).unification_vars();
                if !demanded.is_disjoint(&init_vars) {
                    demand.site = Site::new(Span::ZERO, span);
                }
            }
        }

        let site = Site::new(Span::ZERO, span);
        self.constrain(env, &converted.ty, &value_ty, site);
        Scheme::mono(env.substitution.apply(&converted.ty))
    }

    fn block_env(&mut self, block: &Node<Block>) -> Environment {
        let mut env = Environment::block(block.span);
        let mut bindings = Bindings::new();

        for stmt in &block.kind.stmts {
            let id = self.statement(stmt);
            let child = self.arena.get(id);

            env.compatibilities.extend(&child.compatibilities);
            if let Err(err) = env.substitution.merge(&child.substitution, self.supply) {
                env.error(err.to_string(), stmt.offset, stmt.span);
            }

            for (token, demands) in child.requirements.iter() {
                let Some(scheme) = bindings.get(token) else {
                    for demand in demands {
                        env.requirements
                            .push_demand(token.clone(), demand.clone().shifted(stmt.offset));
                    }
                    continue;
                };
                trace!("discharging {} demand(s) on {}", demands.len(), token);
                for Demand { ty, site } in demands {
                    let instance = instantiate(
                        scheme,
                        &env.compatibilities,
                        &mut env.substitution,
                        self.supply,
                    );
                    self.constrain(&mut env, &instance, ty, site.shifted(stmt.offset));
                }
            }

            if let Some(new) = child.bindings() {
                for (token, scheme) in new.iter() {
                    bindings.insert(token.clone(), scheme.apply(&env.substitution));
                }
            }
            if let Some(vars) = child.user_vars() {
                env.add_user_vars(vars.iter().cloned());
            }
            env.subordinates.push(Subordinate {
                env: id,
                offset: stmt.offset,
            });
        }

        env.requirements = env.requirements.apply(&env.substitution);
        env.set_bindings(bindings.apply(&env.substitution));
        env
    }
}
