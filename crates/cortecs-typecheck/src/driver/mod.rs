//! Whole-program checking.
//!
//! The [`Checker`] builds one environment per declaration, derives the call
//! graph from what each declaration still requires, and solves the reduced
//! graph dependencies first. Every vertex gets a pass substitution of its
//! own: the member substitutions are merged into it, demands on members are
//! unified directly, demands on already solved declarations and built-in
//! operators are instantiated, and each member is then generalized into a
//! closed scheme visible to the vertices after it.
//!
//! [`Session`] keeps the environments between runs and rebuilds only the
//! declarations whose syntax changed.

pub mod config;
pub mod prelude;
pub mod session;

pub use config::{CheckerConfig, ConfigError};
pub use prelude::prelude;
pub use session::Session;

use crate::check::EnvBuilder;
use crate::context::{BindableToken, Bindings, Compatibilities, EnvArena, EnvId, Substitution};
use crate::error::{CheckError, CortecsError, CortecsErrors, Result};
use crate::graph::{CallGraph, Vertex};
use crate::infer::{VarSupply, generalize_closed, instantiate};
use crate::types::{Scheme, Ty};
use cortecs_log::{debug, info, trace};
use cortecs_syntax::Span;
use cortecs_syntax::ast::{Function, Node, Program};
use fxhash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Outcome for one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationReport {
    /// Declared name
    pub name: String,
    /// Generalized type; `None` for a rejected duplicate declaration
    pub scheme: Option<Scheme>,
    /// Diagnostics, anchored at the declaration start
    pub errors: CortecsErrors,
}

/// Outcome for a whole program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramReport {
    /// One report per declaration, in source order
    pub declarations: Vec<DeclarationReport>,
    /// Groups of mutually recursive declarations
    pub clusters: Vec<Vec<String>>,
}

impl ProgramReport {
    /// The report of the first declaration named `name`.
    pub fn declaration(&self, name: &str) -> Option<&DeclarationReport> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// The scheme inferred for `name`.
    pub fn scheme(&self, name: &str) -> Option<&Scheme> {
        self.declaration(name).and_then(|d| d.scheme.as_ref())
    }

    /// Total number of diagnostics.
    pub fn error_count(&self) -> usize {
        self.declarations.iter().map(|d| d.errors.len()).sum()
    }

    /// Checks if no declaration has diagnostics.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

/// A declaration ready for solving.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Slot<'p> {
    /// First declaration of its name, analyzed into `root`
    Checked {
        func: &'p Node<Function>,
        root: EnvId,
    },
    /// A later declaration reusing a name
    Duplicate(&'p Node<Function>),
}

/// Type checker for whole programs.
#[derive(Debug, Clone)]
pub struct Checker {
    config: CheckerConfig,
    supply: VarSupply,
    prelude: Bindings,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl Checker {
    /// Create a checker with its own variable supply.
    pub fn new(config: CheckerConfig) -> Self {
        Self::with_supply(config, VarSupply::new())
    }

    /// Create a checker drawing fresh variables from `supply`.
    ///
    /// Checkers sharing a supply never hand out the same variable.
    pub fn with_supply(config: CheckerConfig, supply: VarSupply) -> Self {
        let prelude = if config.with_prelude {
            prelude()
        } else {
            Bindings::new()
        };
        Self {
            config,
            supply,
            prelude,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The fresh-variable supply.
    pub fn supply(&self) -> &VarSupply {
        &self.supply
    }

    /// Checks every declaration of `program`.
    ///
    /// # Errors
    ///
    /// Fails only on internal inconsistencies; problems in the program are
    /// reported as diagnostics inside the [`ProgramReport`].
    pub fn check_program(&self, program: &Program) -> Result<ProgramReport> {
        let mut arena = EnvArena::new();
        let mut builder = EnvBuilder::new(&mut arena, &self.supply);
        let mut seen = FxHashSet::default();
        let mut slots = Vec::with_capacity(program.functions.len());
        for func in &program.functions {
            if seen.insert(func.kind.name.kind.as_str()) {
                let root = builder.function(func);
                slots.push(Slot::Checked { func, root });
            } else {
                slots.push(Slot::Duplicate(func));
            }
        }
        self.solve(&arena, &slots)
    }

    /// Solves analyzed declarations and assembles the report.
    pub(crate) fn solve(&self, arena: &EnvArena, slots: &[Slot<'_>]) -> Result<ProgramReport> {
        let mut graph = CallGraph::new();
        let mut decls: FxHashMap<&str, (&Node<Function>, EnvId)> = FxHashMap::default();
        for slot in slots {
            if let Slot::Checked { func, root } = *slot {
                let name = func.kind.name.kind.as_str();
                graph.add_node(name);
                decls.insert(name, (func, root));
            }
        }
        for (&name, &(_, root)) in &decls {
            for callee in arena.get(root).requirements.tokens().filter_map(BindableToken::as_name) {
                graph.add_edge(name, callee);
            }
        }

        let reduced = graph.reduce();
        let mut globals = self.prelude.clone();
        let mut solved: FxHashMap<String, (Scheme, Vec<CortecsError>)> = FxHashMap::default();
        for vertex in reduced.vertices() {
            for (name, scheme, errors) in self.solve_vertex(arena, vertex, &decls, &globals)? {
                globals.insert(BindableToken::name(name.clone()), scheme.clone());
                solved.insert(name, (scheme, errors));
            }
        }

        let mut declarations = Vec::with_capacity(slots.len());
        for slot in slots {
            let report = match *slot {
                Slot::Checked { func, .. } => {
                    let name = &func.kind.name.kind;
                    let (scheme, errors) = solved
                        .remove(name)
                        .ok_or_else(|| CheckError::MissingDeclaration { name: name.clone() })?;
                    DeclarationReport {
                        name: name.clone(),
                        scheme: Some(scheme),
                        errors: CortecsErrors::anchored(func.offset, self.truncate(errors)),
                    }
                }
                Slot::Duplicate(func) => {
                    let name = &func.kind.name;
                    let error = CortecsError::new(
                        format!("duplicate declaration `{}`", name.kind),
                        name.offset,
                        name.span,
                    );
                    DeclarationReport {
                        name: name.kind.clone(),
                        scheme: None,
                        errors: CortecsErrors::anchored(func.offset, vec![error]),
                    }
                }
            };
            declarations.push(report);
        }

        let report = ProgramReport {
            declarations,
            clusters: graph.maximal_overlapping_cycles(),
        };
        info!(
            "checked {} declarations in {} passes: {} errors",
            report.declarations.len(),
            reduced.len(),
            report.error_count()
        );
        Ok(report)
    }

    /// Jointly solves the members of `vertex`.
    fn solve_vertex(
        &self,
        arena: &EnvArena,
        vertex: &Vertex,
        decls: &FxHashMap<&str, (&Node<Function>, EnvId)>,
        globals: &Bindings,
    ) -> Result<Vec<(String, Scheme, Vec<CortecsError>)>> {
        debug!(
            "solving {} [{}]",
            if vertex.is_cluster() { "cluster" } else { "declaration" },
            vertex.members().join(", ")
        );

        let mut members = Vec::with_capacity(vertex.members().len());
        for name in vertex.members() {
            let &(func, root) = decls
                .get(name.as_str())
                .ok_or_else(|| CheckError::MissingDeclaration { name: name.clone() })?;
            members.push((name.as_str(), func, root));
        }

        let mut subst = Substitution::new();
        let mut compat = Compatibilities::new();
        let mut errors: Vec<Vec<CortecsError>> = Vec::with_capacity(members.len());
        let mut types: FxHashMap<&str, Ty> = FxHashMap::default();
        for &(name, func, root) in &members {
            let env = arena.get(root);
            let mut own = arena.errors(root);
            compat.extend(&env.compatibilities);
            if let Err(err) = subst.merge(&env.substitution, &self.supply) {
                own.push(CortecsError::new(err.to_string(), Span::ZERO, func.span));
            }
            errors.push(own);
            let ty = env
                .bindings()
                .and_then(|b| b.get(&BindableToken::name(name)))
                .map(|scheme| scheme.ty.clone())
                .ok_or_else(|| CheckError::MissingDeclaration {
                    name: name.to_string(),
                })?;
            types.insert(name, ty);
        }

        for (index, &(_, _, root)) in members.iter().enumerate() {
            for (token, demands) in arena.get(root).requirements.iter() {
                let member = token.as_name().and_then(|name| types.get(name));
                let global = globals.get(token);
                for demand in demands {
                    let expected = match (member, global) {
                        (Some(ty), _) => ty.clone(),
                        (None, Some(scheme)) => {
                            instantiate(scheme, &Compatibilities::new(), &mut subst, &self.supply)
                        }
                        (None, None) => {
                            if self.config.report_unresolved {
                                errors[index].push(CortecsError::new(
                                    unresolved_message(token),
                                    demand.site.offset,
                                    demand.site.span,
                                ));
                            }
                            subst.poison(&demand.ty);
                            continue;
                        }
                    };
                    if let Err(err) = subst.unify(&expected, &demand.ty, &self.supply) {
                        trace!("demand on {} failed: {}", token, err);
                        errors[index].push(CortecsError::new(
                            err.to_string(),
                            demand.site.offset,
                            demand.site.span,
                        ));
                        subst.poison(&demand.ty);
                    }
                }
            }
        }

        let mut solved = Vec::with_capacity(members.len());
        for ((name, _, _), errors) in members.into_iter().zip(errors) {
            let scheme = generalize_closed(&types[name], &subst);
            debug!("{name}: {scheme}");
            solved.push((name.to_string(), scheme, errors));
        }
        Ok(solved)
    }

    fn truncate(&self, mut errors: Vec<CortecsError>) -> Vec<CortecsError> {
        if let Some(limit) = self.config.max_errors {
            errors.truncate(limit);
        }
        errors
    }
}

fn unresolved_message(token: &BindableToken) -> String {
    match token {
        BindableToken::Operator(op) => format!("no operator `{op}` in scope"),
        _ => format!("unresolved reference `{token}`"),
    }
}
