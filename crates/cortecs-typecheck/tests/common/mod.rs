// Shared helpers for the type checker integration tests.

#![allow(dead_code)]

use cortecs_syntax::{parse_expression, parse_program, parse_statements};
use cortecs_typecheck::{
    Checker, EnvArena, EnvBuilder, EnvId, ProgramReport, Scheme, TypeVar, VarSupply,
};
use fxhash::FxHashMap;

/// Checks a whole program with the default configuration.
pub fn check(source: &str) -> ProgramReport {
    let program = parse_program(source).expect("test program should parse");
    Checker::default()
        .check_program(&program)
        .expect("checking should not fail internally")
}

/// Analyzes a single expression into a fresh arena.
pub fn expression(source: &str) -> (EnvArena, EnvId) {
    let expr = parse_expression(source).expect("test expression should parse");
    let supply = VarSupply::new();
    let mut arena = EnvArena::new();
    let id = EnvBuilder::new(&mut arena, &supply).expression(&expr);
    (arena, id)
}

/// Analyzes a statement sequence as one block into a fresh arena.
pub fn block(source: &str) -> (EnvArena, EnvId) {
    let block = parse_statements(source).expect("test statements should parse");
    let supply = VarSupply::new();
    let mut arena = EnvArena::new();
    let id = EnvBuilder::new(&mut arena, &supply).block(&block);
    (arena, id)
}

/// The displayed scheme of `name`.
pub fn scheme_of(report: &ProgramReport, name: &str) -> String {
    report
        .scheme(name)
        .map(ToString::to_string)
        .unwrap_or_else(|| panic!("no scheme for `{name}`"))
}

/// `scheme` with its bound variables renumbered from zero, so schemes from
/// different runs compare equal when they have the same shape.
pub fn normalized(scheme: &Scheme) -> String {
    let mapping: FxHashMap<TypeVar, u32> = scheme.vars.iter().cloned().zip(0..).collect();
    let vars = (0..scheme.vars.len() as u32).map(TypeVar::Unification).collect();
    Scheme::poly(vars, scheme.ty.rename(&mapping)).to_string()
}
