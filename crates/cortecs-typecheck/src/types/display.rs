//! Type pretty-printing for diagnostics.
//!
//! Unification variables print as `'t<n>`, user variables by name. An arrow
//! whose parameter is itself an arrow is parenthesized; products print as
//! tuples, so a two-argument function reads `(I32, U32) -> I32`.

use crate::types::{Fields, PrimTy, Scheme, Ty, TypeVar};
use std::fmt;

impl fmt::Display for PrimTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeVar::Unification(n) => write!(f, "'t{n}"),
            TypeVar::User(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Prim(prim) => write!(f, "{prim}"),
            Ty::Var(var) => write!(f, "{var}"),
            Ty::Arrow(lhs, rhs) => {
                if matches!(**lhs, Ty::Arrow(..)) {
                    write!(f, "({lhs}) -> {rhs}")
                } else {
                    write!(f, "{lhs} -> {rhs}")
                }
            }
            Ty::Product(types) => {
                f.write_str("(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
            Ty::OpenRecord { fields, row } => {
                f.write_str("{")?;
                format_fields(fields, f)?;
                if fields.is_empty() {
                    write!(f, "| {}}}", TypeVar::Unification(*row))
                } else {
                    write!(f, " | {}}}", TypeVar::Unification(*row))
                }
            }
            Ty::ClosedRecord { fields } => {
                f.write_str("{")?;
                format_fields(fields, f)?;
                f.write_str("}")
            }
            Ty::Invalid => f.write_str("<invalid>"),
        }
    }
}

fn format_fields(fields: &Fields, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, (label, ty)) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{label}: {ty}")?;
    }
    Ok(())
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.vars.is_empty() {
            f.write_str("forall")?;
            for var in &self.vars {
                write!(f, " {var}")?;
            }
            f.write_str(". ")?;
        }
        write!(f, "{}", self.ty)
    }
}
