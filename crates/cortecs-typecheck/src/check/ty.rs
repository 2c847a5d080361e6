//! Type annotation conversion.
//!
//! Converts source annotations (`ast::TypeExpr`) to the internal `Ty`
//! representation. Unknown type names are reported and become
//! [`Ty::Invalid`], so one bad annotation does not stop the analysis.

use crate::error::CortecsError;
use crate::types::{Fields, PrimTy, Ty};
use cortecs_syntax::Span;
use cortecs_syntax::ast::{TypeExpr, TypeKind};
use std::collections::BTreeSet;

/// A converted annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// The type
    pub ty: Ty,
    /// User type variables it names
    pub user_vars: BTreeSet<String>,
    /// Problems found, relative to the node holding the annotation
    pub errors: Vec<CortecsError>,
}

/// Converts `annotation`, whose holder sees it at `base + annotation.offset`.
pub fn convert_annotation(annotation: &TypeExpr, base: Span) -> Annotation {
    let mut converted = Annotation {
        ty: Ty::Invalid,
        user_vars: BTreeSet::new(),
        errors: Vec::new(),
    };
    converted.ty = convert(annotation, base, &mut converted);
    converted
}

fn convert(annotation: &TypeExpr, base: Span, out: &mut Annotation) -> Ty {
    let here = base + annotation.offset;
    match &annotation.kind {
        TypeKind::Named(name) => {
            if let Some(prim) = PrimTy::from_name(name) {
                Ty::Prim(prim)
            } else if TypeKind::is_type_variable(name) {
                out.user_vars.insert(name.clone());
                Ty::user(name.clone())
            } else {
                out.errors.push(CortecsError::new(
                    format!("unknown type `{name}`"),
                    here,
                    annotation.span,
                ));
                Ty::Invalid
            }
        }
        TypeKind::Record(entries) => {
            let mut fields = Fields::new();
            for (label, ty) in entries {
                let ty = convert(ty, here, out);
                if fields.contains_key(&label.kind) {
                    out.errors.push(CortecsError::new(
                        format!("duplicate field `{}` in record type", label.kind),
                        here + label.offset,
                        label.span,
                    ));
                    continue;
                }
                fields.insert(label.kind.clone(), ty);
            }
            Ty::ClosedRecord { fields }
        }
        TypeKind::Arrow { params, ret } => {
            let params = params.iter().map(|p| convert(p, here, out)).collect();
            Ty::arrow(Ty::args(params), convert(ret, here, out))
        }
    }
}
