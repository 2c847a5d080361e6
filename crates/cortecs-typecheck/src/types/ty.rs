//! Core type representation for type checking.
//!
//! This module defines the `Ty` enum, which represents **inferred types**.
//! It is distinct from `ast::TypeExpr`, which is a source-level annotation.
//!
//! # Design
//!
//! - **Unification variables** (`TypeVar::Unification`) are placeholders
//!   created by inference and resolved through the substitution.
//! - **User variables** (`TypeVar::User`) come from annotations such as `t`
//!   and are rigid: the substitution never binds them.
//! - **Records** are row-polymorphic. An open record carries a row variable
//!   standing for the labels not yet known; a closed record has exactly the
//!   labels it lists.
//! - **Invalid** is the error sentinel. It unifies with anything so that one
//!   root cause produces one diagnostic.

use cortecs_syntax::{FloatSuffix, IntSuffix};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Record fields, kept sorted by label.
pub type Fields = BTreeMap<String, Ty>;

/// Internal type representation for type checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ty {
    /// Primitive type
    Prim(PrimTy),

    /// Function type `lhs -> rhs`
    Arrow(Box<Ty>, Box<Ty>),

    /// Fixed-arity tuple used for multi-argument calls and operators
    Product(Vec<Ty>),

    /// Type variable
    Var(TypeVar),

    /// Record with at least `fields`; `row` stands for the rest.
    OpenRecord {
        /// Known fields
        fields: Fields,
        /// Unification variable for the unknown remainder
        row: u32,
    },

    /// Record with exactly `fields`.
    ClosedRecord {
        /// All fields
        fields: Fields,
    },

    /// Error sentinel; unifies with anything
    Invalid,
}

/// Type variables.
///
/// The derived ordering puts unification variables first, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeVar {
    /// Fresh variable introduced by inference
    Unification(u32),
    /// Named variable written in an annotation
    User(String),
}

/// Primitive types built into the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum PrimTy {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    Char,
    Bool,
    Unit,
}

impl PrimTy {
    /// Every primitive, in declaration order.
    pub const ALL: [PrimTy; 14] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::String,
        Self::Char,
        Self::Bool,
        Self::Unit,
    ];

    /// The name used in annotations and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::I8 => "I8",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::U8 => "U8",
            Self::U16 => "U16",
            Self::U32 => "U32",
            Self::U64 => "U64",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::String => "String",
            Self::Char => "Char",
            Self::Bool => "Bool",
            Self::Unit => "Unit",
        }
    }

    /// Looks up a primitive by its annotation name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|prim| prim.name() == name)
    }

    /// Type of an integer literal with the given suffix.
    pub const fn of_int(suffix: Option<IntSuffix>) -> Self {
        match suffix {
            None => Self::I32,
            Some(IntSuffix::I8) => Self::I8,
            Some(IntSuffix::I16) => Self::I16,
            Some(IntSuffix::I64) => Self::I64,
            Some(IntSuffix::U8) => Self::U8,
            Some(IntSuffix::U16) => Self::U16,
            Some(IntSuffix::U32) => Self::U32,
            Some(IntSuffix::U64) => Self::U64,
        }
    }

    /// Type of a float literal with the given suffix.
    pub const fn of_float(suffix: Option<FloatSuffix>) -> Self {
        match suffix {
            None | Some(FloatSuffix::F32) => Self::F32,
            Some(FloatSuffix::F64) => Self::F64,
        }
    }
}

impl Ty {
    /// Unification variable `n`.
    pub const fn var(n: u32) -> Ty {
        Ty::Var(TypeVar::Unification(n))
    }

    /// User-defined variable `name`.
    pub fn user(name: impl Into<String>) -> Ty {
        Ty::Var(TypeVar::User(name.into()))
    }

    /// The unit type.
    pub const fn unit() -> Ty {
        Ty::Prim(PrimTy::Unit)
    }

    /// `lhs -> rhs`
    pub fn arrow(lhs: Ty, rhs: Ty) -> Ty {
        Ty::Arrow(Box::new(lhs), Box::new(rhs))
    }

    /// Packs argument types: none is `Unit`, one is itself, more is a product.
    pub fn args(mut types: Vec<Ty>) -> Ty {
        match types.len() {
            0 => Ty::unit(),
            1 => types.swap_remove(0),
            _ => Ty::Product(types),
        }
    }

    /// Returns the variable id if this is a unification variable.
    pub const fn as_unification(&self) -> Option<u32> {
        match self {
            Ty::Var(TypeVar::Unification(n)) => Some(*n),
            _ => None,
        }
    }

    /// Checks if unification variable `var` occurs in this type.
    ///
    /// Used by the occurs check; row variables count as occurrences.
    pub fn occurs(&self, var: u32) -> bool {
        match self {
            Ty::Var(TypeVar::Unification(v)) => *v == var,
            Ty::Arrow(lhs, rhs) => lhs.occurs(var) || rhs.occurs(var),
            Ty::Product(types) => types.iter().any(|t| t.occurs(var)),
            Ty::OpenRecord { fields, row } => {
                *row == var || fields.values().any(|t| t.occurs(var))
            }
            Ty::ClosedRecord { fields } => fields.values().any(|t| t.occurs(var)),
            Ty::Prim(_) | Ty::Var(TypeVar::User(_)) | Ty::Invalid => false,
        }
    }

    /// All type variables of this type, in creation order.
    pub fn free_vars(&self) -> BTreeSet<TypeVar> {
        let mut vars = BTreeSet::new();
        self.collect_free_vars(&mut vars);
        vars
    }

    /// Unification variables of this type, in creation order.
    pub fn unification_vars(&self) -> BTreeSet<u32> {
        self.free_vars()
            .into_iter()
            .filter_map(|v| match v {
                TypeVar::Unification(n) => Some(n),
                TypeVar::User(_) => None,
            })
            .collect()
    }

    fn collect_free_vars(&self, vars: &mut BTreeSet<TypeVar>) {
        match self {
            Ty::Var(v) => {
                vars.insert(v.clone());
            }
            Ty::Arrow(lhs, rhs) => {
                lhs.collect_free_vars(vars);
                rhs.collect_free_vars(vars);
            }
            Ty::Product(types) => {
                for ty in types {
                    ty.collect_free_vars(vars);
                }
            }
            Ty::OpenRecord { fields, row } => {
                for ty in fields.values() {
                    ty.collect_free_vars(vars);
                }
                vars.insert(TypeVar::Unification(*row));
            }
            Ty::ClosedRecord { fields } => {
                for ty in fields.values() {
                    ty.collect_free_vars(vars);
                }
            }
            Ty::Prim(_) | Ty::Invalid => {}
        }
    }

    /// A type is ground when it has no variables.
    pub fn is_ground(&self) -> bool {
        self.free_vars().is_empty()
    }

    /// Replaces variables according to `mapping`, leaving others untouched.
    pub fn rename(&self, mapping: &FxHashMap<TypeVar, u32>) -> Ty {
        match self {
            Ty::Var(v) => mapping.get(v).map_or_else(|| self.clone(), |&n| Ty::var(n)),
            Ty::Arrow(lhs, rhs) => Ty::arrow(lhs.rename(mapping), rhs.rename(mapping)),
            Ty::Product(types) => Ty::Product(types.iter().map(|t| t.rename(mapping)).collect()),
            Ty::OpenRecord { fields, row } => Ty::OpenRecord {
                fields: rename_fields(fields, mapping),
                row: mapping
                    .get(&TypeVar::Unification(*row))
                    .copied()
                    .unwrap_or(*row),
            },
            Ty::ClosedRecord { fields } => Ty::ClosedRecord {
                fields: rename_fields(fields, mapping),
            },
            Ty::Prim(_) | Ty::Invalid => self.clone(),
        }
    }
}

fn rename_fields(fields: &Fields, mapping: &FxHashMap<TypeVar, u32>) -> Fields {
    fields
        .iter()
        .map(|(label, ty)| (label.clone(), ty.rename(mapping)))
        .collect()
}

impl From<PrimTy> for Ty {
    fn from(prim: PrimTy) -> Self {
        Ty::Prim(prim)
    }
}
