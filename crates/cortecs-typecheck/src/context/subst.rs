//! Substitutions for type unification.
//!
//! A union-find store over unification variables. Each variable maps to an
//! [`Entry`]; a variable with no entry is its own representative.
//!
//! # Design
//!
//! - **Persistent**: entries live in an `imbl::OrdMap`, so every environment
//!   can keep its own substitution and cloning one is O(1).
//! - **Path compression**: [`Substitution::find`] rewrites the visited chain
//!   to point straight at the representative.
//! - **Compatibility classes**: a representative may carry a set of variables
//!   it is interchangeable with. The unifier hands every binding on to the
//!   linked members, which hand it on to theirs, so a type found at an
//!   instance reaches the original and every other instance. A member that
//!   is already resolved is unified with the new type instead, and a clash
//!   is reported like any other unification failure.
//! - **Append-only**: within a pass an entry is only ever refined, never
//!   removed.
//!
//! # Example
//!
//! ```
//! use cortecs_typecheck::context::Substitution;
//! use cortecs_typecheck::infer::VarSupply;
//! use cortecs_typecheck::types::{PrimTy, Ty};
//!
//! let supply = VarSupply::new();
//! let mut subst = Substitution::new();
//! subst.unify(&Ty::var(0), &Ty::var(1), &supply).unwrap();
//! subst.unify(&Ty::var(1), &Ty::Prim(PrimTy::I32), &supply).unwrap();
//! assert_eq!(subst.apply(&Ty::var(0)), Ty::Prim(PrimTy::I32));
//! ```

use crate::error::UnifyResult;
use crate::infer::{Unifier, VarSupply};
use crate::types::{Fields, Ty, TypeVar};
use cortecs_log::trace;
use imbl::{OrdMap, OrdSet};

/// What a variable is currently known to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Unresolved and the root of its class.
    Representative,
    /// Resolved to a type.
    Mapping(Ty),
    /// Unresolved root linked to interchangeable variables.
    Compatibility(OrdSet<u32>),
    /// Forwarding pointer towards the root.
    Intermediate(u32),
}

/// Substitution from unification variables to types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    entries: OrdMap<u32, Entry>,
}

impl Substitution {
    /// Create a new empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no variable has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored entry of `var`, if any.
    pub fn entry(&self, var: u32) -> Option<&Entry> {
        self.entries.get(&var)
    }

    /// Iterate over stored entries in variable order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &Entry)> {
        self.entries.iter().map(|(var, entry)| (*var, entry))
    }

    /// Root of `var`'s class without modifying the store.
    pub fn root(&self, var: u32) -> u32 {
        let mut current = var;
        while let Some(Entry::Intermediate(next)) = self.entries.get(&current) {
            current = *next;
        }
        current
    }

    /// Root of `var`'s class, compressing the path that led there.
    pub fn find(&mut self, var: u32) -> u32 {
        let root = self.root(var);
        let mut current = var;
        while current != root {
            let next = match self.entries.get(&current) {
                Some(Entry::Intermediate(next)) => *next,
                _ => break,
            };
            if next != root {
                self.entries.insert(current, Entry::Intermediate(root));
            }
            current = next;
        }
        root
    }

    /// The type `var` is resolved to, if any.
    pub fn resolved(&self, var: u32) -> Option<&Ty> {
        match self.entries.get(&self.root(var)) {
            Some(Entry::Mapping(ty)) => Some(ty),
            _ => None,
        }
    }

    /// Check if `var` has not been resolved to a type.
    pub fn is_unresolved(&self, var: u32) -> bool {
        self.resolved(var).is_none()
    }

    /// Variables linked to the class of `var`.
    pub fn compatible_with(&self, var: u32) -> OrdSet<u32> {
        match self.entries.get(&self.root(var)) {
            Some(Entry::Compatibility(members)) => members.clone(),
            _ => OrdSet::new(),
        }
    }

    /// Fully resolves `ty`.
    ///
    /// Variables become their representative or their resolved type, and
    /// record rows that were bound to further records are flattened.
    pub fn apply(&self, ty: &Ty) -> Ty {
        match ty {
            Ty::Var(var) => match ty.as_unification() {
                Some(n) => {
                    let root = self.root(n);
                    match self.entries.get(&root) {
                        Some(Entry::Mapping(resolved)) => self.apply(resolved),
                        _ => Ty::var(root),
                    }
                }
                None => Ty::Var(var.clone()),
            },
            Ty::Arrow(lhs, rhs) => Ty::arrow(self.apply(lhs), self.apply(rhs)),
            Ty::Product(types) => Ty::Product(types.iter().map(|t| self.apply(t)).collect()),
            Ty::OpenRecord { fields, row } => self.resolve_record(self.apply_fields(fields), *row),
            Ty::ClosedRecord { fields } => Ty::ClosedRecord {
                fields: self.apply_fields(fields),
            },
            Ty::Prim(_) | Ty::Invalid => ty.clone(),
        }
    }

    fn apply_fields(&self, fields: &Fields) -> Fields {
        fields
            .iter()
            .map(|(label, ty)| (label.clone(), self.apply(ty)))
            .collect()
    }

    /// Joins `fields` with whatever `row` has been resolved to.
    fn resolve_record(&self, mut fields: Fields, row: u32) -> Ty {
        let root = self.root(row);
        let Some(Entry::Mapping(rest)) = self.entries.get(&root) else {
            return Ty::OpenRecord { fields, row: root };
        };
        match self.apply(rest) {
            Ty::OpenRecord {
                fields: more,
                row: tail,
            } => {
                fields.extend(more);
                Ty::OpenRecord { fields, row: tail }
            }
            Ty::ClosedRecord { fields: more } => {
                fields.extend(more);
                Ty::ClosedRecord { fields }
            }
            Ty::Invalid => Ty::Invalid,
            Ty::Var(TypeVar::Unification(tail)) => Ty::OpenRecord { fields, row: tail },
            _ => Ty::OpenRecord { fields, row: root },
        }
    }

    /// Unify `a` with `b`, extending this substitution.
    ///
    /// # Errors
    ///
    /// Returns the structural failure; the substitution may hold the partial
    /// progress made before it.
    pub fn unify(&mut self, a: &Ty, b: &Ty, supply: &VarSupply) -> UnifyResult<()> {
        Unifier::new(self, supply).unify(a, b)
    }

    /// Functional form of [`unify`](Self::unify): leaves `self` untouched.
    ///
    /// # Errors
    ///
    /// Returns the structural failure.
    pub fn unified(&self, a: &Ty, b: &Ty, supply: &VarSupply) -> UnifyResult<Substitution> {
        let mut next = self.clone();
        next.unify(a, b, supply)?;
        Ok(next)
    }

    /// Resolves the root of `var` to `ty`.
    ///
    /// The caller has already applied `ty` and run the occurs check. Returns
    /// the members the root was linked to; the caller owes each of them a
    /// unification with `ty`.
    pub(crate) fn bind_var(&mut self, var: u32, ty: Ty) -> OrdSet<u32> {
        let root = self.find(var);
        match self.entries.insert(root, Entry::Mapping(ty)) {
            Some(Entry::Compatibility(members)) => members,
            _ => OrdSet::new(),
        }
    }

    /// Joins the classes of two distinct unresolved roots.
    ///
    /// The larger id is pointed at the smaller one; compatibility sets merge.
    pub(crate) fn union(&mut self, a: u32, b: u32) {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        let (parent, child) = if a < b { (a, b) } else { (b, a) };
        let mut members = self
            .compatible_with(parent)
            .union(self.compatible_with(child));
        members.remove(&parent);
        members.remove(&child);

        self.entries.insert(child, Entry::Intermediate(parent));
        if members.is_empty() {
            self.entries.insert(parent, Entry::Representative);
        } else {
            self.entries.insert(parent, Entry::Compatibility(members));
        }
    }

    /// Records that `original` and a freshly instantiated `instance` are
    /// interchangeable.
    ///
    /// A resolved original hands its type to the instance at once.
    pub(crate) fn link_instance(&mut self, original: u32, instance: u32) {
        let original = self.find(original);
        match self.resolved(original).cloned() {
            Some(ty) => {
                let instance = self.find(instance);
                self.entries.insert(instance, Entry::Mapping(ty));
            }
            None => {
                trace!("link {} to original {}", Ty::var(instance), Ty::var(original));
                self.add_member(original, instance);
                self.add_member(instance, original);
            }
        }
    }

    /// Records that `original` and `instance` are interchangeable.
    ///
    /// When either side is already resolved the two are unified instead, so
    /// a resolved pair must agree.
    ///
    /// # Errors
    ///
    /// Returns the unification failure of two disagreeing resolved sides.
    pub fn link_compatible(
        &mut self,
        original: u32,
        instance: u32,
        supply: &VarSupply,
    ) -> UnifyResult<()> {
        let (a, b) = (self.find(original), self.find(instance));
        if a == b {
            return Ok(());
        }
        if self.is_unresolved(a) && self.is_unresolved(b) {
            self.add_member(a, b);
            self.add_member(b, a);
            return Ok(());
        }
        self.unify(&Ty::var(a), &Ty::var(b), supply)
    }

    fn add_member(&mut self, root: u32, member: u32) {
        let mut members = self.compatible_with(root);
        members.insert(member);
        self.entries.insert(root, Entry::Compatibility(members));
    }

    /// Resolves every unresolved variable of `ty` to [`Ty::Invalid`].
    ///
    /// No propagation: poisoning one instance leaves its siblings alone.
    pub fn poison(&mut self, ty: &Ty) {
        for var in self.apply(ty).unification_vars() {
            let root = self.find(var);
            if self.is_unresolved(root) {
                self.entries.insert(root, Entry::Mapping(Ty::Invalid));
            }
        }
    }

    /// Folds `other` into this substitution.
    ///
    /// Entries for variables unknown here are replayed as unifications and
    /// links, so overlapping knowledge is reconciled rather than overwritten.
    ///
    /// # Errors
    ///
    /// Returns the first conflict; the remaining entries are still merged.
    pub fn merge(&mut self, other: &Substitution, supply: &VarSupply) -> UnifyResult<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        let (base, folded) = if other.len() > self.len() {
            (other.clone(), std::mem::take(self))
        } else {
            (std::mem::take(self), other.clone())
        };
        *self = base;

        let mut first_error = None;
        for (var, entry) in folded.entries() {
            let result = match entry {
                Entry::Representative => Ok(()),
                Entry::Intermediate(next) => self.unify(&Ty::var(var), &Ty::var(*next), supply),
                Entry::Mapping(ty) => self.unify(&Ty::var(var), ty, supply),
                Entry::Compatibility(members) => members
                    .iter()
                    .map(|member| self.link_compatible(var, *member, supply))
                    .fold(Ok(()), Result::and),
            };
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
