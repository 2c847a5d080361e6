//! Bindings, requirements and compatibilities.
//!
//! Every environment carries these three sets. They are keyed by
//! [`BindableToken`] and keep insertion order, so diagnostics come out in
//! source order.

use crate::context::Substitution;
use crate::types::{Scheme, Ty};
use cortecs_syntax::Span;
use cortecs_syntax::ast::Operator;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Key of bindings and requirements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BindableToken {
    /// A variable or function name
    Name(String),
    /// An operator symbol
    Operator(Operator),
    /// The return type of the enclosing function
    ReturnType,
}

impl BindableToken {
    /// Name token.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// The name, if this is a name token.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for BindableToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Operator(op) => write!(f, "{op}"),
            Self::ReturnType => f.write_str("return"),
        }
    }
}

/// Where a node sits relative to the environment that holds a reference to
/// it, and how far it extends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Site {
    /// Start relative to the holding environment
    pub offset: Span,
    /// Extent
    pub span: Span,
}

impl Site {
    /// Create a site.
    pub const fn new(offset: Span, span: Span) -> Self {
        Self { offset, span }
    }

    /// The site as seen from a parent that places the holder at `by`.
    #[must_use]
    pub fn shifted(self, by: Span) -> Self {
        Self {
            offset: by + self.offset,
            span: self.span,
        }
    }
}

/// One use-site demand on a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    /// The type the use site needs
    pub ty: Ty,
    /// Where the use site is
    pub site: Site,
}

impl Demand {
    /// Create a demand.
    pub const fn new(ty: Ty, site: Site) -> Self {
        Self { ty, site }
    }

    /// The demand as seen from a parent that places the holder at `by`.
    #[must_use]
    pub fn shifted(mut self, by: Span) -> Self {
        self.site = self.site.shifted(by);
        self
    }
}

/// Token to the ordered list of demands made on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements(IndexMap<BindableToken, Vec<Demand>>);

impl Requirements {
    /// No requirements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a demand on `token`.
    pub fn push(&mut self, token: BindableToken, ty: Ty, site: Site) {
        self.push_demand(token, Demand::new(ty, site));
    }

    /// Appends an already built demand on `token`.
    pub fn push_demand(&mut self, token: BindableToken, demand: Demand) {
        self.0.entry(token).or_default().push(demand);
    }

    /// Appends every demand of `other`, shifted by `offset`.
    pub fn extend(&mut self, other: &Requirements, offset: Span) {
        for (token, demands) in &other.0 {
            for demand in demands {
                self.push_demand(token.clone(), demand.clone().shifted(offset));
            }
        }
    }

    /// The demands on `token`.
    pub fn get(&self, token: &BindableToken) -> &[Demand] {
        self.0.get(token).map(Vec::as_slice).unwrap_or_default()
    }

    /// The demanded types on `token`, in use-site order.
    pub fn types(&self, token: &BindableToken) -> Vec<Ty> {
        self.get(token).iter().map(|d| d.ty.clone()).collect()
    }

    /// Checks if `token` has any demand.
    pub fn contains(&self, token: &BindableToken) -> bool {
        self.0.contains_key(token)
    }

    /// Iterate over tokens and their demands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&BindableToken, &[Demand])> {
        self.0.iter().map(|(t, d)| (t, d.as_slice()))
    }

    /// Mutable access to every demand.
    pub fn demands_mut(&mut self) -> impl Iterator<Item = &mut Demand> {
        self.0.values_mut().flatten()
    }

    /// Tokens with at least one demand.
    pub fn tokens(&self) -> impl Iterator<Item = &BindableToken> {
        self.0.keys()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if nothing is demanded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves every demanded type through `subst`.
    #[must_use]
    pub fn apply(&self, subst: &Substitution) -> Self {
        Self(
            self.0
                .iter()
                .map(|(token, demands)| {
                    let demands = demands
                        .iter()
                        .map(|d| Demand::new(subst.apply(&d.ty), d.site))
                        .collect();
                    (token.clone(), demands)
                })
                .collect(),
        )
    }
}

/// Token to its active scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(IndexMap<BindableToken, Scheme>);

impl Bindings {
    /// No bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token`, shadowing any earlier binding of it.
    ///
    /// The new binding moves to the end of the iteration order.
    pub fn insert(&mut self, token: BindableToken, scheme: Scheme) {
        self.0.shift_remove(&token);
        self.0.insert(token, scheme);
    }

    /// The scheme bound to `token`.
    pub fn get(&self, token: &BindableToken) -> Option<&Scheme> {
        self.0.get(token)
    }

    /// Checks if `token` is bound.
    pub fn contains(&self, token: &BindableToken) -> bool {
        self.0.contains_key(token)
    }

    /// Iterate in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&BindableToken, &Scheme)> {
        self.0.iter()
    }

    /// Number of bound tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves every scheme through `subst`.
    #[must_use]
    pub fn apply(&self, subst: &Substitution) -> Self {
        Self(
            self.0
                .iter()
                .map(|(token, scheme)| (token.clone(), scheme.apply(subst)))
                .collect(),
        )
    }
}

/// Unification variables whose instances are linked back to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compatibilities(BTreeSet<u32>);

impl Compatibilities {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    pub fn insert(&mut self, var: u32) {
        self.0.insert(var);
    }

    /// Adds every variable of `other`.
    pub fn extend(&mut self, other: &Compatibilities) {
        self.0.extend(other.0.iter().copied());
    }

    /// Checks membership up to the classes of `subst`.
    pub fn contains(&self, var: u32, subst: &Substitution) -> bool {
        let root = subst.root(var);
        self.0.iter().any(|&member| subst.root(member) == root)
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for Compatibilities {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
