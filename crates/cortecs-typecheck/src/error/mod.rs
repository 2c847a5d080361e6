//! Type checking errors.
//!
//! Three layers:
//!
//! - [`UnifyError`]: a structural failure raised by the unifier. Production
//!   rules turn it into a diagnostic and poison the affected type.
//! - [`CortecsError`] / [`CortecsErrors`]: the serializable diagnostics handed
//!   to the language server. These are values, not Rust errors.
//! - [`CheckError`]: internal fatal conditions of the driver.

use crate::types::Ty;
use cortecs_syntax::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural unification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    /// Two types with different constructors.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    Mismatch {
        /// The expected type
        expected: Ty,
        /// The actual type found
        found: Ty,
    },

    /// Products of different length.
    #[error("arity mismatch: expected {expected} components, found {found}")]
    ArityMismatch {
        /// Components on the expected side
        expected: usize,
        /// Components on the found side
        found: usize,
    },

    /// An open record has labels a closed record cannot gain.
    #[error("record `{record}` has no {}", label_list(labels))]
    ExtraLabels {
        /// Labels missing from the closed record
        labels: Vec<String>,
        /// The closed record
        record: Ty,
    },

    /// Two records that must have the same labels do not.
    #[error("record labels differ: expected {}, found {}", label_list(expected), label_list(found))]
    LabelMismatch {
        /// Labels of the expected record
        expected: Vec<String>,
        /// Labels of the found record
        found: Vec<String>,
    },

    /// Occurs check failure.
    #[error("infinite type: `{}` occurs in `{ty}`", Ty::var(*var))]
    InfiniteType {
        /// The variable
        var: u32,
        /// The type containing it
        ty: Ty,
    },

    /// A user type variable met anything but itself or a unification variable.
    #[error("type variable `{name}` cannot be unified with `{ty}`")]
    RigidVariable {
        /// Name of the rigid variable
        name: String,
        /// The other type
        ty: Ty,
    },
}

fn label_list(labels: &[String]) -> String {
    if labels.is_empty() {
        return "no labels".to_string();
    }
    labels
        .iter()
        .map(|l| format!("`{l}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of a unification.
pub type UnifyResult<T> = std::result::Result<T, UnifyError>;

/// Internal fatal conditions of the driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A reduced-graph vertex names a declaration that does not exist.
    #[error("dependency graph references unknown declaration `{name}`")]
    MissingDeclaration {
        /// The missing name
        name: String,
    },
}

/// Result type for the driver.
pub type Result<T> = std::result::Result<T, CheckError>;

/// One diagnostic.
///
/// `offset` is relative to the node that produced the error and grows by each
/// ancestor's subordinate offset on the way up; `span` is the extent of the
/// erroring construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CortecsError {
    /// Human readable message
    pub message: String,
    /// Start relative to the enclosing node
    pub offset: Span,
    /// Extent
    pub span: Span,
}

impl CortecsError {
    /// Create a diagnostic.
    pub fn new(message: impl Into<String>, offset: Span, span: Span) -> Self {
        Self {
            message: message.into(),
            offset,
            span,
        }
    }

    /// Translates the diagnostic into the coordinates of a parent that sees
    /// the producing node at `by`.
    #[must_use]
    pub fn shifted(mut self, by: Span) -> Self {
        self.offset = by + self.offset;
        self
    }
}

/// Diagnostics of one declaration.
///
/// `error_span` is the absolute start of the declaration when there are
/// errors (every `offset` is relative to it) and `None` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CortecsErrors {
    /// Anchor of the error offsets
    pub error_span: Option<Span>,
    /// The diagnostics, in source order of discovery
    pub errors: Vec<CortecsError>,
}

impl CortecsErrors {
    /// No diagnostics.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Anchors `errors` at `start`; an empty list yields no anchor.
    pub fn anchored(start: Span, errors: Vec<CortecsError>) -> Self {
        Self {
            error_span: (!errors.is_empty()).then_some(start),
            errors,
        }
    }

    /// Checks if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Absolute start of each diagnostic.
    pub fn absolute_starts(&self) -> Vec<Span> {
        let anchor = self.error_span.unwrap_or_default();
        self.errors.iter().map(|e| anchor + e.offset).collect()
    }
}
