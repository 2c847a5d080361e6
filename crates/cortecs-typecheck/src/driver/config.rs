//! Checker configuration.
//!
//! Defaults suit an editor: report everything, with the built-in operators in
//! scope. The environment can override them:
//!
//! | Variable                    | Meaning                                 |
//! |-----------------------------|-----------------------------------------|
//! | `CORTECS_REPORT_UNRESOLVED` | report names no scope binds (`1`/`0`)    |
//! | `CORTECS_MAX_ERRORS`        | cap on errors kept per declaration      |

use thiserror::Error;

/// Environment variable toggling unresolved-reference diagnostics.
pub const REPORT_UNRESOLVED_ENV: &str = "CORTECS_REPORT_UNRESOLVED";

/// Environment variable capping errors per declaration.
pub const MAX_ERRORS_ENV: &str = "CORTECS_MAX_ERRORS";

/// An environment variable holding an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Not a recognized boolean
    #[error("{var}: expected a boolean, found `{value}`")]
    InvalidBool {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// Not a non-negative integer
    #[error("{var}: expected a number, found `{value}`")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Options of a [`Checker`](crate::Checker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Report references that no scope and no declaration binds
    pub report_unresolved: bool,
    /// Keep at most this many errors per declaration
    pub max_errors: Option<usize>,
    /// Bind the built-in operators
    pub with_prelude: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            report_unresolved: true,
            max_errors: None,
            with_prelude: true,
        }
    }
}

impl CheckerConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unresolved references are reported.
    pub fn report_unresolved(mut self, enabled: bool) -> Self {
        self.report_unresolved = enabled;
        self
    }

    /// Caps errors kept per declaration.
    pub fn max_errors(mut self, limit: Option<usize>) -> Self {
        self.max_errors = limit;
        self
    }

    /// Sets whether the built-in operators are in scope.
    pub fn with_prelude(mut self, enabled: bool) -> Self {
        self.with_prelude = enabled;
        self
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(REPORT_UNRESOLVED_ENV) {
            config.report_unresolved = parse_bool(REPORT_UNRESOLVED_ENV, &value)?;
        }
        if let Some(value) = lookup(MAX_ERRORS_ENV) {
            let limit = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: MAX_ERRORS_ENV,
                    value: value.clone(),
                })?;
            config.max_errors = Some(limit);
        }
        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
