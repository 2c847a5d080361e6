//! Leveled logging for the `cortecs` crates.
//!
//! The type checker runs inside a language server whose stdout carries the
//! protocol stream, so every record is written to **stderr**. Records are
//! tagged with the module path of the call site, and the minimum level is a
//! process-wide atomic that can be seeded from the `CORTECS_LOG` environment
//! variable.
//!
//! # Example
//!
//! ```
//! use cortecs_log::{debug, info, Level};
//!
//! cortecs_log::set_level(Level::Debug);
//!
//! let clusters = 3;
//! info!("checking {} clusters", clusters);
//! debug!("pending requirements: {:?}", ["+", "isOdd"]);
//! ```

use std::fmt::Arguments;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Name of the environment variable read by [`init_from_env`].
pub const LOG_ENV: &str = "CORTECS_LOG";

/// Severity of a log record.
///
/// Lower numeric values are more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Internal failures
    Error = 0,
    /// Suspicious but recoverable situations
    Warn = 1,
    /// Coarse progress (one line per analysis request)
    Info = 2,
    /// Per-declaration and per-cluster events
    Debug = 3,
    /// Per-rule and per-unification events
    Trace = 4,
}

impl Level {
    const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the upper-case name of this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use cortecs_log::Level;
    ///
    /// assert_eq!(Level::from_str("trace"), Ok(Level::Trace));
    /// assert!(Level::from_str("loud").is_err());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// The process-wide logger.
///
/// Only the level and the color switch are stored; the sink is always stderr.
pub struct Logger {
    level: AtomicU8,
    colors: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            colors: AtomicBool::new(true),
        }
    }

    /// Sets the minimum level that is written.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the minimum level that is written.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Enables or disables ANSI colors in the level tag.
    pub fn set_colors(&self, enabled: bool) {
        self.colors.store(enabled, Ordering::Relaxed);
    }

    /// Checks if a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    fn format(&self, level: Level, target: &str, args: Arguments) -> String {
        if self.colors.load(Ordering::Relaxed) {
            format!("{}[{}]\x1b[0m {target}: {args}", level.color_code(), level.as_str())
        } else {
            format!("[{}] {target}: {args}", level.as_str())
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at `Level::Warn` on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the minimum level of the global logger.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the minimum level of the global logger from a level name.
pub fn set_level_from_str(s: &str) -> Result<(), String> {
    let level = Level::from_str(s)?;
    set_level(level);
    Ok(())
}

/// Seeds the global level from `CORTECS_LOG`.
///
/// Returns the level in effect afterwards. An unset variable leaves the
/// current level untouched; an unparsable one is reported as an error and
/// also leaves it untouched.
pub fn init_from_env() -> Result<Level, String> {
    match std::env::var(LOG_ENV) {
        Ok(value) => set_level_from_str(&value)?,
        Err(std::env::VarError::NotPresent) => {}
        Err(err) => return Err(format!("{LOG_ENV}: {err}")),
    }
    Ok(get_logger().level())
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }

    let line = logger.format(level, target, args);
    // A closed stderr must never take the checker down.
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

/// Logs a record at an explicit level.
///
/// ```
/// use cortecs_log::{log, Level};
///
/// log!(level: Level::Info, "checked {} declarations", 4);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs a record at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs a record at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs a record at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs a record at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs a record at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
