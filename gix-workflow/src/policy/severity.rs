//! Severity resolution and the result type every rule produces.

use std::fmt;

use super::Rule;
use crate::config::Level;

/// How a single rule result is to be presented and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// The rule that produced this result.
    pub rule: Rule,
    /// `false` if the operation must be blocked.
    pub success: bool,
    /// Human-readable explanation.
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    /// A passing result.
    pub fn pass(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            success: true,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// A blocking result that no level can soften.
    pub fn block(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            success: false,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Turn a level-sensitive check into a result.
    ///
    /// `passed` is used as message when the condition holds, `failed` otherwise, and
    /// the outcome of a failure is decided by [`resolve()`].
    pub fn resolved(
        rule: Rule,
        condition_failed: bool,
        level: Level,
        passed: impl Into<String>,
        failed: impl Into<String>,
    ) -> Self {
        let (success, severity) = resolve(condition_failed, level);
        Self {
            rule,
            success,
            message: if condition_failed { failed.into() } else { passed.into() },
            severity,
        }
    }
}

/// Map the outcome of a level-sensitive rule onto `(success, severity)`.
///
/// Only [`Level::Strict`] blocks, the other levels downgrade a failure to a warning.
pub fn resolve(condition_failed: bool, level: Level) -> (bool, Severity) {
    if !condition_failed {
        (true, Severity::Info)
    } else if level == Level::Strict {
        (false, Severity::Error)
    } else {
        (true, Severity::Warning)
    }
}
