//! The fixed policy table, one row per [`Context`].

use std::fmt;

use crate::context::Context;

/// How strictly level-sensitive rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures are reported as warnings.
    Permissive,
    /// Failures are reported as warnings, but more rules are active.
    Moderate,
    /// Failures block the operation.
    Strict,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Permissive => "PERMISSIVE",
            Level::Moderate => "MODERATE",
            Level::Strict => "STRICT",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The policy in effect for one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    pub level: Level,
    /// Branches which may not be deleted and, depending on the flags, not pushed to directly.
    pub protected_branches: &'static [&'static str],
    pub require_upstream: bool,
    pub require_pr: bool,
    pub allow_direct_push_to_main: bool,
    pub enforce_branch_naming: bool,
    /// Carried for completeness, no rule evaluates it yet.
    pub require_linear_history: bool,
}

impl PolicyConfig {
    /// Returns `true` if `branch` is protected under this policy.
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected_branches.contains(&branch)
    }

    /// The same policy with its level replaced, all other fields untouched.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

const STANDARD: [(Context, PolicyConfig); 3] = [
    (
        Context::Local,
        PolicyConfig {
            level: Level::Permissive,
            protected_branches: &["main", "master"],
            require_upstream: false,
            require_pr: false,
            allow_direct_push_to_main: true,
            enforce_branch_naming: false,
            require_linear_history: false,
        },
    ),
    (
        Context::Hybrid,
        PolicyConfig {
            level: Level::Moderate,
            protected_branches: &["main", "master", "develop"],
            require_upstream: true,
            require_pr: false,
            allow_direct_push_to_main: false,
            enforce_branch_naming: true,
            require_linear_history: false,
        },
    ),
    (
        Context::Remote,
        PolicyConfig {
            level: Level::Strict,
            protected_branches: &["main", "master", "develop", "staging", "release"],
            require_upstream: true,
            require_pr: true,
            allow_direct_push_to_main: false,
            enforce_branch_naming: true,
            require_linear_history: true,
        },
    ),
];

/// Immutable lookup from context to policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    rows: [(Context, PolicyConfig); 3],
}

impl PolicyTable {
    /// The built-in table.
    pub fn standard() -> Self {
        Self { rows: STANDARD }
    }

    /// The policy for `context`.
    pub fn get(&self, context: Context) -> &PolicyConfig {
        self.rows
            .iter()
            .find_map(|(ctx, config)| (*ctx == context).then_some(config))
            .unwrap_or_else(|| unreachable!("the table has a row for every context"))
    }

    /// Resolve the policy for `context`, raising its level to [`Level::Strict`] if `force_strict` is set.
    pub fn resolve(&self, context: Context, force_strict: bool) -> PolicyConfig {
        let config = *self.get(context);
        if force_strict {
            config.with_level(Level::Strict)
        } else {
            config
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}
