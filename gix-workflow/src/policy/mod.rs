//! Rule evaluation for workflow operations.
//!
//! Each [`Operation`] maps to a fixed, ordered suite of [`Rule`]s. Every rule of a suite
//! runs, regardless of the outcome of the rules before it, and contributes exactly one
//! [`ValidationResult`].
//!
//! Rules come in two flavours:
//! - level-sensitive rules, whose failure is turned into a warning or an error by
//!   [`resolve()`] depending on the active [`Level`](crate::Level),
//! - hard rules (deleting a protected branch, unresolved merge conflicts), which block
//!   under every level.

use std::fmt;

pub mod engine;
pub mod naming;
pub mod rules;
pub mod severity;

pub use engine::RuleEngine;
pub use naming::BranchKind;
pub use severity::{resolve, Severity, ValidationResult};

/// A version-control operation that is subject to policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Commit,
    Push,
    Merge,
    BranchCreate,
    BranchDelete,
}

impl Operation {
    /// The rules to run for this operation, in evaluation order.
    pub fn suite(self) -> &'static [Rule] {
        use Rule::*;
        match self {
            Operation::Commit => &[BranchNaming, BranchLineage, MergeConflicts],
            Operation::Push => &[BranchNaming, ProtectedBranch, UpstreamTracking, PullRequest],
            Operation::Merge => &[BranchNaming, ProtectedBranch, PullRequest],
            Operation::BranchCreate => &[BranchNaming],
            Operation::BranchDelete => &[ProtectedBranch],
        }
    }

    /// The name used on the command-line.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Commit => "commit",
            Operation::Push => "push",
            Operation::Merge => "merge",
            Operation::BranchCreate => "branch-create",
            Operation::BranchDelete => "branch-delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a rule of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The branch name follows one of the typed conventions.
    BranchNaming,
    /// Direct writes to, or deletion of, protected branches.
    ProtectedBranch,
    /// The branch tracks a remote branch.
    UpstreamTracking,
    /// Typed branches descend from the branch they are supposed to be cut from.
    BranchLineage,
    /// No unresolved conflicts in the index.
    MergeConflicts,
    /// Changes to protected branches go through a pull request.
    PullRequest,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::BranchNaming => "branch-naming",
            Rule::ProtectedBranch => "protected-branch",
            Rule::UpstreamTracking => "upstream-tracking",
            Rule::BranchLineage => "branch-lineage",
            Rule::MergeConflicts => "merge-conflicts",
            Rule::PullRequest => "pull-request",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller is about to do, as passed on the command-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: Operation,
    /// Destination of a push or merge; defaults to the current branch.
    pub target_branch: Option<String>,
    /// The branch to create or delete.
    pub branch_name: Option<String>,
}

impl Request {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            target_branch: None,
            branch_name: None,
        }
    }

    pub fn with_target_branch(mut self, name: impl Into<String>) -> Self {
        self.target_branch = Some(name.into());
        self
    }

    pub fn with_branch_name(mut self, name: impl Into<String>) -> Self {
        self.branch_name = Some(name.into());
        self
    }
}
