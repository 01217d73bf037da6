//! The rule catalogue.
//!
//! Each function evaluates one [`Rule`] for one branch and produces exactly one result.
//! Level-sensitive rules go through [`ValidationResult::resolved()`], hard rules use
//! [`ValidationResult::block()`] directly.

use super::naming::{self, BranchKind};
use super::{Operation, Rule, ValidationResult};
use crate::config::PolicyConfig;
use crate::facts::RepositoryFacts;

/// The branch follows a typed naming convention or is protected.
pub fn branch_naming(branch: &str, config: &PolicyConfig) -> ValidationResult {
    if !config.enforce_branch_naming {
        return ValidationResult::pass(Rule::BranchNaming, "Branch naming is not enforced in this context");
    }
    let condition_failed = !naming::is_valid_branch_name(branch, config.protected_branches);
    ValidationResult::resolved(
        Rule::BranchNaming,
        condition_failed,
        config.level,
        format!("Branch name '{branch}' follows the naming convention"),
        format!(
            "Branch name '{branch}' does not follow the naming convention, expected one of: {}, or a protected branch ({})",
            naming::EXPECTED_FORMATS.join(", "),
            config.protected_branches.join(", ")
        ),
    )
}

/// Writes to and deletion of protected branches.
///
/// Deleting a protected branch blocks under every level.
pub fn protected_branch(branch: &str, operation: Operation, config: &PolicyConfig) -> ValidationResult {
    if !config.is_protected(branch) {
        return ValidationResult::pass(Rule::ProtectedBranch, format!("'{branch}' is not a protected branch"));
    }
    match operation {
        Operation::Push | Operation::Merge => ValidationResult::resolved(
            Rule::ProtectedBranch,
            !config.allow_direct_push_to_main,
            config.level,
            format!("Direct {operation} to protected branch '{branch}' is allowed in this context"),
            format!(
                "Direct {operation} to protected branch '{branch}' is not allowed, open a Pull Request instead"
            ),
        ),
        Operation::BranchDelete => ValidationResult::block(
            Rule::ProtectedBranch,
            format!("Deleting protected branch '{branch}' is never permitted"),
        ),
        Operation::Commit | Operation::BranchCreate => ValidationResult::pass(
            Rule::ProtectedBranch,
            format!("{operation} does not modify protected branch '{branch}'"),
        ),
    }
}

/// The branch tracks a remote branch.
pub fn upstream_tracking(facts: &dyn RepositoryFacts, branch: &str, config: &PolicyConfig) -> ValidationResult {
    if !config.require_upstream {
        return ValidationResult::pass(
            Rule::UpstreamTracking,
            "Upstream tracking is not required in this context",
        );
    }
    ValidationResult::resolved(
        Rule::UpstreamTracking,
        !facts.has_upstream(branch),
        config.level,
        format!("Branch '{branch}' tracks an upstream branch"),
        format!("Branch '{branch}' has no upstream branch, run `git push --set-upstream origin {branch}`"),
    )
}

/// Typed branches descend from one of the branches their kind is cut from.
pub fn branch_lineage(facts: &dyn RepositoryFacts, branch: &str, config: &PolicyConfig) -> ValidationResult {
    let Some(kind) = BranchKind::detect(branch) else {
        return ValidationResult::pass(
            Rule::BranchLineage,
            format!("Branch '{branch}' has no type prefix, lineage not checked"),
        );
    };
    let bases = kind.expected_bases();
    let found = bases.iter().find(|base| facts.is_ancestor(base, branch));
    ValidationResult::resolved(
        Rule::BranchLineage,
        found.is_none(),
        config.level,
        format!("Branch '{branch}' descends from '{}'", found.unwrap_or(&"")),
        format!("Branch '{branch}' should be based on one of: {}", bases.join(", ")),
    )
}

/// No unresolved conflicts. Blocks under every level.
pub fn merge_conflicts(facts: &dyn RepositoryFacts) -> ValidationResult {
    let conflicts = facts.conflicting_files();
    if conflicts.is_empty() {
        ValidationResult::pass(Rule::MergeConflicts, "No merge conflicts")
    } else {
        ValidationResult::block(
            Rule::MergeConflicts,
            format!("Unresolved merge conflicts in: {}", conflicts.join(", ")),
        )
    }
}

/// Changes to protected branches go through a Pull Request.
pub fn pull_request(branch: &str, config: &PolicyConfig) -> ValidationResult {
    if !config.require_pr {
        return ValidationResult::pass(Rule::PullRequest, "Pull Requests are not required in this context");
    }
    ValidationResult::resolved(
        Rule::PullRequest,
        config.is_protected(branch),
        config.level,
        format!("'{branch}' is not protected, no Pull Request required"),
        format!("A Pull Request is required for changes to '{branch}'"),
    )
}
