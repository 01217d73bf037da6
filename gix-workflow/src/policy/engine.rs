//! Running rule suites against a repository.

use super::{rules, Operation, Request, Rule, ValidationResult};
use crate::config::PolicyConfig;
use crate::facts::RepositoryFacts;
use crate::report::Report;
use crate::Error;

/// Evaluates the rule suite of an operation under one policy.
pub struct RuleEngine<'a> {
    facts: &'a dyn RepositoryFacts,
    config: PolicyConfig,
}

impl<'a> RuleEngine<'a> {
    pub fn new(facts: &'a dyn RepositoryFacts, config: PolicyConfig) -> Self {
        Self { facts, config }
    }

    /// The policy rules are evaluated under.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Run every rule of the suite of `request.operation`, in order.
    ///
    /// Fails only if the operation needs a branch that can't be determined.
    pub fn evaluate(&self, request: &Request) -> Result<Report, Error> {
        let operation = request.operation;
        let branch = self.branch_for(request)?;
        let results = operation
            .suite()
            .iter()
            .map(|rule| self.run(*rule, operation, branch.as_deref()))
            .inspect(|result| {
                tracing::debug!(
                    rule = %result.rule,
                    success = result.success,
                    severity = %result.severity,
                    "evaluated rule"
                );
            })
            .collect();
        Ok(Report::new(results))
    }

    /// Evaluate a single `rule` for `branch`, which is `None` only for commits on a detached `HEAD`.
    pub fn run(&self, rule: Rule, operation: Operation, branch: Option<&str>) -> ValidationResult {
        let config = &self.config;
        if rule == Rule::MergeConflicts {
            return rules::merge_conflicts(self.facts);
        }
        let Some(branch) = branch else {
            return ValidationResult::pass(rule, "HEAD is detached, branch checks skipped");
        };
        match rule {
            Rule::BranchNaming => rules::branch_naming(branch, config),
            Rule::ProtectedBranch => rules::protected_branch(branch, operation, config),
            Rule::UpstreamTracking => rules::upstream_tracking(self.facts, branch, config),
            Rule::BranchLineage => rules::branch_lineage(self.facts, branch, config),
            Rule::PullRequest => rules::pull_request(branch, config),
            Rule::MergeConflicts => rules::merge_conflicts(self.facts),
        }
    }

    fn branch_for(&self, request: &Request) -> Result<Option<String>, Error> {
        let operation = request.operation;
        match operation {
            Operation::Commit => Ok(self.facts.current_branch()),
            Operation::Push | Operation::Merge => request
                .target_branch
                .clone()
                .or_else(|| self.facts.current_branch())
                .map(Some)
                .ok_or(Error::MissingBranch {
                    operation,
                    hint: "--target-branch when HEAD is detached",
                }),
            Operation::BranchCreate | Operation::BranchDelete => {
                request.branch_name.clone().map(Some).ok_or(Error::MissingBranch {
                    operation,
                    hint: "--branch-name",
                })
            }
        }
    }
}
