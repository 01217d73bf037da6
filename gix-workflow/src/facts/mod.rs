//! Read-only facts about the local repository.
//!
//! The classifier and the rules only ever see a repository through [`RepositoryFacts`].
//! Queries are infallible by contract: if a fact cannot be determined, implementations
//! answer with the conservative default (`false`, `0`, `None` or an empty list) so a
//! single failed query never aborts a policy run.
//!
//! - [`GitFacts`] asks `git` itself, one process per query.
//! - [`InMemoryFacts`] answers from values set up front, for tests and embedding.

pub mod git;
pub mod memory;

pub use git::GitFacts;
pub use memory::InMemoryFacts;

/// A snapshot of the repository state relevant to workflow policies.
///
/// Answers must not change during the lifetime of a value.
pub trait RepositoryFacts {
    /// The short name of the checked-out branch, or `None` on a detached or unborn `HEAD`.
    fn current_branch(&self) -> Option<String>;

    /// Returns `true` if a local or remote-tracking branch called `name` exists.
    fn branch_exists(&self, name: &str) -> bool;

    /// The amount of configured remotes.
    fn remote_count(&self) -> usize;

    /// The amount of distinct commit authors across all refs.
    fn contributor_count(&self) -> usize;

    /// The amount of commits reachable from all refs.
    fn commit_count(&self) -> usize;

    /// Returns `true` if a continuous-integration configuration is present in the worktree.
    fn ci_present(&self) -> bool;

    /// Returns `true` if `branch` has an upstream branch configured.
    fn has_upstream(&self, branch: &str) -> bool;

    /// Returns `true` if `base` is an ancestor of `branch`.
    fn is_ancestor(&self, base: &str, branch: &str) -> bool;

    /// Paths with unresolved merge conflicts.
    fn conflicting_files(&self) -> Vec<String>;
}
