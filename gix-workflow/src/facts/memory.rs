//! Facts held in memory.

use std::collections::{BTreeMap, BTreeSet};

use super::RepositoryFacts;

/// A [`RepositoryFacts`] implementation answering from values configured up front.
///
/// Everything defaults to the conservative answer: no branches, no remotes, no history.
///
/// # Examples
///
/// ```rust
/// use gix_workflow::{InMemoryFacts, RepositoryFacts};
///
/// let facts = InMemoryFacts::new()
///     .with_remotes(1)
///     .on_branch("feature/login-page")
///     .with_ancestor("develop", "feature/login-page");
///
/// assert_eq!(facts.current_branch().as_deref(), Some("feature/login-page"));
/// assert!(facts.is_ancestor("develop", "feature/login-page"));
/// assert!(!facts.has_upstream("feature/login-page"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryFacts {
    current_branch: Option<String>,
    branches: BTreeSet<String>,
    remotes: usize,
    contributors: usize,
    commits: usize,
    ci: bool,
    upstreams: BTreeSet<String>,
    ancestors: BTreeMap<String, BTreeSet<String>>,
    conflicts: Vec<String>,
}

impl InMemoryFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out `name`, which also makes it exist.
    pub fn on_branch(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.branches.insert(name.clone());
        self.current_branch = Some(name);
        self
    }

    pub fn with_branch(mut self, name: impl Into<String>) -> Self {
        self.branches.insert(name.into());
        self
    }

    pub fn with_remotes(mut self, count: usize) -> Self {
        self.remotes = count;
        self
    }

    pub fn with_contributors(mut self, count: usize) -> Self {
        self.contributors = count;
        self
    }

    pub fn with_commits(mut self, count: usize) -> Self {
        self.commits = count;
        self
    }

    pub fn with_ci(mut self, present: bool) -> Self {
        self.ci = present;
        self
    }

    pub fn with_upstream(mut self, branch: impl Into<String>) -> Self {
        self.upstreams.insert(branch.into());
        self
    }

    /// Record that `base` is an ancestor of `branch`; both branches start to exist.
    pub fn with_ancestor(mut self, base: impl Into<String>, branch: impl Into<String>) -> Self {
        let (base, branch) = (base.into(), branch.into());
        self.branches.insert(base.clone());
        self.branches.insert(branch.clone());
        self.ancestors.entry(branch).or_default().insert(base);
        self
    }

    pub fn with_conflicts<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts = paths.into_iter().map(Into::into).collect();
        self
    }
}

impl RepositoryFacts for InMemoryFacts {
    fn current_branch(&self) -> Option<String> {
        self.current_branch.clone()
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.branches.contains(name)
    }

    fn remote_count(&self) -> usize {
        self.remotes
    }

    fn contributor_count(&self) -> usize {
        self.contributors
    }

    fn commit_count(&self) -> usize {
        self.commits
    }

    fn ci_present(&self) -> bool {
        self.ci
    }

    fn has_upstream(&self, branch: &str) -> bool {
        self.upstreams.contains(branch)
    }

    fn is_ancestor(&self, base: &str, branch: &str) -> bool {
        self.ancestors.get(branch).is_some_and(|bases| bases.contains(base))
    }

    fn conflicting_files(&self) -> Vec<String> {
        self.conflicts.clone()
    }
}
