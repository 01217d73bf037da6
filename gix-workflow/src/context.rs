//! Classification of a repository's collaboration context.

use std::fmt;

use crate::facts::RepositoryFacts;

/// At most this many contributors count as a small team.
pub const SMALL_TEAM_CONTRIBUTORS: usize = 2;
/// A history with fewer commits than this counts as young.
pub const SMALL_TEAM_COMMITS: usize = 100;
/// More contributors than this indicate a remote-first team.
pub const LARGE_TEAM_CONTRIBUTORS: usize = 5;

/// How a repository is collaborated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// No remote at all.
    Local,
    /// A remote exists, but the team is small or evidence is ambiguous.
    Hybrid,
    /// CI, a staging branch or a large team.
    Remote,
}

impl Context {
    pub fn as_str(self) -> &'static str {
        match self {
            Context::Local => "LOCAL",
            Context::Hybrid => "HYBRID",
            Context::Remote => "REMOTE",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tunable bounds used by [`classify()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Inclusive upper bound of contributors for the small-team clause.
    pub small_team_contributors: usize,
    /// Exclusive upper bound of commits for the small-team clause.
    pub small_team_commits: usize,
    /// Exclusive lower bound of contributors for the remote clause.
    pub large_team_contributors: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            small_team_contributors: SMALL_TEAM_CONTRIBUTORS,
            small_team_commits: SMALL_TEAM_COMMITS,
            large_team_contributors: LARGE_TEAM_CONTRIBUTORS,
        }
    }
}

/// Classify the repository described by `facts`.
///
/// The clauses are checked in order and the first match wins:
/// 1. no remote → [`Context::Local`]
/// 2. small team, young history and no CI → [`Context::Hybrid`]
/// 3. CI, a `staging` branch or a large team → [`Context::Remote`]
/// 4. otherwise → [`Context::Hybrid`]
///
/// A repository matching both 2. and 3. is therefore `Hybrid`.
pub fn classify(facts: &dyn RepositoryFacts, thresholds: &Thresholds) -> Context {
    let remotes = facts.remote_count();
    if remotes == 0 {
        tracing::debug!("no remotes configured");
        return Context::Local;
    }

    let contributors = facts.contributor_count();
    let commits = facts.commit_count();
    let ci = facts.ci_present();

    let context = if contributors <= thresholds.small_team_contributors && commits < thresholds.small_team_commits && !ci
    {
        Context::Hybrid
    } else if ci || facts.branch_exists("staging") || contributors > thresholds.large_team_contributors {
        Context::Remote
    } else {
        Context::Hybrid
    };
    tracing::debug!(remotes, contributors, commits, ci, %context, "classified repository");
    context
}
