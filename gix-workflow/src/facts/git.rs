//! Facts obtained by asking `git`.
//!
//! Every query is a single blocking `git` process spawned through `gix-command`, issued
//! one after another. Scalar facts are collected once when [`GitFacts`] is opened, the
//! answers to predicates are remembered on first use, so the view of the repository stays
//! fixed for the lifetime of the value even if the worktree changes underneath.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use super::RepositoryFacts;

/// Files or directories whose presence in the worktree root indicates continuous integration.
pub const CI_MARKERS: &[&str] = &[
    ".github/workflows",
    ".gitlab-ci.yml",
    ".circleci",
    "Jenkinsfile",
    ".travis.yml",
    "azure-pipelines.yml",
    "bitbucket-pipelines.yml",
    ".drone.yml",
];

/// Why a single query could not produce a value.
#[derive(Debug, thiserror::Error)]
enum QueryError {
    #[error("could not spawn git")]
    Spawn(#[from] std::io::Error),
    #[error("`git {args}` failed with {status}: {stderr}")]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("`git {args}` produced unexpected output {output:?}")]
    Unparsable { args: String, output: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Predicate {
    BranchExists(String),
    HasUpstream(String),
    IsAncestor { base: String, branch: String },
}

#[derive(Debug, Clone, Default)]
struct Snapshot {
    current_branch: Option<String>,
    remotes: usize,
    contributors: usize,
    commits: usize,
    ci: bool,
    conflicts: Vec<String>,
}

/// [`RepositoryFacts`] backed by the `git` executable.
#[derive(Debug)]
pub struct GitFacts {
    dir: PathBuf,
    snapshot: Snapshot,
    predicates: RefCell<HashMap<Predicate, bool>>,
}

impl GitFacts {
    /// Query the repository whose worktree (or git directory, if bare) is `dir`.
    ///
    /// This runs all scalar queries right away.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut facts = Self {
            dir: dir.into(),
            snapshot: Snapshot::default(),
            predicates: RefCell::new(HashMap::new()),
        };
        facts.snapshot = facts.take_snapshot();
        facts
    }

    /// The directory `git` runs in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn take_snapshot(&self) -> Snapshot {
        let current_branch = degrade(
            "current branch",
            self.stdout(&["symbolic-ref", "--quiet", "--short", "HEAD"])
                .map(|out| Some(out.trim().to_owned()).filter(|name| !name.is_empty())),
        );
        let remotes = degrade("remote count", self.lines(&["remote"]).map(|lines| lines.len()));
        let contributors = degrade(
            "contributor count",
            self.lines(&["shortlog", "--summary", "--email", "--all"])
                .map(|lines| lines.len()),
        );
        let commits = degrade("commit count", self.count(&["rev-list", "--count", "--all"]));
        let ci = CI_MARKERS.iter().any(|marker| self.dir.join(marker).exists());
        let conflicts = degrade(
            "conflicting files",
            self.lines(&["diff", "--name-only", "--diff-filter=U"]),
        );

        let snapshot = Snapshot {
            current_branch,
            remotes,
            contributors,
            commits,
            ci,
            conflicts,
        };
        tracing::debug!(?snapshot, dir = %self.dir.display(), "collected repository facts");
        snapshot
    }

    fn predicate(&self, predicate: Predicate) -> bool {
        if let Some(answer) = self.predicates.borrow().get(&predicate) {
            return *answer;
        }
        let answer = match &predicate {
            Predicate::BranchExists(name) => degrade(
                "branch existence",
                self.lines(&["for-each-ref", "--format=%(refname)", "refs/heads", "refs/remotes"])
                    .map(|refs| refs.iter().any(|refname| names_branch(refname, name))),
            ),
            Predicate::HasUpstream(branch) => {
                let spec = format!("{branch}@{{upstream}}");
                degrade(
                    "upstream tracking",
                    self.stdout(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", &spec])
                        .map(|out| !out.trim().is_empty()),
                )
            }
            Predicate::IsAncestor { base, branch } => degrade(
                "ancestry",
                self.exit_status(&["merge-base", "--is-ancestor", base, branch]),
            ),
        };
        tracing::trace!(?predicate, answer, "queried predicate");
        self.predicates.borrow_mut().insert(predicate, answer);
        answer
    }

    fn run(&self, args: &[&str]) -> Result<std::process::Output, QueryError> {
        let child = gix_command::prepare("git")
            .arg("-C")
            .arg(&self.dir)
            .args(args.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        Ok(child.wait_with_output()?)
    }

    fn stdout(&self, args: &[&str]) -> Result<String, QueryError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(QueryError::Failed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn lines(&self, args: &[&str]) -> Result<Vec<String>, QueryError> {
        Ok(self
            .stdout(args)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }

    fn count(&self, args: &[&str]) -> Result<usize, QueryError> {
        let out = self.stdout(args)?;
        out.trim().parse().map_err(|_| QueryError::Unparsable {
            args: args.join(" "),
            output: out,
        })
    }

    /// Interpret exit code 0 as `true` and 1 as `false`, as `git merge-base --is-ancestor` does.
    fn exit_status(&self, args: &[&str]) -> Result<bool, QueryError> {
        let output = self.run(args)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(QueryError::Failed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }),
        }
    }
}

/// Use the value of `result`, or the conservative default if the query failed.
fn degrade<T: Default>(what: &str, result: Result<T, QueryError>) -> T {
    match result {
        Ok(value) => value,
        Err(err @ QueryError::Spawn(_)) => {
            tracing::warn!(error = %err, "{what} could not be determined");
            T::default()
        }
        Err(err) => {
            tracing::debug!(error = %err, "{what} could not be determined");
            T::default()
        }
    }
}

/// Returns `true` if `refname` is the local branch `name` or a remote-tracking branch of that name.
fn names_branch(refname: &str, name: &str) -> bool {
    if let Some(local) = refname.strip_prefix("refs/heads/") {
        return local == name;
    }
    refname
        .strip_prefix("refs/remotes/")
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(_remote, branch)| branch == name)
}

impl RepositoryFacts for GitFacts {
    fn current_branch(&self) -> Option<String> {
        self.snapshot.current_branch.clone()
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.predicate(Predicate::BranchExists(name.to_owned()))
    }

    fn remote_count(&self) -> usize {
        self.snapshot.remotes
    }

    fn contributor_count(&self) -> usize {
        self.snapshot.contributors
    }

    fn commit_count(&self) -> usize {
        self.snapshot.commits
    }

    fn ci_present(&self) -> bool {
        self.snapshot.ci
    }

    fn has_upstream(&self, branch: &str) -> bool {
        self.predicate(Predicate::HasUpstream(branch.to_owned()))
    }

    fn is_ancestor(&self, base: &str, branch: &str) -> bool {
        self.predicate(Predicate::IsAncestor {
            base: base.to_owned(),
            branch: branch.to_owned(),
        })
    }

    fn conflicting_files(&self) -> Vec<String> {
        self.snapshot.conflicts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_names_match_exactly() {
        assert!(names_branch("refs/heads/staging", "staging"));
        assert!(names_branch("refs/remotes/origin/staging", "staging"));
        assert!(names_branch("refs/remotes/upstream/release/v1.0.0", "release/v1.0.0"));
        assert!(!names_branch("refs/heads/staging-old", "staging"));
        assert!(!names_branch("refs/heads/release/v1.0.0", "release"));
        assert!(!names_branch("refs/remotes/origin/HEAD", "staging"));
        assert!(!names_branch("refs/tags/staging", "staging"));
    }

    #[test]
    fn a_directory_that_is_no_repository_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let facts = GitFacts::open(dir.path().join("does-not-exist"));

        assert_eq!(facts.current_branch(), None);
        assert_eq!(facts.remote_count(), 0);
        assert_eq!(facts.contributor_count(), 0);
        assert_eq!(facts.commit_count(), 0);
        assert!(!facts.ci_present());
        assert!(!facts.branch_exists("main"));
        assert!(!facts.has_upstream("main"));
        assert!(!facts.is_ancestor("main", "feature/x"));
        assert!(facts.conflicting_files().is_empty());
    }
}
