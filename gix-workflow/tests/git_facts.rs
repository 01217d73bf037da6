//! Facts and sessions against real repositories created with `git`.

use std::path::Path;
use std::process::Command;

use gix_workflow::{Context, GitFacts, Operation, RepositoryFacts, Request, Session};

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Alice",
            "-c",
            "user.email=alice@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "init.defaultBranch=main",
        ])
        .args(args)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("git can be spawned")
        .status
        .success()
}

fn commit(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).unwrap();
    assert!(git(dir, &["add", file]));
    assert!(git(dir, &["commit", "-q", "-m", file]));
}

/// A repository on `main` with two commits by one author.
fn repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    assert!(git(dir.path(), &["init", "-q"]));
    assert!(git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]));
    commit(dir.path(), "a.txt", "one\n");
    commit(dir.path(), "b.txt", "two\n");
    dir
}

#[test]
fn fresh_repository() {
    let dir = repo();
    let facts = GitFacts::open(dir.path());

    assert_eq!(facts.current_branch().as_deref(), Some("main"));
    assert_eq!(facts.remote_count(), 0);
    assert_eq!(facts.contributor_count(), 1);
    assert_eq!(facts.commit_count(), 2);
    assert!(!facts.ci_present());
    assert!(facts.branch_exists("main"));
    assert!(!facts.branch_exists("staging"));
    assert!(!facts.has_upstream("main"));
    assert!(facts.conflicting_files().is_empty());
}

#[test]
fn branches_and_ancestry() {
    let dir = repo();
    assert!(git(dir.path(), &["checkout", "-q", "-b", "feature/login-page"]));
    commit(dir.path(), "c.txt", "three\n");

    let facts = GitFacts::open(dir.path());
    assert_eq!(facts.current_branch().as_deref(), Some("feature/login-page"));
    assert!(facts.branch_exists("feature/login-page"));
    assert!(facts.is_ancestor("main", "feature/login-page"));
    assert!(!facts.is_ancestor("feature/login-page", "main"));
    assert!(!facts.is_ancestor("develop", "feature/login-page"), "missing refs answer false");
}

#[test]
fn detached_head_has_no_current_branch() {
    let dir = repo();
    assert!(git(dir.path(), &["checkout", "-q", "--detach"]));
    assert_eq!(GitFacts::open(dir.path()).current_branch(), None);
}

#[test]
fn remotes_and_upstream_tracking() {
    let dir = repo();
    let remote = tempfile::tempdir().unwrap();
    assert!(git(remote.path(), &["init", "-q", "--bare"]));
    let url = remote.path().to_string_lossy().into_owned();
    assert!(git(dir.path(), &["remote", "add", "origin", &url]));
    assert!(git(dir.path(), &["push", "-q", "--set-upstream", "origin", "main"]));
    assert!(git(dir.path(), &["branch", "staging"]));

    let facts = GitFacts::open(dir.path());
    assert_eq!(facts.remote_count(), 1);
    assert!(facts.has_upstream("main"));
    assert!(!facts.has_upstream("staging"));
    assert!(facts.branch_exists("staging"));
}

#[test]
fn ci_markers_are_detected() {
    let dir = repo();
    std::fs::create_dir_all(dir.path().join(".github/workflows")).unwrap();
    assert!(GitFacts::open(dir.path()).ci_present());

    let dir = repo();
    std::fs::write(dir.path().join(".gitlab-ci.yml"), "").unwrap();
    assert!(GitFacts::open(dir.path()).ci_present());
}

#[test]
fn unresolved_conflicts_are_listed() {
    let dir = repo();
    assert!(git(dir.path(), &["checkout", "-q", "-b", "fix/wording"]));
    commit(dir.path(), "a.txt", "theirs\n");
    assert!(git(dir.path(), &["checkout", "-q", "main"]));
    commit(dir.path(), "a.txt", "ours\n");
    assert!(!git(dir.path(), &["merge", "-q", "fix/wording"]), "the merge conflicts");

    let facts = GitFacts::open(dir.path());
    assert_eq!(facts.conflicting_files(), vec!["a.txt".to_string()]);
}

#[test]
fn sessions_open_from_subdirectories() {
    let dir = repo();
    let nested = dir.path().join("src/deep");
    std::fs::create_dir_all(&nested).unwrap();

    let session = Session::open(&nested).unwrap();
    assert_eq!(session.context(), Context::Local);

    let delete_main = session
        .check(&Request::new(Operation::BranchDelete).with_branch_name("main"))
        .unwrap();
    assert_eq!(delete_main.exit_code(), 1);

    let create = session
        .check(&Request::new(Operation::BranchCreate).with_branch_name("new-stuff"))
        .unwrap();
    assert_eq!(create.exit_code(), 0);
}

#[test]
fn strict_mode_from_repository_configuration() {
    let dir = repo();
    assert!(git(dir.path(), &["config", "workflow.strict", "true"]));

    let session = Session::open(dir.path()).unwrap();
    let status = session.status();
    assert!(status.forced_strict);
    assert_eq!(status.context, Context::Local);
}

#[test]
fn directories_outside_repositories_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Session::open(dir.path()).is_err());
}

#[test]
fn contributors_are_counted_per_author() {
    let dir = repo();
    std::fs::write(dir.path().join("c.txt"), "three\n").unwrap();
    assert!(git(dir.path(), &["add", "c.txt"]));
    assert!(git(
        dir.path(),
        &[
            "-c",
            "user.name=Carol",
            "-c",
            "user.email=carol@example.com",
            "commit",
            "-q",
            "-m",
            "c.txt"
        ]
    ));

    let facts = GitFacts::open(dir.path());
    assert_eq!(facts.contributor_count(), 2);
    assert_eq!(facts.commit_count(), 3);
}

#[test]
fn linked_worktrees_use_the_shared_configuration() {
    let dir = repo();
    assert!(git(dir.path(), &["config", "workflow.strict", "true"]));
    assert!(git(dir.path(), &["config", "workflow.largeTeamContributors", "9"]));
    let worktrees = tempfile::tempdir().unwrap();
    let worktree = worktrees.path().join("wt");
    let worktree_arg = worktree.to_string_lossy().into_owned();
    assert!(git(dir.path(), &["worktree", "add", "-b", "feature/wt", &worktree_arg]));

    let session = Session::open(&worktree).unwrap();
    let status = session.status();
    assert!(status.forced_strict);
    assert_eq!(status.thresholds.large_team_contributors, 9);
    assert_eq!(status.current_branch.as_deref(), Some("feature/wt"));
}
