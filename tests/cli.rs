use std::path::Path;
use std::process::Command as Git;

use assert_cmd::Command;
use predicates::prelude::*;

fn git(dir: &Path, args: &[&str]) {
    let status = Git::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=Bob", "-c", "user.email=bob@example.com", "-c", "commit.gpgsign=false"])
        .args(args)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .status()
        .expect("git can be spawned");
    assert!(status.success(), "git {args:?}");
}

/// A local repository on `main` with a single commit.
fn local_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    std::fs::write(dir.path().join("README.md"), "hello\n").unwrap();
    git(dir.path(), &["add", "README.md"]);
    git(dir.path(), &["commit", "-q", "-m", "initial"]);
    dir
}

fn guard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gix-guard").unwrap();
    cmd.arg("--repo-path").arg(dir).env_remove("GIX_GUARD_LOG");
    cmd
}

#[test]
fn outside_a_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    guard(dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn status_reports_the_context() {
    let repo = local_repo();
    guard(repo.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("LOCAL"))
        .stdout(predicate::str::contains("PERMISSIVE"))
        .stdout(predicate::str::contains("main, master"));
}

#[test]
fn status_with_strict_shows_the_forced_level() {
    let repo = local_repo();
    guard(repo.path())
        .args(["status", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STRICT (forced)"));
}

#[test]
fn deleting_main_is_blocked() {
    let repo = local_repo();
    guard(repo.path())
        .args(["branch-delete", "--branch-name", "main"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Deleting protected branch 'main' is never permitted"));
}

#[test]
fn any_branch_name_is_fine_locally() {
    let repo = local_repo();
    guard(repo.path())
        .args(["branch-create", "--branch-name", "new-stuff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn strict_flag_turns_warnings_into_blocks() {
    let repo = local_repo();
    git(repo.path(), &["checkout", "-q", "--orphan", "feature/orphan"]);
    git(repo.path(), &["commit", "-q", "-m", "unrelated history"]);

    guard(repo.path())
        .arg("commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("warning(s)"));
    guard(repo.path())
        .args(["commit", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("should be based on one of: develop, main"));
}

#[test]
fn missing_branch_name_is_a_usage_error() {
    let repo = local_repo();
    guard(repo.path())
        .arg("branch-create")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--branch-name"));
}

#[test]
fn invalid_usage_exits_with_one() {
    Command::cargo_bin("gix-guard")
        .unwrap()
        .arg("rebase")
        .assert()
        .code(1);
}

#[test]
fn help_and_version_succeed() {
    Command::cargo_bin("gix-guard").unwrap().arg("--help").assert().success();
    Command::cargo_bin("gix-guard")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gix-guard"));
}
