//! Branch naming conventions.
//!
//! Typed branches carry their purpose as a prefix, e.g. `feature/login-page` or
//! `release/v1.4.0`. The prefix also decides which branches a typed branch is expected
//! to be cut from.

use once_cell::sync::Lazy;
use regex::Regex;

static TYPED_BRANCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(feature|fix|hotfix|docs|refactor|test|chore)/[a-z0-9_-]+$").expect("valid TYPED_BRANCH pattern")
});

static RELEASE_BRANCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^release/v\d+\.\d+\.\d+$").expect("valid RELEASE_BRANCH pattern"));

/// Every accepted shape of a typed branch name, as shown to users.
pub const EXPECTED_FORMATS: &[&str] = &[
    "feature/<name>",
    "fix/<name>",
    "hotfix/<name>",
    "docs/<name>",
    "refactor/<name>",
    "test/<name>",
    "chore/<name>",
    "release/vMAJOR.MINOR.PATCH",
];

/// The purpose of a branch as encoded in its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Feature,
    Fix,
    Hotfix,
    Docs,
    Refactor,
    Test,
    Chore,
    Release,
}

impl BranchKind {
    /// Detect the kind from the prefix of `name` alone, without validating the rest.
    pub fn detect(name: &str) -> Option<Self> {
        let (prefix, _) = name.split_once('/')?;
        Some(match prefix {
            "feature" => BranchKind::Feature,
            "fix" => BranchKind::Fix,
            "hotfix" => BranchKind::Hotfix,
            "docs" => BranchKind::Docs,
            "refactor" => BranchKind::Refactor,
            "test" => BranchKind::Test,
            "chore" => BranchKind::Chore,
            "release" => BranchKind::Release,
            _ => return None,
        })
    }

    /// The branches one of which must be an ancestor of a branch of this kind.
    pub fn expected_bases(self) -> &'static [&'static str] {
        match self {
            BranchKind::Hotfix => &["main", "master"],
            _ => &["develop", "main"],
        }
    }
}

/// Returns `true` if `name` is one of the `protected` branches or follows a typed convention.
pub fn is_valid_branch_name(name: &str, protected: &[&str]) -> bool {
    protected.contains(&name) || TYPED_BRANCH.is_match(name) || RELEASE_BRANCH.is_match(name)
}
