/*!
Contextual workflow policies for git operations.

A repository is first classified into a collaboration [`Context`] from a snapshot of
its local state, the context selects a row of the policy table, and the operation
about to happen (commit, push, merge, branch creation or deletion) selects an ordered
suite of rules which are evaluated against that snapshot.

Layers, leaves first
- [`facts`]: the [`RepositoryFacts`] trait with a `git`-backed and an in-memory implementation.
- [`context`]: the classifier and its tunable [`Thresholds`].
- [`config`]: the fixed policy table and overrides read from git configuration.
- [`policy`]: severity resolution, the rule catalogue and the per-operation suites.
- [`report`]: aggregation of rule results into an exit code and a terminal rendering.

The [`Session`] ties them together for a single invocation.
*/

#![forbid(unsafe_code)]

use std::path::PathBuf;

pub mod config;
pub mod context;
pub mod facts;
pub mod policy;
pub mod report;
mod session;

pub use config::{Level, PolicyConfig, PolicyTable, Settings};
pub use context::{Context, Thresholds};
pub use facts::{GitFacts, InMemoryFacts, RepositoryFacts};
pub use policy::{Operation, Request, Rule, Severity, ValidationResult};
pub use report::{Report, Status};
pub use session::{discover, Repository, Session};

/// Stable high-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    NotFound,
    Usage,
    Validation,
    Io,
}

/// Error type for operations provided by this crate.
///
/// Failures of individual repository queries never show up here, they degrade
/// to conservative fact values instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The invocation path is not inside a git repository.
    #[error("not a git repository: {}", path.display())]
    RepositoryNotFound {
        path: PathBuf,
        #[source]
        source: Box<gix_discover::upwards::Error>,
    },
    /// The operation needs a branch which was neither given nor derivable from `HEAD`.
    #[error("{operation} requires {hint}")]
    MissingBranch { operation: Operation, hint: &'static str },
    /// A configuration value could not be interpreted.
    #[error("validation error: {0}")]
    Validation(String),
    /// The repository configuration could not be read.
    #[error("failed to read configuration at {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: gix_config::file::init::from_paths::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Fast classification helper returning a stable error kind.
    pub fn kind(&self) -> Kind {
        match self {
            Error::RepositoryNotFound { .. } => Kind::NotFound,
            Error::MissingBranch { .. } => Kind::Usage,
            Error::Validation(_) | Error::Config { .. } => Kind::Validation,
            Error::Io(_) => Kind::Io,
        }
    }
}
