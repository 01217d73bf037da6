use std::path::PathBuf;

use gix_workflow::{Operation, Request};

#[derive(Debug, clap::Parser)]
#[clap(name = "gix-guard", about = "Validate git operations against the workflow policy of a repository", version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))]
pub struct Args {
    /// The operation about to be performed, or `status` to show the policy in effect.
    #[clap(value_enum)]
    pub operation: Subject,

    /// The branch pushed or merged into. Defaults to the current branch.
    #[clap(long, value_name = "name")]
    pub target_branch: Option<String>,

    /// The branch to create or delete.
    #[clap(long, value_name = "name")]
    pub branch_name: Option<String>,

    /// A path inside the repository to validate.
    #[clap(long, value_name = "path", default_value = ".")]
    pub repo_path: PathBuf,

    /// Enforce the STRICT level regardless of the detected context.
    #[clap(long)]
    pub strict: bool,

    /// Log more, `-v` for debug and `-vv` for trace output on stderr.
    ///
    /// The `GIX_GUARD_LOG` environment variable takes precedence.
    #[clap(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Subject {
    Commit,
    Push,
    Merge,
    BranchCreate,
    BranchDelete,
    Status,
}

impl Args {
    /// The validation request, or `None` for `status`.
    pub fn request(&self) -> Option<Request> {
        let operation = match self.operation {
            Subject::Commit => Operation::Commit,
            Subject::Push => Operation::Push,
            Subject::Merge => Operation::Merge,
            Subject::BranchCreate => Operation::BranchCreate,
            Subject::BranchDelete => Operation::BranchDelete,
            Subject::Status => return None,
        };
        let mut request = Request::new(operation);
        request.target_branch.clone_from(&self.target_branch);
        request.branch_name.clone_from(&self.branch_name);
        Some(request)
    }
}
