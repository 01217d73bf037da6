use std::path::{Path, PathBuf};

use crate::config::{PolicyConfig, PolicyTable, Settings};
use crate::context::{self, Context};
use crate::facts::{GitFacts, RepositoryFacts};
use crate::policy::{Request, RuleEngine};
use crate::report::{Report, Status};
use crate::Error;

/// The location of a discovered repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The `.git` directory, or the repository itself if it is bare.
    pub git_dir: PathBuf,
    /// The worktree root, `None` for bare repositories.
    pub work_dir: Option<PathBuf>,
    /// Where shared state like `config` lives. Differs from `git_dir` only for linked worktrees.
    pub common_dir: PathBuf,
}

impl Repository {
    /// The directory `git` should be run in.
    pub fn dir(&self) -> &Path {
        self.work_dir.as_deref().unwrap_or(&self.git_dir)
    }
}

/// Find the repository containing `path`, searching upwards.
pub fn discover(path: &Path) -> Result<Repository, Error> {
    let (location, trust) = gix_discover::upwards(path).map_err(|source| Error::RepositoryNotFound {
        path: path.to_owned(),
        source: Box::new(source),
    })?;
    let (git_dir, work_dir) = location.into_repository_and_work_tree_directories();
    let common_dir = common_dir(&git_dir)?;
    tracing::debug!(
        git_dir = %git_dir.display(),
        common_dir = %common_dir.display(),
        ?work_dir,
        ?trust,
        "discovered repository"
    );
    Ok(Repository {
        git_dir,
        work_dir,
        common_dir,
    })
}

/// Follow `<git_dir>/commondir` if present, resolving relative paths against `git_dir`.
fn common_dir(git_dir: &Path) -> Result<PathBuf, Error> {
    let file = git_dir.join("commondir");
    if !file.is_file() {
        return Ok(git_dir.to_owned());
    }
    let content = std::fs::read_to_string(&file)?;
    let path = Path::new(content.trim_end_matches(['\n', '\r']));
    Ok(if path.is_absolute() {
        path.to_owned()
    } else {
        git_dir.join(path)
    })
}

/// Everything one invocation needs: the facts snapshot and the settings to judge it by.
pub struct Session<F> {
    facts: F,
    settings: Settings,
    force_strict: bool,
    table: PolicyTable,
}

impl Session<GitFacts> {
    /// Discover the repository at `path`, load its settings and snapshot its facts.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let repo = discover(path)?;
        let settings = Settings::load(&repo.common_dir)?;
        Ok(Session::new(GitFacts::open(repo.dir()), settings))
    }
}

impl<F: RepositoryFacts> Session<F> {
    pub fn new(facts: F, settings: Settings) -> Self {
        Session {
            facts,
            settings,
            force_strict: false,
            table: PolicyTable::standard(),
        }
    }

    /// Force the strict level in addition to what the settings say.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.force_strict = strict;
        self
    }

    pub fn facts(&self) -> &F {
        &self.facts
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn forced_strict(&self) -> bool {
        self.force_strict || self.settings.force_strict
    }

    /// The classified context of the repository.
    pub fn context(&self) -> Context {
        context::classify(&self.facts, &self.settings.thresholds)
    }

    /// The policy in effect, with a forced level applied.
    pub fn policy(&self) -> PolicyConfig {
        self.table.resolve(self.context(), self.forced_strict())
    }

    /// Evaluate the rule suite of `request`.
    pub fn check(&self, request: &Request) -> Result<Report, Error> {
        let context = self.context();
        let config = self.table.resolve(context, self.forced_strict());
        tracing::info!(
            operation = %request.operation,
            %context,
            level = %config.level,
            "validating operation"
        );
        RuleEngine::new(&self.facts, config).evaluate(request)
    }

    pub fn status(&self) -> Status {
        let context = self.context();
        Status {
            context,
            config: self.table.resolve(context, self.forced_strict()),
            current_branch: self.facts.current_branch(),
            thresholds: self.settings.thresholds,
            forced_strict: self.forced_strict(),
        }
    }
}
