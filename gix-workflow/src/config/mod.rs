//! Policy table and repository-level overrides.
//!
//! The policy table itself is fixed. What a repository may tune through its git
//! configuration are the classifier thresholds and whether strict mode is forced.
//!
//! # Configuration Keys
//!
//! - `workflow.smallTeamContributors`: at most this many contributors count as a small team (default 2)
//! - `workflow.smallTeamCommits`: fewer commits than this count as a young history (default 100)
//! - `workflow.largeTeamContributors`: more contributors than this indicate a remote-first team (default 5)
//! - `workflow.strict`: force the `STRICT` level regardless of the detected context (default false)

use std::path::Path;

use gix_config::File;

use crate::context::Thresholds;
use crate::Error;

pub mod policy;

pub use policy::{Level, PolicyConfig, PolicyTable};

/// Result type for configuration parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Repository-level settings read from git configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub thresholds: Thresholds,
    pub force_strict: bool,
}

impl Settings {
    /// Parse settings from a git configuration file, using defaults for absent keys.
    pub fn from_config(config: &File<'static>) -> Result<Self> {
        let mut settings = Settings::default();
        let thresholds = &mut settings.thresholds;

        if let Some(value) = integer(config, "workflow.smallTeamContributors")? {
            thresholds.small_team_contributors = value;
        }
        if let Some(value) = integer(config, "workflow.smallTeamCommits")? {
            if value == 0 {
                return Err(Error::Validation(
                    "'workflow.smallTeamCommits' must be at least 1".into(),
                ));
            }
            thresholds.small_team_commits = value;
        }
        if let Some(value) = integer(config, "workflow.largeTeamContributors")? {
            thresholds.large_team_contributors = value;
        }

        if let Some(result) = config.boolean("workflow.strict") {
            match result {
                Ok(value) => settings.force_strict = value,
                Err(e) => {
                    return Err(Error::Validation(format!(
                        "invalid boolean value for 'workflow.strict': {}",
                        e
                    )))
                }
            }
        }

        Ok(settings)
    }

    /// Load settings from the `config` file in `common_dir`, the shared git directory of all worktrees.
    ///
    /// A repository without a `config` file uses the defaults.
    pub fn load(common_dir: &Path) -> Result<Self> {
        let path = common_dir.join("config");
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no repository configuration, using defaults");
            return Ok(Settings::default());
        }
        let config = File::from_path_no_includes(path.clone(), gix_config::Source::Local)
            .map_err(|source| Error::Config { path, source })?;
        Self::from_config(&config)
    }
}

fn integer(config: &File<'static>, key: &str) -> Result<Option<usize>> {
    let Some(result) = config.integer(key) else {
        return Ok(None);
    };
    let value = result.map_err(|e| Error::Validation(format!("invalid integer value for '{}': {}", key, e)))?;
    usize::try_from(value)
        .map(Some)
        .map_err(|_| Error::Validation(format!("'{}' must not be negative, got {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(text: &'static str) -> File<'static> {
        File::try_from(text).unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = File::new(gix_config::file::Metadata::api());
        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.thresholds, Thresholds::default());
        assert!(!settings.force_strict);
    }

    #[test]
    fn thresholds_and_strict_are_overridable() {
        let settings = Settings::from_config(&config(
            "[workflow]\n\tsmallTeamContributors = 3\n\tsmallTeamCommits = 250\n\tlargeTeamContributors = 10\n\tstrict = yes\n",
        ))
        .unwrap();

        assert_eq!(
            settings.thresholds,
            Thresholds {
                small_team_contributors: 3,
                small_team_commits: 250,
                large_team_contributors: 10,
            }
        );
        assert!(settings.force_strict);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let settings = Settings::from_config(&config("[workflow]\n\tlargeTeamContributors = 8\n")).unwrap();
        assert_eq!(settings.thresholds.large_team_contributors, 8);
        assert_eq!(
            settings.thresholds.small_team_contributors,
            Thresholds::default().small_team_contributors
        );
        assert!(!settings.force_strict);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = Settings::from_config(&config("[workflow]\n\tstrict = maybe\n")).unwrap_err();
        assert!(err.to_string().contains("invalid boolean value for 'workflow.strict'"));

        let err = Settings::from_config(&config("[workflow]\n\tsmallTeamCommits = many\n")).unwrap_err();
        assert!(err.to_string().contains("invalid integer value"));

        let err = Settings::from_config(&config("[workflow]\n\tlargeTeamContributors = -1\n")).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));

        let err = Settings::from_config(&config("[workflow]\n\tsmallTeamCommits = 0\n")).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn config_file_is_read_from_the_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config"),
            "[core]\n\tbare = false\n[workflow]\n\tstrict = true\n",
        )
        .unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert!(settings.force_strict);
    }
}
