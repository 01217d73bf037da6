//! Aggregating rule results and rendering them for the terminal.
//!
//! Coloring goes through `colored`, whose global switch is left to the caller.

use std::io;

use colored::Colorize;

use crate::config::PolicyConfig;
use crate::context::{Context, Thresholds};
use crate::policy::{Severity, ValidationResult};

/// The ordered results of one rule suite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    results: Vec<ValidationResult>,
}

impl Report {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self { results }
    }

    /// All results, in evaluation order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Returns `true` if no result failed. Warnings don't count as failures.
    pub fn success(&self) -> bool {
        self.results.iter().all(|result| result.success)
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// `0` if the operation may proceed, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|result| result.severity == severity).count()
    }

    /// Write one line per result followed by a summary line.
    pub fn render(&self, out: &mut dyn io::Write) -> io::Result<()> {
        for result in &self.results {
            let icon = match result.severity {
                Severity::Info => "✓".green(),
                Severity::Warning => "⚠".yellow(),
                Severity::Error => "✗".red(),
            };
            writeln!(out, "{icon} {}: {}", result.rule.as_str().bold(), result.message)?;
        }

        let (errors, warnings) = (self.errors(), self.warnings());
        let summary = if !self.success() {
            format!("✗ Validation failed: {errors} error(s), {warnings} warning(s)").red().bold()
        } else if warnings > 0 {
            format!("⚠ Validation passed with {warnings} warning(s)").yellow().bold()
        } else {
            "✓ All checks passed".green().bold()
        };
        writeln!(out)?;
        writeln!(out, "{summary}")
    }
}

/// What `status` reports: the detected context and the policy it selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub context: Context,
    /// The policy in effect, with a forced level already applied.
    pub config: PolicyConfig,
    pub current_branch: Option<String>,
    pub thresholds: Thresholds,
    /// Whether the level was forced to strict by flag or configuration.
    pub forced_strict: bool,
}

impl Status {
    /// Always `0`, `status` evaluates no rules.
    pub fn exit_code(&self) -> i32 {
        0
    }

    pub fn render(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let config = &self.config;
        let level = if self.forced_strict {
            format!("{} (forced)", config.level)
        } else {
            config.level.to_string()
        };
        let rows: [(&str, String); 10] = [
            ("Context", self.context.to_string()),
            ("Level", level),
            (
                "Current branch",
                self.current_branch.clone().unwrap_or_else(|| "(detached HEAD)".into()),
            ),
            ("Protected branches", config.protected_branches.join(", ")),
            ("Require upstream", yes_no(config.require_upstream)),
            ("Require pull request", yes_no(config.require_pr)),
            ("Direct push to main", yes_no(config.allow_direct_push_to_main)),
            ("Enforce branch naming", yes_no(config.enforce_branch_naming)),
            ("Require linear history", yes_no(config.require_linear_history)),
            (
                "Thresholds",
                format!(
                    "small team <= {} contributors and < {} commits, large team > {} contributors",
                    self.thresholds.small_team_contributors,
                    self.thresholds.small_team_commits,
                    self.thresholds.large_team_contributors
                ),
            ),
        ];

        writeln!(out, "{}", "Workflow status".bold())?;
        for (label, value) in rows {
            writeln!(out, "  {:<24}{value}", format!("{label}:").cyan())?;
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.into()
}
