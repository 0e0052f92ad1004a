// Publish pipeline: a fixed, unconditional sequence of git invocations run
// against the workspace folder. Step failures are collected and journaled,
// never raised — transient errors ("remote already exists", empty pull) are
// common and must not block the overall publish attempt.

use crate::journal::Journal;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const COMMITTER_NAME: &str = "GitUploaderBot";
pub const COMMITTER_EMAIL: &str = "auto@upload.bot";

/// One step of the sequence. Usually a single git invocation; the
/// committer-identity step runs two.
#[derive(Debug, Clone)]
pub struct Step {
    /// Rendered for the journal and progress display. Never contains the
    /// access token.
    pub label: String,
    pub commands: Vec<Vec<String>>,
    pub cwd: Option<PathBuf>,
}

/// Result of running one step, collected into an ordered vector so callers
/// can assert on the full outcome instead of scraping the journal.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub label: String,
    pub success: bool,
    pub stderr: String,
}

impl Step {
    fn global(args: &[&str]) -> Self {
        Step {
            label: format!("git {}", args.join(" ")),
            commands: vec![args.iter().map(|s| s.to_string()).collect()],
            cwd: None,
        }
    }

    fn in_dir(folder: &Path, args: &[&str]) -> Self {
        Step {
            label: format!("git {}", args.join(" ")),
            commands: vec![args.iter().map(|s| s.to_string()).collect()],
            cwd: Some(folder.to_path_buf()),
        }
    }

    fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Run the step to completion with captured output. Failures come back
    /// in the outcome, never as an error.
    pub fn run(&self) -> StepOutcome {
        let mut success = true;
        let mut stderr = String::new();
        for args in &self.commands {
            let mut command = Command::new("git");
            command.args(args);
            if let Some(cwd) = &self.cwd {
                command.current_dir(cwd);
            }
            match command.output() {
                Ok(output) => {
                    if !output.status.success() {
                        success = false;
                        if !stderr.is_empty() {
                            stderr.push('\n');
                        }
                        stderr.push_str(String::from_utf8_lossy(&output.stderr).trim());
                    }
                }
                Err(err) => {
                    success = false;
                    if !stderr.is_empty() {
                        stderr.push('\n');
                    }
                    stderr.push_str(&format!("failed to spawn git: {}", err));
                }
            }
        }
        StepOutcome {
            label: self.label.clone(),
            success,
            stderr,
        }
    }
}

/// The fixed publish sequence: always exactly these ten steps, in this
/// order, regardless of inputs or individual outcomes.
pub fn plan(folder: &Path, remote_url: &str, commit_msg: &str) -> Vec<Step> {
    let folder_arg = folder.display().to_string();
    vec![
        Step::global(&["config", "--global", "--add", "safe.directory", &folder_arg]),
        Step::in_dir(folder, &["init"]),
        Step::in_dir(folder, &["remote", "remove", "origin"]),
        Step::in_dir(folder, &["remote", "add", "origin", remote_url]).with_label(format!(
            "git remote add origin {}",
            redact_remote(remote_url)
        )),
        Step::in_dir(folder, &["add", "."]),
        identity_step(folder),
        Step::in_dir(folder, &["commit", "-m", commit_msg]),
        Step::in_dir(folder, &["branch", "-M", "main"]),
        Step::in_dir(
            folder,
            &["pull", "origin", "main", "--allow-unrelated-histories"],
        ),
        Step::in_dir(folder, &["push", "-u", "origin", "main"]),
    ]
}

/// Commits are authored by a fixed bot identity, not the user's real one.
fn identity_step(folder: &Path) -> Step {
    Step {
        label: format!("git config user.email/user.name ({})", COMMITTER_NAME),
        commands: vec![
            vec!["config".into(), "user.email".into(), COMMITTER_EMAIL.into()],
            vec!["config".into(), "user.name".into(), COMMITTER_NAME.into()],
        ],
        cwd: Some(folder.to_path_buf()),
    }
}

/// Strip the credential part out of a remote URL for display.
fn redact_remote(url: &str) -> String {
    match (url.find("://"), url.find('@')) {
        (Some(scheme), Some(at)) if at > scheme => {
            format!("{}***{}", &url[..scheme + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// Run every step in order, journaling each one. The sequence always runs
/// to completion; `on_step` fires after each step for progress reporting.
pub fn run_pipeline(
    steps: &[Step],
    journal: &Journal,
    mut on_step: impl FnMut(&Step, &StepOutcome),
) -> Vec<StepOutcome> {
    let mut outcomes = Vec::with_capacity(steps.len());
    for step in steps {
        let outcome = step.run();
        let line = if outcome.success {
            format!("Executed: {}", step.label)
        } else {
            format!("Failed: {} ({})", step.label, outcome.stderr)
        };
        if let Err(err) = journal.append(&line) {
            log::warn!("Could not append to journal: {}", err);
        }
        on_step(step, &outcome);
        outcomes.push(outcome);
    }
    outcomes
}
