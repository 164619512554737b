// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Reading commit history through a [`GitRunner`]
//!
//! Subprocess failures stop here: [`History::git`] logs the failing command
//! with whatever git printed on stderr and hands back empty output, so a
//! broken range or a missing object shrinks the report instead of aborting it.

use crate::commit::{Commit, FIELD_SEPARATOR, LOG_FORMAT, parse_log};
use crate::error::GitError;
use crate::files::{FileChange, parse_name_status};
use crate::runner::GitRunner;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Identity of the current HEAD commit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadInfo {
    /// HEAD commit SHA
    pub commit: String,
    /// Author name of the HEAD commit
    pub author_name: String,
    /// Author email of the HEAD commit
    pub author_email: String,
    /// Author date of the HEAD commit, as printed by git
    pub datetime: String,
    /// Current branch name (`HEAD` when detached)
    pub branch: String,
}

/// Commit history of one repository
#[derive(Debug, Clone)]
pub struct History<R> {
    runner: R,
}

impl<R: GitRunner> History<R> {
    /// Wrap a runner
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Access the underlying runner
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run a git command, returning its output or an empty string on failure
    pub fn git<S: AsRef<str>>(&self, args: &[S]) -> String {
        self.try_git(args).unwrap_or_else(|e| {
            match &e {
                GitError::CommandFailed {
                    command, stderr, ..
                } => warn!(%command, %stderr, "Git command failed"),
                other => warn!(error = %other, "Failed to run git"),
            }
            String::new()
        })
    }

    /// Run a git command, surfacing failures to the caller
    ///
    /// # Errors
    ///
    /// Returns the runner's `GitError` unchanged.
    pub fn try_git<S: AsRef<str>>(&self, args: &[S]) -> Result<String, GitError> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        self.runner.run(&args)
    }

    /// Non-merge commits reachable from HEAD but not from `start`
    pub fn commits_since(&self, start: &str) -> Vec<Commit> {
        self.log(&format!("{start}..HEAD"))
    }

    /// The `max` most recent non-merge commits
    pub fn recent_commits(&self, max: usize) -> Vec<Commit> {
        self.log(&format!("-{max}"))
    }

    fn log(&self, selector: &str) -> Vec<Commit> {
        let format = format!("--pretty=format:{LOG_FORMAT}");
        let output = self.git(&[
            "log",
            selector,
            format.as_str(),
            "--no-merges",
            "--encoding=UTF-8",
        ]);
        let commits = parse_log(&output);
        debug!(selector, count = commits.len(), "Read commits");
        commits
    }

    /// Files changed by a single commit
    pub fn commit_files(&self, sha: &str) -> Vec<FileChange> {
        parse_name_status(&self.git(&["show", "--name-status", "--format=", sha]))
    }

    /// Raw diff of one file in one commit, relative to its first parent
    pub fn file_diff(&self, sha: &str, path: &str) -> String {
        self.git(&["show", "--no-color", sha, "--", path])
    }

    /// SHAs of the most recent commits, newest first (`git log --oneline`)
    pub fn recent_short_shas(&self, count: usize) -> Vec<String> {
        self.git(&["log", "--oneline", format!("-{count}").as_str()])
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    /// Identity, authorship and branch of HEAD
    ///
    /// Fields that git cannot provide are left empty.
    pub fn head_info(&self) -> HeadInfo {
        let commit = self.git(&["rev-parse", "HEAD"]);
        let authorship = self.git(&["log", "-1", "--pretty=format:%an%x1f%ae%x1f%ai"]);
        let mut fields = authorship.split(FIELD_SEPARATOR).map(str::to_string);
        let branch = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]);

        HeadInfo {
            commit,
            author_name: fields.next().unwrap_or_default(),
            author_email: fields.next().unwrap_or_default(),
            datetime: fields.next().unwrap_or_default(),
            branch,
        }
    }

    /// Stage one path and commit it with `message`
    ///
    /// # Errors
    ///
    /// Returns the first failing git command's error.
    pub fn commit_path(&self, path: &str, message: &str) -> Result<(), GitError> {
        self.try_git(&["add", path])?;
        self.try_git(&["commit", "-m", message])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers git commands from a table of canned outputs
    #[derive(Default)]
    struct FakeGit {
        outputs: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeGit {
        fn with(mut self, command: &str, output: &str) -> Self {
            self.outputs.insert(command.to_string(), output.to_string());
            self
        }
    }

    impl GitRunner for FakeGit {
        fn run(&self, args: &[String]) -> Result<String, GitError> {
            let command = args.join(" ");
            self.calls.borrow_mut().push(command.clone());
            self.outputs
                .get(&command)
                .cloned()
                .ok_or(GitError::CommandFailed {
                    command,
                    status: 128,
                    stderr: "fatal: bad revision".to_string(),
                })
        }
    }

    fn log_command(selector: &str) -> String {
        format!("log {selector} --pretty=format:{LOG_FORMAT} --no-merges --encoding=UTF-8")
    }

    #[test]
    fn test_commits_since_uses_range() {
        let git = FakeGit::default().with(
            &log_command("abc123..HEAD"),
            "def456\x1fAnn\x1fann@example.com\x1f2026-01-17 02:33:06 +0100\x1fsubject\x1f\x1e",
        );
        let history = History::new(git);
        let commits = history.commits_since("abc123");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].sha, "def456");
    }

    #[test]
    fn test_recent_commits_uses_count() {
        let git = FakeGit::default().with(&log_command("-50"), "");
        let history = History::new(git);
        assert!(history.recent_commits(50).is_empty());
        assert_eq!(history.runner().calls.borrow()[0], log_command("-50"));
    }

    #[test]
    fn test_failed_command_degrades_to_empty() {
        let history = History::new(FakeGit::default());
        assert_eq!(history.git(&["log", "nope..HEAD"]), "");
        assert!(history.commits_since("nope").is_empty());
        assert!(history.commit_files("nope").is_empty());
    }

    #[test]
    fn test_try_git_surfaces_failure() {
        let history = History::new(FakeGit::default());
        let result = history.try_git(&["status"]);
        assert!(matches!(result, Err(GitError::CommandFailed { status: 128, .. })));
    }

    #[test]
    fn test_commit_files() {
        let git = FakeGit::default().with(
            "show --name-status --format= abc",
            "A\ta.py\nR100\told.py\tnew.py",
        );
        let files = History::new(git).commit_files("abc");
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].old_path.as_deref(), Some("old.py"));
    }

    #[test]
    fn test_file_diff() {
        let git = FakeGit::default().with("show --no-color abc -- a.py", "diff --git a/a.py b/a.py");
        assert_eq!(History::new(git).file_diff("abc", "a.py"), "diff --git a/a.py b/a.py");
    }

    #[test]
    fn test_recent_short_shas() {
        let git = FakeGit::default().with(
            "log --oneline -10",
            "aaa1111 first\nbbb2222 second line\nccc3333 third",
        );
        let shas = History::new(git).recent_short_shas(10);
        assert_eq!(shas, vec!["aaa1111", "bbb2222", "ccc3333"]);
    }

    #[test]
    fn test_head_info() {
        let git = FakeGit::default()
            .with("rev-parse HEAD", "1945ab9c752534e733c38ba0109dc3b741f0a6eb")
            .with(
                "log -1 --pretty=format:%an%x1f%ae%x1f%ai",
                "Ann\x1fann@example.com\x1f2026-01-17 02:33:06 +0100",
            )
            .with("rev-parse --abbrev-ref HEAD", "main");
        let head = History::new(git).head_info();
        assert_eq!(
            head,
            HeadInfo {
                commit: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
                author_name: "Ann".to_string(),
                author_email: "ann@example.com".to_string(),
                datetime: "2026-01-17 02:33:06 +0100".to_string(),
                branch: "main".to_string(),
            }
        );
    }

    #[test]
    fn test_head_info_without_commits() {
        let head = History::new(FakeGit::default()).head_info();
        assert_eq!(head, HeadInfo::default());
    }

    #[test]
    fn test_commit_path_stops_on_failed_add() {
        let history = History::new(FakeGit::default());
        assert!(history.commit_path("meta.json", "msg").is_err());
        assert_eq!(history.runner().calls.borrow().len(), 1);
    }

    #[test]
    fn test_commit_path_runs_add_then_commit() {
        let git = FakeGit::default()
            .with("add meta.json", "")
            .with("commit -m update docs", "[main abc] update docs");
        let history = History::new(git);
        history.commit_path("meta.json", "update docs").expect("commit");
        assert_eq!(
            *history.runner().calls.borrow(),
            vec!["add meta.json".to_string(), "commit -m update docs".to_string()]
        );
    }
}
