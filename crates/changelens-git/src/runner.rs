// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running the git executable
//!
//! Everything above this module talks to git through the [`GitRunner`] trait,
//! so parsing and reporting can be exercised with canned output instead of a
//! real repository.

use crate::error::GitError;
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::trace;

/// Something that can run a git command and hand back its standard output
pub trait GitRunner {
    /// Run `git <args>` and return its trimmed standard output
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if git could not be started and
    /// `GitError::CommandFailed` if it exited with a non-zero status.
    fn run(&self, args: &[String]) -> Result<String, GitError>;
}

impl<R: GitRunner + ?Sized> GitRunner for &R {
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        (**self).run(args)
    }
}

/// Runs the `git` executable found on `PATH` inside a working directory
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    /// Run git in the given directory without checking it is a repository
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Discover the repository containing `path` and run git at its root
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found and
    /// `GitError::BareRepository` if it has no working directory.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        let workdir = repo.workdir().ok_or_else(|| GitError::BareRepository {
            path: repo.path().display().to_string(),
        })?;
        Ok(Self::new(workdir))
    }

    /// The directory git is run in
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        let command = args.join(" ");
        trace!(%command, workdir = %self.workdir.display(), "Running git");

        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_nonexistent_repository() {
        let result = SystemGit::discover("/nonexistent/path/for/changelens");
        match result {
            Err(GitError::RepositoryNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            _ => panic!("Expected RepositoryNotFound error"),
        }
    }

    #[test]
    fn test_missing_workdir_is_spawn_error() {
        let git = SystemGit::new("/nonexistent/path/for/changelens");
        let result = git.run(&["status".to_string()]);
        assert!(matches!(result, Err(GitError::Spawn { .. })));
    }

    #[test]
    fn test_workdir_accessor() {
        let git = SystemGit::new("/tmp");
        assert_eq!(git.workdir(), Path::new("/tmp"));
    }
}
