// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for changelens-git

use thiserror::Error;

/// Errors that can occur while talking to git
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// The repository has no working directory (bare repository)
    #[error("Repository has no working directory: {path}")]
    BareRepository {
        /// The path of the bare repository
        path: String,
    },

    /// The git executable could not be started
    #[error("Failed to run `git {command}`: {source}")]
    Spawn {
        /// The git arguments joined by spaces
        command: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// git exited with a non-zero status
    #[error("`git {command}` exited with {status}: {stderr}")]
    CommandFailed {
        /// The git arguments joined by spaces
        command: String,
        /// Exit status as reported by the OS (`-1` when killed by a signal)
        status: i32,
        /// Captured standard error, trimmed
        stderr: String,
    },
}
