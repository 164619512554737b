// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for changelens

use std::path::PathBuf;

use changelens_git::GitError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::metadata::MetadataError;

/// Errors that can occur while producing a report or updating metadata
#[derive(Debug, Error)]
pub enum AppError {
    /// Git error
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Metadata file error
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Markdown formatting failed
    #[error("Failed to render report: {0}")]
    Render(#[from] std::fmt::Error),

    /// JSON serialization failed
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// The report file could not be written
    #[error("Failed to write report to {path}: {source}")]
    WriteReport {
        /// Destination path
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for changelens operations
pub type AppResult<T> = Result<T, AppError>;
