// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-commit file changes
//!
//! Parses the output of `git show --name-status --format= <sha>`: one
//! tab-separated line per changed file, `A\tpath` for additions,
//! modifications and deletions and `R100\told\tnew` for renames and copies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a file, selected by the first character of the status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// `A`
    Added,
    /// `M`
    Modified,
    /// `D`
    Deleted,
    /// `R`, similarity score ignored
    Renamed,
    /// `C`, similarity score ignored
    Copied,
    /// Any other status letter (type change, unmerged, ...)
    Other,
}

impl ChangeKind {
    /// Map a raw git status token (`M`, `R087`, ...) to a kind
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status.chars().next() {
            Some('A') => Self::Added,
            Some('M') => Self::Modified,
            Some('D') => Self::Deleted,
            Some('R') => Self::Renamed,
            Some('C') => Self::Copied,
            _ => Self::Other,
        }
    }

    /// Human readable action label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Other => "changed",
        }
    }

    /// Renames and copies carry a source path
    #[must_use]
    pub fn has_source(self) -> bool {
        matches!(self, Self::Renamed | Self::Copied)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Raw status token as printed by git (`A`, `M`, `R100`, ...)
    pub status: String,
    /// Kind derived from the status
    pub kind: ChangeKind,
    /// Path after the change (the new path for renames and copies)
    pub path: String,
    /// Source path, only for three-column rename/copy lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
}

impl FileChange {
    /// Build a change from a status token and path
    #[must_use]
    pub fn new(status: impl Into<String>, path: impl Into<String>) -> Self {
        let status = status.into();
        Self {
            kind: ChangeKind::from_status(&status),
            status,
            path: path.into(),
            old_path: None,
        }
    }

    /// Attach the source path of a rename or copy
    #[must_use]
    pub fn with_old_path(mut self, old_path: impl Into<String>) -> Self {
        self.old_path = Some(old_path.into());
        self
    }

    /// Human readable action label
    #[must_use]
    pub fn action(&self) -> &'static str {
        self.kind.label()
    }

    /// Source path when it differs from the resulting path
    #[must_use]
    pub fn moved_from(&self) -> Option<&str> {
        self.old_path
            .as_deref()
            .filter(|old| !old.is_empty() && *old != self.path)
    }
}

/// Parse `git show --name-status --format=` output
///
/// Blank lines and lines without a path are skipped. A rename or copy line is
/// only split into source and destination when it has exactly three columns.
#[must_use]
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<FileChange> {
    let parts: Vec<&str> = line.split('\t').collect();
    match parts.as_slice() {
        [status, old, new] if ChangeKind::from_status(status).has_source() => {
            Some(FileChange::new(*status, *new).with_old_path(*old))
        }
        [status, path, ..] => Some(FileChange::new(*status, *path)),
        _ => None,
    }
}
