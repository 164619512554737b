// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-commit impact aggregation

use std::collections::BTreeSet;

use changelens_git::{ChangeKind, Commit, FileChange};
use serde::Serialize;

use crate::classify::{Category, classify};

/// Everything one commit changed, classified and summarised
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactRecord {
    /// The analysed commit
    pub commit: Commit,
    /// Files the commit touched, in git's order
    pub files: Vec<FileChange>,
    /// Union of the files' categories
    pub categories: BTreeSet<Category>,
    /// One description per add/modify/delete/rename/copy
    pub key_changes: Vec<String>,
    /// One-line summary, e.g. `covers: source code; 2 files total`
    pub summary: String,
}

impl ImpactRecord {
    /// Aggregate a commit and its file changes
    #[must_use]
    pub fn analyze(commit: Commit, files: Vec<FileChange>) -> Self {
        let categories: BTreeSet<Category> =
            files.iter().flat_map(|file| classify(&file.path)).collect();
        let key_changes = files.iter().filter_map(describe_change).collect();
        let summary = summarize(&categories, files.len());

        Self {
            commit,
            files,
            categories,
            key_changes,
            summary,
        }
    }

    /// Whether the record carries `category`
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Describe a single file change, or `None` for statuses with no description
fn describe_change(file: &FileChange) -> Option<String> {
    let action = file.action();
    match file.kind {
        ChangeKind::Added | ChangeKind::Modified | ChangeKind::Deleted
            if file.status.len() == 1 =>
        {
            Some(format!("{action} {}", file.path))
        }
        ChangeKind::Renamed | ChangeKind::Copied => Some(match file.moved_from() {
            Some(old) => format!("{action} {old} → {}", file.path),
            None => format!("{action} {}", file.path),
        }),
        _ => None,
    }
}

fn summarize(categories: &BTreeSet<Category>, file_count: usize) -> String {
    let mut parts = Vec::new();
    if !categories.is_empty() {
        let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
        parts.push(format!("covers: {}", labels.join(", ")));
    }
    if file_count > 0 {
        let noun = if file_count == 1 { "file" } else { "files" };
        parts.push(format!("{file_count} {noun} total"));
    }
    parts.join("; ")
}
