// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end analysis of a commit range
//!
//! The analyzer decides where the range starts, reads the commits in it,
//! lists each commit's files and aggregates them into [`ImpactRecord`]s.
//! Rendering is left to [`Analysis::render`] so callers can pick a format.

use std::fmt;

use chrono::{DateTime, TimeZone};
use changelens_git::{GitRunner, History};
use tracing::{debug, info};

use crate::config::{DEFAULT_FALLBACK_DEPTH, DEFAULT_MAX_COMMITS, ReportConfig, ReportFormat};
use crate::error::AppResult;
use crate::impact::ImpactRecord;
use crate::metadata::Metadata;
use crate::report::{render_json, render_markdown};

/// Recent commits inspected by the heuristic start point
const HEURISTIC_WINDOW: usize = 10;

/// Where the analysed range begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPoint {
    /// Given on the command line
    Explicit(String),
    /// Read from the metadata file's `range_start_commit`
    Metadata(String),
    /// A fixed number of commits behind HEAD
    Heuristic(String),
    /// No start known; the most recent commits are analysed instead
    Unbounded,
}

impl StartPoint {
    /// The start commit, if the range is bounded
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        match self {
            Self::Explicit(sha) | Self::Metadata(sha) | Self::Heuristic(sha) => Some(sha),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for StartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(sha) => write!(f, "{sha} (command line)"),
            Self::Metadata(sha) => write!(f, "{sha} (metadata)"),
            Self::Heuristic(sha) => write!(f, "{sha} (recent history)"),
            Self::Unbounded => f.write_str("none"),
        }
    }
}

/// Knobs for an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Commits analysed when the range is unbounded
    pub max_commits: usize,
    /// Commits back from HEAD for the heuristic start point
    pub fallback_depth: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_commits: DEFAULT_MAX_COMMITS,
            fallback_depth: usize::from(DEFAULT_FALLBACK_DEPTH),
        }
    }
}

impl From<&ReportConfig> for AnalyzerOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            max_commits: config.max_commits,
            fallback_depth: usize::from(config.fallback_depth),
        }
    }
}

/// Result of analysing a range
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Where the range started
    pub start: StartPoint,
    /// One record per commit, newest first
    pub records: Vec<ImpactRecord>,
}

impl Analysis {
    /// Render the analysis in `format`
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` or `AppError::Json` if rendering fails.
    pub fn render<Tz>(&self, format: ReportFormat, generated_at: &DateTime<Tz>) -> AppResult<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Ok(match format {
            ReportFormat::Markdown => {
                render_markdown(&self.records, self.start.commit(), generated_at)?
            }
            ReportFormat::Json => render_json(&self.records)?,
        })
    }
}

/// Drives the history-to-records pipeline for one repository
#[derive(Debug, Clone)]
pub struct Analyzer<R> {
    history: History<R>,
    options: AnalyzerOptions,
}

impl<R: GitRunner> Analyzer<R> {
    /// Create an analyzer over `history`
    #[must_use]
    pub fn new(history: History<R>, options: AnalyzerOptions) -> Self {
        Self { history, options }
    }

    /// The underlying history reader
    #[must_use]
    pub fn history(&self) -> &History<R> {
        &self.history
    }

    /// Pick the start of the range
    ///
    /// An explicit commit wins, then the metadata file's range start, then
    /// the commit `fallback_depth` steps back in recent history. When the
    /// history is too short for that the range is unbounded.
    pub fn resolve_start(&self, explicit: Option<&str>, metadata: &Metadata) -> StartPoint {
        if let Some(sha) = explicit.filter(|s| !s.is_empty()) {
            return StartPoint::Explicit(sha.to_string());
        }
        if let Some(sha) = metadata.range_start_commit() {
            return StartPoint::Metadata(sha.to_string());
        }

        let depth = self.options.fallback_depth.max(1);
        let recent = self.history.recent_short_shas(HEURISTIC_WINDOW);
        if recent.len() > depth {
            StartPoint::Heuristic(recent[depth - 1].clone())
        } else {
            StartPoint::Unbounded
        }
    }

    /// Analyse the range selected by `explicit` and `metadata`
    pub fn run(&self, explicit: Option<&str>, metadata: &Metadata) -> Analysis {
        let start = self.resolve_start(explicit, metadata);
        info!(start = %start, "Resolved range start");

        let commits = match start.commit() {
            Some(sha) => self.history.commits_since(sha),
            None => self.history.recent_commits(self.options.max_commits),
        };
        info!(count = commits.len(), "Analysing commits");

        let records = commits
            .into_iter()
            .map(|commit| {
                let files = self.history.commit_files(&commit.sha);
                debug!(sha = %commit.short_sha(), files = files.len(), "Listed changed files");
                ImpactRecord::analyze(commit, files)
            })
            .collect();

        Analysis { start, records }
    }
}
