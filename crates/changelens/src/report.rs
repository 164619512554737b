// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report rendering
//!
//! The markdown report has three parts: a header, highlights grouped by
//! category (a few commits per category) and the full per-commit log. Both
//! lists are capped so a busy range still produces a readable digest.

use std::fmt::{self, Write};
use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone};

use crate::error::{AppError, AppResult};
use crate::group::CategoryGrouping;
use crate::impact::ImpactRecord;

/// Text returned when the analysed range holds no commits
pub const NO_COMMITS: &str = "No commits found.";

/// Commits listed per category before the rest are elided
pub const HIGHLIGHTS_PER_CATEGORY: usize = 3;

/// Files listed per commit before the rest are elided
pub const FILES_PER_COMMIT: usize = 10;

/// Render the markdown report
///
/// # Errors
///
/// Only fails if formatting into the output buffer fails.
pub fn render_markdown<Tz>(
    records: &[ImpactRecord],
    start_commit: Option<&str>,
    generated_at: &DateTime<Tz>,
) -> Result<String, fmt::Error>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if records.is_empty() {
        return Ok(NO_COMMITS.to_string());
    }

    let mut out = String::new();
    write_header(&mut out, records.len(), start_commit, generated_at)?;
    write_highlights(&mut out, &CategoryGrouping::build(records))?;
    write_details(&mut out, records)?;
    Ok(out.trim_end().to_string())
}

/// Render impact records as pretty-printed JSON
///
/// # Errors
///
/// Returns the serializer's error, which does not happen for these types.
pub fn render_json(records: &[ImpactRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Write a rendered report to `path`, creating missing parent directories
///
/// # Errors
///
/// Returns [`AppError::WriteReport`] if a directory or the file cannot be
/// written.
pub fn write_report(path: &Path, report: &str) -> AppResult<()> {
    let write_error = |source| AppError::WriteReport {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, format!("{report}\n")).map_err(write_error)
}

fn write_header<Tz>(
    out: &mut String,
    commit_count: usize,
    start_commit: Option<&str>,
    generated_at: &DateTime<Tz>,
) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    writeln!(out, "# Git Commit History Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "**Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "**Commits**: {commit_count}")?;
    if let Some(start) = start_commit {
        writeln!(out, "**Start commit**: {start}")?;
    }
    writeln!(out)
}

fn write_highlights(out: &mut String, grouping: &CategoryGrouping<'_>) -> fmt::Result {
    if grouping.is_empty() {
        return Ok(());
    }

    writeln!(out, "## Changes by Category")?;
    writeln!(out)?;

    for (category, records) in grouping.iter() {
        writeln!(out, "### {category} ({})", plural(records.len(), "commit"))?;
        writeln!(out)?;

        for record in records.iter().take(HIGHLIGHTS_PER_CATEGORY) {
            let commit = &record.commit;
            writeln!(out, "- **{}** ({})", commit.subject, commit.short_sha())?;
            writeln!(out, "  - Author: {}", commit.author)?;
            writeln!(out, "  - Date: {}", commit.date)?;
            writeln!(out, "  - Impact: {}", record.summary)?;
            writeln!(out)?;
        }

        if records.len() > HIGHLIGHTS_PER_CATEGORY {
            let rest = records.len() - HIGHLIGHTS_PER_CATEGORY;
            writeln!(out, "  ... {rest} more {}", noun(rest, "commit"))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_details(out: &mut String, records: &[ImpactRecord]) -> fmt::Result {
    writeln!(out, "## Detailed Commit Log")?;
    writeln!(out)?;

    for (i, record) in records.iter().enumerate() {
        let commit = &record.commit;
        writeln!(out, "### {}. {}", i + 1, commit.subject)?;
        writeln!(out)?;
        writeln!(out, "- **Commit**: `{}`", commit.sha)?;
        writeln!(out, "- **Author**: {} <{}>", commit.author, commit.author_email)?;
        writeln!(out, "- **Date**: {}", commit.date)?;
        writeln!(out, "- **Impact**: {}", record.summary)?;
        writeln!(out)?;

        if commit.has_body() {
            writeln!(out, "**Description**:")?;
            writeln!(out)?;
            writeln!(out, "{}", commit.body.trim())?;
            writeln!(out)?;
        }

        if !record.files.is_empty() {
            writeln!(out, "**Changed files**:")?;
            writeln!(out)?;
            for file in record.files.iter().take(FILES_PER_COMMIT) {
                writeln!(out, "- {}: `{}`", file.action(), file.path)?;
            }
            if record.files.len() > FILES_PER_COMMIT {
                let rest = record.files.len() - FILES_PER_COMMIT;
                writeln!(out, "- ... {rest} more {}", noun(rest, "file"))?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn plural(count: usize, word: &str) -> String {
    format!("{count} {}", noun(count, word))
}

fn noun(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
