// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git commit records and log parsing
//!
//! Commits are read from `git log` output produced with [`LOG_FORMAT`]. Fields
//! are separated by the ASCII unit separator and commits terminated by the
//! record separator, so subjects and bodies may contain quotes, tabs or
//! newlines without confusing the parser.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Separates the fields of one commit (ASCII unit separator)
pub const FIELD_SEPARATOR: char = '\x1f';

/// Terminates each commit (ASCII record separator)
pub const RECORD_SEPARATOR: char = '\x1e';

/// `--pretty=format:` string matching [`parse_log`]: sha, author name, author
/// email, author date (ISO-like), subject, body
pub const LOG_FORMAT: &str = "%H%x1f%an%x1f%ae%x1f%ai%x1f%s%x1f%b%x1e";

/// Minimum number of fields (sha..subject) for a block to count as a commit
const MIN_FIELDS: usize = 5;

/// Represents a parsed git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Author date as printed by git (`2026-01-17 02:33:06 +0100`)
    pub date: String,
    /// First line of the commit message
    pub subject: String,
    /// Remainder of the commit message, empty when there is none
    pub body: String,
}

impl Commit {
    /// Get the short SHA (first 8 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..8).unwrap_or(&self.sha)
    }

    /// Parse the author date, if git printed it in its ISO-like format
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.date, "%Y-%m-%d %H:%M:%S %z").ok()
    }

    /// Whether the commit carries a non-blank body
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

/// Parse `git log` output produced with [`LOG_FORMAT`]
///
/// Blocks with fewer than five fields are dropped; a missing body becomes an
/// empty string. Malformed input never fails, it just yields fewer commits.
#[must_use]
pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .trim_matches(|c: char| c == RECORD_SEPARATOR || c.is_whitespace())
        .split(RECORD_SEPARATOR)
        .map(|block| block.trim_start_matches(['\r', '\n']))
        .filter(|block| !block.is_empty())
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<Commit> {
    let fields: Vec<&str> = block.split(FIELD_SEPARATOR).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(Commit {
        sha: fields[0].trim().to_string(),
        author: fields[1].to_string(),
        author_email: fields[2].to_string(),
        date: fields[3].to_string(),
        subject: fields[4].to_string(),
        body: fields
            .get(5)
            .map(|body| body.trim_end().to_string())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const SHA_A: &str = "1945ab9c752534e733c38ba0109dc3b741f0a6eb";
    const SHA_B: &str = "c460aeb7fb2d109c17e43de0ce681faec0b7374d";

    fn record(fields: &[&str]) -> String {
        let mut s = fields.join("\x1f");
        s.push(RECORD_SEPARATOR);
        s
    }

    fn sample_commit() -> Commit {
        Commit {
            sha: SHA_A.to_string(),
            author: "Test Author".to_string(),
            author_email: "test@example.com".to_string(),
            date: "2026-01-17 02:33:06 +0100".to_string(),
            subject: "feat(skills): add milestone-creator".to_string(),
            body: "Detailed description here.".to_string(),
        }
    }

    #[test]
    fn test_parse_two_records() {
        let output = format!(
            "{}\n{}",
            record(&[SHA_A, "Ann", "ann@example.com", "2026-01-17 02:33:06 +0100", "first", "body one\n"]),
            record(&[SHA_B, "Bob", "bob@example.com", "2026-01-16 10:00:00 +0000", "second", ""]),
        );

        let commits = parse_log(&output);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, SHA_A);
        assert_eq!(commits[0].author, "Ann");
        assert_eq!(commits[0].author_email, "ann@example.com");
        assert_eq!(commits[0].date, "2026-01-17 02:33:06 +0100");
        assert_eq!(commits[0].subject, "first");
        assert_eq!(commits[0].body, "body one");
        assert_eq!(commits[1].sha, SHA_B);
        assert_eq!(commits[1].subject, "second");
    }

    #[test]
    fn test_empty_body_is_empty_string() {
        let output = record(&[SHA_A, "Ann", "ann@example.com", "2026-01-17", "subject", ""]);
        let commits = parse_log(&output);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].body, "");
    }

    #[test]
    fn test_missing_body_field_defaults_to_empty() {
        let output = record(&[SHA_A, "Ann", "ann@example.com", "2026-01-17", "subject"]);
        let commits = parse_log(&output);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].body, "");
    }

    #[test]
    fn test_short_record_is_dropped() {
        let output = format!(
            "{}{}",
            record(&[SHA_A, "Ann", "ann@example.com", "2026-01-17"]),
            record(&[SHA_B, "Bob", "bob@example.com", "2026-01-16", "kept", ""]),
        );
        let commits = parse_log(&output);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].sha, SHA_B);
    }

    #[test]
    fn test_subject_with_special_characters() {
        let subject = "fix: handle \"quotes\", {braces} and\ttabs";
        let output = record(&[SHA_A, "Ann", "ann@example.com", "2026-01-17", subject, "multi\nline\nbody"]);
        let commits = parse_log(&output);
        assert_eq!(commits[0].subject, subject);
        assert_eq!(commits[0].body, "multi\nline\nbody");
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n\x1e\n").is_empty());
    }

    #[test]
    fn test_short_sha() {
        let commit = sample_commit();
        assert_eq!(commit.short_sha(), "1945ab9c");
    }

    #[test]
    fn test_short_sha_handles_short_input() {
        let mut commit = sample_commit();
        commit.sha = "abc".to_string();
        assert_eq!(commit.short_sha(), "abc");
    }

    #[test]
    fn test_timestamp_parses_git_iso_date() {
        let commit = sample_commit();
        let ts = commit.timestamp().expect("date should parse");
        assert_eq!(ts.to_rfc3339(), "2026-01-17T02:33:06+01:00");
    }

    #[test]
    fn test_timestamp_unparseable() {
        let mut commit = sample_commit();
        commit.date = "yesterday".to_string();
        assert!(commit.timestamp().is_none());
    }

    #[test]
    fn test_has_body() {
        let mut commit = sample_commit();
        assert!(commit.has_body());
        commit.body = "  \n ".to_string();
        assert!(!commit.has_body());
    }

    #[test]
    fn test_commit_json_format() {
        let commit = sample_commit();
        let json = serde_json::to_string_pretty(&commit).expect("serialize");
        assert!(json.contains("\"sha\":"));
        assert!(json.contains("\"author_email\":"));
        assert!(json.contains(SHA_A));
    }
}
