// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Range metadata for the AI assistant instructions file
//!
//! The metadata file records which commit the instructions were last brought
//! up to date with, so the next report only covers newer history. Updating it
//! is a pure transformation: [`Metadata::updated`] returns a new record with
//! the revision bumped and the range start moved to HEAD, and every field it
//! does not own is carried over untouched.
//!
//! # Example
//!
//! ```
//! use changelens::metadata::Metadata;
//! use changelens_git::HeadInfo;
//!
//! let existing = Metadata::from_json(r#"{"doc_revision": 3, "owner": "docs-team"}"#)
//!     .expect("valid metadata");
//! let head = HeadInfo {
//!     commit: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
//!     ..Default::default()
//! };
//!
//! let updated = existing.updated(&head);
//! assert_eq!(updated.doc_revision(), 4);
//! assert_eq!(updated.get("owner"), existing.get("owner"));
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use changelens_git::{GitRunner, HeadInfo, History};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Metadata file location relative to the repository root
pub const DEFAULT_METADATA_PATH: &str = ".github/copilot-instructions.metadata.json";

const DOC_REVISION: &str = "doc_revision";
const RANGE_START_COMMIT: &str = "range_start_commit";
const LAST_UPDATE: &str = "last_update";

/// Errors reading or writing the metadata file
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The file could not be read or written
    #[error("Failed to access metadata file {path}: {source}")]
    Io {
        /// The metadata file path
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON
    #[error("Invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file holds valid JSON that is not an object
    #[error("Metadata must be a JSON object")]
    NotAnObject,
}

/// Author of the commit a metadata update was made at
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Author {
    /// Author name
    pub name: String,
    /// Author email
    pub email: String,
}

/// The `last_update` section of the metadata file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LastUpdate {
    /// HEAD commit at update time
    pub commit: String,
    /// Author of that commit
    pub author: Author,
    /// Author date of that commit
    pub datetime: String,
    /// Branch checked out at update time
    pub branch: String,
}

impl From<&HeadInfo> for LastUpdate {
    fn from(head: &HeadInfo) -> Self {
        Self {
            commit: head.commit.clone(),
            author: Author {
                name: head.author_name.clone(),
                email: head.author_email.clone(),
            },
            datetime: head.datetime.clone(),
            branch: head.branch.clone(),
        }
    }
}

/// The persisted metadata record
///
/// Backed by a JSON object so fields written by other tools survive an
/// update in their original position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    /// Parse a metadata record from JSON text
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Json` for invalid JSON and
    /// `MetadataError::NotAnObject` for JSON that is not an object. A JSON
    /// `null` is accepted as an empty record.
    pub fn from_json(text: &str) -> Result<Self, MetadataError> {
        match serde_json::from_str(text)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            _ => Err(MetadataError::NotAnObject),
        }
    }

    /// Read the metadata file, falling back to an empty record
    ///
    /// A missing file is expected on first use. Unreadable or malformed
    /// files are logged and treated as empty so a corrupt file never blocks
    /// a report.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Metadata file not found, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read metadata file, using defaults");
                return Self::default();
            }
        };

        Self::from_json(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to parse metadata file, using defaults");
            Self::default()
        })
    }

    /// Write the record as pretty-printed JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Io` if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MetadataError> {
        let io_error = |source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut text = self.to_pretty_json()?;
        text.push('\n');
        fs::write(path, text).map_err(io_error)?;
        debug!(path = %path.display(), "Wrote metadata file");
        Ok(())
    }

    /// Pretty-printed JSON with two-space indentation and unescaped Unicode
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn to_pretty_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Raw access to any field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the record has no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Current revision counter
    ///
    /// Absent, null, negative or non-numeric values count as 0. Numeric
    /// strings and floats are accepted and truncated.
    #[must_use]
    pub fn doc_revision(&self) -> u64 {
        match self.0.get(DOC_REVISION) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Commit the last update was made at, if recorded and non-empty
    #[must_use]
    pub fn range_start_commit(&self) -> Option<&str> {
        self.0
            .get(RANGE_START_COMMIT)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The typed `last_update` section, if present and well-formed
    #[must_use]
    pub fn last_update(&self) -> Option<LastUpdate> {
        self.0
            .get(LAST_UPDATE)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// A copy of this record updated to `head`
    ///
    /// Only `doc_revision`, `range_start_commit` and `last_update` change;
    /// every other field is kept as is.
    #[must_use]
    pub fn updated(&self, head: &HeadInfo) -> Self {
        let mut map = self.0.clone();
        map.insert(
            DOC_REVISION.to_string(),
            Value::from(self.doc_revision().saturating_add(1)),
        );
        map.insert(
            RANGE_START_COMMIT.to_string(),
            Value::String(head.commit.clone()),
        );
        map.insert(LAST_UPDATE.to_string(), last_update_value(head));
        Self(map)
    }
}

fn last_update_value(head: &HeadInfo) -> Value {
    let update = LastUpdate::from(head);
    serde_json::json!({
        "commit": update.commit,
        "author": {
            "name": update.author.name,
            "email": update.author.email,
        },
        "datetime": update.datetime,
        "branch": update.branch,
    })
}

/// Options for one metadata update run
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Compute and report the update without writing anything
    pub dry_run: bool,
    /// Commit the metadata file with this message after writing it
    pub commit_message: Option<String>,
}

/// Result of a metadata update run
#[derive(Debug, Clone)]
pub struct MetadataUpdate {
    /// Record as it was on disk (empty if missing or unreadable)
    pub before: Metadata,
    /// Record as written (or as it would be written in a dry run)
    pub after: Metadata,
    /// HEAD at update time
    pub head: HeadInfo,
    /// Whether the record was written to disk
    pub written: bool,
    /// Outcome of the optional commit: `None` when no commit was requested
    pub commit: Option<Result<(), String>>,
}

/// Load, update and save the metadata file at HEAD
///
/// # Errors
///
/// Returns `MetadataError::Io` if the updated record cannot be written. A
/// failed commit does not fail the run; it is reported in
/// [`MetadataUpdate::commit`].
pub fn update_metadata<R: GitRunner>(
    history: &History<R>,
    path: &Path,
    options: &UpdateOptions,
) -> Result<MetadataUpdate, MetadataError> {
    let before = Metadata::load(path);
    let head = history.head_info();
    if head.commit.is_empty() {
        warn!("Could not resolve HEAD, range start will be empty");
    }
    let after = before.updated(&head);

    if options.dry_run {
        info!(path = %path.display(), "Dry run, metadata file left unchanged");
        return Ok(MetadataUpdate {
            before,
            after,
            head,
            written: false,
            commit: None,
        });
    }

    after.save(path)?;
    info!(path = %path.display(), revision = after.doc_revision(), "Metadata updated");

    let commit = options.commit_message.as_deref().map(|message| {
        history
            .commit_path(&path.display().to_string(), message)
            .map_err(|e| {
                warn!(error = %e, "Failed to commit metadata update");
                e.to_string()
            })
    });

    Ok(MetadataUpdate {
        before,
        after,
        head,
        written: true,
        commit,
    })
}

impl fmt::Display for MetadataUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = |sha: &str| sha.get(..8).unwrap_or(sha).to_string();
        let or_na = |s: &str| if s.is_empty() { "N/A".to_string() } else { s.to_string() };

        writeln!(
            f,
            "Document revision: {} → {}",
            self.before.doc_revision(),
            self.after.doc_revision()
        )?;
        writeln!(
            f,
            "Previous range start: {}",
            self.before
                .range_start_commit()
                .map_or_else(|| "N/A".to_string(), short)
        )?;
        writeln!(f, "New range start: {}", or_na(&short(&self.head.commit)))?;
        writeln!(f, "Updated by: {}", or_na(&self.head.author_name))?;
        writeln!(f, "Updated at: {}", or_na(&self.head.datetime))?;
        write!(f, "Branch: {}", or_na(&self.head.branch))?;

        match &self.commit {
            Some(Ok(())) => write!(f, "\nCommitted metadata update"),
            Some(Err(e)) => write!(f, "\nCommit failed: {e}"),
            None => Ok(()),
        }
    }
}
