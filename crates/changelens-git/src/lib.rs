// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelens-git: git history reading for changelens
//!
//! This library crate runs the `git` executable, parses delimiter-formatted
//! `git log` output into commit records and lists the files each commit
//! touched.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use changelens_git::{History, SystemGit};
//!
//! let git = SystemGit::discover(".").expect("open repo");
//! let history = History::new(git);
//!
//! for commit in history.recent_commits(10) {
//!     let files = history.commit_files(&commit.sha);
//!     println!("{} - {} ({} files)", commit.short_sha(), commit.subject, files.len());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod files;
pub mod history;
pub mod runner;

pub use commit::{Commit, parse_log};
pub use error::GitError;
pub use files::{ChangeKind, FileChange, parse_name_status};
pub use history::{HeadInfo, History};
pub use runner::{GitRunner, SystemGit};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::error::GitError;
    pub use crate::files::{ChangeKind, FileChange};
    pub use crate::history::{HeadInfo, History};
    pub use crate::runner::{GitRunner, SystemGit};
}
