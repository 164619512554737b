// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelens library
//!
//! Turns a range of git history into a digest of what changed, grouped by
//! the kind of files each commit touched, and keeps the metadata file that
//! remembers where the last digest stopped.
//!
//! The pipeline is linear: [`analyzer::Analyzer`] reads commits through
//! [`changelens_git::History`], [`mod@classify`] sorts each changed path,
//! [`impact::ImpactRecord`] aggregates a commit, [`group::CategoryGrouping`]
//! regroups records and [`report`] renders them.
//!
//! # Example
//!
//! ```no_run
//! use changelens::analyzer::{Analyzer, AnalyzerOptions};
//! use changelens::config::ReportFormat;
//! use changelens::metadata::Metadata;
//! use changelens_git::{History, SystemGit};
//!
//! let git = SystemGit::discover(".").expect("open repo");
//! let analyzer = Analyzer::new(History::new(git), AnalyzerOptions::default());
//! let analysis = analyzer.run(None, &Metadata::default());
//! let report = analysis
//!     .render(ReportFormat::Markdown, &chrono::Local::now())
//!     .expect("render");
//! println!("{report}");
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod group;
pub mod impact;
pub mod logging;
pub mod metadata;
pub mod report;

pub use analyzer::{Analysis, Analyzer, AnalyzerOptions, StartPoint};
pub use classify::{Category, classify};
pub use error::{AppError, AppResult};
pub use impact::ImpactRecord;
pub use metadata::{Metadata, MetadataUpdate};
