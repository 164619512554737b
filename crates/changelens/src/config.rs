//! Command line configuration for the changelens binaries
//!
//! Both binaries take the repository path and metadata location from flags
//! or the environment, and share the verbose/quiet logging switches.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::metadata::DEFAULT_METADATA_PATH;

/// Commits analysed when no start commit can be resolved
pub const DEFAULT_MAX_COMMITS: usize = 50;

/// How many commits back the heuristic start point sits
pub const DEFAULT_FALLBACK_DEPTH: u8 = 5;

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human readable markdown digest
    #[default]
    Markdown,
    /// Impact records as a JSON array
    Json,
}

/// Summarise recent git history by the kind of files each commit touched
#[derive(Parser, Debug, Clone)]
#[command(name = "changelens")]
#[command(version, about, long_about = None)]
pub struct ReportConfig {
    /// Commit to start from (exclusive)
    ///
    /// Overrides the range start stored in the metadata file. When neither
    /// is available a commit a few steps behind HEAD is used.
    #[arg(short, long)]
    pub start_commit: Option<String>,

    /// Maximum number of commits when no start commit is known
    #[arg(short, long, default_value_t = DEFAULT_MAX_COMMITS)]
    pub max_commits: usize,

    /// Write the report to this file as well as stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Repository to analyse
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "CHANGELENS_REPO")]
    pub repo: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,

    /// Commits back from HEAD for the fallback start point
    #[arg(long, default_value_t = DEFAULT_FALLBACK_DEPTH, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub fallback_depth: u8,

    /// Metadata file, relative to the repository root unless absolute
    #[arg(long, env = "CHANGELENS_METADATA")]
    pub metadata_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr so the report on stdout stays clean.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            start_commit: None,
            max_commits: DEFAULT_MAX_COMMITS,
            output: None,
            repo: None,
            format: ReportFormat::default(),
            fallback_depth: DEFAULT_FALLBACK_DEPTH,
            metadata_file: None,
            verbose: false,
            quiet: false,
        }
    }
}

impl ReportConfig {
    /// Repository path, using the current directory as default
    #[must_use]
    pub fn repo_path(&self) -> PathBuf {
        repo_or_cwd(self.repo.as_deref())
    }

    /// Metadata file location inside `workdir`
    #[must_use]
    pub fn metadata_path(&self, workdir: &Path) -> PathBuf {
        resolve_metadata(self.metadata_file.as_deref(), workdir)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        log_level(self.verbose, self.quiet)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is given but doesn't exist or isn't a directory
    /// - `max_commits` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_repo(self.repo.as_deref())?;
        if self.max_commits == 0 {
            return Err(ConfigError::InvalidMaxCommits);
        }
        Ok(())
    }
}

/// Advance the metadata file's range start to HEAD
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "changelens-metadata")]
#[command(version, about, long_about = None)]
pub struct MetadataConfig {
    /// Commit the updated metadata file with this message
    #[arg(short, long)]
    pub commit: Option<String>,

    /// Show what would change without writing anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Repository to update
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "CHANGELENS_REPO")]
    pub repo: Option<PathBuf>,

    /// Metadata file, relative to the repository root unless absolute
    #[arg(long, env = "CHANGELENS_METADATA")]
    pub metadata_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl MetadataConfig {
    /// Repository path, using the current directory as default
    #[must_use]
    pub fn repo_path(&self) -> PathBuf {
        repo_or_cwd(self.repo.as_deref())
    }

    /// Metadata file location inside `workdir`
    #[must_use]
    pub fn metadata_path(&self, workdir: &Path) -> PathBuf {
        resolve_metadata(self.metadata_file.as_deref(), workdir)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        log_level(self.verbose, self.quiet)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path is given but doesn't exist or
    /// isn't a directory, or if the commit message is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_repo(self.repo.as_deref())?;
        if self.commit.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(ConfigError::EmptyCommitMessage);
        }
        Ok(())
    }
}

fn repo_or_cwd(repo: Option<&Path>) -> PathBuf {
    repo.map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve_metadata(metadata_file: Option<&Path>, workdir: &Path) -> PathBuf {
    workdir.join(metadata_file.unwrap_or_else(|| Path::new(DEFAULT_METADATA_PATH)))
}

fn log_level(verbose: bool, quiet: bool) -> tracing::Level {
    if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    }
}

fn validate_repo(repo: Option<&Path>) -> Result<(), ConfigError> {
    if let Some(repo) = repo {
        if !repo.exists() {
            return Err(ConfigError::RepoNotFound(repo.to_path_buf()));
        }
        if !repo.is_dir() {
            return Err(ConfigError::RepoNotDirectory(repo.to_path_buf()));
        }
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// `--max-commits 0` would always produce an empty report
    #[error("--max-commits must be at least 1")]
    InvalidMaxCommits,

    /// `--commit` was given an empty message
    #[error("Commit message must not be empty")]
    EmptyCommitMessage,
}
